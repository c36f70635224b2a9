//! Frame rendering through a minimal drawing surface.
//!
//! `render_frame` only reads the session. The browser implements
//! [`RenderSurface`] over a 2d canvas context; tests record the calls.

use crate::game::{Obstacle, ObstacleKind, PlayerState, Rect, Session, Theme};

/// Pixel-space drawing primitives, origin top-left.
pub trait RenderSurface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn fill_arc(&mut self, cx: f64, cy: f64, radius: f64, color: &str);
    fn fill_path(&mut self, points: &[(f64, f64)], color: &str);
}

struct Palette {
    sky: &'static str,
    ground: &'static str,
    ground_mark: &'static str,
    rock: &'static str,
    cactus: &'static str,
    bush: &'static str,
    bird: &'static str,
    missile: &'static str,
    flame: &'static str,
    impact: &'static str,
}

const DAY: Palette = Palette {
    sky: "#f4ecd8",
    ground: "#95a5a6",
    ground_mark: "#7f8c8d",
    rock: "#8b4513",
    cactus: "#3a7d44",
    bush: "#5b8c3a",
    bird: "#34495e",
    missile: "#555b66",
    flame: "#f39c12",
    impact: "#e74c3c",
};

const NIGHT: Palette = Palette {
    sky: "#1b2333",
    ground: "#4a5560",
    ground_mark: "#36404a",
    rock: "#6e4a2e",
    cactus: "#2f5e3a",
    bush: "#3f6330",
    bird: "#c7d0db",
    missile: "#9aa3ad",
    flame: "#f5b041",
    impact: "#ff6b5b",
};

const FEZ: &str = "#bd1e2c";
const SKIN: &str = "#f5d6b4";
const COAT: &str = "#2c3e50";
const INK: &str = "black";

const GROUND_THICKNESS: f64 = 5.0;
const GROUND_MARK_SPACING: f64 = 40.0;

fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Day => &DAY,
        Theme::Night => &NIGHT,
    }
}

/// Draws background, ground, obstacles, impact marker and the runner.
pub fn render_frame<S: RenderSurface + ?Sized>(session: &Session, surface: &mut S) {
    let world = &session.config().world;
    let pal = palette(session.theme());

    surface.clear(world.width, world.height);
    surface.fill_rect(Rect::new(0.0, 0.0, world.width, world.height), pal.sky);
    draw_ground(surface, world.width, world.ground_y, session.distance(), pal);

    for obstacle in session.obstacles() {
        draw_obstacle(surface, obstacle, pal);
    }
    if let Some(hit) = session.impact() {
        draw_obstacle(surface, hit, pal);
        draw_impact(surface, hit.bounds(), pal);
    }

    let player = session.player();
    draw_runner(surface, player.bounds(), player.state() == PlayerState::Ducking);
}

fn draw_ground<S: RenderSurface + ?Sized>(surface: &mut S, width: f64, ground_y: f64, distance: f64, pal: &Palette) {
    surface.fill_rect(Rect::new(0.0, ground_y, width, GROUND_THICKNESS), pal.ground);
    // Marks scroll with the world so motion reads even on an empty stretch.
    let mut x = -(distance % GROUND_MARK_SPACING);
    while x < width {
        surface.fill_rect(Rect::new(x, ground_y + GROUND_THICKNESS + 3.0, 12.0, 2.0), pal.ground_mark);
        x += GROUND_MARK_SPACING;
    }
}

fn draw_runner<S: RenderSurface + ?Sized>(surface: &mut S, b: Rect, ducking: bool) {
    if ducking {
        // Leaning forward: head at the leading edge.
        let head_x = b.right() - 12.0;
        let head_y = b.y + 11.0;
        surface.fill_rect(Rect::new(b.x, b.y + 12.0, b.w - 10.0, b.h - 12.0), COAT);
        surface.fill_arc(head_x, head_y, 11.0, SKIN);
        surface.fill_arc(head_x + 4.0, head_y - 9.0, 8.0, FEZ);
        surface.fill_arc(head_x + 4.0, head_y - 2.0, 2.0, INK);
        surface.fill_rect(Rect::new(head_x - 2.0, head_y + 4.0, 12.0, 3.0), INK);
    } else {
        let cx = b.x + b.w / 2.0;
        let head_y = b.y + 18.0;
        surface.fill_rect(Rect::new(b.x, b.y + 28.0, b.w, b.h - 28.0), COAT);
        surface.fill_arc(cx, head_y, 12.0, SKIN);
        surface.fill_arc(cx, b.y + 6.0, 10.0, FEZ);
        surface.fill_arc(cx - 5.0, head_y - 3.0, 2.0, INK);
        surface.fill_arc(cx + 5.0, head_y - 3.0, 2.0, INK);
        surface.fill_rect(Rect::new(cx - 9.0, head_y + 4.0, 18.0, 3.0), INK);
    }
}

fn draw_obstacle<S: RenderSurface + ?Sized>(surface: &mut S, o: &Obstacle, pal: &Palette) {
    let b = o.bounds();
    match o.kind() {
        ObstacleKind::Rock => surface.fill_path(
            &[
                (b.x, b.bottom()),
                (b.x + 4.0, b.y + 7.0),
                (b.x + 12.0, b.y),
                (b.x + 24.0, b.y + 4.0),
                (b.right(), b.bottom()),
            ],
            pal.rock,
        ),
        ObstacleKind::Cactus => {
            let trunk_x = b.x + b.w / 2.0 - 4.0;
            surface.fill_rect(Rect::new(trunk_x, b.y, 8.0, b.h), pal.cactus);
            surface.fill_rect(Rect::new(b.x, b.y + 14.0, 4.0, 14.0), pal.cactus);
            surface.fill_rect(Rect::new(b.x, b.y + 24.0, trunk_x - b.x, 4.0), pal.cactus);
            surface.fill_rect(Rect::new(b.right() - 4.0, b.y + 8.0, 4.0, 12.0), pal.cactus);
            surface.fill_rect(Rect::new(trunk_x + 8.0, b.y + 16.0, b.right() - trunk_x - 8.0, 4.0), pal.cactus);
        }
        ObstacleKind::Bush => {
            let r = b.h / 2.0;
            surface.fill_arc(b.x + r, b.bottom() - r, r, pal.bush);
            surface.fill_arc(b.x + b.w / 2.0, b.y + r, r, pal.bush);
            surface.fill_arc(b.right() - r, b.bottom() - r, r, pal.bush);
        }
        ObstacleKind::Bird { .. } | ObstacleKind::SwoopingBird { .. } => {
            let mid = b.y + b.h / 2.0;
            surface.fill_path(&[(b.x, mid), (b.right(), mid - 3.0), (b.right(), mid + 4.0)], pal.bird);
            surface.fill_path(&[(b.x + 10.0, mid), (b.x + 18.0, b.y), (b.x + 24.0, mid)], pal.bird);
        }
        ObstacleKind::Missile { .. } => {
            surface.fill_rect(Rect::new(b.x + 8.0, b.y + 2.0, b.w - 14.0, b.h - 4.0), pal.missile);
            surface.fill_path(&[(b.x, b.y + b.h / 2.0), (b.x + 8.0, b.y + 2.0), (b.x + 8.0, b.bottom() - 2.0)], pal.missile);
            surface.fill_path(
                &[(b.right() - 6.0, b.y), (b.right(), b.y + b.h / 2.0), (b.right() - 6.0, b.bottom())],
                pal.flame,
            );
        }
    }
}

fn draw_impact<S: RenderSurface + ?Sized>(surface: &mut S, b: Rect, pal: &Palette) {
    let (cx, cy) = (b.x + b.w / 2.0, b.y + b.h / 2.0);
    let outer = b.w.max(b.h) * 0.8;
    let inner = outer * 0.45;
    let points: Vec<(f64, f64)> = (0..16)
        .map(|i| {
            let angle = f64::from(i) * std::f64::consts::TAU / 16.0;
            let r = if i % 2 == 0 { outer } else { inner };
            (cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect();
    surface.fill_path(&points, pal.impact);
}
