// Native integration tests for the simulation core.
// These drive `Session` directly through the public API; no browser needed.

use fez_runner::game::{
    GameConfig, GameState, HIGH_BIRD_ALTITUDE, LOW_BIRD_ALTITUDE, ObstacleKind, PlayerState, ScoringPolicy, Session, SessionEvent,
};

fn steady_config() -> GameConfig {
    let mut cfg = GameConfig::default();
    cfg.difficulty.speed_per_tick = 0.0;
    cfg.difficulty.milestone_bonus = 0.0;
    cfg.spawn.min_gap = 1.0e9;
    cfg.spawn.max_gap = 1.0e9;
    cfg
}

#[test]
fn distance_scoring_matches_closed_form() {
    let mut cfg = steady_config();
    cfg.scoring.policy = ScoringPolicy::PerDistance { units_per_point: 30.0 };
    let mut s = Session::with_seed(cfg, 0, 1);
    s.start();
    let n = 250;
    for _ in 0..n {
        s.tick();
    }
    let speed = cfg.difficulty.initial_speed;
    assert_eq!(s.distance(), n as f64 * speed);
    assert_eq!(s.score(), (n as f64 * speed / 30.0).floor() as u32);
    assert!(s.is_playing());
}

#[test]
fn obstacle_award_lands_on_the_crossing_tick() {
    let cfg = steady_config();
    let mut s = Session::with_seed(cfg, 0, 1);
    s.start();

    // Nothing reaches the player on an empty track.
    for _ in 0..50 {
        s.tick();
    }
    assert_eq!(s.score(), 0);

    s.inject_obstacle(ObstacleKind::Bird { altitude: HIGH_BIRD_ALTITUDE });
    let (width, _) = ObstacleKind::Bird { altitude: HIGH_BIRD_ALTITUDE }.size();
    let speed = cfg.difficulty.initial_speed;
    let player_x = cfg.world.player_x;
    let crossing = (1..)
        .find(|k| cfg.world.width + width - speed * f64::from(*k) < player_x)
        .expect("bird eventually passes");

    let ScoringPolicy::PerObstacle { award } = cfg.scoring.policy else {
        panic!("default policy scores obstacles");
    };
    for k in 1..crossing {
        s.tick();
        assert_eq!(s.score(), 0, "scored early at tick {k}");
    }
    s.tick();
    assert_eq!(s.score(), award);
    for _ in 0..100 {
        s.tick();
        assert_eq!(s.score(), award);
    }
    assert!(s.is_playing());
}

#[test]
fn scroll_speed_never_decreases_and_resets_on_restart() {
    let mut cfg = GameConfig::default();
    cfg.difficulty.speed_per_tick = 0.01;
    cfg.scoring.policy = ScoringPolicy::PerDistance { units_per_point: 5.0 };
    cfg.spawn.min_gap = 1.0e9;
    cfg.spawn.max_gap = 1.0e9;
    let mut s = Session::with_seed(cfg, 0, 3);
    s.start();
    let mut last = s.speed();
    for _ in 0..2000 {
        s.tick();
        assert!(s.speed() >= last);
        last = s.speed();
    }
    assert_eq!(last, cfg.difficulty.max_speed);
    s.restart();
    assert_eq!(s.speed(), cfg.difficulty.initial_speed);
}

#[test]
fn restart_matches_a_fresh_session() {
    let cfg = GameConfig::default();
    let mut played = Session::with_seed(cfg, 0, 9);
    played.start();
    // No input: the first ground hazard ends the run.
    for _ in 0..5000 {
        played.tick();
        if !played.is_playing() {
            break;
        }
    }
    assert_eq!(played.state(), GameState::GameOver);
    assert!(played.impact().is_some());

    played.restart();
    let mut fresh = Session::with_seed(cfg, played.best_score(), 77);
    fresh.start();

    assert_eq!(played.snapshot(), fresh.snapshot());
    assert!(played.obstacles().is_empty());
    assert!(played.impact().is_none());
    assert_eq!(played.player().state(), PlayerState::Grounded);
    assert_eq!(played.player().y(), cfg.rest_y());
    assert_eq!(played.distance(), 0.0);
}

#[test]
fn best_score_survives_restart() {
    let mut cfg = steady_config();
    cfg.scoring.policy = ScoringPolicy::PerDistance { units_per_point: 10.0 };
    let mut s = Session::with_seed(cfg, 3, 1);
    s.start();
    for _ in 0..40 {
        s.tick();
    }
    s.inject_obstacle(ObstacleKind::Cactus);
    while s.is_playing() {
        s.tick();
    }
    let final_score = s.score();
    assert!(final_score > 3);
    let events = s.drain_events();
    assert!(events.contains(&SessionEvent::GameOver { final_score, new_best: true }));
    assert!(events.contains(&SessionEvent::StateChanged(GameState::GameOver)));

    s.restart();
    assert_eq!(s.best_score(), final_score);
    assert_eq!(s.score(), 0);
}

#[test]
fn ducking_under_a_low_bird_survives() {
    let cfg = steady_config();
    let mut s = Session::with_seed(cfg, 0, 1);
    s.start();
    s.inject_obstacle(ObstacleKind::Bird { altitude: LOW_BIRD_ALTITUDE });
    s.set_ducking(true);
    for _ in 0..250 {
        s.tick();
    }
    assert!(s.is_playing());
    assert!(s.score() > 0);

    // Standing up into the same bird ends the run.
    let mut s = Session::with_seed(cfg, 0, 1);
    s.start();
    s.inject_obstacle(ObstacleKind::Bird { altitude: LOW_BIRD_ALTITUDE });
    for _ in 0..250 {
        s.tick();
    }
    assert_eq!(s.state(), GameState::GameOver);
}
