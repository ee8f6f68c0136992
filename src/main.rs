//! Neon Dash entry point
//!
//! The playable build targets the browser, where the input/render/audio
//! collaborators live. Native builds run a short headless demo of the
//! simulation with a naive autopilot.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Dash (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);
    demo_run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM builds are driven by the browser bootstrap via the library crate
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_run(seed: u64) {
    use neon_dash::audio::NullAudio;
    use neon_dash::consts::FRAME_UNIT_MS;
    use neon_dash::sim::{GamePhase, TickInput};
    use neon_dash::{Game, HighScores, Settings};

    let mut game = Game::with_parts(seed, Settings::default(), HighScores::new());
    let mut audio = NullAudio;

    let start = TickInput {
        start: true,
        ..Default::default()
    };
    game.frame(&start, FRAME_UNIT_MS, &mut audio);
    let select = TickInput {
        select: Some(0),
        ..Default::default()
    };
    game.frame(&select, FRAME_UNIT_MS, &mut audio);

    // Ten minutes of frames at most
    let mut frames = 0u32;
    while frames < 36_000 {
        let input = TickInput {
            move_dir: dodge_vector(&game),
            ..Default::default()
        };
        game.frame(&input, FRAME_UNIT_MS, &mut audio);
        frames += 1;
        if game.state.phase == GamePhase::GameOver {
            break;
        }
    }

    let snap = game.snapshot();
    println!(
        "demo over after {frames} frames: score={} best={} modifier={}",
        snap.score,
        snap.high_score,
        snap.modifier_name.unwrap_or("-")
    );
}

/// Steer away from the nearest obstacle ahead, drifting back to the arena
/// center when the lane is clear
#[cfg(not(target_arch = "wasm32"))]
fn dodge_vector(game: &neon_dash::Game) -> glam::Vec2 {
    use glam::Vec2;
    use neon_dash::sim::GamePhase;

    if game.state.phase != GamePhase::Playing {
        return Vec2::ZERO;
    }
    let player = &game.state.player;

    let threat = game
        .state
        .obstacles
        .iter()
        .filter(|o| o.pos.x > player.pos.x - 50.0 && o.pos.x < player.pos.x + 350.0)
        .min_by(|a, b| {
            let da = (a.pos - player.pos).length();
            let db = (b.pos - player.pos).length();
            da.total_cmp(&db)
        });

    match threat {
        Some(obstacle) => {
            // Dodge vertically, nudging slightly back toward spawn depth
            let away_y = if obstacle.pos.y >= player.pos.y {
                -1.0
            } else {
                1.0
            };
            Vec2::new(-0.2, away_y)
        }
        None => {
            let center_y = game.state.arena.y / 2.0;
            let drift = (center_y - player.pos.y) / game.state.arena.y;
            Vec2::new(0.0, drift.clamp(-0.5, 0.5))
        }
    }
}
