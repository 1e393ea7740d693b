//! Valo Dash entry point
//!
//! Native builds run a headless session driven by the autopilot, which is
//! handy for balancing: point `--tuning` at a JSON file and watch the log.
//!
//! ```text
//! valo-dash [--tuning FILE] [--settings FILE] [--seed N] [--seconds N] [--json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;
    use std::sync::Arc;

    use valo_dash::audio::{AudioManager, LogAudio};
    use valo_dash::consts::FRAME_DT;
    use valo_dash::highscores::LocalLeaderboard;
    use valo_dash::sim::{GameEvent, GameState, autopilot};
    use valo_dash::{Session, Settings, Tuning};

    env_logger::init();
    log::info!("Valo Dash (headless) starting...");

    let mut tuning_path: Option<PathBuf> = None;
    let mut settings_path = PathBuf::from("valo_dash_settings.json");
    let mut seed_arg: Option<u64> = None;
    let mut seconds: f32 = 120.0;
    let mut json = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tuning" => tuning_path = args.next().map(PathBuf::from),
            "--settings" => {
                if let Some(p) = args.next() {
                    settings_path = PathBuf::from(p);
                }
            }
            "--seed" => seed_arg = args.next().and_then(|s| s.parse().ok()),
            "--seconds" => {
                seconds = args
                    .next()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(seconds)
            }
            "--json" => json = true,
            other => log::warn!("Ignoring unknown argument {other}"),
        }
    }

    let settings = Settings::load(&settings_path);
    let tuning = tuning_path
        .as_deref()
        .map(Tuning::load)
        .unwrap_or_default();
    let seed = seed_arg.or(settings.seed).unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Game initialized with seed: {seed}");

    let leaderboard = Arc::new(LocalLeaderboard::new(settings.leaderboard_path.clone()));
    let audio = AudioManager::from_settings(LogAudio, &settings);
    let state = GameState::with_tuning(seed, tuning).unwrap_or_else(|e| {
        log::warn!("Rejected tuning ({e}), using defaults");
        GameState::new(seed)
    });
    let mut session = Session::new(
        state,
        audio,
        leaderboard,
        settings.player_name.clone(),
    );

    let frames = (seconds / FRAME_DT).ceil() as u64;
    for _ in 0..frames {
        for command in autopilot(session.state()) {
            session.push(command);
        }
        let result = session.frame(FRAME_DT);

        for event in &result.events {
            match event {
                GameEvent::ChaseStarted => log::info!("Chase phase reached"),
                GameEvent::GameOver { final_score } => log::info!("Game over, score {final_score}"),
                other => log::debug!("{other:?}"),
            }
        }
        if json {
            match serde_json::to_string(&result.snapshot) {
                Ok(line) => println!("{line}"),
                Err(e) => log::warn!("Snapshot not serializable: {e}"),
            }
        }
        if !result.snapshot.alive {
            break;
        }
    }

    let state = session.state();
    println!(
        "Final score {} ({:?}, {:.1}s, {})",
        state.final_score(),
        state.phase,
        state.elapsed,
        if state.alive { "still running" } else { "dead" }
    );

    session.flush_scores();
    if let Some(top) = session.standings() {
        println!("Leaderboard:");
        for (rank, entry) in top.iter().enumerate() {
            println!(
                "{:>2}. {:<12} {:>8}{}",
                rank + 1,
                entry.name,
                entry.score,
                if entry.reached_chase { "  (chase)" } else { "" }
            );
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `Session` directly
}
