//! Skyhop headless runner
//!
//! Plays a level with the autopilot at a fixed frame rate and logs the
//! game's events. Usage: `skyhop [LEVEL] [SECONDS]`.
//!
//! Environment:
//! - `RUST_LOG` log filter (e.g. `skyhop=debug`)
//! - `SKYHOP_DATA_DIR` progress directory (default `.skyhop`)
//! - `SKYHOP_TUNING` tuning file (default `skyhop.json`)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use skyhop::consts::SIM_DT;
    use skyhop::persistence::FileStorage;
    use skyhop::sim::{GameEvent, autopilot};
    use skyhop::{Game, Phase, Tuning};

    env_logger::init();
    log::info!("Skyhop (headless) starting...");

    let mut args = std::env::args().skip(1);
    let level: u8 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);
    let seconds: f32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(60.0);

    let tuning_path = std::env::var("SKYHOP_TUNING").unwrap_or_else(|_| "skyhop.json".into());
    let data_dir = std::env::var("SKYHOP_DATA_DIR").unwrap_or_else(|_| ".skyhop".into());

    let tuning = Tuning::load_or_default(&tuning_path);
    let storage = FileStorage::new(data_dir);
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut game = Game::new(tuning, storage, seed);
    if let Err(e) = game.start_level(level) {
        eprintln!("Cannot start level {level}: {e}");
        std::process::exit(1);
    }
    // No renderer: the flat fallback color is all there is
    game.backdrop_loaded(game.state().level, false);

    let frames = (seconds / SIM_DT) as u64;
    for _ in 0..frames {
        let input = autopilot(game.state(), game.level());
        game.update(&input, SIM_DT);

        for event in game.drain_events() {
            match event {
                GameEvent::Jump | GameEvent::CoinCollected { .. } => log::trace!("{event:?}"),
                _ => log::info!("{event:?}"),
            }
        }

        if matches!(game.phase(), Phase::GameOver | Phase::AllComplete) {
            break;
        }
    }

    let state = game.state();
    println!(
        "level {} | phase {:?} | score {} | coins {} | lives {} | {:.1}s",
        state.level,
        game.phase(),
        state.score,
        state.coins,
        state.lives,
        state.level_time
    );
    for id in skyhop::LevelId::all() {
        let progress = game.progress();
        let best = progress
            .best_time(id)
            .map(|s| format!("{s}s"))
            .unwrap_or_else(|| "-".into());
        println!(
            "  level {id}: {} stars, best {best}{}",
            progress.stars(id),
            if progress.is_unlocked(id) { "" } else { " (locked)" }
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web builds drive `Game` from the host page
}
