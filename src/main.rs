//! Catch Game - headless native demo
//!
//! Runs an autopiloted session at the fixed tick rate and persists the high
//! score to `highscore.txt`.
//!
//! Usage: `catch-game [tuning.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use catch_game::audio::LogSink;
    use catch_game::consts::TICK_RATE;
    use catch_game::sim::GamePhase;
    use catch_game::{FileStore, GameEvent, Runner, Tuning, platform};

    platform::init_logging();
    log::info!("Catch Game (native) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };
    let seconds: u32 = match args.next().map(|s| s.parse()) {
        Some(Ok(secs)) => secs,
        Some(Err(e)) => {
            log::warn!("Bad duration ({}), using 120s", e);
            120
        }
        None => 120,
    };

    let seed = platform::random_seed();
    let mut runner = match Runner::new(seed, tuning, FileStore::default(), LogSink) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            std::process::exit(1);
        }
    };
    runner.set_idle_mode(true);

    let frames = seconds * TICK_RATE as u32;
    let frame_dt = 1.0 / TICK_RATE;
    let mut games = 0u32;
    let mut best = 0u64;
    let mut catches = 0u32;
    let mut pickups = 0u32;

    for _ in 0..frames {
        for event in runner.update(frame_dt) {
            match &event {
                GameEvent::Caught { .. } => catches += 1,
                GameEvent::PowerUpCollected(_) => pickups += 1,
                GameEvent::PhaseChanged(GamePhase::GameOver) => {
                    games += 1;
                    best = best.max(runner.session().score);
                }
                _ => {}
            }
            if log::log_enabled!(log::Level::Trace) {
                match serde_json::to_string(&event) {
                    Ok(json) => log::trace!("{}", json),
                    Err(e) => log::warn!("Failed to serialize event: {}", e),
                }
            }
        }
    }

    let session = runner.session();
    best = best.max(session.score);
    let hud = runner.frame().hud;
    println!("seed:        {}", session.seed);
    println!("simulated:   {}s", seconds);
    println!("games over:  {}", games);
    println!("catches:     {}", catches);
    println!("power-ups:   {}", pickups);
    println!("best score:  {}", best);
    println!("{}", hud.high_score);
    println!("final phase: {:?} ({})", session.phase, hud.score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive the library's Runner directly
}
