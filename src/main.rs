//! Billiards headless demo
//!
//! Racks a table, breaks, steps frames until everything rests and logs where
//! the balls ended up. Usage: `billiards [seed] [settings.json]`
//! (set `RUST_LOG=debug` for more detail).

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use billiards::consts::FRAME_DT;
    use billiards::sim::run_until_settled;
    use billiards::{Settings, TableState};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Invalid seed {:?}, using 0", arg);
            0
        }),
        None => 0,
    };
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    log::info!("Billiards (native) starting, seed {}", seed);
    let mut state = TableState::standard(settings, seed);

    let target = state.rack_anchor;
    if !state.strike_cue(target) {
        log::error!("Could not strike the cue ball");
        return;
    }

    match run_until_settled(&mut state, FRAME_DT, 60 * 120) {
        Some(frames) => log::info!(
            "Table settled after {} frames ({:.1}s)",
            frames,
            frames as f32 * FRAME_DT
        ),
        None => log::warn!("Table did not settle"),
    }

    for ball in &state.balls {
        let on_table = if state.geometry.contains(ball.position) {
            ""
        } else {
            " (off table)"
        };
        println!(
            "ball {:>2} {:?}: ({:>8.1}, {:>8.1}){}",
            ball.number,
            ball.kind(),
            ball.position.x,
            ball.position.y,
            on_table
        );
    }
    if let Some(min) = state.min_separation() {
        println!("closest pair: {:.2}", min);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by a host render loop on the web
}
