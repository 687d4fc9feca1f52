use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use raylib::prelude::*;

use dcim_scrub::config::Args;
use dcim_scrub::engine::ScrubEngine;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Args::parse().into_config().context("Invalid arguments")?;
    let sequence = config
        .frames
        .build()
        .context("Failed to build the frame sequence")?;
    info!(
        "{} frames, first {:?}",
        sequence.len(),
        sequence.get(0).map(|p| p.display().to_string())
    );

    let (mut rl, thread) = raylib::init()
        .size(config.width, config.height)
        .title("DCIM — Infrastructure Intelligence")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(config.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut engine = ScrubEngine::new(sequence, &config);
    let mut announced = false;

    // --- Main Loop ---
    while !rl.window_should_close() {
        engine.update(&mut rl, &thread);
        if engine.is_ready() && !announced {
            info!("Preloading finished, scroll to scrub");
            announced = true;
        }

        let time = rl.get_time();
        let mut d = rl.begin_drawing(&thread);
        engine.draw(&mut d, time);
    }

    // Unmount before the window (and its GL context) goes away
    drop(engine);
    Ok(())
}
