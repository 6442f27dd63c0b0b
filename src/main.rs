//! emuchip: run a CHIP-8 ROM in a window.
//!
//! ```text
//! emuchip roms/ibm-logo.ch8 --ips 700 --scale 16
//! ```
//!
//! Logging goes through `RUST_LOG`; `RUST_LOG=emuchip=trace` prints every
//! executed instruction.

use std::{path::PathBuf, time::Instant};

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{error, info};

use emuchip::{
    config::{DEFAULT_FRAME_RATE, DEFAULT_INSTRUCTIONS_PER_SECOND, DEFAULT_SCALE},
    frontend::Frontend,
    Config, Emulator, Quirks, StepOutcome,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    #[arg(long, default_value_t = DEFAULT_INSTRUCTIONS_PER_SECOND, help = "Instructions per second")]
    ips: u32,

    #[arg(long, default_value_t = DEFAULT_FRAME_RATE, help = "Frame rate in frames per second")]
    frame_rate: u32,

    #[arg(long, default_value_t = DEFAULT_SCALE, help = "Window scale factor")]
    scale: u8,

    #[arg(long, help = "Seed for the CXNN random generator")]
    seed: Option<u64>,

    #[arg(long, help = "8XY6/8XYE shift VY into VX")]
    shift_vy: bool,

    #[arg(long, help = "FX55/FX65 advance I past the last register")]
    load_store_increment: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            instructions_per_second: self.ips,
            frame_rate: self.frame_rate,
            scale: self.scale,
            seed: self.seed,
            quirks: Quirks {
                shift_uses_vy: self.shift_vy,
                load_store_increments_index: self.load_store_increment,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("emuchip=info"))
        .init();

    let args = Args::parse();
    let config = args.config();

    let rom = std::fs::read(&args.rom)
        .with_context(|| format!("failed to read rom {}", args.rom.display()))?;
    let mut emu = Emulator::with_rom(&config, &rom)?;
    let mut frontend = Frontend::new(config.scale, config.frame_rate)
        .map_err(|e| anyhow!("failed to open window: {e}"))?;

    info!(
        "running {} at {} instructions/s, {} per frame",
        args.rom.display(),
        config.instructions_per_second,
        config.cycles_per_frame()
    );

    while frontend.is_running() {
        for key in frontend.released_keys() {
            emu.key_up(key);
        }
        for key in frontend.pressed_keys() {
            emu.key_down(key);
        }
        emu.sync_timers(Instant::now());

        for _ in 0..config.cycles_per_frame() {
            match emu.step() {
                Ok(StepOutcome::Executed(_)) => {}
                Ok(StepOutcome::AwaitingKey) => break,
                Err(e) => {
                    error!("{e}");
                    error!("{}", emu.dump_registers());
                    return Err(e.into());
                }
            }
        }

        frontend.set_beep(emu.sound_active());
        if emu.take_redraw() {
            frontend
                .draw(emu.frame().pixels())
                .map_err(|e| anyhow!("failed to draw frame: {e}"))?;
        } else {
            frontend.update();
        }
    }

    info!("window closed, stopping");
    Ok(())
}
