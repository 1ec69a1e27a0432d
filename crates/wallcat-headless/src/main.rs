mod error;
mod script;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use wallcat_core::events::GameEvent;
use wallcat_core::game_trait::Simulation;
use wallcat_platformer::Level;
use wallcat_platformer::config::PlatformerConfig;

use error::RunError;
use script::InputScript;

/// Ten seconds at the default tick rate.
const DEFAULT_IDLE_TICKS: u32 = 625;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn run() -> Result<(), RunError> {
    let mut args = std::env::args_os().skip(1);
    let level_path = args.next().map(PathBuf::from).ok_or(RunError::Usage)?;
    let script = match args.next() {
        Some(path) => InputScript::load(&PathBuf::from(path))?,
        None => InputScript::idle(DEFAULT_IDLE_TICKS),
    };

    let config = PlatformerConfig::load();
    let mut level = Level::load(&level_path, config)?;
    tracing::info!(
        level = %level_path.display(),
        gems = level.gems().len(),
        ticks = script.total_ticks(),
        "Replaying input script"
    );

    let trace_frames = std::env::var("WALLCAT_TRACE_FRAMES").is_ok_and(|v| v == "1");
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let move_speed = level.config().move_speed;
    let summary = replay(
        &mut level,
        &script,
        move_speed,
        trace_frames.then_some(&mut out),
    )?;

    tracing::info!(
        ticks = summary.ticks,
        elapsed_ms = level.elapsed_ms(),
        gems_left = level.gems().len(),
        cleared = summary.cleared,
        fell_out = summary.fell_out,
        "Replay finished"
    );
    Ok(())
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Summary {
    ticks: u64,
    cleared: bool,
    fell_out: bool,
}

/// Feed every scripted input to the level, stopping early once it completes.
/// Held walk keys move at `move_speed`. When `frames` is set, one JSON frame
/// per tick is written to it.
fn replay<S, W>(
    sim: &mut S,
    script: &InputScript,
    move_speed: i32,
    mut frames: Option<&mut W>,
) -> Result<Summary, RunError>
where
    S: Simulation,
    S::Frame: serde::Serialize,
    W: Write,
{
    let mut summary = Summary::default();
    for input in script.inputs(move_speed) {
        if sim.is_complete() {
            break;
        }
        for event in sim.update(input) {
            match event {
                GameEvent::Cue(cue) => tracing::debug!(%cue, "Cue"),
                GameEvent::GemCollected { remaining } => {
                    tracing::info!(remaining, "Gem collected");
                },
                GameEvent::LevelCleared => summary.cleared = true,
                GameEvent::FellOut => summary.fell_out = true,
            }
        }
        summary.ticks += 1;

        if let Some(out) = frames.as_deref_mut() {
            serde_json::to_writer(&mut *out, &sim.frame())?;
            out.write_all(b"\n").map_err(RunError::Output)?;
        }
    }
    Ok(summary)
}
