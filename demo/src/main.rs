//! pathgrid: watch weighted A* explore a grid in the terminal.
//!
//! ```text
//! pathgrid [--slot FILE] [--config FILE] [--seed N] [--save] [--fast]
//! ```
//!
//! With `--slot`, the grid saved in FILE is loaded (a random map is painted
//! when the file does not exist yet); `--save` writes the grid back after the
//! run. `--fast` skips the animation delays.

mod render;
mod scatter;

use std::path::PathBuf;

use pathgrid_core::JsonFileStorage;
use pathgrid_session::{
    Immediate, Outcome, Scheduler, Session, SessionConfig, SleepScheduler, Tick,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use render::Screen;
use scatter::{ScatterRule, scatter};

#[derive(Debug, Default)]
struct Args {
    slot: Option<PathBuf>,
    config: Option<PathBuf>,
    seed: Option<u64>,
    save: bool,
    fast: bool,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--slot" => args.slot = Some(it.next().ok_or("--slot needs a file")?.into()),
            "--config" => args.config = Some(it.next().ok_or("--config needs a file")?.into()),
            "--seed" => args.seed = Some(it.next().ok_or("--seed needs a number")?.parse()?),
            "--save" => args.save = true,
            "--fast" => args.fast = true,
            other => return Err(format!("unknown argument {other:?}").into()),
        }
    }
    Ok(args)
}

fn load_config(args: &Args) -> Result<SessionConfig, Box<dyn std::error::Error>> {
    match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(SessionConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = parse_args()?;
    let mut session = Session::new(load_config(&args)?)?;
    let mut storage = args.slot.as_ref().map(JsonFileStorage::new);

    let loaded = match &storage {
        Some(slot) => session.load(slot)?,
        None => false,
    };
    if !loaded || session.grid().start().is_none() || session.grid().end().is_none() {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        scatter(&mut session, &mut rng, ScatterRule::default())?;
    }

    let mut scheduler: Box<dyn Scheduler> = if args.fast {
        Box::new(Immediate)
    } else {
        Box::new(SleepScheduler)
    };

    let outcome = {
        let mut screen = Screen::enter()?;
        let mut draw_err = None;
        let outcome = session.run(scheduler.as_mut(), |grid, tick| {
            let status = match tick {
                Tick::Explored(p) => format!("exploring {p}"),
                Tick::PathFound(path) => format!("path found, cost {}", path.cost()),
                Tick::NoPathFound => "no path found".to_string(),
                Tick::Revealed(p) => format!("path through {p}"),
                Tick::Idle => String::new(),
            };
            if let Err(e) = screen.draw(grid, &status) {
                draw_err.get_or_insert(e);
            }
        })?;
        if let Some(e) = draw_err {
            return Err(e.into());
        }
        outcome
    };

    print!("{}", render::plain(session.grid()));
    match &outcome {
        Outcome::PathFound(path) => println!(
            "path of {} moves from {} to {}, cost {}",
            path.edges(),
            path.start(),
            path.end(),
            path.cost()
        ),
        Outcome::NoPathFound => println!("no path found"),
    }

    if args.save {
        match storage.as_mut() {
            Some(slot) => {
                session.save(slot)?;
                log::info!("grid saved to {}", slot.path().display());
            }
            None => log::warn!("--save ignored: no --slot given"),
        }
    }
    Ok(())
}

