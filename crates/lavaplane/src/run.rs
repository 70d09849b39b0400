use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::app::{App, AppOptions};
use crate::cli::{parse_window_size, Cli};

fn initialise_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn run(args: Cli) -> Result<()> {
    initialise_tracing(args.verbose);

    // Validate the size before touching the display server so a bad
    // argument fails cleanly even on headless machines.
    let size = args
        .size
        .as_deref()
        .map(parse_window_size)
        .transpose()
        .context("invalid --size argument")?;

    let options = AppOptions {
        size,
        speed: args.speed,
        grain: args.grain,
    };

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(options);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;
    Ok(())
}
