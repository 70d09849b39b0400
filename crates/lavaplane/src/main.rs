mod app;
mod cli;
mod panel;
mod run;
mod session;

use anyhow::Result;

fn main() -> Result<()> {
    let args = cli::parse();
    run::run(args)
}
