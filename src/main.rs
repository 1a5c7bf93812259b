use anyhow::Context;
use clap::Parser;
use solaris_dashboard::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => Ok(()),
        Err(e) if e.is_warning() => {
            eprintln!("⚠️  {}", e);
            std::process::exit(2);
        }
        Err(e) => Err(e).context("solaris failed"),
    }
}
