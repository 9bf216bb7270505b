use clap::Parser;
use climate_archiver::cli::{run, Cli};
use climate_archiver::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
