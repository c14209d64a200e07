use clap::Parser;
use penplot::cli::{run, Cli};
use penplot::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let output = run(&cli)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
