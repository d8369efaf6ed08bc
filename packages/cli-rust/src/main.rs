use clap::Parser;

use nacform_cli::{init_tracing, run, CliConfig};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_tracing(config.log_format);

    let output = run(&config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
