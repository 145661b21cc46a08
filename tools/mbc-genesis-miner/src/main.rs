//! mbc-genesis-miner: prints the mined genesis as JSON.

use clap::Parser;

use mbc_genesis_miner::{run, Args};
use mbc_telemetry::{exit_on_fatal, init_logging, TelemetryConfig};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TelemetryConfig::for_tool("genesis-miner");
    config.network = args.network.clone();
    init_logging(&config)?;

    match run(&args) {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => exit_on_fatal(&*e),
    }
}
