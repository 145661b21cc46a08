//! Genesis miner: takes a network's genesis recipe, applies command-line
//! overrides and searches for a nonce whose work hash meets the target.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use mbc_01_chain_params::{genesis_params, Network};
use mbc_02_block_production::{
    create_genesis_block, GenesisMiner, GenesisParams, MinedGenesis, MinerConfig, DEFAULT_BATCH_SIZE,
};
use shared_types::CompactTarget;
use tracing::info;

/// Offline genesis nonce search
#[derive(Parser, Debug, Clone)]
#[command(name = "mbc-genesis-miner")]
#[command(about = "Search for a genesis block nonce on a MicroBitcoin network")]
pub struct Args {
    /// Network whose genesis recipe is used (main, test, signet, regtest)
    #[arg(short, long, default_value = "regtest")]
    pub network: String,

    /// Replace the coinbase commentary
    #[arg(long)]
    pub message: Option<String>,

    /// Header timestamp to start from
    #[arg(long)]
    pub time: Option<u32>,

    /// Nonce to start from (default: 0)
    #[arg(long, default_value_t = 0)]
    pub start_nonce: u32,

    /// Compact target as hex, e.g. 1f3fffff
    #[arg(long)]
    pub bits: Option<String>,

    /// Worker threads (0 = all cores)
    #[arg(short, long, default_value_t = 0)]
    pub threads: usize,

    /// Nonces per batch; progress is logged once per batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: u32,
}

/// JSON report printed on success.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Network name
    pub network: Network,
    /// Recipe that was mined, with the winning nonce and time
    pub params: GenesisParams,
    /// Search result
    pub mined: MinedGenesis,
}

fn parse_bits(raw: &str) -> Result<CompactTarget> {
    let digits = raw.trim_start_matches("0x");
    let bits = u32::from_str_radix(digits, 16).with_context(|| format!("invalid --bits {raw}"))?;
    Ok(CompactTarget(bits))
}

/// Recipe for `args.network` with the overrides applied.
pub fn recipe(args: &Args) -> Result<(Network, GenesisParams)> {
    let network: Network = args.network.parse()?;
    let mut params = genesis_params(network);
    if let Some(message) = &args.message {
        params.message = message.clone();
    }
    if let Some(time) = args.time {
        params.time = time;
    }
    if let Some(bits) = &args.bits {
        params.bits = parse_bits(bits)?;
    }
    params.nonce = args.start_nonce;
    Ok((network, params))
}

/// Runs the search described by `args`.
pub fn run(args: &Args) -> Result<Report> {
    let (network, mut params) = recipe(args)?;
    let mut header = create_genesis_block(&params, &[]).header;
    info!(
        %network,
        time = params.time,
        bits = %params.bits,
        merkle_root = %header.merkle_root,
        message = %params.message,
        "Genesis recipe loaded"
    );

    let miner = GenesisMiner::new(MinerConfig {
        batch_size: args.batch_size,
        threads: args.threads,
        start_nonce: None,
        start_time: None,
    });
    let mined = miner.mine(&mut header).context("genesis search failed")?;

    params.nonce = mined.nonce;
    params.time = mined.time;
    info!(%network, nonce = mined.nonce, index_hash = %mined.index_hash, "Genesis recipe mined");
    Ok(Report {
        network,
        params,
        mined,
    })
}
