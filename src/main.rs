use std::sync::Arc;

use alloy::primitives::{Address, U256};
use clap::{Parser, Subcommand};
use eyre::{Error, Result};
use log::info;
use mutuals::config::Config;
use mutuals::pool::quote::SwapQuote;
use mutuals::pool::rewards::RewardState;
use mutuals::pool::token::AccountId;
use mutuals::service::PoolService;
use mutuals::utils::clock::ManualClock;
use mutuals::utils::constants::WAD;
use mutuals::utils::logger::setup_logger;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a demo pool and run a deposit / swap / claim round
    Demo,
    /// Price a swap against the given whole-token reserves
    Quote {
        /// Reserve of the token being sold to the pool
        reserve_in: u64,
        /// Reserve of the token being bought from the pool
        reserve_out: u64,
        /// Whole tokens sold in
        amount_in: u64,
    },
    /// Project reward accrual for a share position over a number of days
    Rewards {
        /// Days of accrual to project
        days: u64,
        /// Whole shares held
        #[arg(default_value_t = 100_000)]
        shares: u64,
    },
}

/// `units` whole tokens at 18-decimal scale.
fn wad(units: u64) -> U256 {
    U256::from(units) * WAD
}

/// Deterministic demo account from a short tag.
fn account(tag: &str) -> AccountId {
    AccountId::from(Address::left_padding_from(tag.as_bytes()))
}

fn run_demo(config: &Config) -> Result<(), Error> {
    let clock = Arc::new(ManualClock::new(0));
    let service = PoolService::new(config, clock.clone())?;

    let provider = account("provider");
    let trader = account("trader");
    service.airdrop(provider, wad(1_000_000), wad(1_000_000))?;
    service.airdrop(trader, wad(1_000_000), wad(1_000_000))?;

    let shares = service.add_liquidity(provider, wad(100_000), wad(100_000))?;
    info!("provider deposited 100000/100000, minted {shares} shares");

    let amount_out = service.swap(trader, config.token0, wad(50_000))?;
    let (reserve0, reserve1) = service.reserves();
    info!("trader swapped 50000 {} for {amount_out} {}", config.symbol0, config.symbol1);
    info!("reserves now {reserve0} / {reserve1}");

    clock.advance(86_400);
    info!(
        "one day later, provider has earned {} reward units",
        service.earned(provider)
    );
    let minted = service.get_reward(provider)?;
    info!("claimed: {minted} {} minted to provider", config.symbol1);

    let (amount0, amount1) = service.remove_liquidity(provider, shares / U256::from(2u64))?;
    info!("provider withdrew half their shares for {amount0} / {amount1}");

    let (reserve0, reserve1) = service.reserves();
    println!("\nFinal state:");
    println!("  reserves        {reserve0} / {reserve1}");
    println!("  total shares    {}", service.total_supply());
    println!("  provider shares {}", service.balance_of(provider));
    Ok(())
}

fn run_quote(reserve_in: u64, reserve_out: u64, amount_in: u64) -> Result<(), Error> {
    let quote = SwapQuote::new(wad(reserve_in), wad(reserve_out), wad(amount_in))?;
    println!("amount in        {}", quote.amount_in());
    println!("amount out       {}", quote.amount_out());
    println!("reserve in  -> {}", quote.new_reserve_in());
    println!("reserve out -> {}", quote.new_reserve_out());
    Ok(())
}

fn run_rewards(days: u64, shares: u64) {
    let state = RewardState::new(0);
    let holder = account("holder");
    for day in 1..=days {
        let earned = state.earned(holder, wad(shares), day * 86_400);
        println!("day {day:>4}: earned {earned}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_logger().expect("Failed to set up logger");

    let config = Config::from_env()?;

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Quote {
            reserve_in,
            reserve_out,
            amount_in,
        }) => {
            run_quote(reserve_in, reserve_out, amount_in)?;
        }
        Some(Commands::Rewards { days, shares }) => {
            run_rewards(days, shares);
        }
        Some(Commands::Demo) | None => {
            // Default behavior when no subcommand is provided
            run_demo(&config)?;
        }
    }

    Ok(())
}
