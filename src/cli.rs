//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use crate::adapters::csv_export_adapter::CsvExportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::memory_fee_token::MemoryFeeToken;
use crate::adapters::memory_oracle::MemoryOracle;
use crate::adapters::oracle_router::OracleRouter;
use crate::domain::config_validation::{validate_scenario_config, ScenarioConfig};
use crate::domain::error::FundError;
use crate::domain::factory::FundFactory;
use crate::ports::export_port::ExportPort;
use crate::ports::fee_token::FeeToken;
use crate::ports::price_oracle::PriceOracle;
use crate::ports::swap_router::SwapRouter;

#[derive(Parser, Debug)]
#[command(name = "etherindex", about = "On-ledger index-fund engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a scripted create/deposit/rebalance/redeem scenario
    Scenario {
        #[arg(short, long)]
        config: PathBuf,
        /// Write the fund activity log as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a scenario configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Scenario { config, output } => run_scenario(&config, output.as_ref()),
        Command::Validate { config } => run_validate(&config),
    }
}

fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = FundError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_scenario(config_path: &PathBuf, output_path: Option<&PathBuf>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let scenario = match validate_scenario_config(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match execute_scenario(&scenario, output_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn execute_scenario(
    scenario: &ScenarioConfig,
    output_path: Option<&PathBuf>,
) -> Result<(), FundError> {
    // Stage 1: bind capabilities
    let oracle = Rc::new(MemoryOracle::new());
    for (asset, price) in &scenario.prices {
        oracle.set_price(asset.clone(), *price);
    }
    let router = Rc::new(OracleRouter::new(
        oracle.clone() as Rc<dyn PriceOracle>,
        scenario.slippage_bps,
    ));
    let fee_token = Rc::new(MemoryFeeToken::new());
    fee_token.mint(&scenario.creator, scenario.creation_fee)?;
    fee_token.approve(&scenario.creator, scenario.creation_fee);

    // Stage 2: create the fund through the factory
    let mut factory = FundFactory::new(
        oracle.clone() as Rc<dyn PriceOracle>,
        router.clone() as Rc<dyn SwapRouter>,
        fee_token.clone() as Rc<dyn FeeToken>,
        scenario.treasury.clone(),
        scenario.creation_fee,
    );
    eprintln!(
        "Creating fund {} ({}) over {} assets",
        scenario.fund_name,
        scenario.fund_symbol,
        scenario.assets.len()
    );
    let index = factory.create_fund(
        &scenario.creator,
        &scenario.fund_name,
        &scenario.fund_symbol,
        scenario.assets.clone(),
    )?;
    eprintln!(
        "  creation fee {} paid to {}",
        factory.creation_fee(),
        factory.treasury()
    );
    let fund = factory
        .fund_at(index)
        .expect("fund registered at returned index");

    // Stage 3: deposit
    eprintln!(
        "Depositing {} native units for {}",
        scenario.deposit, scenario.creator
    );
    let minted = fund.borrow_mut().buy(&scenario.creator, scenario.deposit)?;
    eprintln!("  minted {minted} shares");
    {
        let fund = fund.borrow();
        for asset in fund.underlying_tokens() {
            eprintln!("  {}: {} units", asset, fund.token_balance(asset));
        }
    }

    // Stage 4: optional reallocation
    if let Some(weights) = &scenario.proportions {
        eprintln!("Setting proportions to {weights:?}");
        fund.borrow_mut()
            .set_proportions(&scenario.creator, &scenario.assets, weights)?;
        let swaps = fund.borrow_mut().rebalance(&scenario.creator)?;
        eprintln!("  rebalanced with {swaps} swaps");
    }

    let value = fund.borrow().fund_value()?;
    eprintln!("Fund value: {value} quote units");

    // Stage 5: full redemption
    let shares = fund.borrow().balance_of(&scenario.creator);
    let payout = fund.borrow_mut().sell(&scenario.creator, shares)?;
    println!(
        "{}: deposited {}, redeemed {} shares for {} native units",
        scenario.fund_name, scenario.deposit, shares, payout
    );

    if let Some(path) = output_path {
        let fund = fund.borrow();
        CsvExportAdapter.write(fund.name(), fund.events(), path)?;
        eprintln!("Activity log written to {}", path.display());
    }

    Ok(())
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    match validate_scenario_config(&adapter) {
        Ok(scenario) => {
            println!(
                "config OK: fund {} ({}) over {} assets, deposit {}",
                scenario.fund_name,
                scenario.fund_symbol,
                scenario.assets.len(),
                scenario.deposit
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
