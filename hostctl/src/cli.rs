use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rental::{RevenuePath, RevenueTier};
use rust_decimal::Decimal;

/// hostctl — deposits, commission tiers and payouts for rental hosts.
#[derive(Parser, Debug)]
#[command(name = "hostctl", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Host API base URL; overrides RENTAL_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Offline host snapshot; overrides RENTAL_DATA_FILE
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Output as JSON instead of TSV
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every vehicle with the deposit a guest would pre-authorize
    Deposits,

    /// Change the host-wide deposit settings
    SetDeposit(SetDepositArgs),

    /// Set or remove a per-make deposit override
    SetMakeDeposit(SetMakeDepositArgs),

    /// Set an individual vehicle's own deposit
    SetVehicleDeposit(SetVehicleDepositArgs),

    /// Put vehicles back under the host-wide settings
    MoveToGlobal(VehicleIdsArgs),

    /// Take vehicles out of the host-wide settings
    MoveToIndividual(VehicleIdsArgs),

    /// Change length-of-trip discounts
    SetDiscounts(SetDiscountsArgs),

    /// Show the commission tier for the current fleet
    Tier(TierArgs),

    /// Show the payout for a revenue path without saving it
    Payout(RevenuePathArgs),

    /// Save the partner's revenue path
    SetRevenuePath(RevenuePathArgs),

    /// Price a trip
    Quote(QuoteArgs),
}

#[derive(Parser, Debug)]
pub struct SetDepositArgs {
    /// Require a deposit on vehicles that follow the host settings
    #[arg(long)]
    pub require: Option<bool>,

    /// Default deposit amount; rounded to a multiple of 25 when saved
    #[arg(long)]
    pub default_amount: Option<Decimal>,
}

#[derive(Parser, Debug)]
pub struct SetMakeDepositArgs {
    /// Vehicle make, matched exactly (e.g. Tesla)
    pub make: String,

    /// Deposit amount; omit together with --remove to drop the override
    #[arg(required_unless_present = "remove")]
    pub amount: Option<Decimal>,

    /// Remove the override
    #[arg(long, conflicts_with = "amount")]
    pub remove: bool,
}

#[derive(Parser, Debug)]
pub struct SetVehicleDepositArgs {
    pub vehicle_id: String,

    /// Require a deposit on this vehicle
    #[arg(long)]
    pub require: bool,

    /// Deposit amount; a required deposit without an amount is switched off
    #[arg(long)]
    pub amount: Option<Decimal>,
}

#[derive(Parser, Debug)]
pub struct VehicleIdsArgs {
    #[arg(required = true)]
    pub vehicle_ids: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct SetDiscountsArgs {
    /// Percent off trips of 7 days or more
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub weekly: Option<u8>,

    /// Percent off trips of 28 days or more
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub monthly: Option<u8>,
}

#[derive(Parser, Debug)]
pub struct TierArgs {
    /// Use this fleet size instead of fetching it
    #[arg(long)]
    pub fleet_size: Option<u32>,
}

#[derive(Parser, Debug)]
pub struct RevenuePathArgs {
    #[arg(value_enum)]
    pub path: PathArg,

    /// Insurance type on the tiers path
    #[arg(long, value_enum)]
    pub tier: Option<TierArg>,
}

#[derive(Parser, Debug)]
pub struct QuoteArgs {
    pub vehicle_id: String,

    /// Pickup date (YYYY-MM-DD)
    pub start: NaiveDate,

    /// Return date (YYYY-MM-DD)
    pub end: NaiveDate,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PathArg {
    Insurance,
    Tiers,
}

impl From<PathArg> for RevenuePath {
    fn from(p: PathArg) -> Self {
        match p {
            PathArg::Insurance => RevenuePath::Insurance,
            PathArg::Tiers => RevenuePath::Tiers,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum TierArg {
    P2p,
    Commercial,
    SelfManage,
}

impl From<TierArg> for RevenueTier {
    fn from(t: TierArg) -> Self {
        match t {
            TierArg::P2p => RevenueTier::P2p,
            TierArg::Commercial => RevenueTier::Commercial,
            TierArg::SelfManage => RevenueTier::SelfManage,
        }
    }
}
