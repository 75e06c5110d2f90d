mod cli;
mod output;

use clap::Parser;
use cli::Command;
use rental::{
    payout_percent, resolve_tier, HostDesk, HostStore, HttpStore, JsonFileStore, RentalConfig,
    RevenuePath, RevenueSelection, RevenueTier, VehicleDepositMode, COMMISSION_TIERS,
};
use tracing::info;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let _ = dotenvy::dotenv(); // load .env if present

    let config = match RentalConfig::from_env() {
        Ok(c) => c.with_overrides(cli.api_url.clone(), cli.data_file.clone()),
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let result = match &config.api_url {
        Some(url) => {
            info!(api_url = %url, "using host API");
            run(HostDesk::new(HttpStore::new(url)), cli.command, cli.json).await
        }
        None => {
            info!(data_file = %config.data_file.display(), "using local snapshot");
            run(
                HostDesk::new(JsonFileStore::new(config.data_file.clone())),
                cli.command,
                cli.json,
            )
            .await
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "hostctl failed");
        std::process::exit(1);
    }
}

async fn run<S: HostStore>(
    desk: HostDesk<S>,
    command: Command,
    json: bool,
) -> rental::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Deposits => {
            let rows = desk.deposits().await?;
            if json {
                output::write_json(&mut out, &rows)?;
            } else {
                output::write_deposits(&mut out, &rows)?;
            }
        }

        Command::SetDeposit(args) => {
            let mut settings = desk.deposit_settings().await?;
            if let Some(require) = args.require {
                settings.require_deposit = require;
            }
            if let Some(amount) = args.default_amount {
                settings.default_amount = amount;
            }
            let saved = desk.save_deposit_settings(&settings).await?;
            if json {
                output::write_json(&mut out, &saved)?;
            } else {
                output::write_settings(&mut out, &saved)?;
            }
        }

        Command::SetMakeDeposit(args) => {
            let amount = if args.remove { None } else { args.amount };
            let saved = desk.set_make_deposit(&args.make, amount).await?;
            if json {
                output::write_json(&mut out, &saved)?;
            } else {
                output::write_settings(&mut out, &saved)?;
            }
        }

        Command::SetVehicleDeposit(args) => {
            let vehicle = desk
                .save_vehicle_deposit(&args.vehicle_id, args.require, args.amount)
                .await?;
            if args.require && !vehicle.require_deposit {
                tracing::warn!(
                    vehicle_id = %vehicle.id,
                    "no valid amount given; deposit has been switched off"
                );
            }
            if json {
                output::write_json(&mut out, &vehicle)?;
            } else {
                output::write_vehicle(&mut out, &vehicle)?;
            }
        }

        Command::MoveToGlobal(args) => {
            let changed = desk
                .set_deposit_mode(&args.vehicle_ids, VehicleDepositMode::Global)
                .await?;
            write_mode_change(&mut out, VehicleDepositMode::Global, changed, json)?;
        }

        Command::MoveToIndividual(args) => {
            let changed = desk
                .set_deposit_mode(&args.vehicle_ids, VehicleDepositMode::Individual)
                .await?;
            write_mode_change(&mut out, VehicleDepositMode::Individual, changed, json)?;
        }

        Command::SetDiscounts(args) => {
            let mut discounts = desk.discounts().await?;
            if let Some(w) = args.weekly {
                discounts.weekly_percent = w;
            }
            if let Some(m) = args.monthly {
                discounts.monthly_percent = m;
            }
            let saved = desk.save_discounts(&discounts).await?;
            if json {
                output::write_json(&mut out, &saved)?;
            } else {
                output::write_discounts(&mut out, &saved)?;
            }
        }

        Command::Tier(args) => {
            let progress = match args.fleet_size {
                Some(n) => resolve_tier(n, &COMMISSION_TIERS),
                None => desk.tier_progress(&COMMISSION_TIERS).await?,
            };
            if json {
                output::write_json(&mut out, &progress)?;
            } else {
                output::write_tier(&mut out, &progress)?;
            }
        }

        Command::Payout(args) => {
            let path = RevenuePath::from(args.path);
            let tier = match path {
                RevenuePath::Insurance => None,
                RevenuePath::Tiers => args.tier.map(RevenueTier::from),
            };
            let selection = RevenueSelection {
                revenue_path: Some(path),
                revenue_tier: tier,
            };
            if json {
                output::write_json(
                    &mut out,
                    &serde_json::json!({
                        "selection": selection,
                        "payoutPercent": payout_percent(path, tier),
                    }),
                )?;
            } else {
                output::write_revenue(&mut out, &selection)?;
            }
        }

        Command::SetRevenuePath(args) => {
            let editor = desk
                .choose_revenue_path(args.path.into(), args.tier.map(RevenueTier::from))
                .await?;
            if json {
                output::write_json(&mut out, editor.saved())?;
            } else {
                output::write_revenue(&mut out, editor.saved())?;
            }
        }

        Command::Quote(args) => {
            let quote = desk.quote(&args.vehicle_id, args.start, args.end).await?;
            if json {
                output::write_json(&mut out, &quote)?;
            } else {
                output::write_quote(&mut out, &quote)?;
            }
        }
    }

    Ok(())
}

fn write_mode_change<W: std::io::Write>(
    out: &mut W,
    mode: VehicleDepositMode,
    changed: usize,
    json: bool,
) -> std::io::Result<()> {
    if json {
        output::write_json(out, &serde_json::json!({ "mode": mode, "updated": changed }))
    } else {
        output::write_mode_change(out, mode, changed)
    }
}
