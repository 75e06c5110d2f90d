use std::io::Write;

use rental::revenue::format_payout;
use rental::types::{DepositSource, RevenueSelection};
use rental::{
    BookingQuote, DiscountSettings, HostGlobalDepositSettings, TierProgress, Vehicle,
    VehicleDepositMode, VehicleDepositRow,
};
use serde::Serialize;

/// Write `value` as one line of JSON.
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

fn source_label(source: &DepositSource) -> String {
    match source {
        DepositSource::Disabled => "disabled".to_string(),
        DepositSource::Vehicle => "vehicle".to_string(),
        DepositSource::MakeOverride => "make".to_string(),
        DepositSource::HostDefault => "default".to_string(),
        DepositSource::RateBased(class) => format!("rate:{class}"),
    }
}

/// TSV: id \t name \t daily_rate \t mode \t deposit \t source
pub fn write_deposits<W: Write>(
    writer: &mut W,
    rows: &[VehicleDepositRow],
) -> std::io::Result<()> {
    for row in rows {
        let v = &row.vehicle;
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            v.id,
            v.display_name(),
            v.daily_rate,
            v.vehicle_deposit_mode,
            row.deposit.amount,
            source_label(&row.deposit.source)
        )?;
    }
    writer.flush()
}

pub fn write_settings<W: Write>(
    writer: &mut W,
    settings: &HostGlobalDepositSettings,
) -> std::io::Result<()> {
    writeln!(writer, "require_deposit\t{}", settings.require_deposit)?;
    writeln!(writer, "default_amount\t{}", settings.default_amount)?;
    for (make, amount) in &settings.make_deposits {
        writeln!(writer, "make:{make}\t{amount}")?;
    }
    writer.flush()
}

/// TSV: id \t mode \t require_deposit \t deposit_amount
pub fn write_vehicle<W: Write>(writer: &mut W, vehicle: &Vehicle) -> std::io::Result<()> {
    let amount = vehicle
        .deposit_amount
        .map(|a| a.to_string())
        .unwrap_or_else(|| "--".into());
    writeln!(
        writer,
        "{}\t{}\t{}\t{}",
        vehicle.id, vehicle.vehicle_deposit_mode, vehicle.require_deposit, amount
    )?;
    writer.flush()
}

pub fn write_mode_change<W: Write>(
    writer: &mut W,
    mode: VehicleDepositMode,
    changed: usize,
) -> std::io::Result<()> {
    writeln!(writer, "{mode}\t{changed}")?;
    writer.flush()
}

pub fn write_discounts<W: Write>(
    writer: &mut W,
    discounts: &DiscountSettings,
) -> std::io::Result<()> {
    writeln!(writer, "weekly_percent\t{}", discounts.weekly_percent)?;
    writeln!(writer, "monthly_percent\t{}", discounts.monthly_percent)?;
    writer.flush()
}

/// TSV: tier \t commission% \t next \t progress% \t units_to_next
pub fn write_tier<W: Write>(writer: &mut W, progress: &TierProgress) -> std::io::Result<()> {
    writeln!(
        writer,
        "{}\t{}%\t{}\t{}%\t{}",
        progress.current.name,
        progress.current.commission_percent,
        progress.next.map(|t| t.name).unwrap_or("--"),
        progress.progress_percent,
        progress.units_to_next
    )?;
    writer.flush()
}

/// TSV: path \t tier \t payout
pub fn write_revenue<W: Write>(
    writer: &mut W,
    selection: &RevenueSelection,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "{}\t{}\t{}",
        selection
            .revenue_path
            .map(|p| p.to_string())
            .unwrap_or_else(|| "--".into()),
        selection
            .revenue_tier
            .map(|t| t.to_string())
            .unwrap_or_else(|| "--".into()),
        format_payout(selection)
    )?;
    writer.flush()
}

pub fn write_quote<W: Write>(writer: &mut W, quote: &BookingQuote) -> std::io::Result<()> {
    writeln!(writer, "vehicle\t{}", quote.vehicle_id)?;
    writeln!(writer, "dates\t{} -> {}", quote.start, quote.end)?;
    writeln!(writer, "days\t{}", quote.days)?;
    writeln!(writer, "daily_rate\t{}", quote.daily_rate)?;
    writeln!(writer, "subtotal\t{}", quote.subtotal)?;
    if quote.discount_percent > 0 {
        writeln!(writer, "discount\t-{} ({}%)", quote.discount, quote.discount_percent)?;
    }
    writeln!(writer, "total\t{}", quote.total)?;
    writeln!(writer, "deposit\t{}", quote.deposit)?;
    writer.flush()
}
