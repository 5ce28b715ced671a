#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod tables;

use std::path::Path;

use chrono::{Datelike, Local, Months};
use clap::{Parser, crate_version};
use nettleie::{
    capacity::peaks::{DailyPeaks, rolling_top_average},
    config::Config,
    invoice::MonthlyUsage,
    prelude::*,
    tariff::Tariff,
};

use crate::{
    cli::{Args, Command, HolidaysArgs, InvoiceArgs, PriceArgs, RecordArgs, TimeArgs},
    tables::{build_breakdown_table, build_holidays_table, build_invoice_table, build_tiers_table},
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let tariff = Tariff::try_from(Config::read_from(&args.config)?)?;

    match args.command {
        Command::Price(price_args) => price(&tariff, &args.peaks, price_args)?,
        Command::Record(record_args) => record(&args.peaks, record_args)?,
        Command::Tiers(time_args) => tiers(&tariff, &args.peaks, time_args)?,
        Command::Holidays(holidays_args) => holidays(&tariff, holidays_args),
        Command::Invoice(invoice_args) => invoice(&tariff, &args.peaks, invoice_args)?,
    }

    info!("done!");
    Ok(())
}

#[instrument(skip_all, fields(spot_price = %args.spot_price, power = ?args.power))]
fn price(tariff: &Tariff, peaks_path: &Path, args: PriceArgs) -> Result {
    let peaks = DailyPeaks::read_from(peaks_path)?;
    let breakdown = tariff.compute(args.time.at(), args.power, args.spot_price, &peaks);
    if breakdown.holidays_stale {
        warn!(
            at = %breakdown.at,
            horizon = ?tariff.calendar.horizon(),
            "the holiday table is outdated, holidays are priced as working days",
        );
    }
    info!(total = %breakdown.total, tier = breakdown.capacity.number, "computed");
    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        println!("{}", build_breakdown_table(&breakdown, args.blended));
    }
    Ok(())
}

#[instrument(skip_all, fields(power = %args.power))]
fn record(peaks_path: &Path, args: RecordArgs) -> Result {
    let at = args.time.at();
    let mut peaks = DailyPeaks::read_from(peaks_path)?;
    if peaks.record(at.date(), args.power) {
        let since = at
            .date()
            .with_day(1)
            .and_then(|first| first.checked_sub_months(Months::new(args.retain_months)))
            .context("retention date is out of range")?;
        peaks.retain_since(since);
        peaks.write_to(peaks_path)?;
        info!(day = %at.date(), "new daily peak");
    } else {
        debug!(day = %at.date(), "below the daily peak");
    }
    Ok(())
}

fn tiers(tariff: &Tariff, peaks_path: &Path, args: TimeArgs) -> Result {
    let today = args.at().date();
    let peaks = DailyPeaks::read_from(peaks_path)?;
    let average = rolling_top_average(peaks.in_month(today).map(|(_, power)| power));
    let current = tariff.capacity_tiers.lookup(average);
    info!(
        grid_operator = %tariff.grid_operator,
        %average,
        tier = current.number,
        fee = %current.fee,
        "current capacity tier",
    );
    println!("{}", build_tiers_table(tariff.grid_operator, &tariff.capacity_tiers, &current));
    Ok(())
}

fn holidays(tariff: &Tariff, args: HolidaysArgs) {
    let year = args.year.unwrap_or_else(|| Local::now().year());
    let holidays = tariff.calendar.holidays_in(year);
    if !tariff.calendar.covers_year(year) {
        warn!(year, horizon = ?tariff.calendar.horizon(), "the movable holiday table does not cover the year");
    }
    println!("{}", build_holidays_table(&holidays));
}

#[instrument(skip_all)]
fn invoice(tariff: &Tariff, peaks_path: &Path, args: InvoiceArgs) -> Result {
    let month = args.month.unwrap_or_else(|| Local::now().date_naive());
    let peaks = DailyPeaks::read_from(peaks_path)?;
    let average = rolling_top_average(peaks.in_month(month).map(|(_, power)| power));
    let capacity = tariff.capacity_tiers.lookup(average);
    info!(%average, tier = capacity.number, "capacity for the month");

    let usage = MonthlyUsage { day: args.day, night: args.night, subsidy: args.subsidy };
    let estimate = tariff.estimate_invoice(&usage, capacity.fee);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        println!("{}", build_invoice_table(&estimate));
    }
    Ok(())
}
