use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};

use nettleie::quantity::{
    cost::Cost,
    energy::KilowattHours,
    power::Kilowatts,
    rate::KilowattHourRate,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Tariff configuration.
    #[clap(long, env = "NETTLEIE_CONFIG", default_value = "nettleie.toml", global = true)]
    pub config: PathBuf,

    /// Daily power peaks of the installation.
    #[clap(long, env = "NETTLEIE_PEAKS", default_value = "peaks.json", global = true)]
    pub peaks: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Break down the price per kWh at the moment.
    #[clap(name = "price")]
    Price(PriceArgs),

    /// Record a power reading into the daily peaks.
    #[clap(name = "record")]
    Record(RecordArgs),

    /// Show the capacity tiers and the current one.
    #[clap(name = "tiers")]
    Tiers(TimeArgs),

    /// List the public holidays.
    #[clap(name = "holidays")]
    Holidays(HolidaysArgs),

    /// Estimate the monthly grid invoice.
    #[clap(name = "invoice")]
    Invoice(InvoiceArgs),
}

#[derive(Copy, Clone, Parser)]
pub struct TimeArgs {
    /// Local time to evaluate, for example `2026-01-26T12:00:00`. Defaults to now.
    #[clap(long)]
    pub at: Option<NaiveDateTime>,
}

impl TimeArgs {
    #[must_use]
    pub fn at(self) -> NaiveDateTime {
        self.at.unwrap_or_else(|| Local::now().naive_local())
    }
}

#[derive(Copy, Clone, Parser)]
pub struct PriceArgs {
    /// Spot price in NOK per kWh, VAT included.
    #[clap(long = "spot-price", env = "SPOT_PRICE")]
    pub spot_price: KilowattHourRate,

    /// Current power draw in kilowatts, folded into today's peak when given.
    #[clap(long)]
    pub power: Option<Kilowatts>,

    /// Also spread the capacity fee over every hour of the month.
    #[clap(long)]
    pub blended: bool,

    /// Print JSON instead of a table.
    #[clap(long)]
    pub json: bool,

    #[clap(flatten)]
    pub time: TimeArgs,
}

#[derive(Copy, Clone, Parser)]
pub struct RecordArgs {
    /// Power reading in kilowatts.
    #[clap(long)]
    pub power: Kilowatts,

    /// Months of history to keep besides the current one.
    #[clap(long = "retain-months", default_value = "1")]
    pub retain_months: u32,

    #[clap(flatten)]
    pub time: TimeArgs,
}

#[derive(Copy, Clone, Parser)]
pub struct HolidaysArgs {
    /// Defaults to the current year.
    #[clap(long)]
    pub year: Option<i32>,
}

#[derive(Copy, Clone, Parser)]
pub struct InvoiceArgs {
    /// Energy consumed at the day rate.
    #[clap(long = "day-kwh")]
    pub day: KilowattHours,

    /// Energy consumed at the night rate.
    #[clap(long = "night-kwh")]
    pub night: KilowattHours,

    /// Subsidy credited over the month, NOK.
    #[clap(long, default_value = "0")]
    pub subsidy: Cost,

    /// Any day of the billing month. Defaults to today.
    #[clap(long)]
    pub month: Option<NaiveDate>,

    /// Print JSON instead of a table.
    #[clap(long)]
    pub json: bool,
}
