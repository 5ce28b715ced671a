//! Installation settings, read once at startup.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    calendar::HolidayCalendar,
    capacity::CapacityTiers,
    energy_rate::EnergyRates,
    levy::{LevyRules, TaxZone},
    operator::GridOperator,
    prelude::*,
    subsidy::SubsidyRules,
    tariff::Tariff,
};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub grid_operator: GridOperator,
    pub tax_zone: TaxZone,

    /// Whether the installation is on Norgespris.
    pub fixed_price: bool,

    /// Overrides the operator's energy charges.
    pub energy_rates: Option<EnergyRates>,

    /// Overrides the operator's capacity tiers.
    pub capacity_tiers: Option<CapacityTiers>,

    pub subsidy: SubsidyRules,
    pub levies: LevyRules,
    pub holidays: HolidayCalendar,
}

impl Config {
    /// Read the configuration, falling back to the defaults when the file does not exist.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        if path.is_file() {
            let contents = fs::read(path).context("failed to read the configuration")?;
            toml::from_slice(&contents).context("failed to parse the configuration")
        } else {
            info!("no configuration file, using the defaults");
            Ok(Self::default())
        }
    }
}

impl TryFrom<Config> for Tariff {
    type Error = Error;

    #[instrument(skip_all, fields(grid_operator = %config.grid_operator, tax_zone = %config.tax_zone))]
    fn try_from(config: Config) -> Result<Self> {
        config.subsidy.validate().context("invalid subsidy rules")?;
        config.levies.validate().context("invalid levies")?;

        let capacity_tiers = match config.capacity_tiers {
            Some(tiers) => tiers,
            None => config.grid_operator.capacity_tiers()?,
        };
        match config.holidays.horizon() {
            Some(horizon) => info!(horizon, "using the curated movable holidays"),
            None => debug!("computing the movable holidays"),
        }

        Ok(Self::builder()
            .grid_operator(config.grid_operator)
            .energy_rates(config.energy_rates.unwrap_or_else(|| config.grid_operator.energy_rates()))
            .capacity_tiers(capacity_tiers)
            .tax_zone(config.tax_zone)
            .uses_fixed_price(config.fixed_price)
            .subsidy(config.subsidy)
            .levies(config.levies)
            .calendar(config.holidays)
            .build())
    }
}
