//! Public levies: consumption tax («forbruksavgift»), environmental levy («Enova-avgift»)
//! and VAT, all depending on the tax zone.

use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{
    prelude::*,
    quantity::{Quantity, rate::KilowattHourRate},
};

#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum TaxZone {
    /// Southern Norway: full consumption tax and VAT.
    #[default]
    Standard,

    /// Northern Norway: VAT exempt.
    #[serde(alias = "nord_norge")]
    Northern,

    /// Finnmark and Northern Troms: exempt from both the consumption tax and VAT.
    #[serde(alias = "tiltakssone")]
    IncentiveZone,
}

impl Display for TaxZone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "Standard"),
            Self::Northern => write!(f, "Northern Norway"),
            Self::IncentiveZone => write!(f, "Incentive zone"),
        }
    }
}

/// Per-zone rates, all per kWh and before VAT.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneRules {
    pub vat_rate: Decimal,
    pub consumption_tax: KilowattHourRate,

    /// Norgespris base rate.
    pub fixed_price: KilowattHourRate,
}

impl ZoneRules {
    const CONSUMPTION_TAX: Decimal = dec!(0.0713);
    const FIXED_PRICE: Decimal = dec!(0.40);
    const VAT_RATE: Decimal = dec!(0.25);

    #[must_use]
    pub const fn standard() -> Self {
        Self {
            vat_rate: Self::VAT_RATE,
            consumption_tax: Quantity(Self::CONSUMPTION_TAX),
            fixed_price: Quantity(Self::FIXED_PRICE),
        }
    }

    #[must_use]
    pub const fn northern() -> Self {
        Self {
            vat_rate: Decimal::ZERO,
            consumption_tax: Quantity(Self::CONSUMPTION_TAX),
            fixed_price: Quantity(Self::FIXED_PRICE),
        }
    }

    #[must_use]
    pub const fn incentive_zone() -> Self {
        Self {
            vat_rate: Decimal::ZERO,
            consumption_tax: KilowattHourRate::ZERO,
            fixed_price: Quantity(Self::FIXED_PRICE),
        }
    }

    #[must_use]
    pub fn add_vat(&self, rate: KilowattHourRate) -> KilowattHourRate {
        (rate * (Decimal::ONE + self.vat_rate)).round_to_precision()
    }

    fn validate(&self, zone: TaxZone) -> Result {
        ensure!(self.vat_rate >= Decimal::ZERO, "{zone}: VAT rate must not be negative");
        ensure!(self.consumption_tax >= KilowattHourRate::ZERO, "{zone}: consumption tax must not be negative");
        ensure!(self.fixed_price >= KilowattHourRate::ZERO, "{zone}: fixed price must not be negative");
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneTable {
    #[serde(default = "ZoneRules::standard")]
    pub standard: ZoneRules,

    #[serde(default = "ZoneRules::northern")]
    pub northern: ZoneRules,

    #[serde(default = "ZoneRules::incentive_zone", rename = "incentive-zone")]
    pub incentive_zone: ZoneRules,
}

impl Default for ZoneTable {
    fn default() -> Self {
        Self {
            standard: ZoneRules::standard(),
            northern: ZoneRules::northern(),
            incentive_zone: ZoneRules::incentive_zone(),
        }
    }
}

impl ZoneTable {
    #[must_use]
    pub const fn get(&self, zone: TaxZone) -> &ZoneRules {
        match zone {
            TaxZone::Standard => &self.standard,
            TaxZone::Northern => &self.northern,
            TaxZone::IncentiveZone => &self.incentive_zone,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevyRules {
    /// Applies in every zone, including the exempt ones.
    pub environmental_levy: KilowattHourRate,

    pub zones: ZoneTable,
}

impl Default for LevyRules {
    fn default() -> Self {
        Self { environmental_levy: KilowattHourRate::from(dec!(0.01)), zones: ZoneTable::default() }
    }
}

impl LevyRules {
    pub fn validate(&self) -> Result {
        ensure!(
            self.environmental_levy >= KilowattHourRate::ZERO,
            "environmental levy must not be negative",
        );
        for zone in [TaxZone::Standard, TaxZone::Northern, TaxZone::IncentiveZone] {
            self.zones.get(zone).validate(zone)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn levies(&self, zone: TaxZone) -> Levies {
        let rules = self.zones.get(zone);
        let consumption_tax = Levy::with_vat(rules.consumption_tax, rules.vat_rate);
        let environmental_levy = Levy::with_vat(self.environmental_levy, rules.vat_rate);
        Levies {
            consumption_tax: consumption_tax.round_to_precision(),
            environmental_levy: environmental_levy.round_to_precision(),
            total: Levy {
                pre_vat: consumption_tax.pre_vat + environmental_levy.pre_vat,
                post_vat: consumption_tax.post_vat + environmental_levy.post_vat,
            }
            .round_to_precision(),
            vat_rate: rules.vat_rate,
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Levy {
    pub pre_vat: KilowattHourRate,
    pub post_vat: KilowattHourRate,
}

impl Levy {
    fn with_vat(pre_vat: KilowattHourRate, vat_rate: Decimal) -> Self {
        Self { pre_vat, post_vat: pre_vat * (Decimal::ONE + vat_rate) }
    }

    fn round_to_precision(self) -> Self {
        Self { pre_vat: self.pre_vat.round_to_precision(), post_vat: self.post_vat.round_to_precision() }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Levies {
    pub consumption_tax: Levy,
    pub environmental_levy: Levy,
    pub total: Levy,
    pub vat_rate: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(value: Decimal) -> KilowattHourRate {
        KilowattHourRate::from(value)
    }

    #[test]
    fn test_standard_zone() {
        let levies = LevyRules::default().levies(TaxZone::Standard);
        assert_eq!(levies.vat_rate, dec!(0.25));
        assert_eq!(levies.consumption_tax.pre_vat, rate(dec!(0.0713)));
        assert_eq!(levies.consumption_tax.post_vat, rate(dec!(0.0891)));
        assert_eq!(levies.environmental_levy.pre_vat, rate(dec!(0.01)));
        assert_eq!(levies.environmental_levy.post_vat, rate(dec!(0.0125)));
        assert_eq!(levies.total.pre_vat, rate(dec!(0.0813)));
        assert_eq!(levies.total.post_vat, rate(dec!(0.1016)));
    }

    #[test]
    fn test_northern_zone_is_vat_exempt() {
        let levies = LevyRules::default().levies(TaxZone::Northern);
        assert_eq!(levies.vat_rate, Decimal::ZERO);
        assert_eq!(levies.consumption_tax.post_vat, rate(dec!(0.0713)));
        assert_eq!(levies.environmental_levy.post_vat, rate(dec!(0.01)));
        assert_eq!(levies.total.pre_vat, rate(dec!(0.0813)));
        assert_eq!(levies.total.post_vat, rate(dec!(0.0813)));
    }

    #[test]
    fn test_incentive_zone_pays_only_environmental_levy() {
        let levies = LevyRules::default().levies(TaxZone::IncentiveZone);
        assert_eq!(levies.consumption_tax.pre_vat, KilowattHourRate::ZERO);
        assert_eq!(levies.consumption_tax.post_vat, KilowattHourRate::ZERO);
        assert_eq!(levies.environmental_levy.pre_vat, rate(dec!(0.01)));
        assert_eq!(levies.total.post_vat, rate(dec!(0.01)));
    }

    #[test]
    fn test_post_vat_composition() {
        let rules = LevyRules::default();
        for zone in [TaxZone::Northern, TaxZone::IncentiveZone] {
            let levies = rules.levies(zone);
            for levy in [levies.consumption_tax, levies.environmental_levy, levies.total] {
                assert_eq!(levy.post_vat, levy.pre_vat, "{zone}");
            }
        }
        let levies = rules.levies(TaxZone::Standard);
        for levy in [levies.environmental_levy, levies.total] {
            assert_eq!(levy.post_vat, (levy.pre_vat * dec!(1.25)).round_to_precision());
        }
    }

    #[test]
    fn test_zone_from_config_aliases() {
        #[derive(Deserialize)]
        struct Wrapper {
            zone: TaxZone,
        }

        for (text, expected) in [
            ("standard", TaxZone::Standard),
            ("northern", TaxZone::Northern),
            ("nord_norge", TaxZone::Northern),
            ("incentive-zone", TaxZone::IncentiveZone),
            ("tiltakssone", TaxZone::IncentiveZone),
        ] {
            let wrapper: Wrapper = toml::from_str(&format!("zone = \"{text}\"")).unwrap();
            assert_eq!(wrapper.zone, expected);
        }
    }

    #[test]
    fn test_overridden_zone_rules() {
        let rules: LevyRules = toml::from_str(
            r"
            environmental_levy = 0.011

            [zones.standard]
            vat_rate = 0.25
            consumption_tax = 0.08
            fixed_price = 0.40
            ",
        )
        .unwrap();
        assert_eq!(rules.zones.northern, ZoneRules::northern());
        let levies = rules.levies(TaxZone::Standard);
        assert_eq!(levies.total.pre_vat, rate(dec!(0.091)));
        assert_eq!(levies.total.post_vat, rate(dec!(0.1138)));
    }

    #[test]
    fn test_validation() {
        assert!(LevyRules::default().validate().is_ok());
        let mut rules = LevyRules::default();
        rules.zones.northern.vat_rate = dec!(-0.1);
        assert!(rules.validate().is_err());
    }
}
