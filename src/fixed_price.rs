//! Norgespris: a flat per-kWh electricity price replacing the spot price.
//!
//! Households on the fixed price receive no subsidy.

use crate::{
    levy::{TaxZone, ZoneTable},
    quantity::rate::KilowattHourRate,
};

/// Fixed price for the zone, VAT included where the zone charges VAT.
#[must_use]
pub fn fixed_price(zones: &ZoneTable, zone: TaxZone) -> KilowattHourRate {
    let rules = zones.get(zone);
    rules.add_vat(rules.fixed_price)
}
