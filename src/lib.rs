//! Norwegian grid tariff («nettleie») calculation.

pub mod calendar;
pub mod capacity;
pub mod config;
pub mod energy_rate;
pub mod fixed_price;
pub mod invoice;
pub mod levy;
pub mod operator;
pub mod prelude;
pub mod quantity;
pub mod subsidy;
pub mod tariff;
