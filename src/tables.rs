use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use nettleie::{
    calendar::HolidayKind,
    capacity::{CapacityTierMatch, CapacityTiers},
    energy_rate::RatePeriod,
    invoice::InvoiceEstimate,
    operator::GridOperator,
    quantity::{cost::Cost, rate::KilowattHourRate},
    tariff::TariffBreakdown,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn rate_cell(rate: KilowattHourRate) -> Cell {
    Cell::new(rate).set_alignment(CellAlignment::Right)
}

fn cost_cell(cost: Cost) -> Cell {
    Cell::new(cost).set_alignment(CellAlignment::Right)
}

pub fn build_breakdown_table(breakdown: &TariffBreakdown, blended: bool) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Component", "Value"]);
    table.add_row(vec![
        Cell::new(format!("Energy charge ({})", breakdown.rate_period)),
        rate_cell(breakdown.energy_rate).fg(match breakdown.rate_period {
            RatePeriod::Day => Color::DarkYellow,
            RatePeriod::Night => Color::Green,
        }),
    ]);
    table.add_row(vec![
        Cell::new("Consumption tax"),
        rate_cell(breakdown.levies.consumption_tax.post_vat),
    ]);
    table.add_row(vec![
        Cell::new("Environmental levy"),
        rate_cell(breakdown.levies.environmental_levy.post_vat),
    ]);
    match breakdown.fixed_price {
        Some(fixed_price) => {
            table.add_row(vec![Cell::new("Fixed price"), rate_cell(fixed_price)]);
        }
        None => {
            table.add_row(vec![
                Cell::new("Spot price").add_attribute(Attribute::Dim),
                rate_cell(breakdown.spot_price).add_attribute(Attribute::Dim),
            ]);
            table.add_row(vec![
                Cell::new("Subsidy"),
                rate_cell(-breakdown.subsidy).fg(if breakdown.subsidy.is_positive() {
                    Color::Green
                } else {
                    Color::Reset
                }),
            ]);
            table.add_row(vec![Cell::new("Electricity"), rate_cell(breakdown.electricity_price)]);
        }
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        rate_cell(breakdown.total).add_attribute(Attribute::Bold),
    ]);
    if blended {
        table.add_row(vec![
            Cell::new(format!("Capacity over {} days", breakdown.days_in_month)),
            rate_cell(breakdown.capacity_per_kwh()),
        ]);
        table.add_row(vec![
            Cell::new("Blended total").add_attribute(Attribute::Bold),
            rate_cell(breakdown.blended_total()).add_attribute(Attribute::Bold),
        ]);
    }
    table.add_row(vec![
        Cell::new("Average peak power"),
        Cell::new(breakdown.average_peak_power).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new(format!("Capacity tier {} ({})", breakdown.capacity.number, breakdown.capacity)),
        cost_cell(breakdown.capacity.fee),
    ]);
    if let Some(headroom) = breakdown.capacity_headroom() {
        table.add_row(vec![
            Cell::new("Headroom").add_attribute(Attribute::Dim),
            Cell::new(headroom).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

pub fn build_tiers_table(
    grid_operator: GridOperator,
    tiers: &CapacityTiers,
    current: &CapacityTierMatch,
) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "#".to_string(),
        format!("{grid_operator}: average peak"),
        "Monthly fee".to_string(),
    ]);
    for tier in tiers.matches() {
        let color = if tier.number == current.number { Color::Yellow } else { Color::Reset };
        table.add_row(vec![
            Cell::new(tier.number).add_attribute(Attribute::Dim),
            Cell::new(tier.label()).fg(color),
            cost_cell(tier.fee).fg(color),
        ]);
    }
    table
}

pub fn build_holidays_table(holidays: &[(NaiveDate, HolidayKind)]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Weekday", "Kind"]);
    for (date, kind) in holidays {
        table.add_row(vec![
            Cell::new(date),
            Cell::new(date.format("%A")).add_attribute(Attribute::Dim),
            Cell::new(kind).fg(match kind {
                HolidayKind::Fixed => Color::Reset,
                HolidayKind::Movable => Color::Cyan,
            }),
        ]);
    }
    table
}

pub fn build_invoice_table(estimate: &InvoiceEstimate) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Item", "Amount"]);
    table.add_row(vec![
        Cell::new(format!("Energy ({})", estimate.energy)).add_attribute(Attribute::Dim),
        Cell::new(""),
    ]);
    for (item, amount) in [
        ("Energy charge, day", estimate.day_energy_charge),
        ("Energy charge, night", estimate.night_energy_charge),
        ("Capacity", estimate.capacity),
        ("Consumption tax", estimate.consumption_tax),
        ("Environmental levy", estimate.environmental_levy),
    ] {
        table.add_row(vec![Cell::new(item), cost_cell(amount)]);
    }
    table.add_row(vec![Cell::new("Subsidy"), cost_cell(-estimate.subsidy).fg(Color::Green)]);
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        cost_cell(estimate.total).add_attribute(Attribute::Bold),
    ]);
    table
}
