use chrono::NaiveDate;
use std::fmt::Write;

use super::domain::Vehicle;
use super::tax::assess;

const RULE: &str = "======================";

/// Multi-section tax report for one vehicle.
pub fn render_tax_report(vehicle: &Vehicle, as_of: NaiveDate) -> String {
    let assessment = assess(vehicle, as_of);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "=== TAX REPORT: {} ===",
        vehicle.vehicle_type().to_uppercase()
    );
    let _ = writeln!(out, "{vehicle}");
    let _ = writeln!(out, "Vehicle Age: {} years", assessment.age_years);
    let _ = writeln!(out, "Applied Tax Rules:");
    for adjustment in &assessment.adjustments {
        let _ = writeln!(out, "- {}", adjustment.note);
    }
    let _ = writeln!(out, "Total Annual Tax: ${:.2}", assessment.total);
    let _ = writeln!(out, "{RULE}");
    out
}

/// One line per vehicle, numbered from 1 in registration order.
pub fn render_tax_listing(vehicles: &[Vehicle], as_of: NaiveDate) -> String {
    let mut out = String::new();
    for (index, vehicle) in vehicles.iter().enumerate() {
        let _ = writeln!(
            out,
            "Vehicle #{} ({} - {}): ${:.2}",
            index + 1,
            vehicle.vehicle_type(),
            vehicle.registration_number(),
            vehicle.calculate_tax(as_of)
        );
    }
    out
}
