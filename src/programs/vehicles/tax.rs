use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{Vehicle, VehicleSpec};

const ELECTRIC_CAR_FACTOR: f64 = 0.8;
const OLD_CAR_FACTOR: f64 = 0.9;
const OLD_TRUCK_FACTOR: f64 = 1.15;
const HEAVY_TRUCK_FACTOR: f64 = 1.25;
const HEAVY_TRUCK_TONS: f64 = 10.0;
const LARGE_ENGINE_FACTOR: f64 = 1.2;
const LARGE_ENGINE_CC: u32 = 500;
const MOTORCYCLE_DEPRECIATION_STEP: f64 = 0.05;
const MOTORCYCLE_DEPRECIATION_CAP: f64 = 0.25;
const BUS_RATE_PER_TEN_SEATS: f64 = 0.02;
const OLD_BUS_FACTOR: f64 = 1.1;
const FOUR_WHEEL_DRIVE_FACTOR: f64 = 1.1;
const OLD_SUV_FACTOR: f64 = 0.95;

/// One multiplier applied on top of the base rate, with the line shown in reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxAdjustment {
    pub multiplier: f64,
    pub note: String,
}

/// Full breakdown of a vehicle's annual tax.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxAssessment {
    pub vehicle_id: String,
    pub vehicle_type: &'static str,
    pub registration_number: String,
    pub age_years: i32,
    pub base_tax_rate: f64,
    pub adjustments: Vec<TaxAdjustment>,
    pub total: f64,
}

/// Apply the rules for the vehicle's kind, in order, to its base rate.
pub fn assess(vehicle: &Vehicle, as_of: NaiveDate) -> TaxAssessment {
    let age = vehicle.age(as_of);
    let mut adjustments = Vec::new();

    match *vehicle.spec() {
        VehicleSpec::Car { electric } => {
            if electric {
                adjustments.push(adjust(
                    ELECTRIC_CAR_FACTOR,
                    "Electric vehicle discount: 20%".to_string(),
                ));
            }
            if age > 10 {
                adjustments.push(adjust(
                    OLD_CAR_FACTOR,
                    "Vehicle age reduction: 10%".to_string(),
                ));
            }
        }
        VehicleSpec::Truck { load_capacity_tons } => {
            if age > 15 {
                adjustments.push(adjust(OLD_TRUCK_FACTOR, "Age surcharge: 15%".to_string()));
            }
            if load_capacity_tons > HEAVY_TRUCK_TONS {
                adjustments.push(adjust(
                    HEAVY_TRUCK_FACTOR,
                    "Heavy load capacity surcharge: 25%".to_string(),
                ));
            }
        }
        VehicleSpec::Motorcycle { engine_capacity_cc } => {
            if engine_capacity_cc > LARGE_ENGINE_CC {
                adjustments.push(adjust(
                    LARGE_ENGINE_FACTOR,
                    "High engine capacity surcharge: 20%".to_string(),
                ));
            }
            let steps = age / 5;
            if steps > 0 {
                let reduction =
                    (MOTORCYCLE_DEPRECIATION_STEP * f64::from(steps)).min(MOTORCYCLE_DEPRECIATION_CAP);
                adjustments.push(adjust(
                    1.0 - reduction,
                    format!("Age-based depreciation: {:.0}% reduction", reduction * 100.0),
                ));
            }
        }
        VehicleSpec::Bus { passenger_capacity } => {
            let per_ten = f64::from(passenger_capacity) / 10.0;
            let increase = BUS_RATE_PER_TEN_SEATS * per_ten;
            adjustments.push(adjust(
                1.0 + increase,
                format!("Passenger capacity increase: {:.1}%", increase * 100.0),
            ));
            if age > 20 {
                adjustments.push(adjust(OLD_BUS_FACTOR, "Age surcharge: 10%".to_string()));
            }
        }
        VehicleSpec::Suv { four_wheel_drive } => {
            if four_wheel_drive {
                adjustments.push(adjust(
                    FOUR_WHEEL_DRIVE_FACTOR,
                    "Four wheel drive surcharge: 10%".to_string(),
                ));
            }
            if age > 10 {
                adjustments.push(adjust(
                    OLD_SUV_FACTOR,
                    "Age-based reduction: 5%".to_string(),
                ));
            }
        }
    }

    let total = adjustments
        .iter()
        .fold(vehicle.base_tax_rate(), |tax, adjustment| {
            tax * adjustment.multiplier
        });

    TaxAssessment {
        vehicle_id: vehicle.id().to_string(),
        vehicle_type: vehicle.vehicle_type(),
        registration_number: vehicle.registration_number().to_string(),
        age_years: age,
        base_tax_rate: vehicle.base_tax_rate(),
        adjustments,
        total,
    }
}

impl Vehicle {
    pub fn calculate_tax(&self, as_of: NaiveDate) -> f64 {
        assess(self, as_of).total
    }
}

fn adjust(multiplier: f64, note: String) -> TaxAdjustment {
    TaxAdjustment { multiplier, note }
}
