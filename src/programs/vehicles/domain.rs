use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::validation::{
    require_non_negative, require_positive, require_text, yes_no, ValidationError,
};

pub const EARLIEST_FABRICATION_YEAR: i32 = 1900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Car,
    Truck,
    Motorcycle,
    Bus,
    Suv,
}

impl VehicleKind {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Car,
            Self::Truck,
            Self::Motorcycle,
            Self::Bus,
            Self::Suv,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Car => "Car",
            Self::Truck => "Truck",
            Self::Motorcycle => "Motorcycle",
            Self::Bus => "Bus",
            Self::Suv => "SUV",
        }
    }
}

/// Attributes that only exist for one kind of vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VehicleSpec {
    Car { electric: bool },
    Truck { load_capacity_tons: f64 },
    Motorcycle { engine_capacity_cc: u32 },
    Bus { passenger_capacity: u32 },
    Suv { four_wheel_drive: bool },
}

impl VehicleSpec {
    pub const fn kind(&self) -> VehicleKind {
        match self {
            Self::Car { .. } => VehicleKind::Car,
            Self::Truck { .. } => VehicleKind::Truck,
            Self::Motorcycle { .. } => VehicleKind::Motorcycle,
            Self::Bus { .. } => VehicleKind::Bus,
            Self::Suv { .. } => VehicleKind::Suv,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            Self::Truck { load_capacity_tons } => {
                require_positive(load_capacity_tons, "Load capacity must be greater than 0")?;
            }
            Self::Motorcycle { engine_capacity_cc } if engine_capacity_cc == 0 => {
                return Err(ValidationError::rejected(
                    "Engine capacity must be greater than 0",
                ));
            }
            Self::Bus { passenger_capacity } if passenger_capacity == 0 => {
                return Err(ValidationError::rejected(
                    "Passenger capacity must be greater than 0",
                ));
            }
            _ => {}
        }
        Ok(())
    }

    fn detail_line(&self) -> String {
        match *self {
            Self::Car { electric } => format!("Electric: {}", yes_no(electric)),
            Self::Truck { load_capacity_tons } => {
                format!("Load Capacity: {load_capacity_tons:.2} tons")
            }
            Self::Motorcycle { engine_capacity_cc } => {
                format!("Engine Capacity: {engine_capacity_cc} cc")
            }
            Self::Bus { passenger_capacity } => format!("Passenger Capacity: {passenger_capacity}"),
            Self::Suv { four_wheel_drive } => {
                format!("Four Wheel Drive: {}", yes_no(four_wheel_drive))
            }
        }
    }
}

/// Unvalidated registration input.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDraft {
    pub id: String,
    pub owner_name: String,
    pub year_of_fabrication: i32,
    pub registration_number: String,
    pub base_tax_rate: f64,
    pub spec: VehicleSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: String,
    owner_name: String,
    year_of_fabrication: i32,
    registration_number: String,
    base_tax_rate: f64,
    spec: VehicleSpec,
}

impl Vehicle {
    /// Validate every field of `draft`; `today` bounds the fabrication year.
    pub fn new(draft: VehicleDraft, today: NaiveDate) -> Result<Self, ValidationError> {
        let id = require_text(&draft.id, "Vehicle ID")?;
        let owner_name = require_text(&draft.owner_name, "Owner name")?;
        let year_of_fabrication = validate_year(draft.year_of_fabrication, today)?;
        let registration_number = require_text(&draft.registration_number, "Registration number")?;
        let base_tax_rate =
            require_non_negative(draft.base_tax_rate, "Base tax rate cannot be negative")?;
        draft.spec.validate()?;

        Ok(Self {
            id,
            owner_name,
            year_of_fabrication,
            registration_number,
            base_tax_rate,
            spec: draft.spec,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn year_of_fabrication(&self) -> i32 {
        self.year_of_fabrication
    }

    pub fn registration_number(&self) -> &str {
        &self.registration_number
    }

    pub fn base_tax_rate(&self) -> f64 {
        self.base_tax_rate
    }

    pub fn spec(&self) -> &VehicleSpec {
        &self.spec
    }

    pub fn kind(&self) -> VehicleKind {
        self.spec.kind()
    }

    pub fn vehicle_type(&self) -> &'static str {
        self.kind().label()
    }

    /// Whole years between fabrication and `as_of`.
    pub fn age(&self, as_of: NaiveDate) -> i32 {
        (as_of.year() - self.year_of_fabrication).max(0)
    }

    pub fn set_owner_name(&mut self, owner_name: &str) -> Result<(), ValidationError> {
        self.owner_name = require_text(owner_name, "Owner name")?;
        Ok(())
    }

    pub fn set_year_of_fabrication(
        &mut self,
        year: i32,
        today: NaiveDate,
    ) -> Result<(), ValidationError> {
        self.year_of_fabrication = validate_year(year, today)?;
        Ok(())
    }

    pub fn set_base_tax_rate(&mut self, rate: f64) -> Result<(), ValidationError> {
        self.base_tax_rate = require_non_negative(rate, "Base tax rate cannot be negative")?;
        Ok(())
    }

    /// Replace the kind-specific attributes. The vehicle type itself is fixed.
    pub fn set_spec(&mut self, spec: VehicleSpec) -> Result<(), ValidationError> {
        if spec.kind() != self.kind() {
            return Err(ValidationError::rejected(format!(
                "Vehicle type cannot change from {} to {}",
                self.vehicle_type(),
                spec.kind().label()
            )));
        }
        spec.validate()?;
        self.spec = spec;
        Ok(())
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vehicle ID: {}", self.id)?;
        writeln!(f, "Owner: {}", self.owner_name)?;
        writeln!(f, "Type: {}", self.vehicle_type())?;
        writeln!(f, "Year: {}", self.year_of_fabrication)?;
        writeln!(f, "Registration: {}", self.registration_number)?;
        writeln!(f, "Base Tax Rate: ${:.2}", self.base_tax_rate)?;
        write!(f, "{}", self.spec.detail_line())
    }
}

/// Fabrication years run from 1900 through the current year.
pub fn validate_year(year: i32, today: NaiveDate) -> Result<i32, ValidationError> {
    if year > today.year() {
        return Err(ValidationError::rejected(
            "Year of fabrication cannot be in the future",
        ));
    }
    if year < EARLIEST_FABRICATION_YEAR {
        return Err(ValidationError::rejected(
            "Year of fabrication cannot be before 1900",
        ));
    }
    Ok(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
    }

    fn draft(spec: VehicleSpec) -> VehicleDraft {
        VehicleDraft {
            id: "  V-001 ".to_string(),
            owner_name: " Aline Uwase ".to_string(),
            year_of_fabrication: 2015,
            registration_number: " RAB 123 A".to_string(),
            base_tax_rate: 1000.0,
            spec,
        }
    }

    #[test]
    fn construction_trims_and_keeps_supplied_values() {
        let vehicle = Vehicle::new(draft(VehicleSpec::Car { electric: true }), today())
            .expect("valid vehicle");
        assert_eq!(vehicle.id(), "V-001");
        assert_eq!(vehicle.owner_name(), "Aline Uwase");
        assert_eq!(vehicle.registration_number(), "RAB 123 A");
        assert_eq!(vehicle.year_of_fabrication(), 2015);
        assert_eq!(vehicle.vehicle_type(), "Car");
        assert_eq!(vehicle.age(today()), 10);
    }

    #[test]
    fn construction_rejects_out_of_range_fields() {
        let mut future = draft(VehicleSpec::Car { electric: false });
        future.year_of_fabrication = 2026;
        assert_eq!(
            Vehicle::new(future, today()).unwrap_err().to_string(),
            "Year of fabrication cannot be in the future"
        );

        let mut ancient = draft(VehicleSpec::Car { electric: false });
        ancient.year_of_fabrication = 1899;
        assert!(Vehicle::new(ancient, today()).is_err());

        let mut negative = draft(VehicleSpec::Car { electric: false });
        negative.base_tax_rate = -1.0;
        assert_eq!(
            Vehicle::new(negative, today()).unwrap_err().to_string(),
            "Base tax rate cannot be negative"
        );

        let truck = draft(VehicleSpec::Truck {
            load_capacity_tons: 0.0,
        });
        assert_eq!(
            Vehicle::new(truck, today()).unwrap_err().to_string(),
            "Load capacity must be greater than 0"
        );

        let bus = draft(VehicleSpec::Bus {
            passenger_capacity: 0,
        });
        assert!(Vehicle::new(bus, today()).is_err());
    }

    #[test]
    fn failed_setter_keeps_previous_value() {
        let mut vehicle = Vehicle::new(draft(VehicleSpec::Suv { four_wheel_drive: true }), today())
            .expect("valid vehicle");

        assert!(vehicle.set_owner_name("   ").is_err());
        assert_eq!(vehicle.owner_name(), "Aline Uwase");

        assert!(vehicle.set_base_tax_rate(-5.0).is_err());
        assert_eq!(vehicle.base_tax_rate(), 1000.0);

        assert!(vehicle
            .set_spec(VehicleSpec::Car { electric: true })
            .is_err());
        assert_eq!(vehicle.kind(), VehicleKind::Suv);

        vehicle
            .set_spec(VehicleSpec::Suv {
                four_wheel_drive: false,
            })
            .expect("same kind accepted");
        assert_eq!(
            vehicle.spec(),
            &VehicleSpec::Suv {
                four_wheel_drive: false
            }
        );
    }

    #[test]
    fn summary_lists_kind_specific_attribute() {
        let vehicle = Vehicle::new(
            draft(VehicleSpec::Truck {
                load_capacity_tons: 12.5,
            }),
            today(),
        )
        .expect("valid truck");
        let text = vehicle.to_string();
        assert!(text.starts_with("Vehicle ID: V-001\nOwner: Aline Uwase\nType: Truck"));
        assert!(text.ends_with("Load Capacity: 12.50 tons"));
        assert!(text.contains("Base Tax Rate: $1000.00"));
    }
}
