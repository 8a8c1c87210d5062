use chrono::NaiveDate;
use std::io::{BufRead, Write};
use tracing::debug;

use super::{finish, positive_count, Prompter, ShellError};
use crate::programs::vehicles::{
    render_tax_listing, render_tax_report, validate_year, VehicleDraft, VehicleKind,
    VehicleRegistry, VehicleSpec,
};
use crate::validation::{
    parse_decimal, parse_int, require_non_negative, require_positive, require_text,
    ValidationError,
};

const NONE_REGISTERED: &str = "\nNo vehicles registered yet.";

/// Interactive vehicle tax session.
#[derive(Debug)]
pub struct VehicleShell {
    registry: VehicleRegistry,
    today: NaiveDate,
}

impl VehicleShell {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            registry: VehicleRegistry::new(),
            today,
        }
    }

    pub fn registry(&self) -> &VehicleRegistry {
        &self.registry
    }

    pub fn run<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        prompter.say("Welcome to Vehicle Tax Management System")?;
        finish(self.menu_loop(prompter))
    }

    fn menu_loop<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        loop {
            prompter.say("\n===== VEHICLE TAX MANAGEMENT SYSTEM =====")?;
            prompter.say("1. Register a new vehicle")?;
            prompter.say("2. View registered vehicles")?;
            prompter.say("3. Calculate tax for all vehicles")?;
            prompter.say("4. Generate tax reports")?;
            prompter.say("5. Exit")?;
            prompter.say("=========================================")?;

            match prompter.ask_int("Enter your choice: ")? {
                1 => self.register(prompter)?,
                2 => self.list(prompter)?,
                3 => self.tax_for_all(prompter)?,
                4 => self.reports(prompter)?,
                5 => {
                    prompter.say("Thank you for using Vehicle Tax Management System.")?;
                    return Ok(());
                }
                other => {
                    debug!(choice = other, "unknown menu choice");
                    prompter.say("Invalid choice. Please try again.")?;
                }
            }
        }
    }

    fn register<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        prompter.say("\n----- VEHICLE REGISTRATION -----")?;
        prompter.say("Select vehicle type:")?;
        let kinds = VehicleKind::ordered().map(|kind| (kind, kind.label()));
        let kind = prompter.choose(&kinds)?;

        let registry = &self.registry;
        let id = prompter.ask("Enter vehicle ID: ", |raw| {
            let id = require_text(raw, "Input")?;
            registry.ensure_unique_id(&id)?;
            Ok(id)
        })?;
        let owner_name = prompter.ask("Enter owner name: ", |raw| require_text(raw, "Owner name"))?;
        let today = self.today;
        let year_of_fabrication = prompter.ask("Enter year of fabrication: ", |raw| {
            let year = i32::try_from(parse_int(raw)?)
                .map_err(|_| ValidationError::rejected("Year of fabrication is out of range"))?;
            validate_year(year, today)
        })?;
        let registration_number = prompter.ask("Enter registration number: ", |raw| {
            let registration = require_text(raw, "Input")?;
            registry.ensure_unique_registration(&registration)?;
            Ok(registration)
        })?;
        let base_tax_rate = prompter.ask("Enter base tax rate: $", |raw| {
            require_non_negative(parse_decimal(raw)?, "Base tax rate cannot be negative")
        })?;

        let spec = match kind {
            VehicleKind::Car => VehicleSpec::Car {
                electric: prompter
                    .ask_flag("Is the car electric (true/false): ", "'true' or 'false'")?,
            },
            VehicleKind::Truck => VehicleSpec::Truck {
                load_capacity_tons: prompter.ask("Enter load capacity (in tons): ", |raw| {
                    require_positive(parse_decimal(raw)?, "Load capacity must be greater than 0")
                })?,
            },
            VehicleKind::Motorcycle => VehicleSpec::Motorcycle {
                engine_capacity_cc: prompter.ask("Enter engine capacity (in cc): ", |raw| {
                    positive_count(raw, "Engine capacity must be greater than 0")
                })?,
            },
            VehicleKind::Bus => VehicleSpec::Bus {
                passenger_capacity: prompter.ask("Enter passenger capacity: ", |raw| {
                    positive_count(raw, "Passenger capacity must be greater than 0")
                })?,
            },
            VehicleKind::Suv => VehicleSpec::Suv {
                four_wheel_drive: prompter.ask_flag(
                    "Is the SUV four-wheel drive (true/false): ",
                    "'true' or 'false'",
                )?,
            },
        };

        let draft = VehicleDraft {
            id,
            owner_name,
            year_of_fabrication,
            registration_number,
            base_tax_rate,
            spec,
        };
        match self.registry.register(draft, self.today) {
            Ok(_) => prompter.say("Vehicle registered successfully!"),
            Err(err) => prompter.say(format_args!("Registration failed: {err}")),
        }
    }

    fn list<R: BufRead, W: Write>(&self, prompter: &mut Prompter<R, W>) -> Result<(), ShellError> {
        if self.registry.is_empty() {
            return prompter.say(NONE_REGISTERED);
        }
        prompter.say("\n----- REGISTERED VEHICLES -----")?;
        for (index, vehicle) in self.registry.vehicles().iter().enumerate() {
            prompter.say(format_args!("\nVehicle #{}:", index + 1))?;
            prompter.say(vehicle)?;
            prompter.say("-----------------------------")?;
        }
        Ok(())
    }

    fn tax_for_all<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        if self.registry.is_empty() {
            return prompter.say(NONE_REGISTERED);
        }
        prompter.say("\n----- TAX CALCULATION -----")?;
        prompter.print(&render_tax_listing(self.registry.vehicles(), self.today))
    }

    fn reports<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        if self.registry.is_empty() {
            return prompter.say(NONE_REGISTERED);
        }
        prompter.say("\n----- VEHICLE TAX REPORTS -----")?;
        for vehicle in self.registry.vehicles() {
            prompter.say(render_tax_report(vehicle, self.today))?;
        }
        Ok(())
    }
}
