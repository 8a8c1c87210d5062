//! Annual road tax for registered vehicles.

pub mod domain;
mod registry;
pub mod report;
pub mod tax;

pub use domain::{validate_year, Vehicle, VehicleDraft, VehicleKind, VehicleSpec};
pub use registry::VehicleRegistry;
pub use report::{render_tax_listing, render_tax_report};
pub use tax::{assess, TaxAdjustment, TaxAssessment};
