use chrono::NaiveDate;
use tracing::{debug, info};

use super::domain::{Vehicle, VehicleDraft};
use crate::validation::ValidationError;

/// Vehicles registered during the session, in registration order.
#[derive(Debug, Default)]
pub struct VehicleRegistry {
    vehicles: Vec<Vehicle>,
}

impl VehicleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft and append it when both its id and plate are unused.
    pub fn register(
        &mut self,
        draft: VehicleDraft,
        today: NaiveDate,
    ) -> Result<&Vehicle, ValidationError> {
        self.ensure_unique_id(&draft.id)?;
        self.ensure_unique_registration(&draft.registration_number)?;
        let vehicle = Vehicle::new(draft, today)?;
        info!(
            vehicle_id = vehicle.id(),
            kind = vehicle.vehicle_type(),
            "vehicle registered"
        );
        self.vehicles.push(vehicle);
        Ok(&self.vehicles[self.vehicles.len() - 1])
    }

    pub fn ensure_unique_id(&self, id: &str) -> Result<(), ValidationError> {
        let id = id.trim();
        if self.vehicles.iter().any(|v| v.id().eq_ignore_ascii_case(id)) {
            debug!(vehicle_id = id, "duplicate vehicle id rejected");
            return Err(ValidationError::duplicate(
                "Vehicle ID already exists. Please enter a unique ID.",
            ));
        }
        Ok(())
    }

    pub fn ensure_unique_registration(&self, registration: &str) -> Result<(), ValidationError> {
        let registration = registration.trim();
        if self
            .vehicles
            .iter()
            .any(|v| v.registration_number().eq_ignore_ascii_case(registration))
        {
            debug!(registration, "duplicate registration number rejected");
            return Err(ValidationError::duplicate(
                "Registration number already exists. Please enter a unique number.",
            ));
        }
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&Vehicle> {
        let id = id.trim();
        self.vehicles.iter().find(|v| v.id().eq_ignore_ascii_case(id))
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
