use std::fmt;

use crate::validation::{require_text, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxOfficer {
    id: String,
    full_name: String,
    assigned_region: String,
    audited: Vec<String>,
}

impl TaxOfficer {
    pub fn new(id: &str, full_name: &str, assigned_region: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: require_text(id, "Officer ID")?,
            full_name: require_text(full_name, "Full name")?,
            assigned_region: require_text(assigned_region, "Assigned region")?,
            audited: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn assigned_region(&self) -> &str {
        &self.assigned_region
    }

    /// Declaration ids in the order they were audited; repeats are kept.
    pub fn audit_history(&self) -> &[String] {
        &self.audited
    }

    pub fn set_full_name(&mut self, full_name: &str) -> Result<(), ValidationError> {
        self.full_name = require_text(full_name, "Full name")?;
        Ok(())
    }

    pub fn set_assigned_region(&mut self, region: &str) -> Result<(), ValidationError> {
        self.assigned_region = require_text(region, "Assigned region")?;
        Ok(())
    }

    pub(crate) fn record_audit(&mut self, declaration_id: &str) {
        self.audited.push(declaration_id.to_string());
    }
}

impl fmt::Display for TaxOfficer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tax Officer: {} (ID: {}, Region: {})",
            self.full_name, self.id, self.assigned_region
        )
    }
}
