use std::fmt;

use super::domain::{TaxpayerKind, Tin};
use crate::validation::{require_text, ValidationError};

pub const MAX_COMPLIANCE_SCORE: i32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Taxpayer {
    tin: Tin,
    name: String,
    kind: TaxpayerKind,
    compliance_score: i32,
    declaration_ids: Vec<String>,
}

impl Taxpayer {
    pub fn new(tin: &str, name: &str, kind: TaxpayerKind) -> Result<Self, ValidationError> {
        Ok(Self {
            tin: Tin::parse(tin)?,
            name: require_text(name, "Name")?,
            kind,
            compliance_score: MAX_COMPLIANCE_SCORE,
            declaration_ids: Vec::new(),
        })
    }

    pub fn tin(&self) -> &Tin {
        &self.tin
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TaxpayerKind {
        self.kind
    }

    pub fn compliance_score(&self) -> i32 {
        self.compliance_score
    }

    /// Ids of the declarations filed by this taxpayer, oldest first.
    pub fn declaration_ids(&self) -> &[String] {
        &self.declaration_ids
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = require_text(name, "Name")?;
        Ok(())
    }

    pub fn set_kind(&mut self, kind: TaxpayerKind) {
        self.kind = kind;
    }

    /// Out-of-range scores are clamped into 0..=100.
    pub fn set_compliance_score(&mut self, score: i32) {
        self.compliance_score = score.clamp(0, MAX_COMPLIANCE_SCORE);
    }

    pub fn adjust_compliance_score(&mut self, delta: i32) {
        self.set_compliance_score(self.compliance_score.saturating_add(delta));
    }

    pub(crate) fn record_declaration(&mut self, declaration_id: &str) {
        self.declaration_ids.push(declaration_id.to_string());
    }
}

impl fmt::Display for Taxpayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Taxpayer: {} (TIN: {}, Type: {})",
            self.name,
            self.tin,
            self.kind.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_starts_full_and_is_clamped() {
        let mut taxpayer = Taxpayer::new("987654321", "Jean-Paul Munyakazi", TaxpayerKind::Individual)
            .expect("valid taxpayer");
        assert_eq!(taxpayer.compliance_score(), 100);

        taxpayer.adjust_compliance_score(5);
        assert_eq!(taxpayer.compliance_score(), 100);

        taxpayer.set_compliance_score(-40);
        assert_eq!(taxpayer.compliance_score(), 0);

        taxpayer.adjust_compliance_score(-10);
        assert_eq!(taxpayer.compliance_score(), 0);
    }

    #[test]
    fn display_names_kind() {
        let taxpayer = Taxpayer::new("123456789", "Kigali Enterprises Ltd", TaxpayerKind::Company)
            .expect("valid taxpayer");
        assert_eq!(
            taxpayer.to_string(),
            "Taxpayer: Kigali Enterprises Ltd (TIN: 123456789, Type: COMPANY)"
        );
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut taxpayer = Taxpayer::new("123456789", "Kigali Enterprises Ltd", TaxpayerKind::Company)
            .expect("valid taxpayer");
        assert_eq!(
            taxpayer.set_name("  ").unwrap_err().to_string(),
            "Name cannot be empty"
        );
        assert_eq!(taxpayer.name(), "Kigali Enterprises Ltd");
    }
}
