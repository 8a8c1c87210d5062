use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use super::domain::{DeclarationDetails, DeclarationDraft, TaxDeclaration, TaxpayerKind, Tin};
use super::officer::TaxOfficer;
use super::taxpayer::Taxpayer;
use crate::validation::ValidationError;

pub const UNPAID_FILING_PENALTY: i32 = -5;
pub const PAYMENT_REWARD: i32 = 5;
pub const FAILED_AUDIT_PENALTY: i32 = -10;

/// Result of one officer reviewing one declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditOutcome {
    pub passed: bool,
    /// Whether the taxpayer's compliance score was lowered because of the failure.
    pub score_lowered: bool,
}

/// In-memory registry of taxpayers, officers, and filed declarations.
#[derive(Debug, Default)]
pub struct TaxOffice {
    taxpayers: Vec<Taxpayer>,
    officers: Vec<TaxOfficer>,
    declarations: Vec<TaxDeclaration>,
    sequence: u32,
}

impl TaxOffice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Office preloaded with two taxpayers and two officers.
    pub fn with_sample_data() -> Result<Self, ValidationError> {
        let mut office = Self::new();
        office.register_taxpayer("123456789", "Kigali Enterprises Ltd", TaxpayerKind::Company)?;
        office.register_taxpayer("987654321", "Jean-Paul Munyakazi", TaxpayerKind::Individual)?;
        office.add_officer(TaxOfficer::new("RRA001", "Claude Mugisha", "Kigali")?)?;
        office.add_officer(TaxOfficer::new("RRA002", "Diane Mukamana", "Eastern Province")?)?;
        Ok(office)
    }

    pub fn taxpayers(&self) -> &[Taxpayer] {
        &self.taxpayers
    }

    pub fn officers(&self) -> &[TaxOfficer] {
        &self.officers
    }

    pub fn declarations(&self) -> &[TaxDeclaration] {
        &self.declarations
    }

    pub fn find_taxpayer(&self, tin: &str) -> Option<&Taxpayer> {
        let tin = tin.trim();
        self.taxpayers.iter().find(|t| t.tin().as_str() == tin)
    }

    pub fn find_declaration(&self, id: &str) -> Option<&TaxDeclaration> {
        let id = id.trim();
        self.declarations.iter().find(|d| d.id().eq_ignore_ascii_case(id))
    }

    /// Declarations filed under `tin`, in filing order.
    pub fn declarations_for<'a>(&'a self, tin: &'a Tin) -> impl Iterator<Item = &'a TaxDeclaration> {
        self.declarations
            .iter()
            .filter(move |d| d.taxpayer_tin() == tin)
    }

    pub fn unpaid(&self) -> impl Iterator<Item = &TaxDeclaration> {
        self.declarations.iter().filter(|d| !d.is_paid())
    }

    pub fn register_taxpayer(
        &mut self,
        tin: &str,
        name: &str,
        kind: TaxpayerKind,
    ) -> Result<&Taxpayer, ValidationError> {
        let taxpayer = Taxpayer::new(tin, name, kind)?;
        if self.find_taxpayer(taxpayer.tin().as_str()).is_some() {
            debug!(tin = taxpayer.tin().as_str(), "duplicate taxpayer rejected");
            return Err(ValidationError::duplicate(
                "A taxpayer with this TIN already exists.",
            ));
        }
        info!(tin = taxpayer.tin().as_str(), kind = kind.label(), "taxpayer registered");
        self.taxpayers.push(taxpayer);
        Ok(&self.taxpayers[self.taxpayers.len() - 1])
    }

    pub fn add_officer(&mut self, officer: TaxOfficer) -> Result<&TaxOfficer, ValidationError> {
        if self
            .officers
            .iter()
            .any(|o| o.id().eq_ignore_ascii_case(officer.id()))
        {
            return Err(ValidationError::duplicate(
                "An officer with this ID already exists.",
            ));
        }
        self.officers.push(officer);
        Ok(&self.officers[self.officers.len() - 1])
    }

    /// File a new unpaid declaration for an existing taxpayer.
    ///
    /// The taxpayer may hold at most one declaration of each kind per calendar month, and
    /// every unpaid filing costs five compliance points.
    pub fn file_declaration(
        &mut self,
        tin: &str,
        declared_on: NaiveDate,
        details: DeclarationDetails,
        today: NaiveDate,
    ) -> Result<&TaxDeclaration, ValidationError> {
        let tin = Tin::parse(tin)?;
        let taxpayer_index = self
            .taxpayers
            .iter()
            .position(|t| t.tin() == &tin)
            .ok_or_else(|| ValidationError::not_found("No taxpayer registered with this TIN."))?;

        let duplicate = self.declarations_for(&tin).any(|existing| {
            existing.kind() == details.kind()
                && existing.declaration_date().year() == declared_on.year()
                && existing.declaration_date().month() == declared_on.month()
        });
        if duplicate {
            debug!(tin = tin.as_str(), kind = details.kind().label(), "duplicate period rejected");
            return Err(ValidationError::duplicate(
                "Duplicate declaration for the same period",
            ));
        }

        let id = format!("DEC-{:04}", self.sequence + 1);
        let draft = DeclarationDraft {
            taxpayer_name: self.taxpayers[taxpayer_index].name().to_string(),
            taxpayer_tin: tin.as_str().to_string(),
            declaration_date: declared_on,
            details,
        };
        let declaration = TaxDeclaration::new(&id, draft, today)?;
        self.sequence += 1;

        let taxpayer = &mut self.taxpayers[taxpayer_index];
        taxpayer.record_declaration(&id);
        if !declaration.is_paid() {
            taxpayer.adjust_compliance_score(UNPAID_FILING_PENALTY);
        }

        info!(
            declaration_id = id.as_str(),
            tin = tin.as_str(),
            kind = declaration.kind().label(),
            tax = declaration.tax_amount(),
            "declaration filed"
        );
        self.declarations.push(declaration);
        Ok(&self.declarations[self.declarations.len() - 1])
    }

    /// Mark the declaration at `index` as paid. Returns `false` when it already was.
    pub fn mark_paid(&mut self, index: usize) -> Result<bool, ValidationError> {
        let declaration = self
            .declarations
            .get_mut(index)
            .ok_or_else(|| ValidationError::not_found("Invalid declaration number."))?;
        if declaration.is_paid() {
            return Ok(false);
        }
        declaration.set_paid(true);
        let tin = declaration.taxpayer_tin().clone();
        info!(declaration_id = declaration.id(), "declaration marked as paid");

        if let Some(taxpayer) = self.taxpayers.iter_mut().find(|t| t.tin() == &tin) {
            taxpayer.adjust_compliance_score(PAYMENT_REWARD);
        }
        Ok(true)
    }

    /// Have the officer at `officer_index` audit the declaration at `declaration_index`.
    pub fn audit(
        &mut self,
        officer_index: usize,
        declaration_index: usize,
    ) -> Result<AuditOutcome, ValidationError> {
        let declaration = self
            .declarations
            .get(declaration_index)
            .ok_or_else(|| ValidationError::not_found("Invalid declaration selection."))?;
        let officer = self
            .officers
            .get_mut(officer_index)
            .ok_or_else(|| ValidationError::not_found("Invalid officer selection."))?;

        let passed = declaration.passes_audit();
        officer.record_audit(declaration.id());
        info!(
            officer_id = officer.id(),
            declaration_id = declaration.id(),
            passed,
            "audit recorded"
        );

        let mut score_lowered = false;
        if !passed {
            let tin = declaration.taxpayer_tin();
            if let Some(taxpayer) = self.taxpayers.iter_mut().find(|t| t.tin() == tin) {
                taxpayer.adjust_compliance_score(FAILED_AUDIT_PENALTY);
                score_lowered = true;
            }
        }

        Ok(AuditOutcome {
            passed,
            score_lowered,
        })
    }

    #[cfg(test)]
    pub(crate) fn declaration_mut(&mut self, index: usize) -> Option<&mut TaxDeclaration> {
        self.declarations.get_mut(index)
    }
}
