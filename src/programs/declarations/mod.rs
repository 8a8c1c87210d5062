//! Tax declarations, late-payment enforcement, and officer audits.

pub mod assessment;
pub mod domain;
mod office;
mod officer;
pub mod receipt;
mod taxpayer;

#[cfg(test)]
mod tests;

pub use assessment::{compute_tax, due_date, penalty_percent, DeclarationAssessment};
pub use domain::{
    validate_declaration_date, DeclarationDetails, DeclarationDraft, DeclarationKind,
    TaxDeclaration, TaxpayerKind, Tin, WithholdingCategory,
};
pub use office::{
    AuditOutcome, TaxOffice, FAILED_AUDIT_PENALTY, PAYMENT_REWARD, UNPAID_FILING_PENALTY,
};
pub use officer::TaxOfficer;
pub use receipt::{
    render_audit_summary, render_compliance_report, render_declaration_listing, render_receipt,
    render_selection, render_unpaid_summary,
};
pub use taxpayer::Taxpayer;
