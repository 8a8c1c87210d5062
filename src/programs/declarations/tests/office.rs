use super::common::{date, office, paye, today, vat, withholding, COMPANY_TIN, INDIVIDUAL_TIN};
use crate::programs::declarations::{DeclarationDetails, TaxpayerKind, WithholdingCategory};
use crate::validation::ValidationError;

#[test]
fn sample_data_seeds_taxpayers_and_officers() {
    let office = office();
    assert_eq!(office.taxpayers().len(), 2);
    assert_eq!(office.officers().len(), 2);
    assert_eq!(
        office.find_taxpayer(INDIVIDUAL_TIN).map(|t| t.name()),
        Some("Jean-Paul Munyakazi")
    );
    assert_eq!(office.officers()[1].assigned_region(), "Eastern Province");
}

#[test]
fn duplicate_tin_is_rejected() {
    let mut office = office();
    let err = office
        .register_taxpayer(COMPANY_TIN, "Another Ltd", TaxpayerKind::Company)
        .unwrap_err();
    assert_eq!(err.to_string(), "A taxpayer with this TIN already exists.");
    assert_eq!(office.taxpayers().len(), 2);
}

#[test]
fn filing_assigns_sequential_ids_and_costs_compliance_points() {
    let mut office = office();
    let first = office
        .file_declaration(COMPANY_TIN, date(2025, 3, 10), paye(150_000.0, 2), today())
        .expect("filed")
        .id()
        .to_string();
    let second = office
        .file_declaration(COMPANY_TIN, date(2025, 3, 12), vat(5_000.0, 1_000.0), today())
        .expect("filed")
        .id()
        .to_string();

    assert_eq!(first, "DEC-0001");
    assert_eq!(second, "DEC-0002");

    let taxpayer = office.find_taxpayer(COMPANY_TIN).expect("seeded");
    assert_eq!(taxpayer.compliance_score(), 90);
    assert_eq!(taxpayer.declaration_ids(), &["DEC-0001", "DEC-0002"]);
}

#[test]
fn same_kind_in_same_month_is_a_duplicate() {
    let mut office = office();
    office
        .file_declaration(COMPANY_TIN, date(2025, 3, 1), paye(80_000.0, 0), today())
        .expect("filed");

    let err = office
        .file_declaration(COMPANY_TIN, date(2025, 3, 28), paye(90_000.0, 1), today())
        .unwrap_err();
    assert_eq!(err, ValidationError::duplicate("Duplicate declaration for the same period"));

    // another month, another taxpayer, or another kind are all fine
    office
        .file_declaration(COMPANY_TIN, date(2025, 4, 1), paye(80_000.0, 0), today())
        .expect("next month");
    office
        .file_declaration(INDIVIDUAL_TIN, date(2025, 3, 1), paye(80_000.0, 0), today())
        .expect("other taxpayer");
    office
        .file_declaration(
            COMPANY_TIN,
            date(2025, 3, 1),
            withholding(WithholdingCategory::Rent, 100_000.0),
            today(),
        )
        .expect("other kind");
    assert_eq!(office.declarations().len(), 4);
}

#[test]
fn unknown_taxpayer_cannot_file() {
    let mut office = office();
    let err = office
        .file_declaration("111111111", date(2025, 3, 1), paye(80_000.0, 0), today())
        .unwrap_err();
    assert!(matches!(err, ValidationError::NotFound(_)));
    assert!(office.declarations().is_empty());
}

#[test]
fn paying_restores_score_once() {
    let mut office = office();
    office
        .file_declaration(INDIVIDUAL_TIN, date(2025, 5, 2), paye(60_000.0, 0), today())
        .expect("filed");
    assert!(office.mark_paid(0).expect("valid index"));
    assert!(!office.mark_paid(0).expect("valid index"));

    assert_eq!(
        office
            .find_taxpayer(INDIVIDUAL_TIN)
            .expect("seeded")
            .compliance_score(),
        100
    );
    assert_eq!(office.unpaid().count(), 0);
    assert!(office.mark_paid(7).is_err());
}

#[test]
fn audits_are_recorded_and_failures_lower_the_score() {
    let mut office = office();
    office
        .file_declaration(COMPANY_TIN, date(2025, 5, 2), vat(1_000.0, 100.0), today())
        .expect("filed");

    let outcome = office.audit(0, 0).expect("valid selection");
    assert!(outcome.passed);
    assert!(!outcome.score_lowered);

    *office
        .declaration_mut(0)
        .expect("filed")
        .details_mut() = DeclarationDetails::Vat {
        taxable_sales: -1.0,
        taxable_purchases: 100.0,
    };
    let outcome = office.audit(0, 0).expect("valid selection");
    assert!(!outcome.passed);
    assert!(outcome.score_lowered);

    assert_eq!(office.officers()[0].audit_history(), &["DEC-0001", "DEC-0001"]);
    assert_eq!(
        office
            .find_taxpayer(COMPANY_TIN)
            .expect("seeded")
            .compliance_score(),
        85
    );
    assert!(office.audit(5, 0).is_err());
}
