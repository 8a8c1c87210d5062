use super::common::{date, office, paye, today, vat, COMPANY_TIN, INDIVIDUAL_TIN};
use crate::programs::declarations::{
    render_audit_summary, render_compliance_report, render_receipt, render_selection,
    render_unpaid_summary,
};

#[test]
fn overdue_paye_receipt_shows_penalty_and_total() {
    let mut office = office();
    office
        .file_declaration(COMPANY_TIN, date(2025, 3, 10), paye(150_000.0, 2), today())
        .expect("filed");
    let receipt = render_receipt(&office.declarations()[0], date(2025, 4, 25));

    assert!(receipt.starts_with("======= PAYE TAX RECEIPT =======\n"));
    assert!(receipt.contains("Date: 10/03/2025\n"));
    assert!(receipt.contains("Dependent Deductions: RWF 20000.00\n"));
    assert!(receipt.contains("Tax Due: RWF 23000.00\n"));
    assert!(receipt.contains("Compliance Status: Unpaid\n"));
    assert!(receipt.contains("Late Payment Penalty: RWF 690.00\n"));
    assert!(receipt.contains("Total Amount Due: RWF 23690.00\n"));
}

#[test]
fn paid_receipt_has_no_penalty_lines() {
    let mut office = office();
    office
        .file_declaration(COMPANY_TIN, date(2025, 3, 10), paye(150_000.0, 2), today())
        .expect("filed");
    office.mark_paid(0).expect("valid index");
    let receipt = render_receipt(&office.declarations()[0], date(2025, 6, 1));
    assert!(receipt.contains("Compliance Status: Paid\n"));
    assert!(!receipt.contains("Penalty"));
}

#[test]
fn vat_receipt_warns_on_high_purchase_ratio() {
    let mut office = office();
    office
        .file_declaration(COMPANY_TIN, date(2025, 6, 1), vat(10_000.0, 9_500.0), today())
        .expect("filed");
    let receipt = render_receipt(&office.declarations()[0], today());
    assert!(receipt.contains("Net VAT Due: RWF 90.00\n"));
    assert!(receipt.contains("WARNING: High purchase-to-sales ratio detected."));
    assert_eq!(receipt, render_receipt(&office.declarations()[0], today()));
}

#[test]
fn compliance_report_totals_penalties() {
    let mut office = office();
    office
        .file_declaration(COMPANY_TIN, date(2025, 3, 10), paye(150_000.0, 2), today())
        .expect("filed");
    let taxpayer = office.find_taxpayer(COMPANY_TIN).expect("seeded");
    let report = render_compliance_report(&office, taxpayer, date(2025, 4, 25));

    assert!(report.contains("Compliance Score: 95\n"));
    assert!(report.contains("- DEC-0001 (PAYE): RWF 23000.00 [UNPAID] - Penalty: RWF 690.00\n"));
    assert!(report.contains("Total Amount Due: RWF 23690.00\n"));

    let empty = office.find_taxpayer(INDIVIDUAL_TIN).expect("seeded");
    assert!(render_compliance_report(&office, empty, today()).contains("No declarations found.\n"));
}

#[test]
fn audit_summary_includes_rate_only_after_audits() {
    let mut office = office();
    assert!(!render_audit_summary(&office, &office.officers()[0]).contains("Compliance Rate"));

    office
        .file_declaration(COMPANY_TIN, date(2025, 6, 1), vat(1_000.0, 0.0), today())
        .expect("filed");
    office.audit(0, 0).expect("valid selection");
    let summary = render_audit_summary(&office, &office.officers()[0]);
    assert!(summary.contains("Officer: Claude Mugisha (RRA001)\n"));
    assert!(summary.contains("- Declaration DEC-0001 (Kigali Enterprises Ltd): PASSED\n"));
    assert!(summary.contains("Overall Compliance Rate: 100.0%\n"));
}

#[test]
fn unpaid_summary_and_selection_lines() {
    let mut office = office();
    assert_eq!(
        render_unpaid_summary(&office, today()),
        "No tax declarations registered yet.\n"
    );

    office
        .file_declaration(INDIVIDUAL_TIN, date(2025, 6, 1), paye(50_000.0, 0), today())
        .expect("filed");
    let summary = render_unpaid_summary(&office, today());
    assert!(summary.contains("Taxpayer: Jean-Paul Munyakazi (TIN: 987654321)\n"));
    assert!(summary.contains("Grand Total Due: RWF 4000.00\n"));

    assert_eq!(
        render_selection(office.declarations()),
        "1. DEC-0001 - PAYE (RWF 4000.00) - UNPAID\n"
    );

    office.mark_paid(0).expect("valid index");
    assert_eq!(
        render_unpaid_summary(&office, today()),
        "No unpaid tax declarations found.\n"
    );
}
