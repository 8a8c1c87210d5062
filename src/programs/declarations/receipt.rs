//! Text renderings for receipts and enforcement summaries.
//!
//! Every function here is pure: it reads the office as of a given day and returns the
//! finished text, leaving printing to the shell.

use chrono::NaiveDate;
use std::fmt::Write;

use super::assessment::VAT_RATE;
use super::domain::{DeclarationDetails, TaxDeclaration, DEPENDENT_DEDUCTION};
use super::office::TaxOffice;
use super::officer::TaxOfficer;
use super::taxpayer::Taxpayer;

const HIGH_PURCHASE_RATIO: f64 = 0.9;

pub fn render_receipt(declaration: &TaxDeclaration, as_of: NaiveDate) -> String {
    let mut out = String::new();
    let penalty_label;
    let footer;

    match *declaration.details() {
        DeclarationDetails::Paye {
            gross_salary,
            dependents,
        } => {
            let _ = writeln!(out, "======= PAYE TAX RECEIPT =======");
            let _ = writeln!(out, "{declaration}");
            let _ = writeln!(out, "Gross Salary: RWF {gross_salary:.2}");
            let _ = writeln!(out, "Number of Dependents: {dependents}");
            let _ = writeln!(
                out,
                "Dependent Deductions: RWF {:.2}",
                f64::from(dependents) * DEPENDENT_DEDUCTION
            );
            let _ = writeln!(out, "Tax Due: RWF {:.2}", declaration.tax_amount());
            penalty_label = "Late Payment Penalty";
            footer = "===============================";
        }
        DeclarationDetails::Vat {
            taxable_sales,
            taxable_purchases,
        } => {
            let _ = writeln!(out, "======= VAT RECEIPT =======");
            let _ = writeln!(out, "{declaration}");
            let _ = writeln!(out, "Taxable Sales: RWF {taxable_sales:.2}");
            let _ = writeln!(out, "Output VAT (18%): RWF {:.2}", taxable_sales * VAT_RATE);
            let _ = writeln!(out, "Taxable Purchases: RWF {taxable_purchases:.2}");
            let _ = writeln!(
                out,
                "Input VAT (18%): RWF {:.2}",
                taxable_purchases * VAT_RATE
            );
            let _ = writeln!(out, "Net VAT Due: RWF {:.2}", declaration.tax_amount());
            penalty_label = "Late Declaration Penalty";
            footer = "==========================";
        }
        DeclarationDetails::Withholding {
            category,
            base_amount,
        } => {
            let _ = writeln!(out, "======= WITHHOLDING TAX RECEIPT =======");
            let _ = writeln!(out, "{declaration}");
            let _ = writeln!(out, "Category: {}", category.label());
            let _ = writeln!(out, "Tax Rate: {:.1}%", category.rate_percent());
            let _ = writeln!(out, "Base Amount: RWF {base_amount:.2}");
            let _ = writeln!(out, "Tax Due: RWF {:.2}", declaration.tax_amount());
            penalty_label = "Non-Declaration Penalty";
            footer = "====================================";
        }
    }

    let _ = writeln!(
        out,
        "Compliance Status: {}",
        if declaration.is_paid() { "Paid" } else { "Unpaid" }
    );

    let penalty = declaration.penalty(as_of);
    if penalty > 0.0 {
        let _ = writeln!(out, "{penalty_label}: RWF {penalty:.2}");
        let _ = writeln!(
            out,
            "Total Amount Due: RWF {:.2}",
            declaration.tax_amount() + penalty
        );
    }

    if let DeclarationDetails::Vat {
        taxable_sales,
        taxable_purchases,
    } = *declaration.details()
    {
        if taxable_sales > 0.0 && taxable_purchases / taxable_sales > HIGH_PURCHASE_RATIO {
            let _ = writeln!(
                out,
                "WARNING: High purchase-to-sales ratio detected. May be flagged for audit."
            );
        }
    }

    let _ = writeln!(out, "{footer}");
    out
}

/// Numbered one-line entries used when picking a declaration.
pub fn render_selection(declarations: &[TaxDeclaration]) -> String {
    let mut out = String::new();
    for (index, declaration) in declarations.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} - {} (RWF {:.2}) - {}",
            index + 1,
            declaration.id(),
            declaration.kind().label(),
            declaration.tax_amount(),
            paid_tag(declaration)
        );
    }
    out
}

pub fn render_declaration_listing(declarations: &[TaxDeclaration]) -> String {
    if declarations.is_empty() {
        return "No tax declarations registered yet.\n".to_string();
    }
    let mut out = String::from("----- REGISTERED TAX DECLARATIONS -----\n");
    for (index, declaration) in declarations.iter().enumerate() {
        let _ = writeln!(out, "\nDeclaration #{}:", index + 1);
        let _ = writeln!(out, "{declaration}");
        let _ = writeln!(out, "--------------------------------------");
    }
    out
}

pub fn render_compliance_report(office: &TaxOffice, taxpayer: &Taxpayer, as_of: NaiveDate) -> String {
    let mut out = String::from("=== COMPLIANCE REPORT ===\n");
    let _ = writeln!(out, "Taxpayer: {}", taxpayer.name());
    let _ = writeln!(out, "TIN: {}", taxpayer.tin());
    let _ = writeln!(out, "Type: {}", taxpayer.kind().label());
    let _ = writeln!(out, "Compliance Score: {}", taxpayer.compliance_score());
    let _ = writeln!(out, "\nDeclarations:");

    let mut total_tax = 0.0;
    let mut total_penalties = 0.0;
    let mut any = false;
    for declaration in office.declarations_for(taxpayer.tin()) {
        any = true;
        let _ = write!(
            out,
            "- {} ({}): RWF {:.2}",
            declaration.id(),
            declaration.kind().label(),
            declaration.tax_amount()
        );
        if declaration.is_paid() {
            let _ = writeln!(out, " [PAID]");
        } else {
            let penalty = declaration.penalty(as_of);
            let _ = writeln!(out, " [UNPAID] - Penalty: RWF {penalty:.2}");
            total_penalties += penalty;
        }
        total_tax += declaration.tax_amount();
    }
    if !any {
        let _ = writeln!(out, "No declarations found.");
    }

    let _ = writeln!(out, "\nTotal Tax Due: RWF {total_tax:.2}");
    let _ = writeln!(out, "Total Penalties: RWF {total_penalties:.2}");
    let _ = writeln!(
        out,
        "Total Amount Due: RWF {:.2}",
        total_tax + total_penalties
    );
    let _ = writeln!(out, "===========================");
    out
}

pub fn render_audit_summary(office: &TaxOffice, officer: &TaxOfficer) -> String {
    let mut out = String::from("=== AUDIT SUMMARY ===\n");
    let _ = writeln!(out, "Officer: {} ({})", officer.full_name(), officer.id());
    let _ = writeln!(out, "Region: {}", officer.assigned_region());
    let _ = writeln!(out, "Audits Conducted: {}\n", officer.audit_history().len());

    let mut passed = 0usize;
    for id in officer.audit_history() {
        let Some(declaration) = office.find_declaration(id) else {
            continue;
        };
        let ok = declaration.passes_audit();
        if ok {
            passed += 1;
        }
        let _ = writeln!(
            out,
            "- Declaration {} ({}): {}",
            declaration.id(),
            declaration.taxpayer_name(),
            if ok { "PASSED" } else { "FAILED" }
        );
    }

    let audits = officer.audit_history().len();
    if audits > 0 {
        let rate = passed as f64 / audits as f64 * 100.0;
        let _ = writeln!(out, "\nOverall Compliance Rate: {rate:.1}%");
    }
    let _ = writeln!(out, "======================");
    out
}

pub fn render_unpaid_summary(office: &TaxOffice, as_of: NaiveDate) -> String {
    if office.declarations().is_empty() {
        return "No tax declarations registered yet.\n".to_string();
    }
    let unpaid: Vec<&TaxDeclaration> = office.unpaid().collect();
    if unpaid.is_empty() {
        return "No unpaid tax declarations found.\n".to_string();
    }

    let mut out = String::from("----- UNPAID TAXES SUMMARY -----\n");
    let mut total_tax = 0.0;
    let mut total_penalties = 0.0;
    for declaration in unpaid {
        let penalty = declaration.penalty(as_of);
        let _ = writeln!(
            out,
            "Declaration ID: {} - {}",
            declaration.id(),
            declaration.kind().label()
        );
        let _ = writeln!(
            out,
            "Taxpayer: {} (TIN: {})",
            declaration.taxpayer_name(),
            declaration.taxpayer_tin()
        );
        let _ = writeln!(out, "Tax Due: RWF {:.2}", declaration.tax_amount());
        let _ = writeln!(out, "Penalty: RWF {penalty:.2}");
        let _ = writeln!(
            out,
            "Total Due: RWF {:.2}",
            declaration.tax_amount() + penalty
        );
        let _ = writeln!(out, "---------------------------");
        total_tax += declaration.tax_amount();
        total_penalties += penalty;
    }

    let _ = writeln!(out, "\nTotal Unpaid Taxes: RWF {total_tax:.2}");
    let _ = writeln!(out, "Total Penalties: RWF {total_penalties:.2}");
    let _ = writeln!(out, "Grand Total Due: RWF {:.2}", total_tax + total_penalties);
    out
}

fn paid_tag(declaration: &TaxDeclaration) -> &'static str {
    if declaration.is_paid() {
        "PAID"
    } else {
        "UNPAID"
    }
}
