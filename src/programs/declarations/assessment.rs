use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use super::domain::{DeclarationDetails, DeclarationKind, TaxDeclaration, DEPENDENT_DEDUCTION};
use crate::calendar::whole_months_between;

pub const VAT_RATE: f64 = 0.18;

const PAYE_ZERO_BAND: f64 = 30_000.0;
const PAYE_MIDDLE_BAND: f64 = 100_000.0;
const PAYE_MIDDLE_RATE: f64 = 0.2;
const PAYE_TOP_RATE: f64 = 0.3;

const PAYE_BASE_PENALTY: f64 = 2.0;
const PAYE_DAILY_PENALTY: f64 = 0.1;
const PAYE_PENALTY_CAP: f64 = 20.0;
const VAT_BASE_PENALTY: f64 = 10.0;
const VAT_MONTHLY_PENALTY: f64 = 1.5;
const WITHHOLDING_BASE_PENALTY: f64 = 50.0;
const WITHHOLDING_MONTHLY_PENALTY: f64 = 10.0;
const WITHHOLDING_PENALTY_CAP: f64 = 100.0;
const WITHHOLDING_GRACE_DAYS: u64 = 15;

/// Tax owed for the declared figures.
pub fn compute_tax(details: &DeclarationDetails) -> f64 {
    match *details {
        DeclarationDetails::Paye {
            gross_salary,
            dependents,
        } => {
            let taxable = gross_salary - f64::from(dependents) * DEPENDENT_DEDUCTION;
            if taxable <= PAYE_ZERO_BAND {
                0.0
            } else if taxable <= PAYE_MIDDLE_BAND {
                (taxable - PAYE_ZERO_BAND) * PAYE_MIDDLE_RATE
            } else {
                (PAYE_MIDDLE_BAND - PAYE_ZERO_BAND) * PAYE_MIDDLE_RATE
                    + (taxable - PAYE_MIDDLE_BAND) * PAYE_TOP_RATE
            }
        }
        DeclarationDetails::Vat {
            taxable_sales,
            taxable_purchases,
        } => (taxable_sales * VAT_RATE - taxable_purchases * VAT_RATE).max(0.0),
        DeclarationDetails::Withholding {
            category,
            base_amount,
        } => base_amount * category.rate_percent() / 100.0,
    }
}

/// Audit check applied by tax officers.
pub fn passes_audit(details: &DeclarationDetails) -> bool {
    match *details {
        DeclarationDetails::Paye { gross_salary, .. } => gross_salary > 0.0,
        DeclarationDetails::Vat {
            taxable_sales,
            taxable_purchases,
        } => taxable_sales >= 0.0 && taxable_purchases >= 0.0,
        DeclarationDetails::Withholding { base_amount, .. } => base_amount > 0.0,
    }
}

/// Last day a declaration can be settled without penalty.
///
/// `None` only when the date arithmetic would leave chrono's supported range.
pub fn due_date(kind: DeclarationKind, declared_on: NaiveDate) -> Option<NaiveDate> {
    match kind {
        DeclarationKind::Paye | DeclarationKind::Vat => {
            let first_of_month = declared_on - Days::new(u64::from(declared_on.day0()));
            first_of_month
                .checked_add_months(Months::new(1))?
                .checked_add_days(Days::new(14))
        }
        DeclarationKind::Withholding => {
            declared_on.checked_add_days(Days::new(WITHHOLDING_GRACE_DAYS))
        }
    }
}

/// Penalty percentage for a declaration still unpaid on `as_of`; zero until it is overdue.
pub fn penalty_percent(kind: DeclarationKind, declared_on: NaiveDate, as_of: NaiveDate) -> f64 {
    let Some(due) = due_date(kind, declared_on) else {
        return 0.0;
    };
    if as_of <= due {
        return 0.0;
    }

    match kind {
        DeclarationKind::Paye => {
            let days_late = (as_of - due).num_days() as f64;
            (PAYE_BASE_PENALTY + days_late * PAYE_DAILY_PENALTY).min(PAYE_PENALTY_CAP)
        }
        DeclarationKind::Vat => {
            let months_late = f64::from(whole_months_between(due, as_of));
            VAT_BASE_PENALTY + months_late * VAT_MONTHLY_PENALTY
        }
        DeclarationKind::Withholding => {
            let months_late = f64::from(whole_months_between(due, as_of));
            (WITHHOLDING_BASE_PENALTY + months_late * WITHHOLDING_MONTHLY_PENALTY)
                .min(WITHHOLDING_PENALTY_CAP)
        }
    }
}

impl TaxDeclaration {
    /// Late-payment penalty owed on `as_of`. Paid declarations owe nothing.
    pub fn penalty(&self, as_of: NaiveDate) -> f64 {
        if self.is_paid() {
            return 0.0;
        }
        self.tax_amount() * penalty_percent(self.kind(), self.declaration_date(), as_of) / 100.0
    }

    pub fn passes_audit(&self) -> bool {
        passes_audit(self.details())
    }
}

/// Serializable breakdown of what a declaration owes on a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclarationAssessment {
    pub kind: DeclarationKind,
    pub details: DeclarationDetails,
    pub declaration_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub tax_amount: f64,
    pub paid: bool,
    pub penalty_percent: f64,
    pub penalty: f64,
    pub total_due: f64,
}

impl DeclarationAssessment {
    /// Assess figures that have not been filed yet, treating them as unpaid.
    pub fn quote(details: DeclarationDetails, declared_on: NaiveDate, as_of: NaiveDate) -> Self {
        let kind = details.kind();
        let tax_amount = compute_tax(&details);
        let percent = penalty_percent(kind, declared_on, as_of);
        let penalty = tax_amount * percent / 100.0;
        Self {
            kind,
            details,
            declaration_date: declared_on,
            due_date: due_date(kind, declared_on),
            tax_amount,
            paid: false,
            penalty_percent: percent,
            penalty,
            total_due: tax_amount + penalty,
        }
    }

    pub fn for_declaration(declaration: &TaxDeclaration, as_of: NaiveDate) -> Self {
        let kind = declaration.kind();
        let declared_on = declaration.declaration_date();
        let penalty = declaration.penalty(as_of);
        let percent = if declaration.is_paid() {
            0.0
        } else {
            penalty_percent(kind, declared_on, as_of)
        };
        Self {
            kind,
            details: *declaration.details(),
            declaration_date: declared_on,
            due_date: due_date(kind, declared_on),
            tax_amount: declaration.tax_amount(),
            paid: declaration.is_paid(),
            penalty_percent: percent,
            penalty,
            total_due: if declaration.is_paid() {
                0.0
            } else {
                declaration.tax_amount() + penalty
            },
        }
    }
}
