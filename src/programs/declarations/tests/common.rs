use chrono::NaiveDate;

use crate::programs::declarations::{DeclarationDetails, TaxOffice, WithholdingCategory};

pub(super) const COMPANY_TIN: &str = "123456789";
pub(super) const INDIVIDUAL_TIN: &str = "987654321";

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2025, 6, 30)
}

pub(super) fn office() -> TaxOffice {
    TaxOffice::with_sample_data().expect("sample data is valid")
}

pub(super) fn paye(gross_salary: f64, dependents: u32) -> DeclarationDetails {
    DeclarationDetails::Paye {
        gross_salary,
        dependents,
    }
}

pub(super) fn vat(taxable_sales: f64, taxable_purchases: f64) -> DeclarationDetails {
    DeclarationDetails::Vat {
        taxable_sales,
        taxable_purchases,
    }
}

pub(super) fn withholding(category: WithholdingCategory, base_amount: f64) -> DeclarationDetails {
    DeclarationDetails::Withholding {
        category,
        base_amount,
    }
}

pub(super) fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-6
}
