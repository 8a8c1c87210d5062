use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::assessment::compute_tax;
use crate::calendar::DAY_FIRST;
use crate::validation::{
    require_non_negative, require_positive, require_text, yes_no, ValidationError,
};

pub const DEPENDENT_DEDUCTION: f64 = 10_000.0;

/// Nine-digit taxpayer identification number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tin(String);

impl Tin {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let value = require_text(raw, "TIN")?;
        if value.chars().count() != 9 {
            return Err(ValidationError::rejected("TIN must be exactly 9 digits"));
        }
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::rejected("TIN must contain only digits"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxpayerKind {
    Individual,
    Company,
}

impl TaxpayerKind {
    pub const fn ordered() -> [Self; 2] {
        [Self::Individual, Self::Company]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Individual => "INDIVIDUAL",
            Self::Company => "COMPANY",
        }
    }

    pub const fn menu_label(self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Company => "Company",
        }
    }
}

/// Withholding categories with their statutory rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WithholdingCategory {
    Rent,
    Dividends,
    Interest,
    ProfessionalServices,
    Imports,
    PublicTender,
}

impl WithholdingCategory {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Rent,
            Self::Dividends,
            Self::Interest,
            Self::ProfessionalServices,
            Self::Imports,
            Self::PublicTender,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Rent => "RENT",
            Self::Dividends => "DIVIDENDS",
            Self::Interest => "INTEREST",
            Self::ProfessionalServices => "PROFESSIONAL_SERVICES",
            Self::Imports => "IMPORTS",
            Self::PublicTender => "PUBLIC_TENDER",
        }
    }

    pub const fn menu_label(self) -> &'static str {
        match self {
            Self::Rent => "Rent",
            Self::Dividends => "Dividends",
            Self::Interest => "Interest",
            Self::ProfessionalServices => "Professional Services",
            Self::Imports => "Imports",
            Self::PublicTender => "Public Tender",
        }
    }

    pub const fn rate_percent(self) -> f64 {
        match self {
            Self::Rent | Self::Dividends | Self::Interest | Self::ProfessionalServices => 15.0,
            Self::Imports => 5.0,
            Self::PublicTender => 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Paye,
    Vat,
    Withholding,
}

impl DeclarationKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::Paye, Self::Vat, Self::Withholding]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Paye => "PAYE",
            Self::Vat => "VAT",
            Self::Withholding => "Withholding Tax",
        }
    }

    pub const fn menu_label(self) -> &'static str {
        match self {
            Self::Paye => "PAYE (Pay As You Earn)",
            Self::Vat => "VAT (Value Added Tax)",
            Self::Withholding => "Withholding Tax",
        }
    }
}

/// Figures specific to one kind of declaration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationDetails {
    Paye {
        gross_salary: f64,
        dependents: u32,
    },
    Vat {
        taxable_sales: f64,
        taxable_purchases: f64,
    },
    Withholding {
        category: WithholdingCategory,
        base_amount: f64,
    },
}

impl DeclarationDetails {
    pub const fn kind(&self) -> DeclarationKind {
        match self {
            Self::Paye { .. } => DeclarationKind::Paye,
            Self::Vat { .. } => DeclarationKind::Vat,
            Self::Withholding { .. } => DeclarationKind::Withholding,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            Self::Paye { gross_salary, .. } => {
                require_positive(gross_salary, "Gross salary must be greater than 0")?;
            }
            Self::Vat {
                taxable_sales,
                taxable_purchases,
            } => {
                require_non_negative(taxable_sales, "Taxable sales cannot be negative")?;
                require_non_negative(taxable_purchases, "Taxable purchases cannot be negative")?;
            }
            Self::Withholding { base_amount, .. } => {
                require_positive(base_amount, "Base amount must be greater than 0")?;
            }
        }
        Ok(())
    }

    /// Purchases more than 20% above sales; filing asks for confirmation first.
    pub fn purchases_exceed_sales(&self) -> bool {
        match *self {
            Self::Vat {
                taxable_sales,
                taxable_purchases,
            } => taxable_purchases > taxable_sales * 1.2,
            _ => false,
        }
    }
}

/// Unvalidated declaration input.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationDraft {
    pub taxpayer_name: String,
    pub taxpayer_tin: String,
    pub declaration_date: NaiveDate,
    pub details: DeclarationDetails,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaxDeclaration {
    id: String,
    taxpayer_name: String,
    taxpayer_tin: Tin,
    declaration_date: NaiveDate,
    tax_amount: f64,
    paid: bool,
    details: DeclarationDetails,
}

impl TaxDeclaration {
    /// Build an unpaid declaration whose tax amount is computed from `draft.details`.
    pub fn new(id: &str, draft: DeclarationDraft, today: NaiveDate) -> Result<Self, ValidationError> {
        let id = require_text(id, "Declaration ID")?;
        let taxpayer_name = require_text(&draft.taxpayer_name, "Taxpayer name")?;
        let taxpayer_tin = Tin::parse(&draft.taxpayer_tin)?;
        let declaration_date = validate_declaration_date(draft.declaration_date, today)?;
        draft.details.validate()?;

        Ok(Self {
            id,
            taxpayer_name,
            taxpayer_tin,
            declaration_date,
            tax_amount: compute_tax(&draft.details),
            paid: false,
            details: draft.details,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn taxpayer_name(&self) -> &str {
        &self.taxpayer_name
    }

    pub fn taxpayer_tin(&self) -> &Tin {
        &self.taxpayer_tin
    }

    pub fn declaration_date(&self) -> NaiveDate {
        self.declaration_date
    }

    pub fn tax_amount(&self) -> f64 {
        self.tax_amount
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    pub fn details(&self) -> &DeclarationDetails {
        &self.details
    }

    pub fn kind(&self) -> DeclarationKind {
        self.details.kind()
    }

    pub fn set_taxpayer_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.taxpayer_name = require_text(name, "Taxpayer name")?;
        Ok(())
    }

    pub fn set_declaration_date(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), ValidationError> {
        self.declaration_date = validate_declaration_date(date, today)?;
        Ok(())
    }

    pub fn set_tax_amount(&mut self, amount: f64) -> Result<(), ValidationError> {
        self.tax_amount = require_non_negative(amount, "Tax amount cannot be negative")?;
        Ok(())
    }

    pub fn set_paid(&mut self, paid: bool) {
        self.paid = paid;
    }

    /// Replace the figures and recompute the tax. The kind itself is fixed.
    pub fn set_details(&mut self, details: DeclarationDetails) -> Result<(), ValidationError> {
        if details.kind() != self.kind() {
            return Err(ValidationError::rejected(format!(
                "Declaration type cannot change from {} to {}",
                self.kind().label(),
                details.kind().label()
            )));
        }
        details.validate()?;
        self.tax_amount = compute_tax(&details);
        self.details = details;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn details_mut(&mut self) -> &mut DeclarationDetails {
        &mut self.details
    }
}

impl fmt::Display for TaxDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Declaration ID: {}", self.id)?;
        writeln!(f, "Taxpayer: {}", self.taxpayer_name)?;
        writeln!(f, "TIN: {}", self.taxpayer_tin)?;
        writeln!(f, "Date: {}", DAY_FIRST.render(self.declaration_date))?;
        writeln!(f, "Amount: RWF {:.2}", self.tax_amount)?;
        writeln!(f, "Paid: {}", yes_no(self.paid))?;
        match self.details {
            DeclarationDetails::Withholding { category, .. } => {
                write!(f, "Type: Withholding Tax - {}", category.label())
            }
            _ => write!(f, "Type: {}", self.kind().label()),
        }
    }
}

pub fn validate_declaration_date(
    date: NaiveDate,
    today: NaiveDate,
) -> Result<NaiveDate, ValidationError> {
    if date > today {
        return Err(ValidationError::rejected(
            "Declaration date cannot be in the future",
        ));
    }
    Ok(date)
}
