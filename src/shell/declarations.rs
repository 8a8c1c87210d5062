use chrono::NaiveDate;
use std::io::{BufRead, Write};
use tracing::debug;

use super::{finish, non_negative_count, Prompter, ShellError};
use crate::calendar::DAY_FIRST;
use crate::programs::declarations::{
    render_audit_summary, render_compliance_report, render_declaration_listing, render_receipt,
    render_selection, render_unpaid_summary, validate_declaration_date, DeclarationDetails,
    DeclarationKind, TaxOffice, TaxpayerKind, Tin, WithholdingCategory,
};
use crate::validation::{parse_decimal, require_non_negative, require_positive};

#[derive(Debug, Clone, Copy)]
enum TaxpayerSource {
    Existing,
    New,
}

/// Interactive tax enforcement session over one [`TaxOffice`].
#[derive(Debug)]
pub struct DeclarationShell {
    office: TaxOffice,
    today: NaiveDate,
}

impl DeclarationShell {
    pub fn new(office: TaxOffice, today: NaiveDate) -> Self {
        Self { office, today }
    }

    pub fn office(&self) -> &TaxOffice {
        &self.office
    }

    pub fn run<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        prompter.say("Welcome to RRA Tax Enforcement Management System")?;
        finish(self.menu_loop(prompter))
    }

    fn menu_loop<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        loop {
            prompter.say("\n===== RRA TAX ENFORCEMENT MANAGEMENT SYSTEM =====")?;
            prompter.say("1. Register a new tax declaration")?;
            prompter.say("2. View registered declarations")?;
            prompter.say("3. View taxpayer compliance report")?;
            prompter.say("4. Print tax receipt")?;
            prompter.say("5. View summary of unpaid taxes")?;
            prompter.say("6. Conduct audit")?;
            prompter.say("7. Exit")?;
            prompter.say("================================================")?;

            match prompter.ask_int("Enter your choice: ")? {
                1 => self.register(prompter)?,
                2 => {
                    prompter.say("")?;
                    prompter.print(&render_declaration_listing(self.office.declarations()))?;
                }
                3 => self.compliance(prompter)?,
                4 => self.receipt(prompter)?,
                5 => {
                    prompter.say("")?;
                    prompter.print(&render_unpaid_summary(&self.office, self.today))?;
                }
                6 => self.audit(prompter)?,
                7 => {
                    prompter.say("Thank you for using RRA Tax Enforcement Management System.")?;
                    return Ok(());
                }
                other => {
                    debug!(choice = other, "unknown menu choice");
                    prompter.say("Invalid choice. Please try again.")?;
                }
            }
        }
    }

    fn register<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        prompter.say("\n----- TAX DECLARATION REGISTRATION -----")?;
        prompter.say("Select tax type:")?;
        let kinds = DeclarationKind::ordered().map(|kind| (kind, kind.menu_label()));
        let kind = prompter.choose(&kinds)?;

        let Some(tin) = self.select_or_create_taxpayer(prompter)? else {
            return Ok(());
        };

        let today = self.today;
        let declared_on = prompter.ask("Enter declaration date (dd/MM/yyyy): ", |raw| {
            validate_declaration_date(DAY_FIRST.parse(raw)?, today)
        })?;

        let details = match kind {
            DeclarationKind::Paye => DeclarationDetails::Paye {
                gross_salary: prompter.ask("Enter gross salary (RWF): ", |raw| {
                    require_positive(parse_decimal(raw)?, "Gross salary must be greater than 0")
                })?,
                dependents: prompter.ask("Enter number of dependents: ", |raw| {
                    non_negative_count(raw, "Number of dependents cannot be negative")
                })?,
            },
            DeclarationKind::Vat => {
                let details = DeclarationDetails::Vat {
                    taxable_sales: prompter.ask("Enter taxable sales (RWF): ", |raw| {
                        require_non_negative(
                            parse_decimal(raw)?,
                            "Taxable sales cannot be negative",
                        )
                    })?,
                    taxable_purchases: prompter.ask("Enter taxable purchases (RWF): ", |raw| {
                        require_non_negative(
                            parse_decimal(raw)?,
                            "Taxable purchases cannot be negative",
                        )
                    })?,
                };
                if details.purchases_exceed_sales() {
                    prompter.say(
                        "Warning: Purchases exceed sales by more than 20%. This may trigger an audit.",
                    )?;
                    let proceed = prompter
                        .ask_flag("Do you want to continue? (true/false): ", "'true' or 'false'")?;
                    if !proceed {
                        prompter.say("Declaration cancelled.")?;
                        return Ok(());
                    }
                }
                details
            }
            DeclarationKind::Withholding => {
                prompter.say("Select withholding tax category:")?;
                let labels = WithholdingCategory::ordered().map(|category| {
                    (
                        category,
                        format!("{} ({:.0}%)", category.menu_label(), category.rate_percent()),
                    )
                });
                let options: Vec<(WithholdingCategory, &str)> = labels
                    .iter()
                    .map(|(category, label)| (*category, label.as_str()))
                    .collect();
                let category = prompter.choose(&options)?;
                DeclarationDetails::Withholding {
                    category,
                    base_amount: prompter.ask("Enter base amount (RWF): ", |raw| {
                        require_positive(parse_decimal(raw)?, "Base amount must be greater than 0")
                    })?,
                }
            }
        };

        match self
            .office
            .file_declaration(&tin, declared_on, details, self.today)
        {
            Ok(declaration) => {
                let tax = declaration.tax_amount();
                prompter.say("Tax declaration registered successfully!")?;
                prompter.say(format_args!("Tax amount calculated: RWF {tax:.2}"))
            }
            Err(err) => prompter.say(format_args!("Declaration failed: {err}")),
        }
    }

    /// Returns the TIN of the chosen or newly created taxpayer.
    fn select_or_create_taxpayer<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Option<String>, ShellError> {
        prompter.say("\nDo you want to use an existing taxpayer or create a new one?")?;
        let source = prompter.choose(&[
            (TaxpayerSource::Existing, "Use existing taxpayer"),
            (TaxpayerSource::New, "Create new taxpayer"),
        ])?;
        match source {
            TaxpayerSource::Existing => self.select_taxpayer(prompter),
            TaxpayerSource::New => self.create_taxpayer(prompter),
        }
    }

    fn select_taxpayer<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Option<String>, ShellError> {
        if self.office.taxpayers().is_empty() {
            prompter.say("No taxpayers registered yet. Please create a new taxpayer.")?;
            return self.create_taxpayer(prompter);
        }

        prompter.say("\n----- SELECT TAXPAYER -----")?;
        for (index, taxpayer) in self.office.taxpayers().iter().enumerate() {
            prompter.say(format_args!("{}. {taxpayer}", index + 1))?;
        }
        match prompter.pick("Enter taxpayer number: ", self.office.taxpayers().len())? {
            Some(index) => Ok(Some(
                self.office.taxpayers()[index].tin().as_str().to_string(),
            )),
            None => {
                prompter.say("Invalid taxpayer selection.")?;
                Ok(None)
            }
        }
    }

    fn create_taxpayer<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Option<String>, ShellError> {
        let tin = prompter.ask("Enter TIN (9 digits): ", Tin::parse)?;
        if self.office.find_taxpayer(tin.as_str()).is_some() {
            prompter.say("A taxpayer with this TIN already exists.")?;
            return Ok(Some(tin.as_str().to_string()));
        }

        let name = prompter.ask_text("Enter taxpayer name: ")?;
        prompter.say("Select taxpayer type:")?;
        let kinds = TaxpayerKind::ordered().map(|kind| (kind, kind.menu_label()));
        let kind = prompter.choose(&kinds)?;

        match self.office.register_taxpayer(tin.as_str(), &name, kind) {
            Ok(taxpayer) => {
                let tin = taxpayer.tin().as_str().to_string();
                prompter.say("Taxpayer created successfully!")?;
                Ok(Some(tin))
            }
            Err(err) => {
                prompter.say(format_args!("Taxpayer creation failed: {err}"))?;
                Ok(None)
            }
        }
    }

    fn compliance<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        if self.office.taxpayers().is_empty() {
            return prompter.say("\nNo taxpayers registered yet.");
        }
        let Some(tin) = self.select_taxpayer(prompter)? else {
            return Ok(());
        };
        if let Some(taxpayer) = self.office.find_taxpayer(&tin) {
            prompter.print(&render_compliance_report(&self.office, taxpayer, self.today))?;
        }
        Ok(())
    }

    fn receipt<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        if self.office.declarations().is_empty() {
            return prompter.say("\nNo tax declarations registered yet.");
        }

        prompter.say("\n----- SELECT DECLARATION FOR RECEIPT -----")?;
        prompter.print(&render_selection(self.office.declarations()))?;
        let Some(index) =
            prompter.pick("Enter declaration number: ", self.office.declarations().len())?
        else {
            return prompter.say("Invalid declaration number.");
        };

        if !self.office.declarations()[index].is_paid() {
            let pay_now = prompter.ask_flag(
                "Declaration is unpaid. Mark as paid now? (true/false): ",
                "'true' or 'false'",
            )?;
            if pay_now {
                match self.office.mark_paid(index) {
                    Ok(true) => prompter.say("Declaration marked as paid.")?,
                    Ok(false) => {}
                    Err(err) => prompter.error(err)?,
                }
            }
        }

        prompter.print(&render_receipt(
            &self.office.declarations()[index],
            self.today,
        ))
    }

    fn audit<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        if self.office.declarations().is_empty() {
            return prompter.say("\nNo tax declarations to audit.");
        }
        if self.office.officers().is_empty() {
            return prompter.say("\nNo tax officers available to conduct audit.");
        }

        prompter.say("\n----- SELECT TAX OFFICER -----")?;
        for (index, officer) in self.office.officers().iter().enumerate() {
            prompter.say(format_args!("{}. {officer}", index + 1))?;
        }
        let Some(officer_index) =
            prompter.pick("Enter officer number: ", self.office.officers().len())?
        else {
            return prompter.say("Invalid officer selection.");
        };

        prompter.say("\n----- SELECT DECLARATION TO AUDIT -----")?;
        prompter.print(&render_selection(self.office.declarations()))?;
        let Some(declaration_index) =
            prompter.pick("Enter declaration number: ", self.office.declarations().len())?
        else {
            return prompter.say("Invalid declaration selection.");
        };

        let outcome = match self.office.audit(officer_index, declaration_index) {
            Ok(outcome) => outcome,
            Err(err) => return prompter.error(err),
        };
        prompter.say("\nAudit completed.")?;
        prompter.say(format_args!(
            "Result: {}",
            if outcome.passed { "PASSED" } else { "FAILED" }
        ))?;
        if !outcome.passed {
            prompter.say("The declaration has failed the audit due to validation issues.")?;
            if outcome.score_lowered {
                prompter.say("Taxpayer compliance score has been decreased.")?;
            }
        }

        let officer = &self.office.officers()[officer_index];
        prompter.print(&render_audit_summary(&self.office, officer))
    }
}
