use chrono::NaiveDate;
use std::io::{BufRead, Write};
use std::rc::Rc;
use tracing::debug;

use super::{finish, Prompter, ShellError};
use crate::calendar::ISO;
use crate::programs::internships::{
    render_detailed_report, render_selection, Company, Industry, Internship, InternshipDraft,
    InternshipStatus, PlacementRegistry, ProgramDetails, ProgramKind, ProgramRequest,
    ProgressUpdate, Qualification, Student, Supervisor, University,
};
use crate::validation::{require_email, require_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entity {
    Student,
    Supervisor,
    Company,
    Internship,
}

impl Entity {
    const fn noun(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Supervisor => "supervisor",
            Self::Company => "company",
            Self::Internship => "internship",
        }
    }

    const fn plural(self) -> &'static str {
        match self {
            Self::Student => "students",
            Self::Supervisor => "supervisors",
            Self::Company => "companies",
            Self::Internship => "internships",
        }
    }
}

/// Interactive internship placement session.
#[derive(Debug)]
pub struct InternshipShell {
    registry: PlacementRegistry,
    today: NaiveDate,
}

impl InternshipShell {
    pub fn new(registry: PlacementRegistry, today: NaiveDate) -> Self {
        Self { registry, today }
    }

    pub fn registry(&self) -> &PlacementRegistry {
        &self.registry
    }

    pub fn run<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        prompter.say("Welcome to Internship Management System")?;
        finish(self.menu_loop(prompter))
    }

    fn menu_loop<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        loop {
            prompter.say("\n===== INTERNSHIP MANAGEMENT SYSTEM =====")?;
            prompter.say("1. Manage Students")?;
            prompter.say("2. Manage Supervisors")?;
            prompter.say("3. Manage Companies")?;
            prompter.say("4. Manage Internships")?;
            prompter.say("5. Search Internships")?;
            prompter.say("6. Generate Reports")?;
            prompter.say("7. Exit")?;
            prompter.say("=======================================")?;

            match prompter.ask_int("Enter your choice: ")? {
                1 => self.manage(prompter, Entity::Student)?,
                2 => self.manage(prompter, Entity::Supervisor)?,
                3 => self.manage(prompter, Entity::Company)?,
                4 => self.manage(prompter, Entity::Internship)?,
                5 => self.search(prompter)?,
                6 => self.reports(prompter)?,
                7 => {
                    prompter.say("Thank you for using Internship Management System.")?;
                    return Ok(());
                }
                other => {
                    debug!(choice = other, "unknown menu choice");
                    prompter.say("Invalid choice. Please try again.")?;
                }
            }
        }
    }

    fn manage<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
        entity: Entity,
    ) -> Result<(), ShellError> {
        prompter.say(format_args!(
            "\n----- {} MANAGEMENT -----",
            entity.noun().to_uppercase()
        ))?;
        prompter.say(format_args!("1. Register new {}", entity.noun()))?;
        prompter.say(format_args!("2. View all {}", entity.plural()))?;
        let back = if entity == Entity::Internship {
            prompter.say("3. Update internship status")?;
            4
        } else {
            3
        };
        prompter.say(format_args!("{back}. Back to main menu"))?;

        match prompter.ask_int("Enter your choice: ")? {
            1 => match entity {
                Entity::Student => self.register_student(prompter),
                Entity::Supervisor => self.register_supervisor(prompter),
                Entity::Company => self.register_company(prompter),
                Entity::Internship => self.register_internship(prompter),
            },
            2 => self.list(prompter, entity),
            3 if entity == Entity::Internship => self.update_status(prompter),
            choice if choice == back => Ok(()),
            _ => prompter.say("Invalid choice. Returning to main menu."),
        }
    }

    fn register_student<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        prompter.say("\n----- STUDENT REGISTRATION -----")?;
        let registry = &self.registry;
        let id = prompter.ask("Enter student ID: ", |raw| {
            let id = require_text(raw, "Student ID")?;
            registry.ensure_unique_student_id(&id)?;
            Ok(id)
        })?;
        let full_name = prompter.ask("Enter full name: ", |raw| require_text(raw, "Full name"))?;
        prompter.say("Select university:")?;
        let universities = University::ordered().map(|u| (u, u.label()));
        let university = prompter.choose(&universities)?;
        let email = prompter.ask("Enter email: ", require_email)?;

        let registered = Student::new(&id, &full_name, university, &email)
            .and_then(|student| self.registry.register_student(student));
        match registered {
            Ok(_) => prompter.say("Student registered successfully!"),
            Err(err) => prompter.say(format_args!("Registration failed: {err}")),
        }
    }

    fn register_supervisor<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        prompter.say("\n----- SUPERVISOR REGISTRATION -----")?;
        let registry = &self.registry;
        let id = prompter.ask("Enter supervisor ID: ", |raw| {
            let id = require_text(raw, "Supervisor ID")?;
            registry.ensure_unique_supervisor_id(&id)?;
            Ok(id)
        })?;
        let full_name = prompter.ask("Enter full name: ", |raw| require_text(raw, "Full name"))?;
        prompter.say("Select qualification:")?;
        let qualifications = Qualification::ordered().map(|q| (q, q.label()));
        let qualification = prompter.choose(&qualifications)?;
        let email = prompter.ask("Enter email: ", require_email)?;

        let registered = Supervisor::new(&id, &full_name, qualification, &email)
            .and_then(|supervisor| self.registry.register_supervisor(supervisor));
        match registered {
            Ok(_) => prompter.say("Supervisor registered successfully!"),
            Err(err) => prompter.say(format_args!("Registration failed: {err}")),
        }
    }

    fn register_company<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        prompter.say("\n----- COMPANY REGISTRATION -----")?;
        let registry = &self.registry;
        let id = prompter.ask("Enter company ID: ", |raw| {
            let id = require_text(raw, "Company ID")?;
            registry.ensure_unique_company_id(&id)?;
            Ok(id)
        })?;
        let name = prompter.ask("Enter company name: ", |raw| require_text(raw, "Company name"))?;
        prompter.say("Select industry type:")?;
        let industries = Industry::ordered().map(|i| (i, i.label()));
        let industry = prompter.choose(&industries)?;
        let location = prompter.ask("Enter location: ", |raw| require_text(raw, "Location"))?;

        let registered = Company::new(&id, &name, industry, &location)
            .and_then(|company| self.registry.register_company(company).map(|_| ()));
        match registered {
            Ok(()) => prompter.say("Company registered successfully!"),
            Err(err) => prompter.say(format_args!("Registration failed: {err}")),
        }
    }

    fn register_internship<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        if self.registry.students().is_empty() || self.registry.supervisors().is_empty() {
            return prompter.say(
                "Error: You need to register at least one student and one supervisor first.",
            );
        }
        prompter.say("\n----- INTERNSHIP REGISTRATION -----")?;

        let Some(draft) = self.collect_internship(prompter)? else {
            return Ok(());
        };
        match self.registry.register_internship(draft) {
            Ok(internship) => {
                let assignment = internship.supervisor_assignment();
                prompter.say("Internship registered successfully!")?;
                prompter.say(assignment)
            }
            Err(err) => prompter.say(format_args!("Registration failed: {err}")),
        }
    }

    /// Walk through the registration prompts. `None` means the attempt was abandoned and
    /// the reason already printed.
    fn collect_internship<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Option<InternshipDraft>, ShellError> {
        let students = self.registry.students();
        let supervisors = self.registry.supervisors();

        prompter.say("\nAvailable Students:")?;
        for (index, student) in students.iter().enumerate() {
            prompter.say(format_args!("{}. {student}", index + 1))?;
        }
        let Some(student_index) = prompter.pick("Select student (enter number): ", students.len())?
        else {
            return abandon(prompter, "Invalid student selection");
        };
        let student = Rc::clone(&students[student_index]);
        if self.registry.has_active_internship(student.id()) {
            return abandon(prompter, "This student already has an active internship");
        }

        prompter.say("\nSelect internship type:")?;
        let home = ProgramKind::for_university(student.university());
        let home_label = format!("{} Internship", student.university().label());
        let kind = prompter.choose(&[
            (home, home_label.as_str()),
            (ProgramKind::Remote, "Remote Internship"),
        ])?;

        let registry = &self.registry;
        let id = prompter.ask("Enter internship ID: ", |raw| {
            let id = require_text(raw, "Internship ID")?;
            registry.ensure_unique_internship_id(&id)?;
            Ok(id)
        })?;

        let companies = self.registry.companies();
        let company_name = if companies.is_empty() {
            prompter.ask("Enter company name: ", |raw| require_text(raw, "Company name"))?
        } else {
            prompter.say("\nAvailable Companies:")?;
            for (index, company) in companies.iter().enumerate() {
                prompter.say(format_args!("{}. {}", index + 1, company.name()))?;
            }
            match prompter.pick("Select company (enter number): ", companies.len())? {
                Some(index) => companies[index].name().to_string(),
                None => return abandon(prompter, "Invalid company selection"),
            }
        };

        prompter.say("\nAvailable Supervisors:")?;
        for (index, supervisor) in supervisors.iter().enumerate() {
            prompter.say(format_args!("{}. {supervisor}", index + 1))?;
        }
        let Some(primary_index) =
            prompter.pick("Select primary supervisor (enter number): ", supervisors.len())?
        else {
            return abandon(prompter, "Invalid supervisor selection");
        };

        let start_date = prompter.ask_date("Enter start date (yyyy-MM-dd): ", ISO)?;
        let end_date = prompter.ask_date("Enter end date (yyyy-MM-dd): ", ISO)?;

        let program = match kind {
            ProgramKind::Ulk => ProgramRequest::Ulk,
            ProgramKind::Auca => ProgramRequest::Auca,
            ProgramKind::Ur => {
                let wants_secondary = prompter.ask_flag(
                    "Do you want to assign a secondary supervisor? (yes/no): ",
                    "'yes' or 'no'",
                )?;
                let secondary_supervisor = if wants_secondary && supervisors.len() > 1 {
                    prompter.say("\nSelect secondary supervisor:")?;
                    match pick_other_supervisor(prompter, supervisors, primary_index)? {
                        Some(supervisor) => Some(supervisor),
                        None => {
                            return abandon(prompter, "Invalid secondary supervisor selection")
                        }
                    }
                } else {
                    None
                };
                ProgramRequest::Ur {
                    secondary_supervisor,
                }
            }
            ProgramKind::Uk => {
                prompter.say("\nSelect university supervisor:")?;
                let Some(university_supervisor) =
                    pick_other_supervisor(prompter, supervisors, primary_index)?
                else {
                    return abandon(prompter, "Invalid university supervisor selection");
                };
                let english_certificate =
                    prompter.ask("Enter English proficiency certification: ", |raw| {
                        require_text(raw, "English certification")
                    })?;
                ProgramRequest::Uk {
                    university_supervisor: Some(university_supervisor),
                    english_certificate,
                }
            }
            ProgramKind::Remote => ProgramRequest::Remote {
                remote_access_url: prompter.ask("Enter remote access URL: ", |raw| {
                    require_text(raw, "Remote access URL")
                })?,
            },
        };

        Ok(Some(InternshipDraft {
            id,
            student,
            company_name,
            supervisor: Rc::clone(&supervisors[primary_index]),
            start_date,
            end_date,
            program,
        }))
    }

    fn list<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
        entity: Entity,
    ) -> Result<(), ShellError> {
        prompter.say(format_args!(
            "\n----- {} LIST -----",
            entity.noun().to_uppercase()
        ))?;
        let empty = format!("No {} registered yet.", entity.plural());
        match entity {
            Entity::Student => numbered(prompter, self.registry.students(), &empty),
            Entity::Supervisor => numbered(prompter, self.registry.supervisors(), &empty),
            Entity::Company => numbered(prompter, self.registry.companies(), &empty),
            Entity::Internship => {
                let internships = self.registry.internships();
                if internships.is_empty() {
                    return prompter.say(empty);
                }
                for (index, internship) in internships.iter().enumerate() {
                    prompter.say(format_args!("\nInternship #{}:", index + 1))?;
                    prompter.say(internship)?;
                    prompter.say("-----------------------------")?;
                }
                Ok(())
            }
        }
    }

    fn update_status<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        let Some(index) = self.select_internship(prompter, "update status")? else {
            return Ok(());
        };
        prompter.say("Select new status:")?;
        let statuses = InternshipStatus::ordered().map(|s| (s, s.label()));
        let status = prompter.choose(&statuses)?;
        match self.registry.set_status(index, status) {
            Ok(internship) => {
                let line = format!(
                    "Internship {} is now {}",
                    internship.id(),
                    internship.status().label()
                );
                prompter.say(line)
            }
            Err(err) => prompter.error(err),
        }
    }

    fn search<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        if self.registry.internships().is_empty() {
            return prompter.say("No internships registered yet.");
        }
        prompter.say("\n----- SEARCH INTERNSHIPS -----")?;
        prompter.say("1. Search by student name")?;
        prompter.say("2. Search by university")?;
        prompter.say("3. Back to main menu")?;

        match prompter.ask_int("Enter your choice: ")? {
            1 => {
                let term = prompter.ask("Enter student name to search: ", |raw| {
                    require_text(raw, "Search term")
                })?;
                let found = match self.registry.search_by_student_name(&term) {
                    Ok(found) => found,
                    Err(err) => return prompter.error(err),
                };
                prompter.say("\n----- SEARCH RESULTS -----")?;
                if found.is_empty() {
                    return prompter.say(format_args!(
                        "No internships found for students with name containing '{}'",
                        term.to_lowercase()
                    ));
                }
                print_matches(prompter, &found)
            }
            2 => {
                prompter.say("Select university:")?;
                let universities = University::ordered().map(|u| (u, u.label()));
                let university = prompter.choose(&universities)?;
                let found = self.registry.search_by_university(university);
                prompter.say(format_args!(
                    "\n----- INTERNSHIPS FOR {} -----",
                    university.label()
                ))?;
                if found.is_empty() {
                    return prompter.say(format_args!(
                        "No internships found for {} students",
                        university.label()
                    ));
                }
                print_matches(prompter, &found)
            }
            3 => Ok(()),
            _ => prompter.say("Invalid choice. Returning to main menu."),
        }
    }

    fn reports<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        if self.registry.internships().is_empty() {
            return prompter.say("No internships registered yet.");
        }
        prompter.say("\n----- GENERATE REPORTS -----")?;
        prompter.say("1. Generate reports for all internships")?;
        prompter.say("2. Generate report for specific internship")?;
        prompter.say("3. Track progress for an internship")?;
        prompter.say("4. Back to main menu")?;

        match prompter.ask_int("Enter your choice: ")? {
            1 => {
                prompter.say("\n----- ALL INTERNSHIP REPORTS -----")?;
                for internship in self.registry.internships() {
                    prompter.say(render_detailed_report(internship))?;
                }
                Ok(())
            }
            2 => {
                let Some(index) = self.select_internship(prompter, "generate report")? else {
                    return Ok(());
                };
                prompter.print(&render_detailed_report(&self.registry.internships()[index]))
            }
            3 => self.track_progress(prompter),
            4 => Ok(()),
            _ => prompter.say("Invalid choice. Returning to main menu."),
        }
    }

    fn track_progress<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), ShellError> {
        let Some(index) = self.select_internship(prompter, "track progress")? else {
            return Ok(());
        };
        let internship = &self.registry.internships()[index];
        prompter.say(format_args!(
            "Tracking progress for {} internship {}",
            internship.kind().label(),
            internship.id()
        ))?;
        let update = ask_progress(prompter, internship)?;
        match self.registry.track_progress(index, update, self.today) {
            Ok(confirmation) => prompter.say(confirmation),
            Err(err) => prompter.error(err),
        }
    }

    fn select_internship<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
        purpose: &str,
    ) -> Result<Option<usize>, ShellError> {
        let internships = self.registry.internships();
        if internships.is_empty() {
            prompter.say("No internships registered yet.")?;
            return Ok(None);
        }
        prompter.say(format_args!("\nSelect internship to {purpose}:"))?;
        prompter.print(&render_selection(internships))?;
        let picked = prompter.pick("Enter choice: ", internships.len())?;
        if picked.is_none() {
            prompter.error("Invalid internship selection")?;
        }
        Ok(picked)
    }
}

fn abandon<R: BufRead, W: Write, T>(
    prompter: &mut Prompter<R, W>,
    reason: &str,
) -> Result<Option<T>, ShellError> {
    prompter.say(format_args!("Registration failed: {reason}"))?;
    Ok(None)
}

/// List every supervisor except the primary one and read a choice by its list number.
fn pick_other_supervisor<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    supervisors: &[Rc<Supervisor>],
    primary_index: usize,
) -> Result<Option<Rc<Supervisor>>, ShellError> {
    for (index, supervisor) in supervisors.iter().enumerate() {
        if index != primary_index {
            prompter.say(format_args!("{}. {supervisor}", index + 1))?;
        }
    }
    let picked = prompter.pick("Enter choice: ", supervisors.len())?;
    Ok(picked
        .filter(|index| *index != primary_index)
        .map(|index| Rc::clone(&supervisors[index])))
}

fn ask_progress<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    internship: &Internship,
) -> Result<ProgressUpdate, ShellError> {
    Ok(match internship.program() {
        ProgramDetails::Ulk { .. } => {
            ProgressUpdate::Note(prompter.ask_text("Enter progress notes: ")?)
        }
        ProgramDetails::Ur { .. } => ProgressUpdate::Feedback(prompter.ask_text(&format!(
            "Enter feedback for {}: ",
            internship.student().full_name()
        ))?),
        ProgramDetails::Auca { weekly_reports, .. } => {
            let report = prompter.ask_text(&format!(
                "Enter weekly report for week #{}: ",
                weekly_reports.len() + 1
            ))?;
            let hours = prompter.ask_int("Enter community service hours completed this week: ")?;
            ProgressUpdate::WeeklyReport { report, hours }
        }
        ProgramDetails::Uk { .. } => ProgressUpdate::Evaluation {
            company: prompter.ask_text("Enter evaluation notes from company supervisor: ")?,
            university: prompter.ask_text("Enter evaluation notes from university supervisor: ")?,
        },
        ProgramDetails::Remote { .. } => {
            ProgressUpdate::Communication(prompter.ask_text("Enter communication log entry: ")?)
        }
    })
}

fn numbered<R: BufRead, W: Write, T: std::fmt::Display>(
    prompter: &mut Prompter<R, W>,
    items: &[T],
    empty: &str,
) -> Result<(), ShellError> {
    if items.is_empty() {
        return prompter.say(empty);
    }
    for (index, item) in items.iter().enumerate() {
        prompter.say(format_args!("{}. {item}", index + 1))?;
    }
    Ok(())
}

fn print_matches<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    found: &[&Internship],
) -> Result<(), ShellError> {
    for internship in found {
        prompter.say(internship)?;
        prompter.say("-------------------------")?;
    }
    Ok(())
}
