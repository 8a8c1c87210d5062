use chrono::NaiveDate;
use std::rc::Rc;
use tracing::{debug, info};

use super::people::{Company, Industry, Qualification, Student, Supervisor, University};
use super::placement::{Internship, InternshipDraft, InternshipStatus, ProgressUpdate};
use crate::validation::ValidationError;

/// Everything registered during one internship-office session.
#[derive(Debug, Default)]
pub struct PlacementRegistry {
    students: Vec<Rc<Student>>,
    supervisors: Vec<Rc<Supervisor>>,
    companies: Vec<Company>,
    internships: Vec<Internship>,
}

impl PlacementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with one student per university, four supervisors, and three companies.
    pub fn with_sample_data() -> Result<Self, ValidationError> {
        let mut registry = Self::new();
        for (id, name, university, email) in [
            ("S001", "John Doe", University::Ulk, "john.doe@ulk.ac.rw"),
            ("S002", "Jane Smith", University::Ur, "jane.smith@ur.ac.rw"),
            ("S003", "Alice Johnson", University::Auca, "alice@auca.ac.rw"),
            ("S004", "Bob Brown", University::Uk, "bob@uk.ac.rw"),
        ] {
            registry.register_student(Student::new(id, name, university, email)?)?;
        }
        for (id, name, qualification, email) in [
            ("SUP001", "Dr. Michael Chen", Qualification::Phd, "mchen@company.com"),
            ("SUP002", "Prof. Sarah Wilson", Qualification::Masters, "swilson@ur.ac.rw"),
            ("SUP003", "Mr. David Lee", Qualification::Bachelors, "dlee@tech.com"),
            ("SUP004", "Dr. Emily Taylor", Qualification::Phd, "etaylor@uk.ac.rw"),
        ] {
            registry.register_supervisor(Supervisor::new(id, name, qualification, email)?)?;
        }
        for (id, name, industry, location) in [
            ("C001", "TechInnovate", Industry::It, "Kigali"),
            ("C002", "HealthPlus", Industry::Health, "Butare"),
            ("C003", "EduLearn", Industry::Education, "Musanze"),
        ] {
            registry.register_company(Company::new(id, name, industry, location)?)?;
        }
        Ok(registry)
    }

    pub fn students(&self) -> &[Rc<Student>] {
        &self.students
    }

    pub fn supervisors(&self) -> &[Rc<Supervisor>] {
        &self.supervisors
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn internships(&self) -> &[Internship] {
        &self.internships
    }

    pub fn ensure_unique_student_id(&self, id: &str) -> Result<(), ValidationError> {
        ensure_unique(self.students.iter().map(|s| s.id()), id, "Student ID")
    }

    pub fn ensure_unique_supervisor_id(&self, id: &str) -> Result<(), ValidationError> {
        ensure_unique(self.supervisors.iter().map(|s| s.id()), id, "Supervisor ID")
    }

    pub fn ensure_unique_company_id(&self, id: &str) -> Result<(), ValidationError> {
        ensure_unique(self.companies.iter().map(|c| c.id()), id, "Company ID")
    }

    pub fn ensure_unique_internship_id(&self, id: &str) -> Result<(), ValidationError> {
        ensure_unique(self.internships.iter().map(|i| i.id()), id, "Internship ID")
    }

    pub fn register_student(&mut self, student: Student) -> Result<Rc<Student>, ValidationError> {
        self.ensure_unique_student_id(student.id())?;
        info!(student_id = student.id(), "student registered");
        let student = Rc::new(student);
        self.students.push(Rc::clone(&student));
        Ok(student)
    }

    pub fn register_supervisor(
        &mut self,
        supervisor: Supervisor,
    ) -> Result<Rc<Supervisor>, ValidationError> {
        self.ensure_unique_supervisor_id(supervisor.id())?;
        info!(supervisor_id = supervisor.id(), "supervisor registered");
        let supervisor = Rc::new(supervisor);
        self.supervisors.push(Rc::clone(&supervisor));
        Ok(supervisor)
    }

    pub fn register_company(&mut self, company: Company) -> Result<&Company, ValidationError> {
        self.ensure_unique_company_id(company.id())?;
        info!(company_id = company.id(), "company registered");
        self.companies.push(company);
        Ok(&self.companies[self.companies.len() - 1])
    }

    /// Whether the student already holds a pending or ongoing placement.
    pub fn has_active_internship(&self, student_id: &str) -> bool {
        self.active_elsewhere(student_id, None)
    }

    fn active_elsewhere(&self, student_id: &str, skip: Option<usize>) -> bool {
        self.internships.iter().enumerate().any(|(index, internship)| {
            Some(index) != skip
                && internship.student().id().eq_ignore_ascii_case(student_id)
                && internship.status().is_active()
        })
    }

    pub fn register_internship(
        &mut self,
        draft: InternshipDraft,
    ) -> Result<&Internship, ValidationError> {
        self.ensure_unique_internship_id(&draft.id)?;
        if self.has_active_internship(draft.student.id()) {
            debug!(student_id = draft.student.id(), "second active internship rejected");
            return Err(ValidationError::rejected(
                "This student already has an active internship",
            ));
        }
        let internship = Internship::new(draft)?;
        info!(
            internship_id = internship.id(),
            program = internship.kind().label(),
            student_id = internship.student().id(),
            "internship registered"
        );
        self.internships.push(internship);
        Ok(&self.internships[self.internships.len() - 1])
    }

    /// Internships whose student's name contains `term`, ignoring case.
    pub fn search_by_student_name(&self, term: &str) -> Result<Vec<&Internship>, ValidationError> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Err(ValidationError::rejected("Search term cannot be empty"));
        }
        Ok(self
            .internships
            .iter()
            .filter(|i| i.student().full_name().to_lowercase().contains(&term))
            .collect())
    }

    pub fn search_by_university(&self, university: University) -> Vec<&Internship> {
        self.internships
            .iter()
            .filter(|i| i.student().university() == university)
            .collect()
    }

    pub fn set_status(
        &mut self,
        index: usize,
        status: InternshipStatus,
    ) -> Result<&Internship, ValidationError> {
        let current = self.internship_mut(index)?;
        if status.is_active() && !current.status().is_active() {
            let student_id = current.student().id().to_string();
            if self.active_elsewhere(&student_id, Some(index)) {
                debug!(student_id = student_id.as_str(), "second active internship rejected");
                return Err(ValidationError::rejected(
                    "This student already has an active internship",
                ));
            }
        }
        let internship = self.internship_mut(index)?;
        internship.set_status(status);
        info!(
            internship_id = internship.id(),
            status = status.label(),
            "internship status updated"
        );
        Ok(&*internship)
    }

    pub fn track_progress(
        &mut self,
        index: usize,
        update: ProgressUpdate,
        on: NaiveDate,
    ) -> Result<String, ValidationError> {
        let internship = self.internship_mut(index)?;
        let confirmation = internship.track_progress(update, on)?;
        debug!(internship_id = internship.id(), "progress recorded");
        Ok(confirmation)
    }

    fn internship_mut(&mut self, index: usize) -> Result<&mut Internship, ValidationError> {
        self.internships
            .get_mut(index)
            .ok_or_else(|| ValidationError::not_found("Invalid internship selection"))
    }
}

fn ensure_unique<'a>(
    mut existing: impl Iterator<Item = &'a str>,
    candidate: &str,
    label: &str,
) -> Result<(), ValidationError> {
    let candidate = candidate.trim();
    if existing.any(|id| id.eq_ignore_ascii_case(candidate)) {
        debug!(id = candidate, label, "duplicate id rejected");
        return Err(ValidationError::duplicate(format!(
            "{label} already exists. Please enter a unique ID."
        )));
    }
    Ok(())
}
