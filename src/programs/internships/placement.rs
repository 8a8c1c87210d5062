use chrono::NaiveDate;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use super::people::{Qualification, Student, Supervisor, University};
use crate::calendar::{whole_months_between, whole_weeks_between, ISO};
use crate::validation::{require_text, ValidationError};

pub const MIN_WEEKS: i64 = 6;
pub const UR_MIN_MONTHS: i32 = 2;
pub const UR_MAX_MONTHS: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InternshipStatus {
    Pending,
    Ongoing,
    Completed,
}

impl InternshipStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Pending, Self::Ongoing, Self::Completed]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Ongoing => "ONGOING",
            Self::Completed => "COMPLETED",
        }
    }

    /// Pending and ongoing placements block a student from starting another.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Ongoing)
    }
}

impl FromStr for InternshipStatus {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = require_text(raw, "Status")?;
        Self::ordered()
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(&value))
            .ok_or_else(|| {
                ValidationError::rejected("Status must be 'PENDING', 'ONGOING', or 'COMPLETED'")
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramKind {
    Ulk,
    Ur,
    Auca,
    Uk,
    Remote,
}

impl ProgramKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ulk => "ULK",
            Self::Ur => "UR",
            Self::Auca => "AUCA",
            Self::Uk => "UK",
            Self::Remote => "Remote",
        }
    }

    /// The university-run program a student of `university` may join.
    pub const fn for_university(university: University) -> Self {
        match university {
            University::Ulk => Self::Ulk,
            University::Ur => Self::Ur,
            University::Auca => Self::Auca,
            University::Uk => Self::Uk,
        }
    }
}

/// Program choice and the extra inputs it needs at registration.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramRequest {
    Ulk,
    Ur {
        secondary_supervisor: Option<Rc<Supervisor>>,
    },
    Auca,
    Uk {
        university_supervisor: Option<Rc<Supervisor>>,
        english_certificate: String,
    },
    Remote {
        remote_access_url: String,
    },
}

impl ProgramRequest {
    pub const fn kind(&self) -> ProgramKind {
        match self {
            Self::Ulk => ProgramKind::Ulk,
            Self::Ur { .. } => ProgramKind::Ur,
            Self::Auca => ProgramKind::Auca,
            Self::Uk { .. } => ProgramKind::Uk,
            Self::Remote { .. } => ProgramKind::Remote,
        }
    }
}

/// One dated line in a progress, feedback, or communication log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub date: NaiveDate,
    pub text: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", ISO.render(self.date), self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub date: NaiveDate,
    pub company_notes: String,
    pub university_notes: String,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", ISO.render(self.date))?;
        writeln!(f, "Company: {}", self.company_notes)?;
        write!(f, "University: {}", self.university_notes)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgramDetails {
    Ulk {
        progress_notes: Vec<LogEntry>,
    },
    Ur {
        secondary_supervisor: Option<Rc<Supervisor>>,
        feedback: Vec<LogEntry>,
    },
    Auca {
        community_service_hours: u32,
        weekly_reports: Vec<String>,
    },
    Uk {
        university_supervisor: Rc<Supervisor>,
        english_certificate: String,
        evaluations: Vec<Evaluation>,
    },
    Remote {
        remote_access_url: String,
        communication_log: Vec<LogEntry>,
    },
}

impl ProgramDetails {
    pub const fn kind(&self) -> ProgramKind {
        match self {
            Self::Ulk { .. } => ProgramKind::Ulk,
            Self::Ur { .. } => ProgramKind::Ur,
            Self::Auca { .. } => ProgramKind::Auca,
            Self::Uk { .. } => ProgramKind::Uk,
            Self::Remote { .. } => ProgramKind::Remote,
        }
    }

    fn from_request(request: ProgramRequest) -> Result<Self, ValidationError> {
        Ok(match request {
            ProgramRequest::Ulk => Self::Ulk {
                progress_notes: Vec::new(),
            },
            ProgramRequest::Ur {
                secondary_supervisor,
            } => Self::Ur {
                secondary_supervisor,
                feedback: Vec::new(),
            },
            ProgramRequest::Auca => Self::Auca {
                community_service_hours: 0,
                weekly_reports: Vec::new(),
            },
            ProgramRequest::Uk {
                university_supervisor,
                english_certificate,
            } => {
                let university_supervisor = university_supervisor.ok_or_else(|| {
                    ValidationError::rejected("UK internship requires a university supervisor")
                })?;
                let english_certificate = english_certificate.trim();
                if english_certificate.is_empty() {
                    return Err(ValidationError::rejected(
                        "UK internship requires English proficiency certification",
                    ));
                }
                Self::Uk {
                    university_supervisor,
                    english_certificate: english_certificate.to_string(),
                    evaluations: Vec::new(),
                }
            }
            ProgramRequest::Remote { remote_access_url } => {
                let remote_access_url = remote_access_url.trim();
                if remote_access_url.is_empty() {
                    return Err(ValidationError::rejected(
                        "Remote internship requires a remote access URL",
                    ));
                }
                Self::Remote {
                    remote_access_url: remote_access_url.to_string(),
                    communication_log: Vec::new(),
                }
            }
        })
    }
}

/// Progress recorded through the program's own tracking channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressUpdate {
    Note(String),
    Feedback(String),
    WeeklyReport { report: String, hours: i64 },
    Evaluation { company: String, university: String },
    Communication(String),
}

/// Unvalidated internship registration.
#[derive(Debug, Clone, PartialEq)]
pub struct InternshipDraft {
    pub id: String,
    pub student: Rc<Student>,
    pub company_name: String,
    pub supervisor: Rc<Supervisor>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub program: ProgramRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Internship {
    id: String,
    student: Rc<Student>,
    company_name: String,
    supervisor: Rc<Supervisor>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: InternshipStatus,
    program: ProgramDetails,
}

impl Internship {
    /// Build a pending internship, failing with the first eligibility rule it breaks.
    pub fn new(draft: InternshipDraft) -> Result<Self, ValidationError> {
        let id = require_text(&draft.id, "Internship ID")?;
        let company_name = require_text(&draft.company_name, "Company name")?;
        check_dates(draft.start_date, draft.end_date)?;
        check_university(draft.program.kind(), draft.student.university())?;
        let program = ProgramDetails::from_request(draft.program)?;

        let internship = Self {
            id,
            student: draft.student,
            company_name,
            supervisor: draft.supervisor,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: InternshipStatus::Pending,
            program,
        };
        internship.check_eligibility()?;
        Ok(internship)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn student(&self) -> &Rc<Student> {
        &self.student
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn supervisor(&self) -> &Rc<Supervisor> {
        &self.supervisor
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn status(&self) -> InternshipStatus {
        self.status
    }

    pub fn program(&self) -> &ProgramDetails {
        &self.program
    }

    pub fn kind(&self) -> ProgramKind {
        self.program.kind()
    }

    pub fn duration_weeks(&self) -> i64 {
        whole_weeks_between(self.start_date, self.end_date)
    }

    pub fn duration_months(&self) -> i32 {
        whole_months_between(self.start_date, self.end_date)
    }

    pub fn set_company_name(&mut self, company_name: &str) -> Result<(), ValidationError> {
        self.company_name = require_text(company_name, "Company name")?;
        Ok(())
    }

    pub fn set_status(&mut self, status: InternshipStatus) {
        self.status = status;
    }

    /// Move the placement period. Rejected when the new period breaks a program rule.
    pub fn set_dates(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
        check_dates(start, end)?;
        let previous = (self.start_date, self.end_date);
        self.start_date = start;
        self.end_date = end;
        if let Err(err) = self.check_eligibility() {
            (self.start_date, self.end_date) = previous;
            return Err(err);
        }
        Ok(())
    }

    pub fn set_secondary_supervisor(
        &mut self,
        supervisor: Option<Rc<Supervisor>>,
    ) -> Result<(), ValidationError> {
        let primary_id = self.supervisor.id().to_string();
        match &mut self.program {
            ProgramDetails::Ur {
                secondary_supervisor,
                ..
            } => {
                if let Some(candidate) = &supervisor {
                    ensure_distinct(&primary_id, candidate)?;
                }
                *secondary_supervisor = supervisor;
                Ok(())
            }
            _ => Err(ValidationError::rejected(
                "Only UR internships have a secondary supervisor",
            )),
        }
    }

    pub fn set_community_service_hours(&mut self, hours: i64) -> Result<(), ValidationError> {
        let ProgramDetails::Auca {
            community_service_hours,
            ..
        } = &mut self.program
        else {
            return Err(ValidationError::rejected(
                "Only AUCA internships track community service hours",
            ));
        };
        if hours < 0 {
            return Err(ValidationError::rejected(
                "Community service hours cannot be negative",
            ));
        }
        *community_service_hours = u32::try_from(hours)
            .map_err(|_| ValidationError::rejected("Community service hours are too large"))?;
        Ok(())
    }

    pub fn set_english_certificate(&mut self, certificate: &str) -> Result<(), ValidationError> {
        let ProgramDetails::Uk {
            english_certificate,
            ..
        } = &mut self.program
        else {
            return Err(ValidationError::rejected(
                "Only UK internships carry an English proficiency certification",
            ));
        };
        *english_certificate = require_text(certificate, "English proficiency certification")?;
        Ok(())
    }

    pub fn set_remote_access_url(&mut self, url: &str) -> Result<(), ValidationError> {
        let ProgramDetails::Remote {
            remote_access_url,
            ..
        } = &mut self.program
        else {
            return Err(ValidationError::rejected(
                "Only Remote internships have a remote access URL",
            ));
        };
        *remote_access_url = require_text(url, "Remote access URL")?;
        Ok(())
    }

    /// Announcement printed once supervisors are attached to the placement.
    pub fn supervisor_assignment(&self) -> String {
        let supervisor = self.supervisor.full_name();
        let student = self.student.full_name();
        match &self.program {
            ProgramDetails::Ulk { .. } => {
                format!("Supervisor {supervisor} assigned to ULK internship for {student}")
            }
            ProgramDetails::Ur {
                secondary_supervisor,
                ..
            } => {
                let mut message = format!(
                    "Primary Supervisor {supervisor} assigned to UR internship for {student}"
                );
                if let Some(secondary) = secondary_supervisor {
                    message.push_str(&format!(
                        "\nSecondary Supervisor {} also assigned to this internship",
                        secondary.full_name()
                    ));
                }
                message
            }
            ProgramDetails::Auca { .. } => {
                format!("Supervisor {supervisor} assigned to AUCA internship for {student}")
            }
            ProgramDetails::Uk {
                university_supervisor,
                ..
            } => format!(
                "Company Supervisor {supervisor} and University Supervisor {} assigned to UK internship for {student}",
                university_supervisor.full_name()
            ),
            ProgramDetails::Remote { .. } => {
                format!("Remote Supervisor {supervisor} assigned to Remote internship for {student}")
            }
        }
    }

    /// Record progress through this program's channel and return the confirmation line.
    pub fn track_progress(
        &mut self,
        update: ProgressUpdate,
        on: NaiveDate,
    ) -> Result<String, ValidationError> {
        let kind = self.kind();
        match (&mut self.program, update) {
            (ProgramDetails::Ulk { progress_notes }, ProgressUpdate::Note(text)) => {
                progress_notes.push(LogEntry { date: on, text });
                Ok("Progress updated successfully".to_string())
            }
            (ProgramDetails::Ur { feedback, .. }, ProgressUpdate::Feedback(text)) => {
                feedback.push(LogEntry { date: on, text });
                Ok("Feedback logged successfully".to_string())
            }
            (
                ProgramDetails::Auca {
                    community_service_hours,
                    weekly_reports,
                },
                ProgressUpdate::WeeklyReport { report, hours },
            ) => {
                let total = if hours < 0 {
                    None
                } else {
                    let total = u32::try_from(hours)
                        .ok()
                        .and_then(|hours| community_service_hours.checked_add(hours))
                        .ok_or_else(|| {
                            ValidationError::rejected(
                                "Community service hours are too large. Report not recorded.",
                            )
                        })?;
                    Some(total)
                };
                let week = weekly_reports.len() + 1;
                weekly_reports.push(format!("Week {week}: {report}"));
                match total {
                    Some(total) => {
                        *community_service_hours = total;
                        Ok(format!("Added {hours} community service hours. Total: {total}"))
                    }
                    None => Ok("Hours cannot be negative. No hours added.".to_string()),
                }
            }
            (
                ProgramDetails::Uk { evaluations, .. },
                ProgressUpdate::Evaluation {
                    company,
                    university,
                },
            ) => {
                evaluations.push(Evaluation {
                    date: on,
                    company_notes: company,
                    university_notes: university,
                });
                Ok("Evaluation notes added successfully".to_string())
            }
            (
                ProgramDetails::Remote {
                    communication_log, ..
                },
                ProgressUpdate::Communication(text),
            ) => {
                communication_log.push(LogEntry { date: on, text });
                Ok("Communication logged successfully".to_string())
            }
            _ => Err(ValidationError::rejected(format!(
                "{} internships do not accept this kind of progress update",
                kind.label()
            ))),
        }
    }

    fn check_eligibility(&self) -> Result<(), ValidationError> {
        check_university(self.kind(), self.student.university())?;
        match &self.program {
            ProgramDetails::Ulk { .. } => {
                if self.duration_weeks() < MIN_WEEKS {
                    return Err(ValidationError::rejected(
                        "ULK internship must be at least 6 weeks long",
                    ));
                }
                if self.supervisor.qualification() < Qualification::Masters {
                    return Err(ValidationError::rejected(
                        "ULK internships require supervisors with a Master's degree or higher",
                    ));
                }
            }
            ProgramDetails::Ur {
                secondary_supervisor,
                ..
            } => {
                let months = self.duration_months();
                if !(UR_MIN_MONTHS..=UR_MAX_MONTHS).contains(&months) {
                    return Err(ValidationError::rejected(
                        "UR internship must be between 2 and 6 months",
                    ));
                }
                if let Some(secondary) = secondary_supervisor {
                    ensure_distinct(self.supervisor.id(), secondary)?;
                }
            }
            ProgramDetails::Auca { .. } | ProgramDetails::Uk { .. } => {}
            ProgramDetails::Remote { .. } => {
                if self.duration_weeks() < MIN_WEEKS {
                    return Err(ValidationError::rejected(
                        "Remote internship must be at least 6 weeks long",
                    ));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Internship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Internship", self.kind().label())?;
        writeln!(f, "Internship ID: {}", self.id)?;
        writeln!(f, "Student: {}", self.student.full_name())?;
        writeln!(f, "Company: {}", self.company_name)?;
        writeln!(f, "Supervisor: {}", self.supervisor.full_name())?;
        writeln!(
            f,
            "Period: {} to {}",
            ISO.render(self.start_date),
            ISO.render(self.end_date)
        )?;
        write!(f, "Status: {}", self.status.label())?;
        match &self.program {
            ProgramDetails::Ur {
                secondary_supervisor: Some(secondary),
                ..
            } => write!(f, "\nSecondary Supervisor: {}", secondary.full_name()),
            ProgramDetails::Auca {
                community_service_hours,
                ..
            } => write!(f, "\nCommunity Service Hours: {community_service_hours}"),
            ProgramDetails::Uk {
                university_supervisor,
                english_certificate,
                ..
            } => write!(
                f,
                "\nUniversity Supervisor: {}\nEnglish Proficiency: {english_certificate}",
                university_supervisor.full_name()
            ),
            ProgramDetails::Remote {
                remote_access_url, ..
            } => write!(f, "\nRemote Access URL: {remote_access_url}"),
            _ => Ok(()),
        }
    }
}

/// University programs only admit their own students; Remote admits anyone.
fn check_university(kind: ProgramKind, university: University) -> Result<(), ValidationError> {
    let message = match kind {
        ProgramKind::Ulk if university != University::Ulk => {
            "Student must be from ULK for a ULK internship"
        }
        ProgramKind::Ur if university != University::Ur => {
            "Student must be from UR for a UR internship"
        }
        ProgramKind::Auca if university != University::Auca => {
            "Student must be from AUCA for an AUCA internship"
        }
        ProgramKind::Uk if university != University::Uk => {
            "Student must be from UK for a UK internship"
        }
        _ => return Ok(()),
    };
    Err(ValidationError::rejected(message))
}

fn check_dates(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::rejected(
            "End date cannot be before start date",
        ));
    }
    Ok(())
}

fn ensure_distinct(primary_id: &str, secondary: &Supervisor) -> Result<(), ValidationError> {
    if secondary.id().eq_ignore_ascii_case(primary_id) {
        return Err(ValidationError::rejected(
            "Secondary supervisor must differ from the primary supervisor",
        ));
    }
    Ok(())
}
