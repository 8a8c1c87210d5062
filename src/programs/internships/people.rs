use std::fmt;
use std::str::FromStr;

use crate::validation::{require_email, require_text, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum University {
    Ulk,
    Ur,
    Auca,
    Uk,
}

impl University {
    pub const fn ordered() -> [Self; 4] {
        [Self::Ulk, Self::Ur, Self::Auca, Self::Uk]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ulk => "ULK",
            Self::Ur => "UR",
            Self::Auca => "AUCA",
            Self::Uk => "UK",
        }
    }
}

impl FromStr for University {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = require_text(raw, "University")?;
        Self::ordered()
            .into_iter()
            .find(|u| u.label().eq_ignore_ascii_case(&value))
            .ok_or_else(|| ValidationError::rejected("University must be 'ULK', 'UR', 'AUCA', or 'UK'"))
    }
}

/// Highest academic degree held by a supervisor, ordered from lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Qualification {
    Bachelors,
    Masters,
    Phd,
}

impl Qualification {
    pub const fn ordered() -> [Self; 3] {
        [Self::Bachelors, Self::Masters, Self::Phd]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bachelors => "Bachelors",
            Self::Masters => "Masters",
            Self::Phd => "PhD",
        }
    }
}

impl FromStr for Qualification {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = require_text(raw, "Qualification")?;
        Self::ordered()
            .into_iter()
            .find(|q| q.label().eq_ignore_ascii_case(&value))
            .ok_or_else(|| {
                ValidationError::rejected("Qualification must be 'Bachelors', 'Masters', or 'PhD'")
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Industry {
    It,
    Finance,
    Health,
    Education,
}

impl Industry {
    pub const fn ordered() -> [Self; 4] {
        [Self::It, Self::Finance, Self::Health, Self::Education]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::It => "IT",
            Self::Finance => "Finance",
            Self::Health => "Health",
            Self::Education => "Education",
        }
    }
}

impl FromStr for Industry {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = require_text(raw, "Industry type")?;
        Self::ordered()
            .into_iter()
            .find(|i| i.label().eq_ignore_ascii_case(&value))
            .ok_or_else(|| {
                ValidationError::rejected(
                    "Industry type must be 'IT', 'Finance', 'Health', or 'Education'",
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: String,
    full_name: String,
    university: University,
    email: String,
}

impl Student {
    pub fn new(
        id: &str,
        full_name: &str,
        university: University,
        email: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: require_text(id, "Student ID")?,
            full_name: require_text(full_name, "Full name")?,
            university,
            email: require_email(email)?,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn university(&self) -> University {
        self.university
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_full_name(&mut self, full_name: &str) -> Result<(), ValidationError> {
        self.full_name = require_text(full_name, "Full name")?;
        Ok(())
    }

    pub fn set_university(&mut self, university: University) {
        self.university = university;
    }

    pub fn set_email(&mut self, email: &str) -> Result<(), ValidationError> {
        self.email = require_email(email)?;
        Ok(())
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, University: {}, Email: {}",
            self.id,
            self.full_name,
            self.university.label(),
            self.email
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supervisor {
    id: String,
    full_name: String,
    qualification: Qualification,
    email: String,
}

impl Supervisor {
    pub fn new(
        id: &str,
        full_name: &str,
        qualification: Qualification,
        email: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: require_text(id, "Supervisor ID")?,
            full_name: require_text(full_name, "Full name")?,
            qualification,
            email: require_email(email)?,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn qualification(&self) -> Qualification {
        self.qualification
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_full_name(&mut self, full_name: &str) -> Result<(), ValidationError> {
        self.full_name = require_text(full_name, "Full name")?;
        Ok(())
    }

    pub fn set_qualification(&mut self, qualification: Qualification) {
        self.qualification = qualification;
    }

    pub fn set_email(&mut self, email: &str) -> Result<(), ValidationError> {
        self.email = require_email(email)?;
        Ok(())
    }
}

impl fmt::Display for Supervisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Qualification: {}, Email: {}",
            self.id,
            self.full_name,
            self.qualification.label(),
            self.email
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    id: String,
    name: String,
    industry: Industry,
    location: String,
}

impl Company {
    pub fn new(
        id: &str,
        name: &str,
        industry: Industry,
        location: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: require_text(id, "Company ID")?,
            name: require_text(name, "Company name")?,
            industry,
            location: require_text(location, "Location")?,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn industry(&self) -> Industry {
        self.industry
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = require_text(name, "Company name")?;
        Ok(())
    }

    pub fn set_industry(&mut self, industry: Industry) {
        self.industry = industry;
    }

    pub fn set_location(&mut self, location: &str) -> Result<(), ValidationError> {
        self.location = require_text(location, "Location")?;
        Ok(())
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Industry: {}, Location: {}",
            self.id,
            self.name,
            self.industry.label(),
            self.location
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerations_parse_their_labels() {
        assert_eq!("auca".parse::<University>().unwrap(), University::Auca);
        assert_eq!("PhD".parse::<Qualification>().unwrap(), Qualification::Phd);
        assert_eq!(" IT ".parse::<Industry>().unwrap(), Industry::It);
        assert_eq!(
            "MIT".parse::<University>().unwrap_err().to_string(),
            "University must be 'ULK', 'UR', 'AUCA', or 'UK'"
        );
        assert_eq!(
            "Mining".parse::<Industry>().unwrap_err().to_string(),
            "Industry type must be 'IT', 'Finance', 'Health', or 'Education'"
        );
    }

    #[test]
    fn qualifications_are_ordered() {
        assert!(Qualification::Phd > Qualification::Masters);
        assert!(Qualification::Bachelors < Qualification::Masters);
    }

    #[test]
    fn student_requires_email_with_at_sign() {
        let err = Student::new("S010", "Eric", University::Ur, "eric.ur.ac.rw").unwrap_err();
        assert_eq!(err.to_string(), "Email must contain '@'");

        let mut student = Student::new(" S010 ", " Eric Nshuti ", University::Ur, "eric@ur.ac.rw")
            .expect("valid student");
        assert_eq!(student.id(), "S010");
        assert_eq!(student.full_name(), "Eric Nshuti");
        assert!(student.set_email("").is_err());
        assert_eq!(student.email(), "eric@ur.ac.rw");
    }

    #[test]
    fn company_display() {
        let company = Company::new("C001", "TechInnovate", Industry::It, "Kigali").expect("valid");
        assert_eq!(
            company.to_string(),
            "ID: C001, Name: TechInnovate, Industry: IT, Location: Kigali"
        );
        assert_eq!(
            Company::new("C009", "Acme", Industry::Finance, " ")
                .unwrap_err()
                .to_string(),
            "Location cannot be empty"
        );
    }
}
