use chrono::NaiveDate;
use std::rc::Rc;

use crate::programs::internships::{
    InternshipDraft, PlacementRegistry, ProgramRequest, Student, Supervisor,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn registry() -> PlacementRegistry {
    PlacementRegistry::with_sample_data().expect("sample data is valid")
}

/// Sample student by id (S001 ULK, S002 UR, S003 AUCA, S004 UK).
pub(super) fn student(registry: &PlacementRegistry, id: &str) -> Rc<Student> {
    registry
        .students()
        .iter()
        .find(|s| s.id() == id)
        .cloned()
        .expect("sample student")
}

/// Sample supervisor by id (SUP001 PhD, SUP002 Masters, SUP003 Bachelors, SUP004 PhD).
pub(super) fn supervisor(registry: &PlacementRegistry, id: &str) -> Rc<Supervisor> {
    registry
        .supervisors()
        .iter()
        .find(|s| s.id() == id)
        .cloned()
        .expect("sample supervisor")
}

pub(super) fn draft(
    registry: &PlacementRegistry,
    id: &str,
    student_id: &str,
    supervisor_id: &str,
    program: ProgramRequest,
) -> InternshipDraft {
    InternshipDraft {
        id: id.to_string(),
        student: student(registry, student_id),
        company_name: "TechInnovate".to_string(),
        supervisor: supervisor(registry, supervisor_id),
        start_date: date(2025, 1, 6),
        end_date: date(2025, 3, 3),
        program,
    }
}
