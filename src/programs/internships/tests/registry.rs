use super::common::{date, draft, registry};
use crate::programs::internships::{
    InternshipStatus, ProgramRequest, ProgressUpdate, Student, University,
};
use crate::validation::ValidationError;

#[test]
fn sample_data_is_seeded() {
    let registry = registry();
    assert_eq!(registry.students().len(), 4);
    assert_eq!(registry.supervisors().len(), 4);
    assert_eq!(registry.companies().len(), 3);
    assert!(registry.internships().is_empty());
}

#[test]
fn ids_are_unique_per_kind_ignoring_case() {
    let mut registry = registry();
    let err = registry
        .register_student(
            Student::new("s001", "Someone Else", University::Ur, "else@ur.ac.rw").expect("valid"),
        )
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::duplicate("Student ID already exists. Please enter a unique ID.")
    );
    assert!(registry.ensure_unique_company_id("c002").is_err());
    assert!(registry.ensure_unique_supervisor_id("SUP009").is_ok());
}

#[test]
fn one_active_internship_per_student() {
    let mut registry = registry();
    let first = draft(&registry, "I-1", "S001", "SUP001", ProgramRequest::Ulk);
    registry.register_internship(first).expect("registered");

    let second = draft(
        &registry,
        "I-2",
        "S001",
        "SUP002",
        ProgramRequest::Remote {
            remote_access_url: "https://remote.example.org".to_string(),
        },
    );
    assert_eq!(
        registry.register_internship(second.clone()).unwrap_err().to_string(),
        "This student already has an active internship"
    );

    registry
        .set_status(0, InternshipStatus::Ongoing)
        .expect("valid index");
    assert!(registry.has_active_internship("S001"));

    registry
        .set_status(0, InternshipStatus::Completed)
        .expect("valid index");
    assert!(!registry.has_active_internship("S001"));
    registry
        .register_internship(second)
        .expect("completed placements do not block");
    assert_eq!(registry.internships().len(), 2);
}

#[test]
fn reopening_a_completed_placement_respects_the_active_limit() {
    let mut registry = registry();
    registry
        .register_internship(draft(&registry, "I-1", "S001", "SUP001", ProgramRequest::Ulk))
        .expect("registered");
    registry
        .set_status(0, InternshipStatus::Completed)
        .expect("valid index");
    registry
        .register_internship(draft(
            &registry,
            "I-2",
            "S001",
            "SUP002",
            ProgramRequest::Remote {
                remote_access_url: "https://remote.example.org".to_string(),
            },
        ))
        .expect("completed placements do not block");

    let err = registry
        .set_status(0, InternshipStatus::Ongoing)
        .unwrap_err();
    assert_eq!(err.to_string(), "This student already has an active internship");
    assert_eq!(registry.internships()[0].status(), InternshipStatus::Completed);
    let active = registry
        .internships()
        .iter()
        .filter(|i| i.student().id() == "S001" && i.status().is_active())
        .count();
    assert_eq!(active, 1);

    // moving between active states on the same placement stays allowed
    registry
        .set_status(1, InternshipStatus::Ongoing)
        .expect("already active");
    registry
        .set_status(1, InternshipStatus::Completed)
        .expect("valid index");
    registry
        .set_status(0, InternshipStatus::Pending)
        .expect("no other active placement");
}

#[test]
fn duplicate_internship_id_is_rejected() {
    let mut registry = registry();
    registry
        .register_internship(draft(&registry, "I-1", "S001", "SUP001", ProgramRequest::Ulk))
        .expect("registered");
    let err = registry
        .register_internship(draft(&registry, "i-1", "S003", "SUP003", ProgramRequest::Auca))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Internship ID already exists. Please enter a unique ID."
    );
}

#[test]
fn search_by_name_and_university() {
    let mut registry = registry();
    registry
        .register_internship(draft(&registry, "I-1", "S001", "SUP001", ProgramRequest::Ulk))
        .expect("registered");
    registry
        .register_internship(draft(&registry, "I-3", "S003", "SUP003", ProgramRequest::Auca))
        .expect("registered");

    let by_name = registry.search_by_student_name("  JOHN ").expect("valid term");
    let ids: Vec<&str> = by_name.iter().map(|i| i.id()).collect();
    assert_eq!(ids, ["I-1", "I-3"]);

    assert!(registry.search_by_student_name(" ").is_err());
    assert_eq!(registry.search_by_university(University::Auca).len(), 1);
    assert!(registry.search_by_university(University::Uk).is_empty());
}

#[test]
fn progress_goes_through_the_registry() {
    let mut registry = registry();
    registry
        .register_internship(draft(&registry, "I-1", "S001", "SUP001", ProgramRequest::Ulk))
        .expect("registered");
    let message = registry
        .track_progress(
            0,
            ProgressUpdate::Note("Completed orientation".to_string()),
            date(2025, 1, 13),
        )
        .expect("note accepted");
    assert_eq!(message, "Progress updated successfully");
    assert!(registry
        .track_progress(3, ProgressUpdate::Note("x".to_string()), date(2025, 1, 13))
        .is_err());
}
