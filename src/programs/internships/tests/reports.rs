use super::common::{date, draft, registry, supervisor};
use crate::programs::internships::{
    render_detailed_report, render_selection, Internship, ProgramRequest, ProgressUpdate,
};

#[test]
fn ulk_report_lists_every_section() {
    let registry = registry();
    let mut internship =
        Internship::new(draft(&registry, "I-1", "S001", "SUP001", ProgramRequest::Ulk))
            .expect("eligible");
    internship
        .track_progress(
            ProgressUpdate::Note("Finished onboarding".to_string()),
            date(2025, 1, 13),
        )
        .expect("note accepted");

    let report = render_detailed_report(&internship);
    assert!(report.starts_with("===== DETAILED INTERNSHIP REPORT =====\n"));
    assert!(report.contains("Internship ID: I-1\n"));
    assert!(report.contains("STUDENT INFORMATION:\nName: John Doe\nUniversity: ULK\n"));
    assert!(report.contains("Duration: 8 weeks (2025-01-06 to 2025-03-03)\n"));
    assert!(report.contains("Current Status: PENDING\n"));
    assert!(report.contains("Duration check: Valid (≥ 6 weeks)\n"));
    assert!(report.contains("Supervisor qualification: PhD (Required: Masters or PhD)\n"));
    assert!(report.contains("PROGRESS NOTES:\n2025-01-13: Finished onboarding\n"));
    assert!(report.ends_with("=======================================\n"));
}

#[test]
fn empty_logs_print_placeholders() {
    let registry = registry();
    let mut ur = draft(
        &registry,
        "I-2",
        "S002",
        "SUP002",
        ProgramRequest::Ur {
            secondary_supervisor: None,
        },
    );
    ur.start_date = date(2025, 2, 1);
    ur.end_date = date(2025, 5, 1);
    let internship = Internship::new(ur).expect("eligible");

    let report = render_detailed_report(&internship);
    assert!(report.contains("UR INTERNSHIP SPECIFIC DETAILS:\nDuration check: Valid (2-6 months)\n"));
    assert!(report.contains("No secondary supervisor assigned\n"));
    assert!(report.contains("FEEDBACK HISTORY:\nNo feedback available\n"));
}

#[test]
fn uk_report_shows_both_supervisors() {
    let registry = registry();
    let mut internship = Internship::new(draft(
        &registry,
        "I-4",
        "S004",
        "SUP001",
        ProgramRequest::Uk {
            university_supervisor: Some(supervisor(&registry, "SUP004")),
            english_certificate: "IELTS 7.0".to_string(),
        },
    ))
    .expect("eligible");
    internship
        .track_progress(
            ProgressUpdate::Evaluation {
                company: "Strong start".to_string(),
                university: "On track".to_string(),
            },
            date(2025, 2, 3),
        )
        .expect("evaluation accepted");

    let report = render_detailed_report(&internship);
    assert!(report.contains("English Proficiency: IELTS 7.0\n"));
    assert!(report.contains("Company Supervisor: Dr. Michael Chen\n"));
    assert!(report.contains("University Supervisor: Dr. Emily Taylor\n"));
    assert!(report.contains(
        "EVALUATION NOTES:\n2025-02-03:\nCompany: Strong start\nUniversity: On track\n"
    ));
}

#[test]
fn reports_do_not_change_between_calls() {
    let registry = registry();
    let internship = Internship::new(draft(
        &registry,
        "I-5",
        "S003",
        "SUP003",
        ProgramRequest::Remote {
            remote_access_url: "https://meet.example.org/i5".to_string(),
        },
    ))
    .expect("eligible");
    let first = render_detailed_report(&internship);
    assert_eq!(first, render_detailed_report(&internship));
    assert!(first.contains("University: AUCA (Remote internships valid for all universities)\n"));
    assert!(first.contains("COMMUNICATION LOG:\nNo communication logs available\n"));
}

#[test]
fn selection_is_numbered_from_one() {
    let mut registry = registry();
    registry
        .register_internship(draft(&registry, "I-1", "S001", "SUP001", ProgramRequest::Ulk))
        .expect("registered");
    registry
        .register_internship(draft(&registry, "I-3", "S003", "SUP003", ProgramRequest::Auca))
        .expect("registered");
    assert_eq!(
        render_selection(registry.internships()),
        "1. I-1 - John Doe at TechInnovate\n2. I-3 - Alice Johnson at TechInnovate\n"
    );
}
