use chrono::NaiveDate;
use civic_registry::programs::internships::{InternshipStatus, PlacementRegistry, ProgramKind};
use civic_registry::shell::{InternshipShell, Prompter};
use std::io::Cursor;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date")
}

fn seeded_shell() -> InternshipShell {
    InternshipShell::new(
        PlacementRegistry::with_sample_data().expect("sample data"),
        today(),
    )
}

fn run_session(shell: &mut InternshipShell, lines: &[&str]) -> String {
    let input = lines.join("\n") + "\n";
    let mut prompter = Prompter::new(Cursor::new(input.into_bytes()), Vec::new());
    shell.run(&mut prompter).expect("session completes");
    String::from_utf8(prompter.into_output()).expect("utf8 transcript")
}

const ULK_PLACEMENT: [&str; 9] = [
    "4", "1", "1", "1", "I-1", "1", "1", "2025-01-06", "2025-03-03",
];

#[test]
fn ulk_placement_is_registered_tracked_and_found() {
    let mut shell = seeded_shell();
    let mut lines = ULK_PLACEMENT.to_vec();
    lines.extend([
        "6", "3", "1", "Kickoff with the platform team", // track progress
        "5", "1", "  JOHN ", // search by name
        "7",
    ]);
    let transcript = run_session(&mut shell, &lines);

    assert!(transcript.contains("Internship registered successfully!"));
    assert!(transcript.contains("Supervisor Dr. Michael Chen assigned to ULK internship for John Doe"));
    assert!(transcript.contains("Tracking progress for ULK internship I-1"));
    assert!(transcript.contains("Progress updated successfully"));
    assert!(transcript.contains("----- SEARCH RESULTS -----"));
    assert!(transcript.contains("Internship ID: I-1"));

    let internship = &shell.registry().internships()[0];
    assert_eq!(internship.kind(), ProgramKind::Ulk);
    assert_eq!(internship.company_name(), "TechInnovate");
    assert_eq!(internship.status(), InternshipStatus::Pending);
}

#[test]
fn second_active_placement_is_refused_until_completed() {
    let mut shell = seeded_shell();
    let mut lines = ULK_PLACEMENT.to_vec();
    lines.extend(["4", "1", "1", "4", "3", "1", "3", "7"]);
    let transcript = run_session(&mut shell, &lines);

    assert!(transcript
        .contains("Registration failed: This student already has an active internship"));
    assert!(transcript.contains("Internship I-1 is now COMPLETED"));
    assert!(!shell.registry().has_active_internship("S001"));
}

#[test]
fn completed_placement_cannot_be_reopened_beside_a_new_one() {
    let mut shell = seeded_shell();
    let mut lines = ULK_PLACEMENT.to_vec();
    lines.extend([
        "4", "3", "1", "3", // complete I-1
        "4", "1", "1", "2", "I-2", "1", "1", "2025-03-10", "2025-05-30", "https://meet.example.org/john",
        "4", "3", "1", "2", // try to reopen I-1
        "7",
    ]);
    let transcript = run_session(&mut shell, &lines);

    assert!(transcript.contains("Internship I-1 is now COMPLETED"));
    assert_eq!(transcript.matches("Internship registered successfully!").count(), 2);
    assert!(transcript.contains("Error: This student already has an active internship"));
    assert_eq!(
        shell.registry().internships()[0].status(),
        InternshipStatus::Completed
    );
}

#[test]
fn ulk_placement_rejects_short_period_and_junior_supervisor() {
    let mut shell = seeded_shell();
    let transcript = run_session(
        &mut shell,
        &[
            "4", "1", "1", "1", "I-1", "1", "3", "2025-01-06", "2025-02-14", // Bachelors, too short
            "7",
        ],
    );

    assert!(transcript
        .contains("Registration failed: ULK internship must be at least 6 weeks long"));
    assert!(shell.registry().internships().is_empty());
}

#[test]
fn uk_placement_needs_a_distinct_university_supervisor() {
    let mut shell = seeded_shell();
    let transcript = run_session(
        &mut shell,
        &[
            "4", "1", "4", "1", "I-UK", "2", "1", "2025-01-06", "2025-06-30", "1", // primary offered again
            "4", "1", "4", "1", "I-UK", "2", "1", "2025-01-06", "2025-06-30", "4", "IELTS 7.5",
            "7",
        ],
    );

    assert!(transcript.contains("Registration failed: Invalid university supervisor selection"));
    assert!(transcript.contains("Internship registered successfully!"));

    let internship = &shell.registry().internships()[0];
    assert_eq!(internship.kind(), ProgramKind::Uk);
    assert_eq!(internship.student().full_name(), "Bob Brown");
}

#[test]
fn remote_placement_and_university_search() {
    let mut shell = seeded_shell();
    let transcript = run_session(
        &mut shell,
        &[
            "4", "1", "2", "2", "R-1", "3", "4", "2025-02-03", "2025-05-30",
            "https://meet.example.org/jane", // remote for a UR student
            "5", "2", "2", // UR search
            "5", "2", "3", // AUCA search
            "6", "1", "7",
        ],
    );

    assert!(transcript.contains("Internship registered successfully!"));
    assert!(transcript.contains("----- INTERNSHIPS FOR UR -----"));
    assert!(transcript.contains("No internships found for AUCA students"));
    assert!(transcript.contains("----- ALL INTERNSHIP REPORTS -----"));
    assert_eq!(shell.registry().internships()[0].kind(), ProgramKind::Remote);
}

#[test]
fn empty_registry_guards_placement_flows() {
    let mut shell = InternshipShell::new(PlacementRegistry::new(), today());
    let transcript = run_session(
        &mut shell,
        &[
            "4", "1", "1", "2", "1", "1", "S010", "Eve Uwera", "9", "3", "eve.auca.ac.rw",
            "eve@auca.ac.rw", "1", "2", "5", "6", "7",
        ],
    );

    assert!(transcript
        .contains("Error: You need to register at least one student and one supervisor first."));
    assert!(transcript.contains("No students registered yet."));
    assert!(transcript.contains("Invalid choice. Please enter a number between 1 and 4."));
    assert!(transcript.contains("Student registered successfully!"));
    assert!(transcript.contains("Error: Email must contain '@'"));
    assert!(transcript.contains("1. ID: S010, Name: Eve Uwera, University: AUCA, Email: eve@auca.ac.rw"));
    assert_eq!(transcript.matches("No internships registered yet.").count(), 2);
}
