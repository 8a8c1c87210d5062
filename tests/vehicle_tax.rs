use chrono::NaiveDate;
use civic_registry::shell::{Prompter, VehicleShell};
use std::io::Cursor;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date")
}

fn run_session(shell: &mut VehicleShell, lines: &[&str]) -> String {
    let input = lines.join("\n") + "\n";
    let mut prompter = Prompter::new(Cursor::new(input.into_bytes()), Vec::new());
    shell.run(&mut prompter).expect("session completes");
    String::from_utf8(prompter.into_output()).expect("utf8 transcript")
}

#[test]
fn registered_car_is_taxed_and_reported() {
    let mut shell = VehicleShell::new(today());
    let transcript = run_session(
        &mut shell,
        &[
            "1", "1", "C-1", "Eric Habimana", "2013", "RAC 777 B", "1000", "true", // car
            "3", "4", "5",
        ],
    );

    assert!(transcript.starts_with("Welcome to Vehicle Tax Management System\n"));
    assert!(transcript.contains("Vehicle registered successfully!"));
    assert!(transcript.contains("Vehicle #1 (Car - RAC 777 B): $720.00"));
    assert!(transcript.contains("=== TAX REPORT: CAR ==="));
    assert!(transcript.contains("- Electric vehicle discount: 20%"));
    assert!(transcript.contains("- Vehicle age reduction: 10%"));
    assert!(transcript.trim_end().ends_with("Thank you for using Vehicle Tax Management System."));
    assert_eq!(shell.registry().len(), 1);
}

#[test]
fn bad_answers_are_asked_again_field_by_field() {
    let mut shell = VehicleShell::new(today());
    let transcript = run_session(
        &mut shell,
        &[
            "1", "9", "2", // truck after an out-of-range pick
            "T-1", "  ", "Grace Uwase", "2030", "1990", "RAD 100 A", "-5", "2000", "0", "12",
            "1", "1", "T-1", "C-1", "Owner", "2020", "RAD 100 A", "RAE 200 B", "500", "maybe",
            "false", "5",
        ],
    );

    assert!(transcript.contains("Invalid choice. Please enter a number between 1 and 5."));
    assert!(transcript.contains("Error: Owner name cannot be empty"));
    assert!(transcript.contains("Error: Year of fabrication cannot be in the future"));
    assert!(transcript.contains("Error: Base tax rate cannot be negative"));
    assert!(transcript.contains("Error: Load capacity must be greater than 0"));
    assert!(transcript.contains("Error: Vehicle ID already exists. Please enter a unique ID."));
    assert!(transcript
        .contains("Error: Registration number already exists. Please enter a unique number."));
    assert!(transcript.contains("Invalid input. Please enter 'true' or 'false'."));
    assert_eq!(transcript.matches("Vehicle registered successfully!").count(), 2);

    let truck = shell.registry().find("t-1").expect("truck registered");
    // 35 years old and over ten tons
    assert!((truck.calculate_tax(today()) - 2000.0 * 1.15 * 1.25).abs() < 1e-9);
}

#[test]
fn empty_registry_and_unknown_choices() {
    let mut shell = VehicleShell::new(today());
    let transcript = run_session(&mut shell, &["2", "3", "4", "8", "abc", "5"]);

    assert_eq!(transcript.matches("No vehicles registered yet.").count(), 3);
    assert!(transcript.contains("Invalid choice. Please try again."));
    assert!(transcript.contains("Error: Invalid number format. Please enter a valid integer."));
}

#[test]
fn session_ends_quietly_when_input_runs_out() {
    let mut shell = VehicleShell::new(today());
    let transcript = run_session(&mut shell, &["1", "4", "B-1"]);
    assert!(transcript.ends_with("Enter owner name: "));
    assert!(shell.registry().is_empty());
}
