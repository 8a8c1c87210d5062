use std::fmt::Write;

use super::placement::{Internship, ProgramDetails, MIN_WEEKS, UR_MAX_MONTHS, UR_MIN_MONTHS};
use crate::calendar::ISO;

const BANNER: &str = "=======================================";

/// Full report for one placement, ending with its program-specific section.
pub fn render_detailed_report(internship: &Internship) -> String {
    let student = internship.student();
    let supervisor = internship.supervisor();
    let mut out = String::from("===== DETAILED INTERNSHIP REPORT =====\n");

    let _ = writeln!(out, "Internship ID: {}", internship.id());
    let _ = writeln!(out, "\nSTUDENT INFORMATION:");
    let _ = writeln!(out, "Name: {}", student.full_name());
    let _ = writeln!(out, "University: {}", student.university().label());
    let _ = writeln!(out, "Email: {}", student.email());

    let _ = writeln!(out, "\nINTERNSHIP DETAILS:");
    let _ = writeln!(out, "Company: {}", internship.company_name());
    let _ = writeln!(
        out,
        "Duration: {} weeks ({} to {})",
        internship.duration_weeks(),
        ISO.render(internship.start_date()),
        ISO.render(internship.end_date())
    );

    let _ = writeln!(out, "\nSUPERVISOR INFORMATION:");
    let _ = writeln!(out, "Name: {}", supervisor.full_name());
    let _ = writeln!(out, "Qualification: {}", supervisor.qualification().label());
    let _ = writeln!(out, "Email: {}", supervisor.email());

    let _ = writeln!(out, "\nSTATUS INFORMATION:");
    let _ = writeln!(out, "Current Status: {}", internship.status().label());

    write_program_section(&mut out, internship);
    let _ = writeln!(out, "{BANNER}");
    out
}

fn write_program_section(out: &mut String, internship: &Internship) {
    match internship.program() {
        ProgramDetails::Ulk { progress_notes } => {
            let _ = writeln!(out, "\nULK INTERNSHIP SPECIFIC DETAILS:");
            let check = if internship.duration_weeks() >= MIN_WEEKS {
                "Valid (≥ 6 weeks)"
            } else {
                "Invalid (< 6 weeks)"
            };
            let _ = writeln!(out, "Duration check: {check}");
            let _ = writeln!(
                out,
                "Supervisor qualification: {} (Required: Masters or PhD)",
                internship.supervisor().qualification().label()
            );
            let _ = writeln!(out, "\nPROGRESS NOTES:");
            write_log(out, progress_notes, "No progress notes available");
        }
        ProgramDetails::Ur {
            secondary_supervisor,
            feedback,
        } => {
            let _ = writeln!(out, "\nUR INTERNSHIP SPECIFIC DETAILS:");
            let months = internship.duration_months();
            let check = if (UR_MIN_MONTHS..=UR_MAX_MONTHS).contains(&months) {
                "Valid (2-6 months)"
            } else {
                "Invalid (outside 2-6 months range)"
            };
            let _ = writeln!(out, "Duration check: {check}");
            let _ = writeln!(
                out,
                "Primary Supervisor: {}",
                internship.supervisor().full_name()
            );
            match secondary_supervisor {
                Some(secondary) => {
                    let _ = writeln!(out, "Secondary Supervisor: {}", secondary.full_name());
                }
                None => {
                    let _ = writeln!(out, "No secondary supervisor assigned");
                }
            }
            let _ = writeln!(out, "\nFEEDBACK HISTORY:");
            write_log(out, feedback, "No feedback available");
        }
        ProgramDetails::Auca {
            community_service_hours,
            weekly_reports,
        } => {
            let _ = writeln!(out, "\nAUCA INTERNSHIP SPECIFIC DETAILS:");
            let _ = writeln!(out, "Community Service Hours: {community_service_hours}");
            let _ = writeln!(out, "Number of Weekly Reports: {}", weekly_reports.len());
            let _ = writeln!(out, "\nWEEKLY REPORTS:");
            write_log(out, weekly_reports, "No weekly reports available");
        }
        ProgramDetails::Uk {
            university_supervisor,
            english_certificate,
            evaluations,
        } => {
            let _ = writeln!(out, "\nUK INTERNSHIP SPECIFIC DETAILS:");
            let _ = writeln!(out, "English Proficiency: {english_certificate}");
            let _ = writeln!(
                out,
                "Company Supervisor: {}",
                internship.supervisor().full_name()
            );
            let _ = writeln!(
                out,
                "University Supervisor: {}",
                university_supervisor.full_name()
            );
            let _ = writeln!(out, "\nEVALUATION NOTES:");
            write_log(out, evaluations, "No evaluation notes available");
        }
        ProgramDetails::Remote {
            remote_access_url,
            communication_log,
        } => {
            let _ = writeln!(out, "\nREMOTE INTERNSHIP SPECIFIC DETAILS:");
            let _ = writeln!(out, "Remote Access URL: {remote_access_url}");
            let _ = writeln!(
                out,
                "University: {} (Remote internships valid for all universities)",
                internship.student().university().label()
            );
            let _ = writeln!(out, "\nCOMMUNICATION LOG:");
            write_log(out, communication_log, "No communication logs available");
        }
    }
}

fn write_log<T: std::fmt::Display>(out: &mut String, entries: &[T], empty: &str) {
    if entries.is_empty() {
        let _ = writeln!(out, "{empty}");
    }
    for entry in entries {
        let _ = writeln!(out, "{entry}");
    }
}

/// Numbered `ID - Student at Company` lines used when picking a placement.
pub fn render_selection(internships: &[Internship]) -> String {
    let mut out = String::new();
    for (index, internship) in internships.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} - {} at {}",
            index + 1,
            internship.id(),
            internship.student().full_name(),
            internship.company_name()
        );
    }
    out
}
