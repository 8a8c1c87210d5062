//! Internship placements across partner universities and remote programs.

pub mod people;
pub mod placement;
mod registry;
pub mod report;

#[cfg(test)]
mod tests;

pub use people::{Company, Industry, Qualification, Student, Supervisor, University};
pub use placement::{
    Evaluation, Internship, InternshipDraft, InternshipStatus, LogEntry, ProgramDetails,
    ProgramKind, ProgramRequest, ProgressUpdate,
};
pub use registry::PlacementRegistry;
pub use report::{render_detailed_report, render_selection};
