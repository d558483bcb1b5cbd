pub mod dashboard;
pub mod tickets;
pub mod triage;
