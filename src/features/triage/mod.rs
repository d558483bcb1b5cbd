pub mod clients;
pub mod models;
pub mod services;

pub use services::IssueClassifier;
