mod issue_classifier;

pub use issue_classifier::IssueClassifier;
