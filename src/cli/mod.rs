//! Command line surface standing in for the helpdesk views.

mod commands;
mod render;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::run;

#[derive(Debug, Parser)]
#[command(name = "helpdesk-triage")]
#[command(about = "IT repair requests with AI-assisted triage", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Start the session with the sample tickets
    #[arg(long, global = true)]
    pub seed_samples: bool,

    /// Language for diagnoses and troubleshooting steps (overrides TRIAGE_LOCALE)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a problem description without creating a ticket
    Analyze {
        /// Problem description
        #[arg(long, short)]
        description: String,

        /// Screenshot or photo of the problem
        #[arg(long, short)]
        image: Option<PathBuf>,
    },

    /// Fill in a repair request and submit it
    Submit {
        /// Requester name
        #[arg(long, short)]
        name: String,

        /// Department (defaults to the first catalogue entry)
        #[arg(long)]
        department: Option<String>,

        /// Device type (defaults to the first catalogue entry)
        #[arg(long)]
        device: Option<String>,

        /// Problem description
        #[arg(long, short)]
        description: String,

        /// Screenshot or photo of the problem
        #[arg(long, short)]
        image: Option<PathBuf>,

        /// Run the AI analysis before submitting
        #[arg(long, short)]
        analyze: bool,

        /// Print only the created ticket as JSON, without the ticket list
        #[arg(long)]
        json: bool,
    },

    /// List the session's tickets, newest first
    List,

    /// Show one ticket in full
    Show {
        /// Ticket id, e.g. T-1001
        id: String,

        /// Print the ticket as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ticket counts by status, urgency and category
    Dashboard {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Departments and device types offered by the request form
    Catalog,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "helpdesk-triage",
            "--seed-samples",
            "submit",
            "--name",
            "สมชาย",
            "--description",
            "เปิดไม่ติด",
            "--analyze",
        ])
        .unwrap();

        assert!(cli.seed_samples);
        match cli.command {
            Command::Submit {
                name,
                department,
                analyze,
                json,
                ..
            } => {
                assert_eq!(name, "สมชาย");
                assert!(department.is_none());
                assert!(analyze);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_show_with_json() {
        let cli = Cli::try_parse_from(["helpdesk-triage", "show", "T-1001", "--json"]).unwrap();
        match cli.command {
            Command::Show { id, json } => {
                assert_eq!(id, "T-1001");
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_analyze_requires_description() {
        assert!(Cli::try_parse_from(["helpdesk-triage", "analyze"]).is_err());
    }
}
