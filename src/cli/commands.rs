use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::Path;
use std::time::Duration;

use super::{render, Command};
use crate::core::error::Result;
use crate::core::state::AppState;
use crate::features::dashboard::DashboardService;
use crate::features::tickets::services::AnalysisOutcome;
use crate::features::tickets::RequestForm;
use crate::features::triage::IssueClassifier;
use crate::shared::constants::{DEPARTMENTS, DEVICE_TYPES};
use crate::shared::image::EncodedImage;

pub async fn run(command: Command, state: &mut AppState, classifier: &IssueClassifier) -> Result<()> {
    match command {
        Command::Analyze { description, image } => {
            analyze(classifier, description, image.as_deref()).await
        }
        Command::Submit {
            name,
            department,
            device,
            description,
            image,
            analyze,
            json,
        } => {
            let mut form = RequestForm::default();
            form.set_requester_name(name);
            if let Some(department) = department {
                form.set_department(department);
            }
            if let Some(device) = device {
                form.set_device_type(device);
            }
            form.set_description(description);
            if let Some(path) = image {
                form.set_image(Some(EncodedImage::from_file(&path).await?));
            }

            submit(state, classifier, form, analyze, json).await
        }
        Command::List => {
            render::print_ticket_list(state);
            Ok(())
        }
        Command::Show { id, json } => {
            let ticket = state.find(&id)?;
            if json {
                render::print_json(ticket);
            } else {
                render::print_ticket_detail(ticket);
            }
            Ok(())
        }
        Command::Dashboard { json } => {
            let summary = DashboardService::get_summary(state);
            if json {
                render::print_json(&summary);
            } else {
                render::print_dashboard(&summary);
            }
            Ok(())
        }
        Command::Catalog => {
            render::print_catalog(DEPARTMENTS, DEVICE_TYPES);
            Ok(())
        }
    }
}

async fn analyze(
    classifier: &IssueClassifier,
    description: String,
    image_path: Option<&Path>,
) -> Result<()> {
    let mut form = RequestForm::default();
    form.set_description(description);
    if let Some(path) = image_path {
        form.set_image(Some(EncodedImage::from_file(path).await?));
    }

    with_spinner("Analyzing problem...", form.analyze(classifier)).await?;

    if let Some(result) = form.classification() {
        render::print_classification(result);
    }
    Ok(())
}

async fn submit(
    state: &mut AppState,
    classifier: &IssueClassifier,
    mut form: RequestForm,
    run_analysis: bool,
    json: bool,
) -> Result<()> {
    if run_analysis && !form.can_analyze() {
        tracing::warn!("Skipping analysis: the request has no problem description");
    } else if run_analysis {
        let outcome = with_spinner("Analyzing problem...", form.analyze(classifier)).await?;
        if outcome == AnalysisOutcome::Applied {
            if let Some(result) = form.classification() {
                render::print_classification(result);
            }
        }
    }

    let submission = form.submit()?;
    let ticket = state.submit(submission)?;

    render::print_json(ticket);
    if !json {
        println!();
        render::print_ticket_list(state);
    }
    Ok(())
}

/// Show a spinner on stderr while `future` runs
async fn with_spinner<F: Future>(message: &'static str, future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = future.await;

    spinner.finish_and_clear();
    output
}
