use serde::Serialize;

use crate::core::state::AppState;
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::tickets::models::Ticket;
use crate::features::triage::models::ClassificationResult;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize output: {}", e),
    }
}

pub fn print_classification(result: &ClassificationResult) {
    println!("Diagnosis : {}", result.diagnosis);
    println!("Urgency   : {}", result.urgency);
    println!("Category  : {}", result.category);
    println!("Troubleshooting:");
    for (i, step) in result.troubleshooting_steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    if let Some(reason) = &result.fallback_reason {
        println!("(analysis unavailable: {})", reason);
    }
}

pub fn print_ticket_list(state: &AppState) {
    if state.is_empty() {
        println!("No tickets yet.");
        return;
    }

    println!(
        "{:<7} {:<16} {:<12} {:<9} {:<12} {:<24} {}",
        "ID", "CREATED", "STATUS", "URGENCY", "CATEGORY", "REQUESTER", "DESCRIPTION"
    );
    for ticket in state.tickets() {
        println!(
            "{:<7} {:<16} {:<12} {:<9} {:<12} {:<24} {}",
            ticket.id(),
            ticket.created_at().format(DATE_FORMAT),
            ticket.status(),
            ticket.urgency(),
            ticket.ai_category().unwrap_or("-"),
            truncate(ticket.requester_name(), 24),
            truncate(ticket.description(), 48)
        );
    }
}

pub fn print_ticket_detail(ticket: &Ticket) {
    println!("Ticket      : {}", ticket.id());
    println!("Created     : {}", ticket.created_at().format(DATE_FORMAT));
    println!("Status      : {}", ticket.status());
    println!("Urgency     : {}", ticket.urgency());
    println!("Requester   : {}", ticket.requester_name());
    println!("Department  : {}", ticket.department());
    println!("Device      : {}", ticket.device_type());
    println!("Description : {}", ticket.description());
    if let Some(category) = ticket.ai_category() {
        println!("AI category : {}", category);
    }
    if let Some(diagnosis) = ticket.ai_diagnosis() {
        println!("AI diagnosis: {}", diagnosis);
    }
    if let Some(image) = ticket.image() {
        println!("Image       : attached ({})", image.mime_type());
    }
}

pub fn print_dashboard(summary: &DashboardSummaryDto) {
    println!("Total tickets : {}", summary.total);
    println!("Pending       : {}", summary.pending);
    println!("In progress   : {}", summary.in_progress);
    println!("Completed     : {}", summary.completed);
    println!("Cancelled     : {}", summary.cancelled);
    println!("High priority : {}", summary.high_priority);

    println!();
    println!("By urgency:");
    for entry in &summary.by_urgency {
        println!("  {:<9} {}", entry.urgency, entry.ticket_count);
    }

    if !summary.by_category.is_empty() {
        println!();
        println!("By category:");
        for entry in &summary.by_category {
            println!("  {:<12} {}", entry.name, entry.ticket_count);
        }
    }
}

pub fn print_catalog(departments: &[&str], device_types: &[&str]) {
    println!("Departments:");
    for department in departments {
        println!("  {}", department);
    }
    println!();
    println!("Device types:");
    for device in device_types {
        println!("  {}", device);
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    short.push_str("...");
    short
}
