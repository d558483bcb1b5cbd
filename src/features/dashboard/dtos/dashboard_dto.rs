use serde::Serialize;

use crate::features::tickets::models::Urgency;

/// Category with ticket count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTicketSummary {
    pub name: String,
    pub ticket_count: usize,
}

/// Urgency level with ticket count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgencyTicketSummary {
    pub urgency: Urgency,
    pub ticket_count: usize,
}

/// Headline numbers and breakdowns for the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryDto {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// HIGH or CRITICAL
    pub high_priority: usize,
    /// Every urgency level, LOW to CRITICAL, including zero counts
    pub by_urgency: Vec<UrgencyTicketSummary>,
    /// Categories in order of first appearance, newest ticket first
    pub by_category: Vec<CategoryTicketSummary>,
}
