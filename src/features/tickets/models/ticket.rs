use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::shared::image::EncodedImage;

/// Lifecycle of a repair ticket. Tickets are always created `Pending`; nothing in
/// this crate moves them to another state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TicketStatus::Pending => "PENDING",
            TicketStatus::InProgress => "IN_PROGRESS",
            TicketStatus::Completed => "COMPLETED",
            TicketStatus::Cancelled => "CANCELLED",
        };
        f.pad(label)
    }
}

/// Ordinal severity of a ticket
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [
        Urgency::Low,
        Urgency::Medium,
        Urgency::High,
        Urgency::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "LOW",
            Urgency::Medium => "MEDIUM",
            Urgency::High => "HIGH",
            Urgency::Critical => "CRITICAL",
        }
    }

    pub fn is_high_priority(&self) -> bool {
        matches!(self, Urgency::High | Urgency::Critical)
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = String;

    /// Accepts only the exact upper-case level names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Urgency::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("Unknown urgency level: {:?}", s))
    }
}

/// A finalized repair request.
///
/// Fields are only writable inside the tickets feature, where the assembler builds
/// them; everything else gets read-only accessors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub(in crate::features::tickets) id: String,
    pub(in crate::features::tickets) requester_name: String,
    pub(in crate::features::tickets) department: String,
    pub(in crate::features::tickets) device_type: String,
    pub(in crate::features::tickets) description: String,
    pub(in crate::features::tickets) status: TicketStatus,
    pub(in crate::features::tickets) urgency: Urgency,
    pub(in crate::features::tickets) created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(in crate::features::tickets) ai_diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(in crate::features::tickets) ai_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(in crate::features::tickets) image: Option<EncodedImage>,
}

impl Ticket {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn requester_name(&self) -> &str {
        &self.requester_name
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn device_type(&self) -> &str {
        &self.device_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TicketStatus {
        self.status
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn ai_diagnosis(&self) -> Option<&str> {
        self.ai_diagnosis.as_deref()
    }

    pub fn ai_category(&self) -> Option<&str> {
        self.ai_category.as_deref()
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        self.image.as_ref()
    }
}
