use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::tickets::models::Ticket;
use crate::features::tickets::samples::sample_tickets;
use crate::features::tickets::services::FormSubmission;
use crate::features::tickets::TicketAssembler;
use crate::shared::constants::{TICKET_NUMBER_MAX, TICKET_NUMBER_MIN};
use crate::shared::validation::TICKET_ID_REGEX;

/// In-memory state of one helpdesk session.
///
/// Owns the ticket collection. Tickets can only be appended; views get read-only
/// access.
#[derive(Debug, Default)]
pub struct AppState {
    tickets: Vec<Ticket>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State preloaded with the demo tickets
    pub fn with_samples() -> Self {
        let mut tickets = sample_tickets(Utc::now());
        // Stored in submission order, oldest first
        tickets.sort_by_key(|t| t.created_at());
        Self { tickets }
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Tickets, most recently submitted first
    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().rev()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.tickets.iter().any(|t| t.id() == id)
    }

    pub fn find(&self, id: &str) -> Result<&Ticket> {
        if !TICKET_ID_REGEX.is_match(id) {
            return Err(AppError::Validation(format!(
                "Invalid ticket id '{}', expected format T-NNNN",
                id
            )));
        }

        self.tickets
            .iter()
            .find(|t| t.id() == id)
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))
    }

    /// Append a finalized ticket. Rejects a ticket whose id is already taken.
    pub fn append(&mut self, ticket: Ticket) -> Result<&Ticket> {
        if self.contains_id(ticket.id()) {
            return Err(AppError::Conflict(format!(
                "Ticket id {} already exists",
                ticket.id()
            )));
        }

        tracing::info!(
            "Ticket {} created (urgency={}, category={})",
            ticket.id(),
            ticket.urgency(),
            ticket.ai_category().unwrap_or("-")
        );

        self.tickets.push(ticket);
        let index = self.tickets.len() - 1;
        Ok(&self.tickets[index])
    }

    /// Assemble a submitted form into a ticket with an id unused in this session
    pub fn submit(&mut self, submission: FormSubmission) -> Result<&Ticket> {
        let capacity = usize::from(TICKET_NUMBER_MAX - TICKET_NUMBER_MIN) + 1;
        if self.len() >= capacity {
            return Err(AppError::Conflict(
                "No ticket ids left in this session".to_string(),
            ));
        }

        let mut ticket =
            TicketAssembler::assemble(submission.fields, submission.classification.as_ref());
        while self.contains_id(ticket.id()) {
            tracing::debug!("Ticket id {} already taken, generating another", ticket.id());
            ticket = TicketAssembler::regenerate_id(ticket);
        }

        self.append(ticket)
    }
}
