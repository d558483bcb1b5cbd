use chrono::Utc;
use rand::Rng;

use crate::features::tickets::dtos::TicketFormDto;
use crate::features::tickets::models::{Ticket, TicketStatus, Urgency};
use crate::features::triage::models::ClassificationResult;
use crate::shared::constants::{TICKET_ID_PREFIX, TICKET_NUMBER_MAX, TICKET_NUMBER_MIN};

/// Builds finalized tickets from form fields and an optional classification.
///
/// Assembly is total: the form has already enforced required fields, so nothing here
/// can fail.
pub struct TicketAssembler;

impl TicketAssembler {
    /// Generate a ticket id in format: T-NNNN
    ///
    /// Random, so two calls may collide; callers that need uniqueness check against
    /// their collection.
    pub fn generate_ticket_id() -> String {
        let number = rand::thread_rng().gen_range(TICKET_NUMBER_MIN..=TICKET_NUMBER_MAX);
        format!("{}{}", TICKET_ID_PREFIX, number)
    }

    /// Assemble a ticket with a freshly generated id
    pub fn assemble(form: TicketFormDto, classification: Option<&ClassificationResult>) -> Ticket {
        Self::assemble_with_id(Self::generate_ticket_id(), form, classification)
    }

    /// Replace the generated id of an assembled ticket, for callers that found it taken
    pub fn regenerate_id(mut ticket: Ticket) -> Ticket {
        ticket.id = Self::generate_ticket_id();
        ticket
    }

    fn assemble_with_id(
        id: String,
        form: TicketFormDto,
        classification: Option<&ClassificationResult>,
    ) -> Ticket {
        let TicketFormDto {
            requester_name,
            department,
            device_type,
            description,
            image,
        } = form;

        Ticket {
            id,
            requester_name,
            department,
            device_type,
            description,
            status: TicketStatus::Pending,
            urgency: Self::resolve_urgency(classification),
            created_at: Utc::now(),
            ai_diagnosis: classification.map(|c| c.diagnosis.clone()),
            ai_category: classification.map(|c| c.category.clone()),
            image,
        }
    }

    /// Classification urgency when it names a known level, MEDIUM otherwise
    pub fn resolve_urgency(classification: Option<&ClassificationResult>) -> Urgency {
        match classification {
            Some(c) => c.urgency_level().unwrap_or_else(|| {
                tracing::warn!(
                    "Ignoring unknown urgency '{}' from classification, defaulting to {}",
                    c.urgency,
                    Urgency::default()
                );
                Urgency::default()
            }),
            None => Urgency::default(),
        }
    }
}
