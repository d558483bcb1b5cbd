use crate::core::state::AppState;
use crate::features::dashboard::dtos::*;
use crate::features::tickets::models::{Ticket, TicketStatus, Urgency};
use crate::shared::constants::UNCATEGORIZED_LABEL;

/// Read-only aggregation over the session's tickets
pub struct DashboardService;

impl DashboardService {
    pub fn get_summary(state: &AppState) -> DashboardSummaryDto {
        Self::summarize(state.tickets())
    }

    pub fn summarize<'a>(tickets: impl IntoIterator<Item = &'a Ticket>) -> DashboardSummaryDto {
        let mut summary = DashboardSummaryDto {
            total: 0,
            pending: 0,
            in_progress: 0,
            completed: 0,
            cancelled: 0,
            high_priority: 0,
            by_urgency: Urgency::ALL
                .iter()
                .map(|&urgency| UrgencyTicketSummary {
                    urgency,
                    ticket_count: 0,
                })
                .collect(),
            by_category: Vec::new(),
        };

        for ticket in tickets {
            summary.total += 1;

            match ticket.status() {
                TicketStatus::Pending => summary.pending += 1,
                TicketStatus::InProgress => summary.in_progress += 1,
                TicketStatus::Completed => summary.completed += 1,
                TicketStatus::Cancelled => summary.cancelled += 1,
            }

            if ticket.urgency().is_high_priority() {
                summary.high_priority += 1;
            }

            if let Some(entry) = summary
                .by_urgency
                .iter_mut()
                .find(|e| e.urgency == ticket.urgency())
            {
                entry.ticket_count += 1;
            }

            let category = ticket.ai_category().unwrap_or(UNCATEGORIZED_LABEL);
            match summary.by_category.iter_mut().find(|e| e.name == category) {
                Some(entry) => entry.ticket_count += 1,
                None => summary.by_category.push(CategoryTicketSummary {
                    name: category.to_string(),
                    ticket_count: 1,
                }),
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tickets::dtos::TicketFormDto;
    use crate::features::tickets::services::FormSubmission;
    use crate::features::triage::models::ClassificationResult;

    fn submit(state: &mut AppState, urgency: &str, category: Option<&str>) {
        let classification = category.map(|c| ClassificationResult {
            diagnosis: "d".to_string(),
            urgency: urgency.to_string(),
            category: c.to_string(),
            troubleshooting_steps: Vec::new(),
            fallback_reason: None,
        });
        state
            .submit(FormSubmission {
                fields: TicketFormDto {
                    requester_name: "Requester".to_string(),
                    description: "Problem".to_string(),
                    ..TicketFormDto::default()
                },
                classification,
            })
            .unwrap();
    }

    fn count_for(summary: &DashboardSummaryDto, urgency: Urgency) -> usize {
        summary
            .by_urgency
            .iter()
            .find(|e| e.urgency == urgency)
            .map(|e| e.ticket_count)
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_state() {
        let summary = DashboardService::get_summary(&AppState::new());

        assert_eq!(summary.total, 0);
        assert_eq!(summary.high_priority, 0);
        assert_eq!(summary.by_urgency.len(), 4);
        assert!(summary.by_urgency.iter().all(|e| e.ticket_count == 0));
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn test_sample_state_counts() {
        let summary = DashboardService::get_summary(&AppState::with_samples());

        assert_eq!(summary.total, 3);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.cancelled, 0);
        assert_eq!(summary.high_priority, 1);
        assert_eq!(count_for(&summary, Urgency::Low), 1);
        assert_eq!(count_for(&summary, Urgency::High), 1);
        assert_eq!(
            summary
                .by_category
                .iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>(),
            vec!["Network", "Hardware", "Peripheral"]
        );
    }

    #[test]
    fn test_new_tickets_are_counted() {
        let mut state = AppState::with_samples();
        submit(&mut state, "CRITICAL", Some("Hardware"));
        submit(&mut state, "LOW", None);
        submit(&mut state, "nonsense", Some("Software"));

        let summary = DashboardService::get_summary(&state);

        assert_eq!(summary.total, 6);
        assert_eq!(summary.pending, 4);
        assert_eq!(summary.high_priority, 2);
        // Unclassified and unknown-urgency tickets both land on MEDIUM
        assert_eq!(count_for(&summary, Urgency::Medium), 3);
        assert_eq!(count_for(&summary, Urgency::Critical), 1);

        let hardware = summary
            .by_category
            .iter()
            .find(|e| e.name == "Hardware")
            .unwrap();
        assert_eq!(hardware.ticket_count, 2);
        assert_eq!(summary.by_category[0].name, "Software");
        assert!(summary.by_category.iter().any(|e| e.name == "General"));
    }
}
