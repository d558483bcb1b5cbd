use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::tickets::dtos::TicketFormDto;
use crate::features::triage::models::ClassificationResult;
use crate::features::triage::IssueClassifier;
use crate::shared::image::EncodedImage;

#[derive(Debug, Clone)]
enum AnalysisState {
    Idle,
    InFlight { revision: u64 },
    Ready(ClassificationResult),
}

/// Classifier inputs captured when an analysis starts.
///
/// Hand it back to [`RequestForm::complete_analysis`] together with the result.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    revision: u64,
    pub description: String,
    pub image: Option<EncodedImage>,
}

/// What happened to a classification handed back to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Applied,
    /// The description or image changed while the call was running
    Discarded,
}

/// Form fields and classification taken from a submitted form
#[derive(Debug, Clone)]
pub struct FormSubmission {
    pub fields: TicketFormDto,
    pub classification: Option<ClassificationResult>,
}

/// Draft state of one repair request.
///
/// Every edit of the description or image bumps a revision counter and drops any
/// classification that was computed for the previous input. A classification that
/// finishes after such an edit is discarded instead of being merged into the draft.
#[derive(Debug, Clone)]
pub struct RequestForm {
    fields: TicketFormDto,
    revision: u64,
    analysis: AnalysisState,
}

impl Default for RequestForm {
    fn default() -> Self {
        Self::new(TicketFormDto::default())
    }
}

impl RequestForm {
    pub fn new(fields: TicketFormDto) -> Self {
        Self {
            fields,
            revision: 0,
            analysis: AnalysisState::Idle,
        }
    }

    pub fn set_requester_name(&mut self, value: impl Into<String>) {
        self.fields.requester_name = value.into();
    }

    pub fn set_department(&mut self, value: impl Into<String>) {
        self.fields.department = value.into();
    }

    pub fn set_device_type(&mut self, value: impl Into<String>) {
        self.fields.device_type = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.fields.description = value.into();
        self.invalidate_analysis();
    }

    pub fn set_image(&mut self, image: Option<EncodedImage>) {
        self.fields.image = image;
        self.invalidate_analysis();
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.analysis, AnalysisState::InFlight { .. })
    }

    /// Whether the analyze control should be enabled
    pub fn can_analyze(&self) -> bool {
        !self.is_analyzing() && !self.fields.description.trim().is_empty()
    }

    /// The classification currently merged into the draft
    pub fn classification(&self) -> Option<&ClassificationResult> {
        match &self.analysis {
            AnalysisState::Ready(result) => Some(result),
            _ => None,
        }
    }

    /// Start an analysis of the current description and image.
    ///
    /// Refused while another analysis is outstanding or when the description is blank.
    pub fn begin_analysis(&mut self) -> Result<AnalysisRequest> {
        if self.is_analyzing() {
            return Err(AppError::Conflict(
                "An analysis is already running for this request".to_string(),
            ));
        }
        if self.fields.description.trim().is_empty() {
            return Err(AppError::Validation(
                "Describe the problem before requesting an analysis".to_string(),
            ));
        }

        self.analysis = AnalysisState::InFlight {
            revision: self.revision,
        };

        Ok(AnalysisRequest {
            revision: self.revision,
            description: self.fields.description.clone(),
            image: self.fields.image.clone(),
        })
    }

    /// Merge a finished classification into the draft if its input is still current
    pub fn complete_analysis(
        &mut self,
        request: AnalysisRequest,
        result: ClassificationResult,
    ) -> AnalysisOutcome {
        match self.analysis {
            AnalysisState::InFlight { revision }
                if revision == request.revision && revision == self.revision =>
            {
                self.analysis = AnalysisState::Ready(result);
                AnalysisOutcome::Applied
            }
            _ => {
                tracing::info!(
                    "Discarding classification for superseded input (revision {}, current {})",
                    request.revision,
                    self.revision
                );
                AnalysisOutcome::Discarded
            }
        }
    }

    /// Run a full analysis through the classifier.
    ///
    /// The classifier itself never fails, so the only errors are the gate's.
    pub async fn analyze(&mut self, classifier: &IssueClassifier) -> Result<AnalysisOutcome> {
        let request = self.begin_analysis()?;
        let result = classifier
            .classify(&request.description, request.image.as_ref())
            .await;
        Ok(self.complete_analysis(request, result))
    }

    /// Validate the fields, hand them over with the current classification and reset
    /// the draft to a blank form.
    ///
    /// An analysis still running at this point is not waited for; its result will be
    /// discarded when it arrives.
    pub fn submit(&mut self) -> Result<FormSubmission> {
        self.fields.validate()?;

        let classification = self.classification().cloned();
        let fields = std::mem::take(&mut self.fields);
        self.invalidate_analysis();

        Ok(FormSubmission {
            fields,
            classification,
        })
    }

    fn invalidate_analysis(&mut self) {
        self.revision += 1;
        self.analysis = AnalysisState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::triage::clients::DisabledClient;
    use crate::shared::llm::LlmResponse;
    use std::sync::Arc;

    fn filled_form() -> RequestForm {
        let mut form = RequestForm::default();
        form.set_requester_name("ก้องภพ จอมเทคนิค");
        form.set_device_type("Printer / Scanner");
        form.set_description("กระดาษติดบ่อยมาก");
        form
    }

    fn result(urgency: &str) -> ClassificationResult {
        ClassificationResult {
            diagnosis: "Paper path blocked".to_string(),
            urgency: urgency.to_string(),
            category: "Peripheral".to_string(),
            troubleshooting_steps: vec!["Open tray".to_string()],
            fallback_reason: None,
        }
    }

    #[test]
    fn test_blank_description_cannot_be_analyzed() {
        let mut form = RequestForm::default();
        assert!(!form.can_analyze());
        assert!(matches!(form.begin_analysis(), Err(AppError::Validation(_))));

        form.set_description("   ");
        assert!(matches!(form.begin_analysis(), Err(AppError::Validation(_))));
        assert!(!form.is_analyzing());
    }

    #[test]
    fn test_second_analysis_is_refused_while_in_flight() {
        let mut form = filled_form();
        let _request = form.begin_analysis().unwrap();

        assert!(form.is_analyzing());
        assert!(!form.can_analyze());
        assert!(matches!(form.begin_analysis(), Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_current_result_is_applied() {
        let mut form = filled_form();
        let request = form.begin_analysis().unwrap();
        assert_eq!(request.description, "กระดาษติดบ่อยมาก");

        let outcome = form.complete_analysis(request, result("LOW"));

        assert_eq!(outcome, AnalysisOutcome::Applied);
        assert!(!form.is_analyzing());
        assert!(form.can_analyze());
        assert_eq!(form.classification().unwrap().category, "Peripheral");
    }

    #[test]
    fn test_other_fields_stay_editable_during_analysis() {
        let mut form = filled_form();
        let request = form.begin_analysis().unwrap();

        form.set_requester_name("Someone Else");
        form.set_department("ไอที (IT)");

        assert_eq!(
            form.complete_analysis(request, result("HIGH")),
            AnalysisOutcome::Applied
        );
        assert_eq!(form.fields.requester_name, "Someone Else");
    }

    #[test]
    fn test_result_for_edited_description_is_discarded() {
        let mut form = filled_form();
        let request = form.begin_analysis().unwrap();

        form.set_description("เครื่องพิมพ์ไม่ทำงานเลย");
        assert!(form.can_analyze());

        assert_eq!(
            form.complete_analysis(request, result("HIGH")),
            AnalysisOutcome::Discarded
        );
        assert!(form.classification().is_none());
    }

    #[test]
    fn test_result_for_changed_image_is_discarded() {
        let mut form = filled_form();
        let request = form.begin_analysis().unwrap();

        form.set_image(Some(EncodedImage::new("data:image/jpeg;base64,/9j/")));

        assert_eq!(
            form.complete_analysis(request, result("HIGH")),
            AnalysisOutcome::Discarded
        );
    }

    #[test]
    fn test_result_is_applied_only_for_the_outstanding_request() {
        let mut form = filled_form();
        let request = form.begin_analysis().unwrap();
        let replay = request.clone();

        assert_eq!(
            form.complete_analysis(request, result("LOW")),
            AnalysisOutcome::Applied
        );
        assert_eq!(
            form.complete_analysis(replay, result("CRITICAL")),
            AnalysisOutcome::Discarded
        );
        assert_eq!(form.classification().unwrap().urgency, "LOW");
    }

    #[test]
    fn test_editing_description_clears_applied_result() {
        let mut form = filled_form();
        let request = form.begin_analysis().unwrap();
        form.complete_analysis(request, result("CRITICAL"));
        assert!(form.classification().is_some());

        form.set_description("ใหม่");
        assert!(form.classification().is_none());
    }

    #[test]
    fn test_submit_hands_over_fields_and_resets() {
        let mut form = filled_form();
        let request = form.begin_analysis().unwrap();
        form.complete_analysis(request, result("HIGH"));

        let submission = form.submit().unwrap();

        assert_eq!(submission.fields.requester_name, "ก้องภพ จอมเทคนิค");
        assert_eq!(submission.fields.device_type, "Printer / Scanner");
        assert_eq!(submission.classification.unwrap().urgency, "HIGH");
        assert_eq!(form.fields, TicketFormDto::default());
        assert!(form.classification().is_none());
    }

    #[test]
    fn test_submit_requires_fields() {
        let mut form = RequestForm::default();
        form.set_description("จอดับ");

        assert!(matches!(form.submit(), Err(AppError::Validation(_))));
        // A rejected submit keeps the draft
        assert_eq!(form.fields.description, "จอดับ");
    }

    #[test]
    fn test_late_result_after_submit_is_discarded() {
        let mut form = filled_form();
        let request = form.begin_analysis().unwrap();

        let submission = form.submit().unwrap();
        assert!(submission.classification.is_none());

        assert_eq!(
            form.complete_analysis(request, result("HIGH")),
            AnalysisOutcome::Discarded
        );
        assert!(form.classification().is_none());
    }

    #[tokio::test]
    async fn test_analyze_applies_fallback_when_service_unavailable() {
        let classifier = IssueClassifier::new(Arc::new(DisabledClient::new("offline")), "Thai");
        let mut form = filled_form();

        let outcome = form.analyze(&classifier).await.unwrap();

        assert_eq!(outcome, AnalysisOutcome::Applied);
        let applied = form.classification().unwrap();
        assert!(!applied.is_success());
        assert_eq!(applied.category, "Unknown");
    }

    #[test]
    fn test_analyze_refused_while_another_call_is_pending() {
        let classifier = IssueClassifier::new(Arc::new(DisabledClient::new("offline")), "Thai");
        let mut form = filled_form();
        let _pending = form.begin_analysis().unwrap();

        let outcome = tokio_test::block_on(form.analyze(&classifier));

        assert!(matches!(outcome, Err(AppError::Conflict(_))));
        assert!(form.is_analyzing());
    }
}
