use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::constants::{DEPARTMENTS, DEVICE_TYPES};
use crate::shared::image::EncodedImage;

/// User-entered fields of a repair request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TicketFormDto {
    #[validate(custom(
        function = "crate::shared::validation::validate_not_blank",
        message = "Requester name is required"
    ))]
    pub requester_name: String,

    #[validate(custom(
        function = "crate::shared::validation::validate_not_blank",
        message = "Department is required"
    ))]
    pub department: String,

    #[validate(custom(
        function = "crate::shared::validation::validate_not_blank",
        message = "Device type is required"
    ))]
    pub device_type: String,

    #[validate(custom(
        function = "crate::shared::validation::validate_not_blank",
        message = "Problem description is required"
    ))]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EncodedImage>,
}

impl Default for TicketFormDto {
    /// Blank form with the first department and device type preselected
    fn default() -> Self {
        Self {
            requester_name: String::new(),
            department: DEPARTMENTS[0].to_string(),
            device_type: DEVICE_TYPES[0].to_string(),
            description: String::new(),
            image: None,
        }
    }
}
