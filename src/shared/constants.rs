// =============================================================================
// FORM CATALOGUES
// =============================================================================

/// Departments offered by the request form; the first entry is the form default
pub const DEPARTMENTS: &[&str] = &[
    "บัญชี (Accounting)",
    "ทรัพยากรบุคคล (HR)",
    "การตลาด (Marketing)",
    "ฝ่ายขาย (Sales)",
    "ไอที (IT)",
    "บริหาร (Management)",
];

/// Device types offered by the request form; the first entry is the form default
pub const DEVICE_TYPES: &[&str] = &[
    "Desktop PC",
    "Laptop / Notebook",
    "Printer / Scanner",
    "Network / Wi-Fi",
    "Software / Program",
    "Other",
];

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Category vocabulary suggested to the model; other values are accepted
pub const SUGGESTED_CATEGORIES: &[&str] =
    &["Hardware", "Software", "Network", "Peripheral", "User Error"];

/// Number of troubleshooting steps requested from the model
pub const TROUBLESHOOTING_STEP_COUNT: usize = 3;

/// Mime type assumed for images without a data-URL header
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Dashboard bucket for tickets that were never classified
pub const UNCATEGORIZED_LABEL: &str = "General";

// =============================================================================
// TICKET IDS
// =============================================================================

pub const TICKET_ID_PREFIX: &str = "T-";

/// Inclusive range of the numeric part of a ticket id
pub const TICKET_NUMBER_MIN: u16 = 1000;
pub const TICKET_NUMBER_MAX: u16 = 9999;
