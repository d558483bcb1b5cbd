mod classification;

pub use classification::{
    ClassificationResult, FALLBACK_CATEGORY, FALLBACK_DIAGNOSIS, FALLBACK_STEP,
};
