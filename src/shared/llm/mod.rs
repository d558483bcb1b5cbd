mod parser;
mod response;

pub use parser::parse_with_fallback;
pub use response::LlmResponse;

pub(crate) use parser::preview;
