pub mod constants;
pub mod image;
pub mod llm;
pub mod prompts;
pub mod validation;
