mod request_form;
mod ticket_assembler;

pub use request_form::{AnalysisOutcome, FormSubmission, RequestForm};
pub use ticket_assembler::TicketAssembler;
