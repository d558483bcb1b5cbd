mod ticket_form_dto;

pub use ticket_form_dto::TicketFormDto;
