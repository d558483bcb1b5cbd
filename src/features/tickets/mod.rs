pub mod dtos;
pub mod models;
pub mod samples;
pub mod services;

pub use services::{RequestForm, TicketAssembler};
