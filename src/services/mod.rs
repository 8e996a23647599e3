pub mod ticket_source;

pub use ticket_source::TicketSource;
