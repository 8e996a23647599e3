pub mod board;
pub mod ticket;
