use async_trait::async_trait;

use crate::domain::ticket::Ticket;
use crate::error::AppResult;

/// Where the board's tickets come from. One call returns the full dataset.
#[async_trait]
pub trait TicketSource: Send + Sync {
    async fn fetch_tickets(&self) -> AppResult<Vec<Ticket>>;
}
