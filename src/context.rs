use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::TicketSource;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub ticket_source: Arc<dyn TicketSource>,
}

impl AppContext {
    pub fn new(config: AppConfig, ticket_source: Arc<dyn TicketSource>) -> Self {
        Self {
            config,
            ticket_source,
        }
    }
}
