use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use serde::Deserialize;
use tracing::debug;

use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};
use crate::services::TicketSource;

pub struct TicketApiClient {
    http: Client,
    api_url: String,
}

impl TicketApiClient {
    pub fn new(api_url: String, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;

        Ok(Self { http, api_url })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl TicketSource for TicketApiClient {
    async fn fetch_tickets(&self) -> AppResult<Vec<Ticket>> {
        debug!(url = %self.api_url, "requesting tickets");

        let response = self
            .http
            .get(&self.api_url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::Fetch(format!("failed to call ticket API: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Fetch(format!(
                "ticket API responded with {status}: {body}"
            )));
        }

        let payload: TicketListResponse = response
            .json()
            .await
            .map_err(|err| AppError::Fetch(format!("failed to parse ticket response: {err}")))?;

        Ok(payload.tickets)
    }
}

#[derive(Deserialize)]
struct TicketListResponse {
    tickets: Vec<Ticket>,
}
