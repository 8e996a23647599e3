use std::sync::Arc;

use tracing::{error, info, warn};

use crate::context::AppContext;
use crate::domain::board::{Board, GroupBy, SortBy, organize};
use crate::domain::ticket::Ticket;

#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    SetGrouping(GroupBy),
    SetSorting(SortBy),
    SetTickets(Vec<Ticket>),
}

/// Immutable view state. Every change goes through [`BoardState::apply`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoardState {
    tickets: Arc<[Ticket]>,
    group_by: GroupBy,
    sort_by: SortBy,
}

impl BoardState {
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn group_by(&self) -> &GroupBy {
        &self.group_by
    }

    pub fn sort_by(&self) -> &SortBy {
        &self.sort_by
    }

    pub fn apply(self, action: BoardAction) -> Self {
        match action {
            BoardAction::SetGrouping(group_by) => {
                if !group_by.is_recognized() {
                    warn!(
                        group_by = group_by.as_str(),
                        "unrecognized grouping; board will be empty"
                    );
                }
                Self { group_by, ..self }
            }
            BoardAction::SetSorting(sort_by) => {
                if !sort_by.is_recognized() {
                    warn!(
                        sort_by = sort_by.as_str(),
                        "unrecognized sorting; ticket order left as is"
                    );
                }
                Self { sort_by, ..self }
            }
            BoardAction::SetTickets(tickets) => Self {
                tickets: Arc::from(tickets),
                ..self
            },
        }
    }

    pub fn view(&self) -> Board {
        organize(&self.tickets, &self.group_by, &self.sort_by)
    }
}

/// Fetches the tickets once and builds the initial state. A failed fetch is
/// logged and leaves the board empty.
pub async fn load_board(ctx: &AppContext) -> BoardState {
    let state = BoardState::default()
        .apply(BoardAction::SetGrouping(ctx.config.group_by.clone()))
        .apply(BoardAction::SetSorting(ctx.config.sort_by.clone()));

    match ctx.ticket_source.fetch_tickets().await {
        Ok(tickets) => {
            info!(count = tickets.len(), "fetched tickets");
            state.apply(BoardAction::SetTickets(tickets))
        }
        Err(err) => {
            error!(error = %err, "error fetching tickets");
            state
        }
    }
}
