use clap::ValueEnum;

use crate::domain::board::Board;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render(board: &Board, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(board)),
        OutputFormat::Json => render_json(board),
    }
}

pub fn render_text(board: &Board) -> String {
    if board.is_empty() {
        return "No tickets.\n".to_string();
    }

    let mut out = String::new();
    for (index, group) in board.groups.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let heading = format!("{} ({})", group.label, group.tickets.len());
        out.push_str(&format!("{heading}\n"));
        out.push_str(&"=".repeat(heading.chars().count()));
        out.push('\n');

        for ticket in &group.tickets {
            out.push_str(&format!("  [{}] {}\n", ticket.id, ticket.title));
            out.push_str(&format!("      Status: {}\n", ticket.status_label()));
            out.push_str(&format!("      User: {}\n", ticket.user_label()));
            out.push_str(&format!("      Priority: {}\n", ticket.priority_label()));
        }
    }
    out
}

pub fn render_json(board: &Board) -> AppResult<String> {
    serde_json::to_string_pretty(board)
        .map_err(|err| AppError::Render(format!("failed to serialize board: {err}")))
}
