use std::io::{self, Write};

use clap::Subcommand;

use crate::config::{AppConfig, ENV_API_URL, ENV_GROUP_BY, ENV_SORT_BY, ENV_TIMEOUT_SECS};
use crate::error::AppResult;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the configuration resolved from defaults, environment, and flags.
    Show,
}

pub fn run(command: ConfigCommand, config: &AppConfig) -> AppResult<()> {
    match command {
        ConfigCommand::Show => {
            let mut stdout = io::stdout();
            write!(stdout, "{}", describe(config))?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn describe(config: &AppConfig) -> String {
    let timeout = config
        .timeout
        .map(|timeout| format!("{}s", timeout.as_secs()))
        .unwrap_or_else(|| "<none>".to_string());

    let mut lines = vec![
        format!("Ticket API URL: {} ({ENV_API_URL})", config.api_url),
        format!(
            "Group by: {}{} ({ENV_GROUP_BY})",
            config.group_by.as_str(),
            recognition_note(config.group_by.is_recognized())
        ),
        format!(
            "Sort by: {}{} ({ENV_SORT_BY})",
            config.sort_by.as_str(),
            recognition_note(config.sort_by.is_recognized())
        ),
        format!("HTTP timeout: {timeout} ({ENV_TIMEOUT_SECS})"),
    ];
    lines.push(String::new());
    lines.join("\n")
}

fn recognition_note(recognized: bool) -> &'static str {
    if recognized { "" } else { " [unrecognized]" }
}
