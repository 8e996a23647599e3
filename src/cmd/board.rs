use std::io::{self, BufRead, Write};

use crate::context::AppContext;
use crate::domain::board::{GroupBy, SortBy};
use crate::error::{AppError, AppResult};
use crate::render::{OutputFormat, render};
use crate::workflow::board::{BoardAction, BoardState, load_board};

const HELP: &str = "\
Commands:
  group <status|user|priority>   regroup the board
  sort <priority|title>          reorder tickets inside each column
  show                           render the board again
  help                           show this message
  quit                           leave the session";

#[derive(Debug, Clone)]
pub struct BoardCommandArgs {
    pub format: OutputFormat,
    pub interactive: bool,
}

pub async fn run(ctx: &AppContext, args: BoardCommandArgs) -> AppResult<()> {
    let state = load_board(ctx).await;

    if args.interactive {
        let input = io::BufReader::new(io::stdin());
        spawn_session(state, args.format, input, io::stdout()).await?;
    } else {
        let mut stdout = io::stdout();
        write!(stdout, "{}", render_state(&state, args.format)?)?;
        stdout.flush()?;
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
enum SessionCommand {
    Dispatch(BoardAction),
    Show,
    Help,
    Quit,
    Invalid(String),
}

fn parse_command(line: &str) -> SessionCommand {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return SessionCommand::Show;
    };
    let argument = parts.collect::<Vec<_>>().join(" ");

    match (verb.to_lowercase().as_str(), argument.is_empty()) {
        ("group", false) => {
            SessionCommand::Dispatch(BoardAction::SetGrouping(GroupBy::parse(&argument)))
        }
        ("sort", false) => {
            SessionCommand::Dispatch(BoardAction::SetSorting(SortBy::parse(&argument)))
        }
        ("group", true) | ("sort", true) => {
            SessionCommand::Invalid(format!("'{verb}' needs a value"))
        }
        ("show", _) => SessionCommand::Show,
        ("help", _) | ("?", _) => SessionCommand::Help,
        ("quit", _) | ("exit", _) | ("q", _) => SessionCommand::Quit,
        _ => SessionCommand::Invalid(format!("unknown command '{verb}'")),
    }
}

/// Runs the stdin-driven session off the async runtime's worker threads.
async fn spawn_session<R, W>(
    state: BoardState,
    format: OutputFormat,
    input: R,
    mut output: W,
) -> AppResult<(BoardState, W)>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let state = run_session(state, format, input, &mut output)?;
        Ok::<_, AppError>((state, output))
    })
    .await
    .map_err(|err| AppError::Io(io::Error::other(format!("interactive session failed: {err}"))))?
}

/// Reads commands until `quit` or end of input, re-rendering after each change.
fn run_session<R, W>(
    mut state: BoardState,
    format: OutputFormat,
    input: R,
    output: &mut W,
) -> AppResult<BoardState>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{}", render_state(&state, format)?)?;

    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };

        match parse_command(&line?) {
            SessionCommand::Dispatch(action) => {
                state = state.apply(action);
                write!(output, "{}", render_state(&state, format)?)?;
            }
            SessionCommand::Show => write!(output, "{}", render_state(&state, format)?)?,
            SessionCommand::Help => writeln!(output, "{HELP}")?,
            SessionCommand::Quit => break,
            SessionCommand::Invalid(message) => {
                writeln!(output, "{message}; type 'help' for commands")?
            }
        }
    }

    Ok(state)
}

fn render_state(state: &BoardState, format: OutputFormat) -> AppResult<String> {
    let mut rendered = String::new();
    if format == OutputFormat::Text {
        rendered.push_str(&format!(
            "Kanban board: {} tickets, grouped by {}, sorted by {}\n\n",
            state.tickets().len(),
            state.group_by().as_str(),
            state.sort_by().as_str()
        ));
    }
    rendered.push_str(&render(&state.view(), format)?);
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::domain::ticket::{Ticket, TicketId};

    fn state() -> BoardState {
        let tickets = vec![
            Ticket {
                id: TicketId::Number(1),
                title: "Beta".to_string(),
                status: Some("todo".to_string()),
                user: Some("alice".to_string()),
                priority: Some(2),
            },
            Ticket {
                id: TicketId::Number(2),
                title: "Alpha".to_string(),
                status: Some("todo".to_string()),
                user: Some("bob".to_string()),
                priority: Some(4),
            },
        ];
        BoardState::default().apply(BoardAction::SetTickets(tickets))
    }

    #[test]
    fn parses_session_commands() {
        assert_eq!(
            parse_command("group user"),
            SessionCommand::Dispatch(BoardAction::SetGrouping(GroupBy::User))
        );
        assert_eq!(
            parse_command("  SORT   title "),
            SessionCommand::Dispatch(BoardAction::SetSorting(SortBy::Title))
        );
        assert_eq!(
            parse_command("group team"),
            SessionCommand::Dispatch(BoardAction::SetGrouping(GroupBy::Unrecognized(
                "team".to_string()
            )))
        );
        assert_eq!(parse_command(""), SessionCommand::Show);
        assert_eq!(parse_command("quit"), SessionCommand::Quit);
        assert_eq!(parse_command("help"), SessionCommand::Help);
        assert!(matches!(parse_command("group"), SessionCommand::Invalid(_)));
        assert!(matches!(parse_command("archive"), SessionCommand::Invalid(_)));
    }

    #[test]
    fn session_applies_actions_in_order() {
        let input = Cursor::new("group user\nsort title\nquit\ngroup priority\n");
        let mut output = Vec::new();

        let final_state =
            run_session(state(), OutputFormat::Text, input, &mut output).expect("session");

        assert_eq!(final_state.group_by(), &GroupBy::User);
        assert_eq!(final_state.sort_by(), &SortBy::Title);

        let printed = String::from_utf8(output).expect("utf8");
        assert!(printed.contains("grouped by status, sorted by priority"));
        assert!(printed.contains("grouped by user, sorted by title"));
        assert!(!printed.contains("grouped by priority"));
    }

    #[test]
    fn session_ends_at_end_of_input() {
        let input = Cursor::new("bogus\n");
        let mut output = Vec::new();

        let final_state =
            run_session(state(), OutputFormat::Text, input, &mut output).expect("session");

        assert_eq!(final_state, state());
        let printed = String::from_utf8(output).expect("utf8");
        assert!(printed.contains("unknown command 'bogus'"));
    }

    #[tokio::test]
    async fn blocking_session_returns_final_state_and_output() {
        let input = Cursor::new(String::from("sort title\nquit\n"));

        let (final_state, output) = spawn_session(state(), OutputFormat::Text, input, Vec::new())
            .await
            .expect("session");

        assert_eq!(final_state.sort_by(), &SortBy::Title);
        let printed = String::from_utf8(output).expect("utf8");
        assert!(printed.contains("grouped by status, sorted by title"));
    }

    #[test]
    fn header_names_current_selection() {
        let rendered = render_state(&state(), OutputFormat::Text).expect("render");
        assert!(
            rendered.starts_with("Kanban board: 2 tickets, grouped by status, sorted by priority\n")
        );
        let alpha = rendered.find("Alpha").expect("alpha");
        let beta = rendered.find("Beta").expect("beta");
        assert!(alpha < beta);
    }
}
