use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Label used wherever a ticket field is absent.
pub const MISSING_LABEL: &str = "undefined";

const PRIORITY_LEVELS: [(i64, &str); 5] = [
    (4, "Urgent"),
    (3, "High"),
    (2, "Medium"),
    (1, "Low"),
    (0, "No priority"),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TicketId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketId::Number(value) => write!(f, "{value}"),
            TicketId::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "userId")]
    pub user: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
}

impl Ticket {
    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or(MISSING_LABEL)
    }

    pub fn user_label(&self) -> &str {
        self.user.as_deref().unwrap_or(MISSING_LABEL)
    }

    pub fn priority_key(&self) -> String {
        self.priority
            .map(|priority| priority.to_string())
            .unwrap_or_else(|| MISSING_LABEL.to_string())
    }

    pub fn priority_label(&self) -> &'static str {
        match self.priority {
            Some(priority) => priority_level(priority).unwrap_or("unknown"),
            None => MISSING_LABEL,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Display name for a priority level; `None` outside `0..=4`.
pub fn priority_level(priority: i64) -> Option<&'static str> {
    PRIORITY_LEVELS
        .iter()
        .find(|(level, _)| *level == priority)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_priority_levels() {
        assert_eq!(priority_level(0), Some("No priority"));
        assert_eq!(priority_level(1), Some("Low"));
        assert_eq!(priority_level(2), Some("Medium"));
        assert_eq!(priority_level(3), Some("High"));
        assert_eq!(priority_level(4), Some("Urgent"));
        assert_eq!(priority_level(5), None);
        assert_eq!(priority_level(-1), None);
    }

    #[test]
    fn deserializes_numeric_and_text_ids() {
        let numeric: Ticket = serde_json::from_str(
            r#"{"id": 7, "title": "Fix login", "status": "Todo", "user": "usr-1", "priority": 3}"#,
        )
        .expect("numeric id");
        assert_eq!(numeric.id, TicketId::Number(7));
        assert_eq!(numeric.id.to_string(), "7");

        let text: Ticket = serde_json::from_str(
            r#"{"id": "CAM-1", "title": "Fix login", "status": "Todo", "user": "usr-1", "priority": 3}"#,
        )
        .expect("text id");
        assert_eq!(text.id, TicketId::Text("CAM-1".to_string()));
        assert_eq!(text.id.to_string(), "CAM-1");
    }

    #[test]
    fn accepts_user_id_alias() {
        let ticket: Ticket =
            serde_json::from_str(r#"{"id": "CAM-2", "title": "t", "userId": "usr-2"}"#)
                .expect("alias");
        assert_eq!(ticket.user.as_deref(), Some("usr-2"));
    }

    #[test]
    fn missing_fields_fall_back_to_undefined() {
        let ticket: Ticket = serde_json::from_str(r#"{"id": 1}"#).expect("sparse ticket");
        assert_eq!(ticket.title, "");
        assert_eq!(ticket.status_label(), MISSING_LABEL);
        assert_eq!(ticket.user_label(), MISSING_LABEL);
        assert_eq!(ticket.priority_key(), MISSING_LABEL);
        assert_eq!(ticket.priority_label(), MISSING_LABEL);
    }

    #[test]
    fn null_title_reads_as_empty() {
        let tickets: Vec<Ticket> = serde_json::from_str(
            r#"[{"id": 1, "title": "ok"}, {"id": 2, "title": null, "status": null}]"#,
        )
        .expect("list with null title");
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].title, "ok");
        assert_eq!(tickets[1].title, "");
        assert_eq!(tickets[1].status_label(), MISSING_LABEL);
    }

    #[test]
    fn out_of_range_priority_has_unknown_label() {
        let ticket: Ticket =
            serde_json::from_str(r#"{"id": 1, "priority": 9}"#).expect("ticket");
        assert_eq!(ticket.priority_key(), "9");
        assert_eq!(ticket.priority_label(), "unknown");
    }

    #[test]
    fn rejects_ticket_without_id() {
        let parsed = serde_json::from_str::<Ticket>(r#"{"title": "no id"}"#);
        assert!(parsed.is_err());
    }
}
