use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::domain::ticket::Ticket;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupBy {
    #[default]
    Status,
    User,
    Priority,
    Unrecognized(String),
}

impl GroupBy {
    pub fn as_str(&self) -> &str {
        match self {
            GroupBy::Status => "status",
            GroupBy::User => "user",
            GroupBy::Priority => "priority",
            GroupBy::Unrecognized(value) => value,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "status" => GroupBy::Status,
            "user" => GroupBy::User,
            "priority" => GroupBy::Priority,
            _ => GroupBy::Unrecognized(value.trim().to_string()),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, GroupBy::Unrecognized(_))
    }

    /// Group label for `ticket`, or `None` when this grouping selects nothing.
    fn label_for(&self, ticket: &Ticket) -> Option<String> {
        match self {
            GroupBy::Status => Some(ticket.status_label().to_string()),
            GroupBy::User => Some(ticket.user_label().to_string()),
            GroupBy::Priority => Some(ticket.priority_key()),
            GroupBy::Unrecognized(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Priority,
    Title,
    Unrecognized(String),
}

impl SortBy {
    pub fn as_str(&self) -> &str {
        match self {
            SortBy::Priority => "priority",
            SortBy::Title => "title",
            SortBy::Unrecognized(value) => value,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "priority" => SortBy::Priority,
            "title" => SortBy::Title,
            _ => SortBy::Unrecognized(value.trim().to_string()),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, SortBy::Unrecognized(_))
    }

    fn compare(&self, a: &Ticket, b: &Ticket) -> Ordering {
        match self {
            SortBy::Priority => compare_priority(a.priority, b.priority),
            SortBy::Title => compare_titles(&a.title, &b.title),
            SortBy::Unrecognized(_) => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub label: String,
    pub tickets: Vec<Ticket>,
}

/// Columns of the board in first-seen label order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Board {
    pub groups: Vec<Group>,
}

impl Board {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
impl Board {
    pub fn group(&self, label: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.label == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.groups.iter().map(|group| group.label.as_str()).collect()
    }

    pub fn ticket_count(&self) -> usize {
        self.groups.iter().map(|group| group.tickets.len()).sum()
    }
}

pub fn organize(tickets: &[Ticket], group_by: &GroupBy, sort_by: &SortBy) -> Board {
    let mut groups: Vec<Group> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for ticket in tickets {
        let Some(label) = group_by.label_for(ticket) else {
            continue;
        };
        let index = *positions.entry(label.clone()).or_insert_with(|| {
            groups.push(Group {
                label,
                tickets: Vec::new(),
            });
            groups.len() - 1
        });
        groups[index].tickets.push(ticket.clone());
    }

    // `sort_by` is stable, so ties keep partition order.
    for group in &mut groups {
        group.tickets.sort_by(|a, b| sort_by.compare(a, b));
    }

    Board { groups }
}

/// Higher priority first; a missing priority goes last.
fn compare_priority(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Collation-style order: base letters first, ignoring accents and case.
/// Ties fall back to accents (unaccented first), then case (lowercase first).
fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn collation_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
