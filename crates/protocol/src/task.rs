//! Task-related types for the board.
//!
//! This module defines the persisted task record, its identifier, its
//! priority, and the editable draft used to create and update tasks.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};
use crate::lane::Lane;

/// Unique identifier for a task.
///
/// The identifier is opaque: new tasks get a UUID v4, while identifiers
/// read back from storage are kept verbatim whatever their shape.
///
/// # Examples
///
/// ```
/// use taskboard_protocol::TaskId;
///
/// let a = TaskId::generate();
/// let b = TaskId::generate();
/// assert_ne!(a, b);
///
/// let legacy = TaskId::from("1700000000000");
/// assert_eq!(legacy.as_str(), "1700000000000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task priority.
///
/// # Examples
///
/// ```
/// use taskboard_protocol::Priority;
///
/// assert_eq!(Priority::default(), Priority::Medium);
/// assert_eq!(Priority::High.display_name(), "High");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// The default priority.
    #[default]
    Medium,
    /// Needs doing first.
    High,
}

impl Priority {
    /// Returns all priorities from lowest to highest.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    /// Returns the capitalized name shown on cards.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Returns the next priority, wrapping from `High` back to `Low`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    /// Returns the previous priority, wrapping from `Low` to `High`.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::Medium => Self::Low,
            Self::High => Self::Medium,
        }
    }
}

/// Splits a comma-separated tag string into trimmed, non-empty tags.
///
/// Order is preserved.
///
/// # Examples
///
/// ```
/// use taskboard_protocol::parse_tags;
///
/// assert_eq!(parse_tags(" urgent, ,doc "), vec!["urgent", "doc"]);
/// assert!(parse_tags("").is_empty());
/// ```
#[must_use]
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Joins tags into the single display string used by the editor.
///
/// # Examples
///
/// ```
/// use taskboard_protocol::join_tags;
///
/// let tags = vec!["urgent".to_string(), "doc".to_string()];
/// assert_eq!(join_tags(&tags), "urgent, doc");
/// ```
#[must_use]
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// The editable fields of a task.
///
/// A draft carries everything the editor can change. It never carries an
/// `id` or a `status`: the repository assigns the former and the lane the
/// user acted on decides the latter.
///
/// # Examples
///
/// ```
/// use taskboard_protocol::{Priority, TaskDraft};
///
/// let draft = TaskDraft::new("Write spec")
///     .with_priority(Priority::High)
///     .with_tags(["urgent", "doc"]);
/// assert!(draft.validate().is_ok());
///
/// assert!(TaskDraft::new("   ").validate().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Short summary of the task.
    pub title: String,
    /// Free-form description.
    pub desc: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Task priority.
    pub priority: Priority,
    /// Tags in user-entered order.
    pub tags: Vec<String>,
}

impl TaskDraft {
    /// Creates a draft with the given title and default values elsewhere.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Checks that the title is not blank.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidTaskTitle`] if the title is empty
    /// after trimming.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ProtocolError::InvalidTaskTitle);
        }
        Ok(())
    }
}

/// A task on the board.
///
/// This is the record stored in the `tasks` slot. Field names on the wire
/// are `id`, `title`, `desc`, `dueDate`, `priority`, `tags`, and `status`.
///
/// # Examples
///
/// ```
/// use taskboard_protocol::{Lane, Task, TaskDraft, TaskId};
///
/// let task = Task::from_draft(TaskId::generate(), TaskDraft::new(" Fix bug "), Lane::Todo);
/// assert_eq!(task.title, "Fix bug");
/// assert_eq!(task.status, Lane::Todo);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for this task.
    pub id: TaskId,
    /// Short summary of the task.
    pub title: String,
    /// Free-form description, possibly empty.
    #[serde(default)]
    pub desc: String,
    /// Optional due date.
    #[serde(default, with = "due_date_format")]
    pub due_date: Option<NaiveDate>,
    /// Task priority.
    #[serde(default)]
    pub priority: Priority,
    /// Tags in user-entered order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// The lane this task sits in.
    pub status: Lane,
}

impl Task {
    /// Builds a task from a draft. The title is stored trimmed.
    #[must_use]
    pub fn from_draft(id: TaskId, draft: TaskDraft, status: Lane) -> Self {
        Self {
            id,
            title: draft.title.trim().to_string(),
            desc: draft.desc,
            due_date: draft.due_date,
            priority: draft.priority,
            tags: draft.tags,
            status,
        }
    }

    /// Replaces every editable field with the draft's values.
    ///
    /// `id` and `status` are left untouched.
    pub fn apply_draft(&mut self, draft: TaskDraft) {
        self.title = draft.title.trim().to_string();
        self.desc = draft.desc;
        self.due_date = draft.due_date;
        self.priority = draft.priority;
        self.tags = draft.tags;
    }

    /// Returns the editable fields of this task as a draft.
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            desc: self.desc.clone(),
            due_date: self.due_date,
            priority: self.priority,
            tags: self.tags.clone(),
        }
    }

    /// Returns `true` if the due date has passed and the task is not done.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use taskboard_protocol::{Lane, Task, TaskDraft, TaskId};
    ///
    /// let due = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    /// let task = Task::from_draft(TaskId::generate(), TaskDraft::new("x").with_due_date(due), Lane::Todo);
    /// assert!(task.is_overdue(today));
    /// ```
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != Lane::Done && self.due_date.is_some_and(|due| due < today)
    }

    /// Returns the full text rendered on this task's card.
    ///
    /// This is the text the search filter matches against.
    #[must_use]
    pub fn card_text(&self) -> String {
        let mut lines = vec![self.title.clone()];
        if !self.desc.is_empty() {
            lines.push(self.desc.clone());
        }
        let mut meta = String::new();
        if let Some(due) = self.due_date {
            meta.push_str(&format!("Due: {} ", due.format(DUE_DATE_FORMAT)));
        }
        meta.push_str(&format!("Priority: {}", self.priority.display_name()));
        lines.push(meta);
        if !self.tags.is_empty() {
            lines.push(self.tags.join(" "));
        }
        lines.join("\n")
    }

    /// Returns `true` if the card text contains `query`, ignoring case.
    ///
    /// An empty query matches every task.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        query.is_empty() || self.card_text().to_lowercase().contains(&query)
    }
}

/// Date format used for due dates on the wire and in the editor.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a due date as typed by a user or found in storage.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps. Blank input yields `None`.
#[must_use]
pub fn parse_due_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(input, DUE_DATE_FORMAT)
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Serde adapter for `dueDate`.
///
/// A missing date is written as `""`. On read, `""`, `null`, and values
/// that are not dates all become `None`.
mod due_date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{DUE_DATE_FORMAT, parse_due_date};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.collect_str(&date.format(DUE_DATE_FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_due_date))
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    impl Arbitrary for Lane {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            prop_oneof![Just(Lane::Todo), Just(Lane::Doing), Just(Lane::Done)].boxed()
        }
    }

    impl Arbitrary for Priority {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            prop_oneof![
                Just(Priority::Low),
                Just(Priority::Medium),
                Just(Priority::High),
            ]
            .boxed()
        }
    }

    prop_compose! {
        fn arb_task()(
            title in "[a-zA-Z][a-zA-Z0-9 ]{0,40}",
            desc in "[a-zA-Z0-9 .,!?]{0,120}",
            due in proptest::option::of(0i64..20_000),
            priority in any::<Priority>(),
            tags in proptest::collection::vec("[a-z]{1,8}", 0..4),
            status in any::<Lane>(),
        ) -> Task {
            let base = NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date");
            Task {
                id: TaskId::generate(),
                title,
                desc,
                due_date: due.map(|days| base + chrono::Duration::days(days)),
                priority,
                tags,
                status,
            }
        }
    }

    proptest! {
        /// A whole collection survives a serialize/deserialize round trip in order.
        #[test]
        fn collection_roundtrip(tasks in proptest::collection::vec(arb_task(), 0..8)) {
            let json = serde_json::to_string(&tasks).expect("serialize");
            let parsed: Vec<Task> = serde_json::from_str(&json).expect("deserialize");
            prop_assert_eq!(tasks, parsed);
        }

        /// Serialization is deterministic.
        #[test]
        fn task_serialization_is_deterministic(task in arb_task()) {
            let json1 = serde_json::to_string(&task).expect("serialize 1");
            let json2 = serde_json::to_string(&task).expect("serialize 2");
            prop_assert_eq!(json1, json2);
        }
    }
}
