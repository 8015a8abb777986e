//! The task editor.
//!
//! An [`EditorSession`] is a modal form over the editable fields of one
//! task. It is opened either to create a task in a lane or to edit an
//! existing one, and it touches the repository only when saved.

use taskboard_protocol::{
    DUE_DATE_FORMAT, Lane, Priority, Task, TaskDraft, TaskId, join_tags, parse_due_date,
    parse_tags,
};
use taskboard_store::{Result, TaskRepository};
use tracing::{debug, warn};

/// What saving the editor will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    /// Create a new task in `lane`.
    Create {
        /// The lane the new task goes into.
        lane: Lane,
    },
    /// Update the task with id `target`.
    Edit {
        /// The task being edited.
        target: TaskId,
    },
}

/// A field of the editor form, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EditorField {
    /// The task title.
    #[default]
    Title,
    /// The description.
    Description,
    /// The due date, typed as `YYYY-MM-DD`.
    DueDate,
    /// The priority, cycled rather than typed.
    Priority,
    /// Comma-separated tags.
    Tags,
}

impl EditorField {
    /// Returns all fields in tab order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Title,
            Self::Description,
            Self::DueDate,
            Self::Priority,
            Self::Tags,
        ]
    }

    /// Returns the label shown next to the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::DueDate => "Due date",
            Self::Priority => "Priority",
            Self::Tags => "Tags",
        }
    }

    /// Returns the next field, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::DueDate,
            Self::DueDate => Self::Priority,
            Self::Priority => Self::Tags,
            Self::Tags => Self::Title,
        }
    }

    /// Returns the previous field, wrapping around.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Title => Self::Tags,
            Self::Description => Self::Title,
            Self::DueDate => Self::Description,
            Self::Priority => Self::DueDate,
            Self::Tags => Self::Priority,
        }
    }

    /// Returns `true` for fields that hold free text.
    #[must_use]
    pub const fn is_text(self) -> bool {
        !matches!(self, Self::Priority)
    }
}

/// The raw contents of the editor fields.
///
/// Dates and tags are kept as typed and only parsed on save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    /// Title text.
    pub title: String,
    /// Description text.
    pub desc: String,
    /// Due date text.
    pub due_date: String,
    /// Selected priority.
    pub priority: Priority,
    /// Tags text, comma-separated.
    pub tags: String,
}

impl TaskForm {
    /// Fills the form from an existing task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            desc: task.desc.clone(),
            due_date: task
                .due_date
                .map(|d| d.format(DUE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            priority: task.priority,
            tags: join_tags(&task.tags),
        }
    }

    /// Converts the form to a draft.
    ///
    /// A due date that cannot be parsed is dropped rather than rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskboard_tui::editor::TaskForm;
    ///
    /// let form = TaskForm {
    ///     title: "Write spec".into(),
    ///     due_date: "2026-03-14".into(),
    ///     tags: "urgent, doc".into(),
    ///     ..TaskForm::default()
    /// };
    /// let draft = form.to_draft();
    /// assert_eq!(draft.tags, ["urgent", "doc"]);
    /// assert!(draft.due_date.is_some());
    /// ```
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        let due_date = parse_due_date(&self.due_date);
        if due_date.is_none() && !self.due_date.trim().is_empty() {
            warn!(input = %self.due_date, "ignoring unparseable due date");
        }
        TaskDraft {
            title: self.title.clone(),
            desc: self.desc.clone(),
            due_date,
            priority: self.priority,
            tags: parse_tags(&self.tags),
        }
    }

    fn text_mut(&mut self, field: EditorField) -> Option<&mut String> {
        match field {
            EditorField::Title => Some(&mut self.title),
            EditorField::Description => Some(&mut self.desc),
            EditorField::DueDate => Some(&mut self.due_date),
            EditorField::Tags => Some(&mut self.tags),
            EditorField::Priority => None,
        }
    }
}

/// The result of saving an editor session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The task was created or updated.
    Saved(Task),
    /// The form was refused by validation; the editor should stay open.
    Rejected,
}

/// An open editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    mode: EditorMode,
    form: TaskForm,
    focus: EditorField,
}

impl EditorSession {
    /// Opens an empty editor that creates a task in `lane`.
    #[must_use]
    pub fn create(lane: Lane) -> Self {
        Self {
            mode: EditorMode::Create { lane },
            form: TaskForm::default(),
            focus: EditorField::Title,
        }
    }

    /// Opens an editor prefilled with an existing task.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: EditorMode::Edit {
                target: task.id.clone(),
            },
            form: TaskForm::from_task(task),
            focus: EditorField::Title,
        }
    }

    /// Returns what saving will do.
    #[must_use]
    pub const fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// Returns the field contents.
    #[must_use]
    pub const fn form(&self) -> &TaskForm {
        &self.form
    }

    /// Returns the focused field.
    #[must_use]
    pub const fn focus(&self) -> EditorField {
        self.focus
    }

    /// Returns the modal title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.mode {
            EditorMode::Create { .. } => "New Task",
            EditorMode::Edit { .. } => "Edit Task",
        }
    }

    /// Moves focus to the next field.
    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    /// Moves focus to the previous field.
    pub fn prev_field(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Types a character into the focused field.
    ///
    /// On the priority field a space cycles forward and other characters
    /// are ignored. Control characters are ignored everywhere.
    pub fn input(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        match self.form.text_mut(self.focus) {
            Some(text) => text.push(ch),
            None if ch == ' ' => self.cycle(1),
            None => {}
        }
    }

    /// Deletes the last character of the focused text field.
    pub fn backspace(&mut self) {
        if let Some(text) = self.form.text_mut(self.focus) {
            text.pop();
        }
    }

    /// Cycles the focused choice field. Text fields ignore this.
    pub fn cycle(&mut self, delta: i32) {
        if self.focus != EditorField::Priority || delta == 0 {
            return;
        }
        self.form.priority = if delta > 0 {
            self.form.priority.next()
        } else {
            self.form.priority.previous()
        };
    }

    /// Writes the form to the repository.
    ///
    /// A blank title yields [`SaveOutcome::Rejected`] and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the edited task no longer exists or the write
    /// fails.
    pub fn save(&self, repo: &mut TaskRepository) -> Result<SaveOutcome> {
        let draft = self.form.to_draft();
        if draft.validate().is_err() {
            debug!("editor save rejected: blank title");
            return Ok(SaveOutcome::Rejected);
        }

        let task = match &self.mode {
            EditorMode::Create { lane } => repo.create(draft, *lane)?,
            EditorMode::Edit { target } => repo.update(target, draft)?,
        };
        Ok(SaveOutcome::Saved(task))
    }
}
