//! Drag-and-drop of cards between lanes.
//!
//! A drag starts when a card is picked up, by pointer or by keyboard. While
//! it lasts, [`DragDrop`] remembers the carried task and the lane currently
//! hovered. Dropping over a lane moves the task there through the
//! repository; dropping anywhere else leaves everything as it was.

use taskboard_protocol::{Lane, TaskId};
use taskboard_store::{Result, TaskRepository};
use tracing::debug;

/// The drag gesture in progress, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No card is being carried.
    #[default]
    Idle,
    /// A card is being carried.
    Dragging {
        /// The carried task.
        carrier: TaskId,
        /// The lane under the carried card, if any.
        over: Option<Lane>,
    },
}

/// What a drop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The task now sits in `lane`.
    Moved {
        /// The dropped task.
        id: TaskId,
        /// The lane it was dropped on.
        lane: Lane,
    },
    /// Nothing was carried, the drop target was not a lane, or the carried
    /// task no longer exists.
    Ignored,
}

/// Tracks one drag gesture at a time.
///
/// # Examples
///
/// ```
/// use taskboard_protocol::{Lane, TaskDraft};
/// use taskboard_store::{MemoryStorage, TaskRepository};
/// use taskboard_tui::drag::{DragDrop, DropOutcome};
///
/// let mut repo = TaskRepository::load(Box::new(MemoryStorage::new()));
/// let task = repo.create(TaskDraft::new("Ship it"), Lane::Todo).unwrap();
///
/// let mut drag = DragDrop::default();
/// drag.start(task.id.clone());
/// drag.drag_over(Some(Lane::Done));
///
/// let outcome = drag.drop(Some(Lane::Done), &mut repo).unwrap();
/// assert_eq!(outcome, DropOutcome::Moved { id: task.id.clone(), lane: Lane::Done });
/// assert_eq!(repo.get(&task.id).unwrap().status, Lane::Done);
/// assert!(!drag.is_dragging());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragDrop {
    state: DragState,
}

impl DragDrop {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up a card, replacing any card already carried.
    pub fn start(&mut self, id: TaskId) {
        debug!(%id, "drag started");
        self.state = DragState::Dragging {
            carrier: id,
            over: None,
        };
    }

    /// Records the lane under the carried card.
    ///
    /// Every lane accepts every card, so hovering never fails. Without a
    /// drag in progress this does nothing.
    pub fn drag_over(&mut self, lane: Option<Lane>) {
        if let DragState::Dragging { over, .. } = &mut self.state {
            *over = lane;
        }
    }

    /// Drops the carried card on `target`.
    ///
    /// The gesture ends whatever happens. Dropping on a lane moves the task
    /// there; the same lane keeps its position, another lane appends it at
    /// the bottom. A drop with no carried card, no target, or a carried
    /// task that has since been deleted is [`DropOutcome::Ignored`].
    ///
    /// # Errors
    ///
    /// Returns an error if the move cannot be written. The repository is
    /// unchanged in that case.
    pub fn drop(&mut self, target: Option<Lane>, repo: &mut TaskRepository) -> Result<DropOutcome> {
        let DragState::Dragging { carrier, .. } = std::mem::take(&mut self.state) else {
            return Ok(DropOutcome::Ignored);
        };
        let Some(lane) = target else {
            debug!(%carrier, "dropped outside any lane");
            return Ok(DropOutcome::Ignored);
        };

        match repo.move_task(&carrier, lane) {
            Ok(()) => Ok(DropOutcome::Moved { id: carrier, lane }),
            Err(e) if e.is_not_found() => {
                debug!(%carrier, "carried task vanished before drop");
                Ok(DropOutcome::Ignored)
            }
            Err(e) => Err(e),
        }
    }

    /// Abandons the gesture without moving anything.
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            debug!("drag cancelled");
        }
        self.state = DragState::Idle;
    }

    /// Returns the current gesture.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns the carried task, if any.
    #[must_use]
    pub const fn carrier(&self) -> Option<&TaskId> {
        match &self.state {
            DragState::Dragging { carrier, .. } => Some(carrier),
            DragState::Idle => None,
        }
    }

    /// Returns the hovered lane while dragging.
    #[must_use]
    pub const fn hovered(&self) -> Option<Lane> {
        match &self.state {
            DragState::Dragging { over, .. } => *over,
            DragState::Idle => None,
        }
    }

    /// Returns `true` while a card is carried.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }
}
