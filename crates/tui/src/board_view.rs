//! Projection of the task collection into lanes.
//!
//! A [`BoardView`] is derived from the repository on demand and never
//! stored across mutations. It keeps the visible cards of each lane in
//! collection order, together with a `TaskId → CardSlot` index used for
//! selection and pointer hit-testing.

use std::collections::HashMap;

use ratatui::layout::Rect;
use taskboard_protocol::{LANE_COUNT, Lane, Task, TaskId};

use crate::layout::{
    LanePosition, TASK_CARD_HEIGHT, lane_areas, lane_content, scroll_offset, visible_cards,
};

/// Where a card sits on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardSlot {
    /// The lane holding the card.
    pub lane: Lane,
    /// Position among the lane's visible cards.
    pub index: usize,
}

/// The visible cards of every lane.
///
/// # Examples
///
/// ```
/// use taskboard_protocol::{Lane, Task, TaskDraft, TaskId};
/// use taskboard_tui::board_view::BoardView;
///
/// let tasks = vec![
///     Task::from_draft(TaskId::from("a"), TaskDraft::new("Write docs"), Lane::Todo),
///     Task::from_draft(TaskId::from("b"), TaskDraft::new("Fix bug"), Lane::Todo),
/// ];
///
/// let view = BoardView::project(&tasks, "docs");
/// assert_eq!(view.lane(Lane::Todo), [TaskId::from("a")]);
/// assert_eq!(view.hidden_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    lanes: [Vec<TaskId>; LANE_COUNT],
    slots: HashMap<TaskId, CardSlot>,
    hidden: usize,
}

impl BoardView {
    /// Projects tasks into lanes, hiding cards that don't match `query`.
    ///
    /// Cards keep collection order within each lane. An empty query shows
    /// every card.
    #[must_use]
    pub fn project(tasks: &[Task], query: &str) -> Self {
        let mut view = Self::default();
        for task in tasks {
            if !task.matches_query(query) {
                view.hidden += 1;
                continue;
            }
            let lane = task.status;
            let cards = &mut view.lanes[lane.index()];
            view.slots.insert(
                task.id.clone(),
                CardSlot {
                    lane,
                    index: cards.len(),
                },
            );
            cards.push(task.id.clone());
        }
        view
    }

    /// Returns the visible card ids of a lane, top to bottom.
    #[must_use]
    pub fn lane(&self, lane: Lane) -> &[TaskId] {
        &self.lanes[lane.index()]
    }

    /// Returns the card id at a slot, if there is one.
    #[must_use]
    pub fn card(&self, slot: CardSlot) -> Option<&TaskId> {
        self.lane(slot.lane).get(slot.index)
    }

    /// Returns where a card is shown, or `None` if it is hidden or absent.
    #[must_use]
    pub fn slot(&self, id: &TaskId) -> Option<CardSlot> {
        self.slots.get(id).copied()
    }

    /// Returns the number of cards hidden by the filter.
    #[must_use]
    pub const fn hidden_count(&self) -> usize {
        self.hidden
    }

    /// Returns the number of visible cards.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.slots.len()
    }

    /// Resolves a screen cell to the card drawn there.
    ///
    /// `selected` is the currently selected card; its lane may be scrolled
    /// to keep it visible, and hit-testing follows the same offset as
    /// rendering.
    #[must_use]
    pub fn card_at(
        &self,
        board: Rect,
        column: u16,
        row: u16,
        selected: Option<CardSlot>,
    ) -> Option<CardSlot> {
        let position = (column, row).into();
        let (lane_index, lane_area) = lane_areas(board)
            .into_iter()
            .enumerate()
            .find(|(_, area)| area.contains(position))?;
        let lane = Lane::from_index(lane_index)?;

        let content = lane_content(lane_area, LanePosition::of(lane_index, LANE_COUNT));
        if !content.contains(position) {
            return None;
        }

        let total = self.lane(lane).len();
        let visible = visible_cards(content);
        let selected_index = selected.filter(|s| s.lane == lane).map(|s| s.index);
        let offset = scroll_offset(selected_index, total, visible);

        let row_in_lane = usize::from((row - content.y) / TASK_CARD_HEIGHT);
        if row_in_lane >= visible {
            return None;
        }

        let index = offset + row_in_lane;
        (index < total).then_some(CardSlot { lane, index })
    }
}
