//! Application state management.
//!
//! [`AppState`] owns the task repository, the display preferences, the
//! pomodoro timer, and everything the user is in the middle of: the
//! selection, a drag, an open editor, or a search. Every repository call
//! made on behalf of the user goes through here, and every failure ends up
//! as a status-bar message rather than an error.

use ratatui::layout::Rect;
use taskboard_protocol::{Lane, Task, TaskId};
use taskboard_store::{PreferenceStore, StoreError, TaskRepository};
use tracing::{debug, info, warn};

use crate::board_view::{BoardView, CardSlot};
use crate::drag::{DragDrop, DropOutcome};
use crate::editor::{EditorSession, SaveOutcome};
use crate::layout::lane_at;
use crate::pomodoro::Pomodoro;
use crate::theme::Palette;

/// The current focus area in the UI.
///
/// Determines which key bindings apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Focus is on the board lanes.
    #[default]
    Board,
    /// The task editor is open.
    Editor,
    /// The search field is taking input.
    Search,
}

/// The application state.
#[derive(Debug)]
pub struct AppState {
    /// The task collection.
    pub repo: TaskRepository,
    /// Theme and accent.
    pub prefs: PreferenceStore,
    /// The pomodoro timer.
    pub pomodoro: Pomodoro,
    /// The drag gesture in progress.
    pub drag: DragDrop,
    /// The open editor, if any.
    pub editor: Option<EditorSession>,
    /// Current focus area.
    pub focus: Focus,
    /// The lane with keyboard focus.
    pub selected_lane: Lane,
    /// The selected task, if any. Always a visible card in `selected_lane`.
    pub selected: Option<TaskId>,
    /// The search filter; empty shows every card.
    pub search_query: String,
    /// Message for the status bar.
    pub status: Option<String>,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// The card under a pointer press that has not been released yet.
    pub pressed: Option<TaskId>,
}

impl AppState {
    /// Creates the state with focus on the first lane and nothing selected.
    #[must_use]
    pub fn new(repo: TaskRepository, prefs: PreferenceStore, pomodoro: Pomodoro) -> Self {
        Self {
            repo,
            prefs,
            pomodoro,
            drag: DragDrop::new(),
            editor: None,
            focus: Focus::Board,
            selected_lane: Lane::Todo,
            selected: None,
            search_query: String::new(),
            status: None,
            help_visible: false,
            pressed: None,
        }
    }

    /// Projects the collection through the current search filter.
    #[must_use]
    pub fn board_view(&self) -> BoardView {
        BoardView::project(self.repo.tasks(), &self.search_query)
    }

    /// Returns the colors for the current theme and accent.
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette::new(self.prefs.theme(), self.prefs.accent())
    }

    /// Returns where the selected card is shown.
    #[must_use]
    pub fn selected_slot(&self, view: &BoardView) -> Option<CardSlot> {
        self.selected.as_ref().and_then(|id| view.slot(id))
    }

    /// Returns the selected task, if any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.selected.as_ref().and_then(|id| self.repo.get(id))
    }

    /// Sets the status-bar message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    fn report(&mut self, action: &str, error: &StoreError) {
        warn!(%error, action, "operation failed");
        self.set_status(format!("Could not {action}: {error}"));
    }

    // --- Help ---

    /// Toggles the help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        std::mem::take(&mut self.help_visible)
    }

    // --- Selection ---

    /// Selects a card and focuses its lane.
    pub fn select(&mut self, id: TaskId, lane: Lane) {
        self.selected_lane = lane;
        self.selected = Some(id);
    }

    /// Clears the current task selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Drops the selection if the selected card is no longer visible in the
    /// focused lane.
    pub fn reconcile_selection(&mut self) {
        let view = self.board_view();
        if self
            .selected_slot(&view)
            .is_none_or(|slot| slot.lane != self.selected_lane)
        {
            self.selected = None;
        }
    }

    /// Moves the lane focus to the left, wrapping around.
    pub fn navigate_left(&mut self) {
        self.focus_lane(self.selected_lane.previous_wrapping());
    }

    /// Moves the lane focus to the right, wrapping around.
    pub fn navigate_right(&mut self) {
        self.focus_lane(self.selected_lane.next_wrapping());
    }

    /// Moves the selection up within the focused lane, wrapping to the
    /// bottom.
    pub fn navigate_up(&mut self) {
        let view = self.board_view();
        let cards = view.lane(self.selected_lane);
        let index = match self.selected_slot(&view) {
            Some(slot) if slot.index > 0 => slot.index - 1,
            Some(_) => cards.len().saturating_sub(1),
            None => 0,
        };
        self.selected = cards.get(index).cloned();
    }

    /// Moves the selection down within the focused lane, wrapping to the
    /// top.
    pub fn navigate_down(&mut self) {
        let view = self.board_view();
        let cards = view.lane(self.selected_lane);
        let index = match self.selected_slot(&view) {
            Some(slot) if slot.index + 1 < cards.len() => slot.index + 1,
            _ => 0,
        };
        self.selected = cards.get(index).cloned();
    }

    /// Focuses `lane`, keeping the selected row where possible.
    fn focus_lane(&mut self, lane: Lane) {
        let view = self.board_view();
        let row = self.selected_slot(&view).map(|slot| slot.index);
        let cards = view.lane(lane);
        self.selected_lane = lane;
        self.selected = row
            .filter(|_| !cards.is_empty())
            .map(|row| row.min(cards.len() - 1))
            .and_then(|row| cards.get(row).cloned());
    }

    // --- Search ---

    /// Gives the search field input focus.
    pub fn open_search(&mut self) {
        self.focus = Focus::Search;
    }

    /// Appends a character to the filter.
    pub fn search_input(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.search_query.push(ch);
        self.reconcile_selection();
    }

    /// Removes the last character of the filter.
    pub fn search_backspace(&mut self) {
        self.search_query.pop();
        self.reconcile_selection();
    }

    /// Returns focus to the board, keeping the filter.
    pub fn confirm_search(&mut self) {
        self.focus = Focus::Board;
    }

    /// Returns focus to the board and removes the filter.
    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.focus = Focus::Board;
    }

    // --- Editor ---

    /// Opens the editor to create a task in the focused lane.
    pub fn open_new_task(&mut self) {
        self.editor = Some(EditorSession::create(self.selected_lane));
        self.focus = Focus::Editor;
    }

    /// Opens the editor on the selected task.
    ///
    /// Returns `false` if nothing is selected.
    pub fn open_selected_task(&mut self) -> bool {
        let Some(session) = self.selected_task().map(EditorSession::edit) else {
            return false;
        };
        self.editor = Some(session);
        self.focus = Focus::Editor;
        true
    }

    /// Closes the editor without saving.
    pub fn close_editor(&mut self) {
        self.editor = None;
        self.focus = Focus::Board;
    }

    /// Applies `f` to the open editor, if any.
    pub fn with_editor(&mut self, f: impl FnOnce(&mut EditorSession)) {
        if let Some(editor) = self.editor.as_mut() {
            f(editor);
        }
    }

    /// Saves the open editor.
    ///
    /// On success the editor closes and the saved card is selected. A blank
    /// title or a failed write keeps the editor open. If the edited task was
    /// deleted in the meantime the editor simply closes.
    pub fn save_editor(&mut self) {
        let Some(session) = self.editor.as_ref() else {
            return;
        };

        match session.save(&mut self.repo) {
            Ok(SaveOutcome::Saved(task)) => {
                self.close_editor();
                self.set_status(format!("Saved '{}'", task.title));
                self.select(task.id, task.status);
                self.reconcile_selection();
            }
            Ok(SaveOutcome::Rejected) => self.set_status("Title is required"),
            Err(e) if e.is_not_found() => {
                debug!("edited task no longer exists");
                self.close_editor();
            }
            Err(e) => self.report("save task", &e),
        }
    }

    // --- Deletion ---

    /// Deletes the selected task and selects its neighbour.
    pub fn delete_selected(&mut self) {
        let view = self.board_view();
        let Some(slot) = self.selected_slot(&view) else {
            return;
        };
        let Some(id) = self.selected.clone() else {
            return;
        };
        let title = self
            .repo
            .get(&id)
            .map(|t| t.title.clone())
            .unwrap_or_default();

        match self.repo.delete(&id) {
            Ok(()) => {
                self.set_status(format!("Deleted '{title}'"));
                if self.drag.carrier() == Some(&id) {
                    self.drag.cancel();
                }
                let view = self.board_view();
                let cards = view.lane(slot.lane);
                self.selected = cards
                    .get(slot.index.min(cards.len().saturating_sub(1)))
                    .cloned();
            }
            Err(e) if e.is_not_found() => {
                debug!(%id, "selected task already gone");
                self.selected = None;
            }
            Err(e) => self.report("delete task", &e),
        }
    }

    // --- Drag and drop ---

    /// Picks up the selected card, or drops the carried one on the hovered
    /// lane.
    pub fn pick_up_or_drop(&mut self) {
        if self.drag.is_dragging() {
            self.drop_carried(self.drag.hovered());
            return;
        }
        let Some(id) = self.selected.clone() else {
            return;
        };
        self.drag.start(id);
        self.drag.drag_over(Some(self.selected_lane));
        self.set_status("Moving card: ←/→ choose a lane, m or Enter to drop, Esc to cancel");
    }

    /// Moves the hovered lane of a keyboard drag one step.
    pub fn hover_step(&mut self, forward: bool) {
        let current = self.drag.hovered().unwrap_or(self.selected_lane);
        let next = if forward {
            current.next_wrapping()
        } else {
            current.previous_wrapping()
        };
        self.drag.drag_over(Some(next));
    }

    /// Abandons the drag in progress.
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
        self.pressed = None;
        self.set_status("Move cancelled");
    }

    /// Drops the carried card on `target` and selects it where it landed.
    pub fn drop_carried(&mut self, target: Option<Lane>) {
        match self.drag.drop(target, &mut self.repo) {
            Ok(DropOutcome::Moved { id, lane }) => {
                self.set_status(format!("Moved to {}", lane.display_name()));
                self.select(id, lane);
                self.reconcile_selection();
            }
            Ok(DropOutcome::Ignored) => debug!("drop ignored"),
            Err(e) => self.report("move task", &e),
        }
    }

    // --- Pointer ---

    /// Handles a primary-button press at a cell of the board.
    ///
    /// A press on a card selects it and arms a drag; a press elsewhere in a
    /// lane focuses that lane.
    pub fn pointer_down(&mut self, board: Rect, column: u16, row: u16) {
        let view = self.board_view();
        let selected = self.selected_slot(&view);
        match view.card_at(board, column, row, selected) {
            Some(slot) => {
                let id = view.card(slot).cloned();
                self.pressed = id.clone();
                if let Some(id) = id {
                    self.select(id, slot.lane);
                }
            }
            None => {
                self.pressed = None;
                if let Some(lane) = lane_at(board, column, row) {
                    self.selected_lane = lane;
                    self.selected = None;
                }
            }
        }
    }

    /// Handles pointer motion with the primary button held.
    ///
    /// The first motion after pressing a card starts dragging it.
    pub fn pointer_drag(&mut self, board: Rect, column: u16, row: u16) {
        if !self.drag.is_dragging() {
            let Some(id) = self.pressed.clone() else {
                return;
            };
            self.drag.start(id);
        }
        self.drag.drag_over(lane_at(board, column, row));
    }

    /// Handles a primary-button release. Releasing while dragging drops.
    pub fn pointer_up(&mut self, board: Rect, column: u16, row: u16) {
        self.pressed = None;
        if self.drag.is_dragging() {
            self.drop_carried(lane_at(board, column, row));
        }
    }

    // --- Preferences ---

    /// Switches between the light and dark theme.
    pub fn toggle_theme(&mut self) {
        match self.prefs.toggle_theme() {
            Ok(theme) => self.set_status(format!("Theme: {theme}")),
            Err(e) => self.report("save theme", &e),
        }
    }

    /// Switches to the next accent color.
    pub fn cycle_accent(&mut self) {
        match self.prefs.cycle_accent() {
            Ok(accent) => self.set_status(format!("Accent: {accent}")),
            Err(e) => self.report("save accent", &e),
        }
    }

    // --- Pomodoro ---

    /// Applies a pomodoro tick and announces a finished phase.
    pub fn pomodoro_tick(&mut self, generation: u64) {
        if let Some(done) = self.pomodoro.tick(generation) {
            info!(finished = ?done.finished, "pomodoro phase complete");
            self.set_status(done.message());
        }
    }
}

#[cfg(test)]
mod tests {
    use taskboard_config::PomodoroConfig;
    use taskboard_protocol::TaskDraft;
    use taskboard_store::{MemoryStorage, Storage, TASKS_SLOT, Theme};
    use tokio::sync::mpsc;

    use super::*;
    use crate::editor::EditorField;
    use crate::layout::TASK_CARD_HEIGHT;

    fn state_with(tasks: &[(&str, Lane)]) -> AppState {
        let mut repo = TaskRepository::load(Box::new(MemoryStorage::new()));
        for (title, lane) in tasks {
            repo.create(TaskDraft::new(*title), *lane).unwrap();
        }
        let prefs = PreferenceStore::load(Box::new(MemoryStorage::new()));
        let (tx, _rx) = mpsc::unbounded_channel();
        let pomodoro = Pomodoro::new(&PomodoroConfig::default(), tx);
        AppState::new(repo, prefs, pomodoro)
    }

    fn selected_title(state: &AppState) -> Option<String> {
        state.selected_task().map(|t| t.title.clone())
    }

    fn titles_in(state: &AppState, lane: Lane) -> Vec<String> {
        state.repo.tasks_in(lane).map(|t| t.title.clone()).collect()
    }

    const BOARD: Rect = Rect::new(0, 0, 90, 20);

    #[test]
    fn new_state_has_correct_defaults() {
        let state = state_with(&[]);

        assert_eq!(state.focus, Focus::Board);
        assert_eq!(state.selected_lane, Lane::Todo);
        assert_eq!(state.selected, None);
        assert!(state.editor.is_none());
        assert!(!state.help_visible);
        assert!(!state.drag.is_dragging());
    }

    #[test]
    fn navigate_left_and_right_wrap_around() {
        let mut state = state_with(&[]);

        state.navigate_left();
        assert_eq!(state.selected_lane, Lane::Done);

        state.navigate_right();
        assert_eq!(state.selected_lane, Lane::Todo);
    }

    #[test]
    fn navigate_up_down_in_empty_lane() {
        let mut state = state_with(&[]);

        state.navigate_up();
        assert_eq!(state.selected, None);

        state.navigate_down();
        assert_eq!(state.selected, None);
    }

    #[test]
    fn navigate_up_down_with_tasks() {
        let mut state = state_with(&[
            ("Task 1", Lane::Todo),
            ("Task 2", Lane::Todo),
            ("Task 3", Lane::Todo),
        ]);

        state.navigate_down();
        assert_eq!(selected_title(&state).as_deref(), Some("Task 1"));

        state.navigate_down();
        state.navigate_down();
        assert_eq!(selected_title(&state).as_deref(), Some("Task 3"));

        // Wrap around
        state.navigate_down();
        assert_eq!(selected_title(&state).as_deref(), Some("Task 1"));

        state.navigate_up();
        assert_eq!(selected_title(&state).as_deref(), Some("Task 3"));
    }

    #[test]
    fn lane_change_keeps_row_clamped() {
        let mut state = state_with(&[
            ("A", Lane::Todo),
            ("B", Lane::Todo),
            ("C", Lane::Doing),
        ]);
        state.navigate_down();
        state.navigate_down();
        assert_eq!(selected_title(&state).as_deref(), Some("B"));

        state.navigate_right();
        assert_eq!(selected_title(&state).as_deref(), Some("C"));

        state.navigate_right();
        assert_eq!(state.selected_lane, Lane::Done);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn help_toggles_and_dismisses() {
        let mut state = state_with(&[]);

        state.toggle_help();
        assert!(state.help_visible);
        assert!(state.dismiss_help());
        assert!(!state.help_visible);
        assert!(!state.dismiss_help());
    }

    #[test]
    fn search_hides_cards_and_drops_hidden_selection() {
        let mut state = state_with(&[("Write docs", Lane::Todo), ("Fix bug", Lane::Todo)]);
        state.navigate_down();
        assert_eq!(selected_title(&state).as_deref(), Some("Write docs"));

        state.open_search();
        for ch in "BUG".chars() {
            state.search_input(ch);
        }

        let view = state.board_view();
        assert_eq!(view.lane(Lane::Todo).len(), 1);
        assert_eq!(state.selected, None);
        assert_eq!(state.repo.len(), 2);

        state.confirm_search();
        assert_eq!(state.focus, Focus::Board);
        assert_eq!(state.search_query, "BUG");

        state.clear_search();
        assert_eq!(state.board_view().visible_count(), 2);
    }

    #[test]
    fn editor_creates_in_focused_lane() {
        let mut state = state_with(&[]);
        state.navigate_right();
        state.open_new_task();
        assert_eq!(state.focus, Focus::Editor);

        state.with_editor(|e| "New card".chars().for_each(|ch| e.input(ch)));
        state.save_editor();

        assert!(state.editor.is_none());
        assert_eq!(state.focus, Focus::Board);
        assert_eq!(titles_in(&state, Lane::Doing), ["New card"]);
        assert_eq!(selected_title(&state).as_deref(), Some("New card"));
    }

    #[test]
    fn editor_stays_open_on_blank_title() {
        let mut state = state_with(&[]);
        state.open_new_task();
        state.save_editor();

        assert!(state.editor.is_some());
        assert_eq!(state.status.as_deref(), Some("Title is required"));
        assert!(state.repo.is_empty());
    }

    #[test]
    fn edit_requires_selection() {
        let mut state = state_with(&[("A", Lane::Todo)]);
        assert!(!state.open_selected_task());

        state.navigate_down();
        assert!(state.open_selected_task());
        assert_eq!(
            state.editor.as_ref().map(EditorSession::focus),
            Some(EditorField::Title)
        );
    }

    #[test]
    fn delete_selects_neighbour() {
        let mut state = state_with(&[("A", Lane::Todo), ("B", Lane::Todo), ("C", Lane::Todo)]);
        state.navigate_down();
        state.navigate_down();

        state.delete_selected();

        assert_eq!(titles_in(&state, Lane::Todo), ["A", "C"]);
        assert_eq!(selected_title(&state).as_deref(), Some("C"));

        state.delete_selected();
        state.delete_selected();
        assert!(state.repo.is_empty());
        assert_eq!(state.selected, None);
    }

    #[test]
    fn keyboard_drag_moves_to_hovered_lane() {
        let mut state = state_with(&[("A", Lane::Todo), ("B", Lane::Doing)]);
        state.navigate_down();

        state.pick_up_or_drop();
        assert!(state.drag.is_dragging());
        assert_eq!(state.drag.hovered(), Some(Lane::Todo));

        state.hover_step(true);
        state.pick_up_or_drop();

        assert!(!state.drag.is_dragging());
        assert_eq!(titles_in(&state, Lane::Doing), ["B", "A"]);
        assert_eq!(state.selected_lane, Lane::Doing);
        assert_eq!(selected_title(&state).as_deref(), Some("A"));
    }

    #[test]
    fn cancelled_drag_changes_nothing() {
        let mut state = state_with(&[("A", Lane::Todo)]);
        state.navigate_down();
        state.pick_up_or_drop();
        state.hover_step(false);
        state.cancel_drag();

        assert_eq!(titles_in(&state, Lane::Todo), ["A"]);
        assert!(!state.drag.is_dragging());
    }

    #[test]
    fn pointer_drag_moves_card_across_lanes() {
        let mut state = state_with(&[("A", Lane::Todo)]);

        state.pointer_down(BOARD, 5, 1);
        assert_eq!(selected_title(&state).as_deref(), Some("A"));

        state.pointer_drag(BOARD, 40, 5);
        assert_eq!(state.drag.hovered(), Some(Lane::Doing));

        state.pointer_drag(BOARD, 70, 5);
        state.pointer_up(BOARD, 70, 5);

        assert_eq!(titles_in(&state, Lane::Done), ["A"]);
        assert_eq!(state.selected_lane, Lane::Done);
        assert!(state.pressed.is_none());
    }

    #[test]
    fn pointer_release_outside_board_cancels() {
        let mut state = state_with(&[("A", Lane::Todo)]);

        state.pointer_down(BOARD, 5, 1);
        state.pointer_drag(BOARD, 40, 5);
        state.pointer_up(BOARD, 40, 50);

        assert_eq!(titles_in(&state, Lane::Todo), ["A"]);
        assert!(!state.drag.is_dragging());
    }

    #[test]
    fn click_without_motion_only_selects() {
        let mut state = state_with(&[("A", Lane::Todo), ("B", Lane::Todo)]);

        state.pointer_down(BOARD, 5, 1 + TASK_CARD_HEIGHT);
        state.pointer_up(BOARD, 5, 1 + TASK_CARD_HEIGHT);

        assert_eq!(selected_title(&state).as_deref(), Some("B"));
        assert_eq!(titles_in(&state, Lane::Todo), ["A", "B"]);
    }

    #[test]
    fn press_on_rightmost_card_column_arms_drag() {
        let mut state = state_with(&[("A", Lane::Todo)]);

        // The To Do lane spans columns 0..30 and draws no right border.
        state.pointer_down(BOARD, 29, 2);

        assert_eq!(selected_title(&state).as_deref(), Some("A"));
        assert!(state.pressed.is_some());
    }

    #[test]
    fn click_on_empty_lane_focuses_it() {
        let mut state = state_with(&[("A", Lane::Todo)]);
        state.navigate_down();

        state.pointer_down(BOARD, 70, 10);

        assert_eq!(state.selected_lane, Lane::Done);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let mut state = state_with(&[("A", Lane::Todo)]);
        state.pointer_drag(BOARD, 40, 5);
        assert!(!state.drag.is_dragging());
    }

    #[test]
    fn theme_toggle_reports_status() {
        let mut state = state_with(&[]);
        state.toggle_theme();

        assert_eq!(state.prefs.theme(), Theme::Dark);
        assert_eq!(state.status.as_deref(), Some("Theme: dark"));
    }

    #[test]
    fn failed_write_becomes_status_message() {
        #[derive(Debug)]
        struct Frozen(MemoryStorage);

        impl Storage for Frozen {
            fn get(&self, key: &str) -> taskboard_store::Result<Option<String>> {
                self.0.get(key)
            }

            fn set(&mut self, key: &str, _value: &str) -> taskboard_store::Result<()> {
                Err(StoreError::WriteSlot {
                    key: key.to_string(),
                    source: std::io::Error::other("disk full"),
                })
            }

            fn remove(&mut self, _key: &str) -> taskboard_store::Result<()> {
                Ok(())
            }
        }

        let storage = MemoryStorage::new().with_slot(
            TASKS_SLOT,
            r#"[{"id":"a","title":"A","status":"todo"}]"#,
        );
        let mut state = state_with(&[]);
        state.repo = TaskRepository::load(Box::new(Frozen(storage)));
        state.navigate_down();

        state.delete_selected();

        assert_eq!(state.repo.len(), 1);
        let status = state.status.clone().unwrap_or_default();
        assert!(status.starts_with("Could not delete task"), "{status}");
        assert!(status.contains("disk full"), "{status}");
    }
}
