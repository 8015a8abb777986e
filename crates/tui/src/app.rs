//! Main application struct and run loop.
//!
//! This module provides the `App` struct which orchestrates the TUI
//! application lifecycle including event handling, state updates, and rendering.

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Paragraph, Wrap},
};
use taskboard_config::PomodoroConfig;
use taskboard_protocol::Message;
use taskboard_store::{PreferenceStore, TaskRepository};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::debug;

use crate::{
    AppState, Focus,
    event::{event_to_message, poll_event},
    layout::{MIN_HEIGHT, MIN_HEIGHT_WITH_HEADER, MIN_WIDTH, screen_areas},
    pomodoro::Pomodoro,
    terminal::AppTerminal,
    widgets::{
        BoardContext, HintMode, SearchLine, render_board, render_editor, render_header,
        render_help_overlay, render_status_bar,
    },
};

/// The main application struct.
///
/// Manages the application state and provides the main event loop.
#[derive(Debug)]
pub struct App {
    state: AppState,
    should_quit: bool,
    /// Last known terminal area, used for pointer hit-testing.
    last_area: Rect,
    /// Whether the header was shown in the last render (affects hit-testing).
    header_visible: bool,
    /// Pomodoro ticks, fed back into [`App::update`] by the run loop.
    tick_rx: UnboundedReceiver<Message>,
}

impl App {
    /// Creates a new application over a loaded repository and preferences.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskboard_config::PomodoroConfig;
    /// use taskboard_store::{MemoryStorage, PreferenceStore, TaskRepository};
    /// use taskboard_tui::App;
    ///
    /// let repo = TaskRepository::load(Box::new(MemoryStorage::new()));
    /// let prefs = PreferenceStore::load(Box::new(MemoryStorage::new()));
    /// let app = App::new(repo, prefs, &PomodoroConfig::default());
    /// assert!(app.state().repo.is_empty());
    /// ```
    #[must_use]
    pub fn new(repo: TaskRepository, prefs: PreferenceStore, pomodoro: &PomodoroConfig) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(repo, prefs, Pomodoro::new(pomodoro, tick_tx)),
            should_quit: false,
            last_area: Rect::default(),
            header_visible: true,
            tick_rx,
        }
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns whether the application has been asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Updates the application state based on a message.
    ///
    /// `Quit` always ends the app. When the help overlay is visible, keys
    /// dismiss the help instead of their normal action and pointer input is
    /// dropped. Timer ticks keep arriving underneath it.
    pub fn update(&mut self, msg: Message) {
        if let Message::PomodoroTick { generation } = msg {
            self.state.pomodoro_tick(generation);
            return;
        }

        if msg.is_terminating() {
            self.should_quit = true;
            return;
        }

        if self.state.help_visible {
            match msg {
                Message::ToggleHelp | Message::Escape => {
                    self.state.toggle_help();
                }
                // The board under the overlay takes no pointer input.
                ref pointer if pointer.is_pointer() => {}
                // Any other key dismisses help
                _ => {
                    let _ = self.state.dismiss_help();
                }
            }
            return;
        }

        match self.state.focus {
            Focus::Editor => self.update_editor(msg),
            Focus::Search => self.update_search(msg),
            Focus::Board if self.state.drag.is_dragging() => self.update_dragging(msg),
            Focus::Board => self.update_board(msg),
        }
    }

    fn update_board(&mut self, msg: Message) {
        match msg {
            Message::Escape => {
                self.state.clear_selection();
            }
            Message::NavigateLeft => self.state.navigate_left(),
            Message::NavigateRight => self.state.navigate_right(),
            Message::NavigateUp => self.state.navigate_up(),
            Message::NavigateDown => self.state.navigate_down(),
            Message::EditSelected => {
                // Nothing to edit without a selection.
                let _ = self.state.open_selected_task();
            }
            Message::NewTask => self.state.open_new_task(),
            Message::DeleteSelected => self.state.delete_selected(),
            Message::PickUpOrDrop => self.state.pick_up_or_drop(),
            Message::OpenSearch => self.state.open_search(),
            Message::PointerDown { column, row } => {
                let board = self.board_area();
                self.state.pointer_down(board, column, row);
            }
            Message::PointerDrag { column, row } => {
                let board = self.board_area();
                self.state.pointer_drag(board, column, row);
            }
            Message::PointerUp { column, row } => {
                let board = self.board_area();
                self.state.pointer_up(board, column, row);
            }
            other => self.update_common(other),
        }
    }

    /// Handles messages while a card is being carried.
    fn update_dragging(&mut self, msg: Message) {
        match msg {
            Message::Escape => self.state.cancel_drag(),
            Message::NavigateLeft => self.state.hover_step(false),
            Message::NavigateRight => self.state.hover_step(true),
            Message::EditSelected | Message::PickUpOrDrop => self.state.pick_up_or_drop(),
            Message::PointerDrag { column, row } => {
                let board = self.board_area();
                self.state.pointer_drag(board, column, row);
            }
            Message::PointerUp { column, row } => {
                let board = self.board_area();
                self.state.pointer_up(board, column, row);
            }
            other => self.update_common(other),
        }
    }

    fn update_editor(&mut self, msg: Message) {
        match msg {
            Message::EditorInput { ch } => self.state.with_editor(|e| e.input(ch)),
            Message::EditorBackspace => self.state.with_editor(|e| e.backspace()),
            Message::EditorNextField => self.state.with_editor(|e| e.next_field()),
            Message::EditorPrevField => self.state.with_editor(|e| e.prev_field()),
            Message::EditorCycle { delta } => self.state.with_editor(|e| e.cycle(delta)),
            Message::EditorSave => self.state.save_editor(),
            Message::EditorCancel => self.state.close_editor(),
            _ => {}
        }
    }

    fn update_search(&mut self, msg: Message) {
        match msg {
            Message::SearchInput { ch } => self.state.search_input(ch),
            Message::SearchBackspace => self.state.search_backspace(),
            Message::SearchConfirm => self.state.confirm_search(),
            Message::SearchClear => self.state.clear_search(),
            _ => {}
        }
    }

    /// Board-level actions available whether or not a card is carried.
    fn update_common(&mut self, msg: Message) {
        match msg {
            Message::ToggleHelp => self.state.toggle_help(),
            Message::ToggleTheme => self.state.toggle_theme(),
            Message::CycleAccent => self.state.cycle_accent(),
            Message::PomodoroToggle => self.state.pomodoro.toggle(),
            Message::PomodoroReset => self.state.pomodoro.reset(),
            other => debug!(?other, "message ignored in this mode"),
        }
    }

    /// Returns where the lanes were drawn in the last render.
    fn board_area(&self) -> Rect {
        screen_areas(self.last_area, self.header_visible).board
    }

    /// Renders the application UI to the given frame.
    ///
    /// Implements graceful degradation for small terminal sizes:
    /// - If terminal is below minimum dimensions, shows a "terminal too small" message.
    /// - If terminal is tight (below `MIN_HEIGHT_WITH_HEADER`), hides the header to reclaim space.
    /// - Otherwise, renders normally with header.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.last_area = area;

        let palette = self.state.palette();
        frame.render_widget(
            Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
            area,
        );

        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            self.header_visible = false;
            self.render_terminal_too_small(frame, area);
            return;
        }

        let show_header = area.height >= MIN_HEIGHT_WITH_HEADER;
        self.header_visible = show_header;
        let areas = screen_areas(area, show_header);

        let state = &self.state;
        let view = state.board_view();
        let buf = frame.buffer_mut();

        if let Some(header) = areas.header {
            let search = SearchLine {
                query: &state.search_query,
                active: state.focus == Focus::Search,
                hidden: view.hidden_count(),
            };
            render_header(search, &state.pomodoro, &palette, header, buf);
        }

        let ctx = BoardContext {
            palette: &palette,
            today: Local::now().date_naive(),
            carried: state.drag.carrier(),
        };
        render_board(
            state.repo.tasks(),
            &view,
            state.selected_lane,
            state.selected_slot(&view),
            state.drag.hovered(),
            &ctx,
            areas.board,
            buf,
        );

        render_status_bar(
            state.status.as_deref(),
            HintMode::new(state.focus, state.drag.is_dragging()),
            &palette,
            areas.status,
            buf,
        );

        if let Some(editor) = &state.editor {
            render_editor(editor, &palette, area, buf);
        }

        if state.help_visible {
            render_help_overlay(&palette, area, buf);
        }
    }

    /// Renders a message indicating the terminal is too small.
    fn render_terminal_too_small(&self, frame: &mut Frame, area: Rect) {
        let message = format!(
            "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );

        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(self.state.palette().overdue))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });

        // Center the message vertically
        let vertical_offset = area.height.saturating_sub(2) / 2;
        let centered_area = Rect {
            x: area.x,
            y: area.y + vertical_offset,
            width: area.width,
            height: area.height.saturating_sub(vertical_offset),
        };

        frame.render_widget(paragraph, centered_area);
    }

    /// Runs the main application loop.
    ///
    /// This function returns when the user quits the application. It polls
    /// for terminal events, applies pending pomodoro ticks, and redraws.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use taskboard_config::PomodoroConfig;
    /// use taskboard_store::{MemoryStorage, PreferenceStore, TaskRepository};
    /// use taskboard_tui::{App, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let repo = TaskRepository::load(Box::new(MemoryStorage::new()));
    ///     let prefs = PreferenceStore::load(Box::new(MemoryStorage::new()));
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(repo, prefs, &PomodoroConfig::default());
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| self.view(frame))?;

            if let Some(event) = poll_event()? {
                if let Some(msg) = event_to_message(&event, self.state.focus) {
                    self.update(msg);
                }
            }

            while let Ok(msg) = self.tick_rx.try_recv() {
                self.update(msg);
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }
}
