//! Pomodoro countdown timer.
//!
//! [`Pomodoro`] is a small state machine over a work/break [`Phase`] and a
//! number of remaining seconds. While running it holds exactly one
//! [`Ticker`], a background task that sends a [`Message::PomodoroTick`]
//! every second. Every tick carries the generation of the ticker that
//! produced it, so ticks from a ticker that has since been released are
//! recognised and ignored.

use std::fmt;
use std::time::Duration;

use taskboard_config::PomodoroConfig;
use taskboard_protocol::Message;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// Interval between ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// The phase the timer is counting down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Focused work.
    #[default]
    Work,
    /// A break between work phases.
    Break,
}

impl Phase {
    /// Returns the status label for this phase.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Work => "Work time",
            Self::Break => "Break time",
        }
    }

    /// Returns the other phase.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }
}

/// Notification emitted when a phase runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseComplete {
    /// The phase that just finished.
    pub finished: Phase,
}

impl PhaseComplete {
    /// Returns the text shown to the user.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self.finished {
            Phase::Work => "Time for a break!",
            Phase::Break => "Back to work!",
        }
    }
}

impl fmt::Display for PhaseComplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A repeating one-second tick source.
///
/// The background task is aborted when the ticker is dropped, so holding
/// a `Ticker` is the same as having a tick stream active.
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawns a ticker that sends `PomodoroTick { generation }` every `period`.
    ///
    /// The first tick arrives one full period after spawning. Must be called
    /// from within a tokio runtime.
    #[must_use]
    pub fn spawn(generation: u64, period: Duration, tx: UnboundedSender<Message>) -> Self {
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(Message::PomodoroTick { generation }).is_err() {
                    break;
                }
            }
        });
        Self { generation, handle }
    }

    /// Returns the generation stamped on this ticker's messages.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The pomodoro timer.
///
/// Idle and paused are the same state from the outside: no ticker is held
/// and the label reads "Start". A completed phase flips to the other phase
/// and stays idle until started again.
#[derive(Debug)]
pub struct Pomodoro {
    phase: Phase,
    remaining_seconds: u32,
    work_seconds: u32,
    break_seconds: u32,
    ticker: Option<Ticker>,
    next_generation: u64,
    tick_tx: UnboundedSender<Message>,
}

impl Pomodoro {
    /// Creates an idle timer at the start of a work phase.
    ///
    /// Ticks are delivered through `tick_tx`.
    #[must_use]
    pub fn new(config: &PomodoroConfig, tick_tx: UnboundedSender<Message>) -> Self {
        let work_seconds = whole_seconds(config.work_duration());
        Self {
            phase: Phase::Work,
            remaining_seconds: work_seconds,
            work_seconds,
            break_seconds: whole_seconds(config.break_duration()),
            ticker: None,
            next_generation: 0,
            tick_tx,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the seconds left in the current phase.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Returns `true` while a ticker is held.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Starts counting down, replacing any existing ticker.
    pub fn start(&mut self) {
        self.release();
        self.next_generation += 1;
        self.ticker = Some(Ticker::spawn(
            self.next_generation,
            TICK_PERIOD,
            self.tick_tx.clone(),
        ));
        debug!(generation = self.next_generation, phase = ?self.phase, "pomodoro started");
    }

    /// Stops counting down, keeping the phase and remaining time.
    pub fn pause(&mut self) {
        self.release();
        debug!(remaining = self.remaining_seconds, "pomodoro paused");
    }

    /// Starts when stopped, pauses when running.
    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stops counting down and returns to a fresh work phase.
    pub fn reset(&mut self) {
        self.release();
        self.phase = Phase::Work;
        self.remaining_seconds = self.work_seconds;
        debug!("pomodoro reset");
    }

    /// Applies one tick from the ticker with the given generation.
    ///
    /// Ticks from a released ticker are ignored. When the countdown reaches
    /// zero the ticker is released, the phase flips, and the completion is
    /// returned.
    pub fn tick(&mut self, generation: u64) -> Option<PhaseComplete> {
        if !self
            .ticker
            .as_ref()
            .is_some_and(|t| t.generation() == generation)
        {
            debug!(generation, "ignoring stale pomodoro tick");
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return None;
        }

        self.release();
        let finished = self.phase;
        self.phase = finished.flipped();
        self.remaining_seconds = match self.phase {
            Phase::Work => self.work_seconds,
            Phase::Break => self.break_seconds,
        };
        debug!(?finished, "pomodoro phase complete");
        Some(PhaseComplete { finished })
    }

    /// Returns the remaining time as `mm:ss`.
    #[must_use]
    pub fn display(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    /// Returns the label for the start/pause control.
    #[must_use]
    pub const fn button_label(&self) -> &'static str {
        if self.is_running() { "Pause" } else { "Start" }
    }

    /// Returns the label describing the current phase.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        self.phase.label()
    }

    fn release(&mut self) {
        self.ticker = None;
    }
}

/// Phase lengths beyond `u32::MAX` seconds are clamped.
fn whole_seconds(duration: Duration) -> u32 {
    u32::try_from(duration.as_secs()).unwrap_or(u32::MAX)
}

/// Formats seconds as zero-padded `mm:ss`. Minutes are not capped at 59.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn pomodoro() -> (Pomodoro, UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Pomodoro::new(&PomodoroConfig::default(), tx), rx)
    }

    fn current_generation(p: &Pomodoro) -> u64 {
        p.ticker.as_ref().map(Ticker::generation).unwrap()
    }

    #[test]
    fn format_clock_pads() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(180 * 60), "180:00");
    }

    #[test]
    fn phase_complete_messages() {
        let work = PhaseComplete {
            finished: Phase::Work,
        };
        let brk = PhaseComplete {
            finished: Phase::Break,
        };
        assert_eq!(work.to_string(), "Time for a break!");
        assert_eq!(brk.to_string(), "Back to work!");
    }

    #[test]
    fn new_timer_is_idle_work() {
        let (p, _rx) = pomodoro();
        assert_eq!(p.phase(), Phase::Work);
        assert_eq!(p.display(), "25:00");
        assert_eq!(p.button_label(), "Start");
        assert_eq!(p.status_label(), "Work time");
        assert!(!p.is_running());
    }

    #[tokio::test]
    async fn toggle_switches_labels() {
        let (mut p, _rx) = pomodoro();

        p.toggle();
        assert!(p.is_running());
        assert_eq!(p.button_label(), "Pause");

        p.toggle();
        assert!(!p.is_running());
        assert_eq!(p.button_label(), "Start");
    }

    #[tokio::test]
    async fn last_tick_flips_to_break_and_stops() {
        let (mut p, _rx) = pomodoro();
        p.remaining_seconds = 1;
        p.start();
        let generation = current_generation(&p);

        let done = p.tick(generation);

        assert_eq!(
            done,
            Some(PhaseComplete {
                finished: Phase::Work
            })
        );
        assert_eq!(p.phase(), Phase::Break);
        assert_eq!(p.remaining_seconds(), 300);
        assert!(!p.is_running());
        assert_eq!(p.status_label(), "Break time");
    }

    #[tokio::test]
    async fn break_completion_returns_to_work() {
        let (mut p, _rx) = pomodoro();
        p.phase = Phase::Break;
        p.remaining_seconds = 1;
        p.start();
        let generation = current_generation(&p);

        let done = p.tick(generation).unwrap();

        assert_eq!(done.message(), "Back to work!");
        assert_eq!(p.phase(), Phase::Work);
        assert_eq!(p.remaining_seconds(), 1500);
    }

    #[tokio::test]
    async fn pause_keeps_remaining_time() {
        let (mut p, _rx) = pomodoro();
        p.start();
        let generation = current_generation(&p);
        p.tick(generation);
        p.tick(generation);

        p.pause();

        assert_eq!(p.remaining_seconds(), 1498);
        assert_eq!(p.phase(), Phase::Work);
        assert!(!p.is_running());
    }

    #[tokio::test]
    async fn stale_ticks_are_ignored() {
        let (mut p, _rx) = pomodoro();
        p.start();
        let old = current_generation(&p);
        p.start();

        assert_eq!(p.tick(old), None);
        assert_eq!(p.remaining_seconds(), 1500);

        p.pause();
        let newer = old + 1;
        assert_eq!(p.tick(newer), None);
        assert_eq!(p.remaining_seconds(), 1500);
    }

    #[tokio::test]
    async fn reset_from_any_state() {
        let (mut p, _rx) = pomodoro();
        p.phase = Phase::Break;
        p.remaining_seconds = 42;
        p.start();

        p.reset();

        assert_eq!(p.phase(), Phase::Work);
        assert_eq!(p.display(), "25:00");
        assert_eq!(p.status_label(), "Work time");
        assert!(!p.is_running());
    }

    #[tokio::test]
    async fn custom_durations_from_config() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut p = Pomodoro::new(&PomodoroConfig::new(50, 10), tx);
        assert_eq!(p.display(), "50:00");

        p.remaining_seconds = 1;
        p.start();
        let generation = current_generation(&p);
        p.tick(generation);
        assert_eq!(p.display(), "10:00");
    }

    #[test]
    fn oversized_durations_are_clamped() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let p = Pomodoro::new(&PomodoroConfig::new(u32::MAX, 5), tx);
        assert_eq!(p.remaining_seconds(), u32::MAX);
        assert_eq!(p.break_seconds, 300);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_sends_one_tick_per_second() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(7, TICK_PERIOD, tx);

        tokio::time::sleep(Duration::from_millis(3500)).await;

        let mut ticks = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            ticks.push(msg);
        }
        assert_eq!(ticks, vec![Message::PomodoroTick { generation: 7 }; 3]);
        drop(ticker);
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_keeps_a_single_tick_stream() {
        let (mut p, mut rx) = pomodoro();
        p.start();
        p.start();

        tokio::time::sleep(Duration::from_millis(2500)).await;

        while let Ok(Message::PomodoroTick { generation }) = rx.try_recv() {
            p.tick(generation);
        }
        assert_eq!(p.remaining_seconds(), 1498);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_ticker_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(1, TICK_PERIOD, tx);
        drop(ticker);

        tokio::time::sleep(Duration::from_secs(3)).await;

        assert!(rx.try_recv().is_err());
    }
}
