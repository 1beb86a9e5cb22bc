//! Progress bar model and wall-clock formatting.
//!
//! Rendering state lives here so it can be tested deterministically; actually
//! writing the line to a terminal is the CLI's job. The engine never sees any
//! of this — progress is driven entirely by [`EngineEvent`]s.
//!
//! [`EngineEvent`]: crate::engine::EngineEvent

use std::fmt::Write as _;
use std::time::{Duration, Instant};

/// Columns in the bar between the brackets.
pub const BAR_WIDTH: usize = 50;

/// Format a duration as `HH:MM:SS.mmm`.
#[must_use]
pub fn format_clock(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    let ms = total_ms % 1000;
    let secs = (total_ms / 1000) % 60;
    let mins = (total_ms / 60_000) % 60;
    let hours = total_ms / 3_600_000;
    format!("{hours:02}:{mins:02}:{secs:02}.{ms:03}")
}

/// Throttled progress bar with an ETA estimate.
#[derive(Debug)]
pub struct ProgressBar {
    total: u64,
    started: Instant,
    interval: Duration,
    last_render: Option<Instant>,
}

impl ProgressBar {
    /// Create a bar over `total` items, redrawing at most every `interval`.
    #[must_use]
    pub fn new(total: u64, interval: Duration) -> Self {
        Self {
            total,
            started: Instant::now(),
            interval,
            last_render: None,
        }
    }

    /// Produce the next line to draw, or `None` when a redraw is not due yet.
    ///
    /// The final item always renders so the bar never ends short of full.
    pub fn tick(&mut self, completed: u64) -> Option<String> {
        let now = Instant::now();
        let due = completed >= self.total
            || self
                .last_render
                .is_none_or(|last| now.duration_since(last) >= self.interval);
        if !due {
            return None;
        }
        self.last_render = Some(now);
        Some(self.render_at(completed, now.duration_since(self.started)))
    }

    /// Render the bar line for `completed` items after `elapsed` time.
    ///
    /// Starts with a carriage return so successive renders overwrite in
    /// place on a terminal.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render_at(&self, completed: u64, elapsed: Duration) -> String {
        let fraction = if self.total == 0 {
            1.0
        } else {
            completed as f64 / self.total as f64
        };
        let filled = ((fraction * BAR_WIDTH as f64) as usize).min(BAR_WIDTH);

        let eta = if completed == 0 || completed >= self.total {
            Duration::ZERO
        } else {
            let rate = completed as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
            Duration::from_secs_f64((self.total - completed) as f64 / rate)
        };

        let mut line = String::with_capacity(BAR_WIDTH + 40);
        line.push_str("\r[");
        for _ in 0..filled {
            line.push('=');
        }
        for _ in 0..(BAR_WIDTH - filled) {
            line.push(' ');
        }
        let _ = write!(
            line,
            "] {completed}/{} ETA: {}",
            self.total,
            format_clock(eta)
        );
        line
    }
}
