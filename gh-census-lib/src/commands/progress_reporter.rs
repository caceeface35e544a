use crate::harvest::Progress;
use core::fmt::{Debug, Formatter};
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// Refresh rate for progress updates (10 Hz).
const REFRESH_INTERVAL_MS: u64 = 100;

const DETERMINATE_TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {pos}/{len} {msg}";
const DETERMINATE_TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{bar:25}] {pos}/{len} {msg}";
const INDETERMINATE_TEMPLATE: &str = "{prefix:>12.bold.cyan} [{spinner}] {elapsed}: {pos} {msg}";
const INDETERMINATE_TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{spinner}] {elapsed}: {pos} {msg}";

const TICK_STRINGS: &[&str] = &[
    "=>                       ",
    " ===>                    ",
    "    ===>                 ",
    "       ===>              ",
    "          ===>           ",
    "             ===>        ",
    "                ===>     ",
    "                   ===>  ",
    "                     ===>",
    "                     <===",
    "                  <===   ",
    "               <===      ",
    "            <===         ",
    "         <===            ",
    "      <===               ",
    "   <===                  ",
    "<===                     ",
    "                         ",
];

#[derive(Debug)]
struct DelayedProgressState {
    visible_after: Instant,
    visible: AtomicBool,
}

/// A progress bar that delays showing itself until a threshold is reached.
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
    state: Arc<DelayedProgressState>,
    reveal_task: Arc<JoinHandle<()>>,
    use_colors: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter.
    ///
    /// The progress bar will only become visible if the harvest continues beyond the delay threshold.
    /// When `use_colors` is false, progress bar chrome is rendered without ANSI styling.
    #[must_use]
    pub fn new(delay: Duration, use_colors: bool) -> Self {
        let bar = ProgressBar::hidden();

        let state = Arc::new(DelayedProgressState {
            visible_after: Instant::now() + delay,
            visible: AtomicBool::new(false),
        });

        Self {
            reveal_task: Arc::new(tokio::spawn(reveal_task(bar.clone(), Arc::clone(&state)))),
            bar,
            state,
            use_colors,
        }
    }

    fn determinate_style(&self) -> ProgressStyle {
        let template = if self.use_colors { DETERMINATE_TEMPLATE } else { DETERMINATE_TEMPLATE_NO_COLOR };
        ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }

    fn indeterminate_style(&self) -> ProgressStyle {
        let template = if self.use_colors { INDETERMINATE_TEMPLATE } else { INDETERMINATE_TEMPLATE_NO_COLOR };
        ProgressStyle::default_spinner()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICK_STRINGS)
    }
}

impl Progress for ProgressReporter {
    fn set_phase(&self, phase: &str) {
        self.bar.set_prefix(phase.to_string());
        self.bar.set_message("");
        self.bar.reset();
    }

    fn set_total(&self, total: u64) {
        if total == 0 {
            self.bar.set_style(self.indeterminate_style());
            self.bar.enable_steady_tick(Duration::from_millis(REFRESH_INTERVAL_MS));
        } else {
            self.bar.disable_steady_tick();
            self.bar.set_style(self.determinate_style());
            self.bar.set_length(total);
        }
        self.bar.set_position(0);
    }

    fn advance(&self, delta: u64, message: &str) {
        self.bar.inc(delta);
        self.bar.set_message(message.to_string());
    }

    fn done(&self) {
        self.reveal_task.abort();
        if self.state.visible.load(Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }
}

impl Debug for ProgressReporter {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("bar", &self.bar)
            .field("state", &self.state)
            .field("reveal_task", &"<task>")
            .field("use_colors", &self.use_colors)
            .finish()
    }
}

/// Background task that attaches the bar to stderr once the delay has passed.
async fn reveal_task(bar: ProgressBar, state: Arc<DelayedProgressState>) {
    let mut interval = tokio::time::interval(Duration::from_millis(REFRESH_INTERVAL_MS));
    loop {
        let _ = interval.tick().await;

        if Instant::now() >= state.visible_after {
            state.visible.store(true, Ordering::Relaxed);
            bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
            return;
        }
    }
}
