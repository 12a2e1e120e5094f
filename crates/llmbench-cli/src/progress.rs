//! Progress bars fed by the evaluation progress callback

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use llmbench_eval::{BenchmarkProgress, ProgressCallback, RunPhase};

const BAR_TEMPLATE: &str =
    "{spinner:.blue} {prefix:<28.bold} [{bar:30.cyan/blue}] {pos}/{len} {msg}";

/// One bar per (model, benchmark), created on first update
pub struct ProgressBoard {
    multi: MultiProgress,
    bars: Mutex<HashMap<(String, String), ProgressBar>>,
}

impl ProgressBoard {
    /// Board drawing to stderr
    pub fn new() -> Arc<Self> {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Board drawing to an arbitrary target
    pub fn with_target(target: ProgressDrawTarget) -> Arc<Self> {
        Arc::new(Self {
            multi: MultiProgress::with_draw_target(target),
            bars: Mutex::new(HashMap::new()),
        })
    }

    /// Callback to hand to the orchestrator
    pub fn callback(self: &Arc<Self>) -> ProgressCallback {
        let board = Arc::clone(self);
        Arc::new(move |progress| board.update(progress))
    }

    fn bar_for(&self, progress: &BenchmarkProgress) -> Option<ProgressBar> {
        let mut bars = self.bars.lock().ok()?;
        let key = (progress.model.clone(), progress.benchmark.clone());
        let bar = bars.entry(key).or_insert_with(|| {
            let bar = self.multi.add(ProgressBar::new(0));
            bar.set_style(
                ProgressStyle::default_bar()
                    .template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
            );
            bar.set_prefix(format!("{}/{}", progress.model, progress.benchmark));
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        });
        Some(bar.clone())
    }

    fn update(&self, progress: BenchmarkProgress) {
        let Some(bar) = self.bar_for(&progress) else {
            return;
        };

        bar.set_length(progress.total as u64);
        bar.set_position(progress.completed as u64);

        match progress.phase {
            RunPhase::Done => bar.finish_with_message(format!(
                "done, {}/{} correct",
                progress.correct, progress.total
            )),
            phase => bar.set_message(format!("{} ({} correct)", phase, progress.correct)),
        }
    }

    /// Whether a bar exists for this model and benchmark
    #[cfg(test)]
    fn has_bar(&self, model: &str, benchmark: &str) -> bool {
        self.bars
            .lock()
            .map(|bars| bars.contains_key(&(model.to_string(), benchmark.to_string())))
            .unwrap_or(false)
    }
}
