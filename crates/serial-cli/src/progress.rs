use indicatif::{ProgressBar, ProgressStyle};
use serial_match::ProgressSink;
use serial_model::Side;

const TEMPLATE: &str = "{msg:>20} [{bar:40}] {pos}/{len} ({eta})";

/// Terminal progress bar for the classification passes.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }
}

impl ProgressSink for BarProgress {
    fn begin(&self, side: Side, total: usize) {
        self.bar.reset();
        self.bar.set_length(total as u64);
        self.bar.set_message(format!("classifying {side}"));
    }

    fn advance(&self, _side: Side, delta: usize) {
        self.bar.inc(delta as u64);
    }

    fn finish(&self, _side: Side) {
        self.bar.finish_and_clear();
    }
}
