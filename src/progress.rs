//! Progress bar display for syncs

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress display over the items being installed
pub struct ProgressDisplay {
    /// One tick per item, successful or not
    item_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total item count
    ///
    /// A hidden display keeps the same API without drawing anything.
    pub fn new(total_items: u64, visible: bool) -> Self {
        let item_pb = if visible {
            ProgressBar::new(total_items)
        } else {
            ProgressBar::with_draw_target(Some(total_items), ProgressDrawTarget::hidden())
        };

        match ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}") {
            Ok(style) => item_pb.set_style(style.progress_chars("#>-")),
            Err(e) => tracing::debug!(error = %e, "falling back to default progress style"),
        }

        Self { item_pb }
    }

    /// Update to show the item being installed
    pub fn update_item(&self, title: &str, current: usize, total: usize) {
        self.item_pb
            .set_message(format!("({current}/{total}) {title}"));
    }

    /// Increment item progress
    pub fn inc_item(&self) {
        self.item_pb.inc(1);
    }

    /// Finish item progress
    pub fn finish(&self) {
        self.item_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.item_pb.abandon();
    }
}
