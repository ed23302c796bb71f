//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for the load pipeline phases
#[derive(Debug)]
pub struct LoadProgress {
    read_pb: Option<ProgressBar>,
    decode_pb: Option<ProgressBar>,
    rows_pb: Option<ProgressBar>,
    show_progress: bool,
}

impl LoadProgress {
    /// Create a reporter; with `show_progress` off no bars are drawn
    pub fn new(show_progress: bool) -> Self {
        let read_pb = if show_progress {
            Some(create_spinner("Reading file..."))
        } else {
            None
        };

        Self {
            read_pb,
            decode_pb: None,
            rows_pb: None,
            show_progress,
        }
    }

    /// Lazily create the decode spinner when needed
    fn ensure_decode_pb(&mut self) {
        if self.show_progress && self.decode_pb.is_none() {
            self.decode_pb = Some(create_spinner("Decoding workbook..."));
        }
    }

    /// Lazily create the materialization spinner when needed
    fn ensure_rows_pb(&mut self) {
        if self.show_progress && self.rows_pb.is_none() {
            self.rows_pb = Some(create_spinner("Materializing rows..."));
        }
    }

    /// Finish the read phase and start the decode spinner
    pub fn finish_read(&mut self, message: &str) {
        if let Some(pb) = self.read_pb.take() {
            pb.finish_with_message(message.to_string());
        }
        self.ensure_decode_pb();
    }

    /// Finish the decode phase and start the materialization spinner
    pub fn finish_decode(&mut self, message: &str) {
        if let Some(pb) = self.decode_pb.take() {
            pb.finish_with_message(message.to_string());
        }
        self.ensure_rows_pb();
    }

    /// Finish the materialization phase
    pub fn finish_rows(&mut self, message: &str) {
        if let Some(pb) = self.rows_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for LoadProgress {
    fn drop(&mut self) {
        // Clean up any bars left behind by a failed load
        if let Some(pb) = self.read_pb.take() {
            pb.finish_and_clear();
        }
        if let Some(pb) = self.decode_pb.take() {
            pb.finish_and_clear();
        }
        if let Some(pb) = self.rows_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a spinner progress bar
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .expect("Invalid progress template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
