use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub struct ProgressUtils {}

impl ProgressUtils {
    pub fn display_loader(msg: String) -> ProgressBar {
        let style = ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠸", "⠴", "⠦", "⠇", "✔"]);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(msg);
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }
}
