use crate::output::Output;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

/// Spinner shown while a request is in flight. Only drawn for a human on a
/// terminal; otherwise the wait is logged.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn start(message: &str, output: &Output) -> Self {
        if !(is_interactive() && output.is_human() && !output.is_quiet()) {
            tracing::debug!(operation = "wait", message, "Waiting for backend");
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar: Some(bar) }
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Await `fut` behind a spinner
pub async fn spin<F: Future>(message: &str, output: &Output, fut: F) -> F::Output {
    let spinner = Spinner::start(message, output);
    let result = fut.await;
    spinner.finish();
    result
}
