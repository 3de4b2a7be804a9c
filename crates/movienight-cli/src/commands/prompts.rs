use crate::output::Output;
use color_eyre::Result;
use dialoguer::{Confirm, Input};
use movienight_core::Confirmer;

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Prompt for a 1-based choice among `count` entries
pub fn prompt_choice(prompt: &str, count: usize, output: &Output) -> Result<usize> {
    loop {
        let input_str = Input::<String>::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))?;

        match input_str.trim().parse::<usize>() {
            Ok(num) if (1..=count).contains(&num) => return Ok(num),
            _ => output.error(format!("Enter a number between 1 and {}.", count)),
        }
    }
}

/// Asks on the terminal. Anything but an explicit yes, including a failed
/// read on a closed stdin, declines.
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        prompt_yes_no(prompt, Some(false)).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not read confirmation, treating as no");
            false
        })
    }
}

/// `--yes`
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!(prompt, "Confirmed by --yes");
        true
    }
}

pub fn confirmer(assume_yes: bool) -> Box<dyn Confirmer> {
    if assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirmer)
    }
}
