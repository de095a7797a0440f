//! Charm-style CLI prompts using cliclack

use crate::error::{PulseError, Result, EXIT_INTERRUPTED};
use crate::prompt::PromptGateway;

/// Prompt gateway backed by the operator's terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct CliclackPrompts;

impl PromptGateway for CliclackPrompts {
    fn text(&self, message: &str) -> Result<String> {
        cliclack::input(message)
            .required(false)
            .interact::<String>()
            .map_err(PulseError::Prompt)
    }

    fn select(&self, message: &str, items: &[&str]) -> Result<usize> {
        let mut select = cliclack::select(message);
        for (idx, label) in items.iter().enumerate() {
            select = select.item(idx, *label, "");
        }
        select.interact().map_err(PulseError::Prompt)
    }

    fn confirm(&self, message: &str, initial: bool) -> Result<bool> {
        cliclack::confirm(message)
            .initial_value(initial)
            .interact()
            .map_err(PulseError::Prompt)
    }
}

/// Make the terminal cursor visible again
pub fn restore_cursor() {
    let _ = console::Term::stderr().show_cursor();
}

/// Restore the cursor on panic and exit with 130 on Ctrl+C
pub fn install_interrupt_handler() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_cursor();
        default_panic(info);
    }));

    ctrlc::set_handler(move || {
        restore_cursor();
        std::process::exit(i32::from(EXIT_INTERRUPTED));
    })
    .ok();
}
