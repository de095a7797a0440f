//! Interactive prompt gateway
//!
//! Pipelines ask the operator questions only through this trait, so they can be
//! driven by scripted answers in tests. The cliclack implementation lives in
//! [`crate::tui`].

use crate::error::{PulseError, Result};

pub trait PromptGateway {
    /// Free-text answer; may be empty
    fn text(&self, message: &str) -> Result<String>;

    /// Index of the chosen item
    fn select(&self, message: &str, items: &[&str]) -> Result<usize>;

    fn confirm(&self, message: &str, initial: bool) -> Result<bool>;

    /// Report that an answer was rejected and will be asked again
    fn retry_notice(&self, message: &str) {
        crate::report::warning(message);
    }
}

/// Resolve the project name: a non-blank supplied name is returned unchanged,
/// otherwise the operator is asked until a non-blank answer is given or
/// `max_attempts` is used up.
pub fn resolve_project_name<P: PromptGateway>(
    supplied: Option<&str>,
    prompts: &P,
    max_attempts: u32,
) -> Result<String> {
    if let Some(name) = supplied.filter(|n| !n.trim().is_empty()) {
        return Ok(name.to_string());
    }

    for attempt in 1..=max_attempts {
        let answer = prompts.text("Please enter project name")?;
        let trimmed = answer.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
        tracing::debug!(attempt, "blank project name");
        if attempt < max_attempts {
            prompts.retry_notice("Name cannot be empty. Please try again.");
        }
    }

    if max_attempts == 0 {
        return Err(PulseError::EmptyName);
    }
    Err(PulseError::MaxRetriesExceeded(max_attempts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    struct Scripted {
        answers: RefCell<VecDeque<String>>,
        asked: RefCell<u32>,
    }

    impl Scripted {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|s| s.to_string()).collect()),
                asked: RefCell::new(0),
            }
        }
    }

    impl PromptGateway for Scripted {
        fn text(&self, _message: &str) -> Result<String> {
            *self.asked.borrow_mut() += 1;
            Ok(self.answers.borrow_mut().pop_front().unwrap_or_default())
        }

        fn select(&self, _message: &str, _items: &[&str]) -> Result<usize> {
            Ok(0)
        }

        fn confirm(&self, _message: &str, initial: bool) -> Result<bool> {
            Ok(initial)
        }

        fn retry_notice(&self, _message: &str) {}
    }

    #[test]
    fn test_supplied_name_never_prompts() {
        let prompts = Scripted::new(&["other"]);
        for name in ["demo", "my-app", " spaced "] {
            assert_eq!(resolve_project_name(Some(name), &prompts, 3).unwrap(), name);
        }
        assert_eq!(*prompts.asked.borrow(), 0);
    }

    #[test]
    fn test_blank_answers_are_reprompted() {
        let prompts = Scripted::new(&["", "   ", "\t", "demo"]);
        assert_eq!(resolve_project_name(None, &prompts, 5).unwrap(), "demo");
        assert_eq!(*prompts.asked.borrow(), 4);
    }

    #[test]
    fn test_blank_supplied_name_falls_back_to_prompt() {
        let prompts = Scripted::new(&["demo"]);
        assert_eq!(resolve_project_name(Some("  "), &prompts, 5).unwrap(), "demo");
        assert_eq!(*prompts.asked.borrow(), 1);
    }

    #[test]
    fn test_retries_are_bounded() {
        let prompts = Scripted::new(&["", "", "", "demo"]);
        let err = resolve_project_name(None, &prompts, 3).unwrap_err();
        assert!(matches!(err, PulseError::MaxRetriesExceeded(3)));
        assert_eq!(*prompts.asked.borrow(), 3);
    }
}
