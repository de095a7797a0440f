#![allow(dead_code)]

use pulse_core::{Invocation, ProcessRunner, PromptGateway, Result, Settings, StepOutcome};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

pub const GENERATED_TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "es5",
    "strict": true,
    "moduleResolution": "bundler",
    "paths": { "@/*": ["./src/*"] }
  },
  "include": ["next-env.d.ts", "**/*.ts", "**/*.tsx"]
}"#;

type Behavior = Box<dyn Fn(&Invocation) -> StepOutcome + Send + Sync>;

/// Records every invocation and answers with a configurable behavior
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    behavior: Behavior,
}

impl RecordingRunner {
    pub fn new(behavior: impl Fn(&Invocation) -> StepOutcome + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            behavior: Box::new(behavior),
        }
    }

    /// Scaffold creates the project like create-next-app would; everything else succeeds
    pub fn succeeding() -> Self {
        Self::new(|inv| {
            if is_scaffold(inv) {
                fake_scaffold(inv);
            }
            StepOutcome::Success
        })
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.command_line()).collect()
    }
}

impl ProcessRunner for RecordingRunner {
    async fn run(&self, invocation: Invocation) -> StepOutcome {
        let outcome = (self.behavior)(&invocation);
        self.calls.lock().unwrap().push(invocation);
        outcome
    }
}

pub fn is_scaffold(inv: &Invocation) -> bool {
    inv.arguments().first().map(String::as_str) == Some("create-next-app")
}

pub fn fake_scaffold(inv: &Invocation) {
    let root = inv.cwd().join(&inv.arguments()[1]);
    std::fs::create_dir_all(root.join("src").join("app")).unwrap();
    std::fs::write(root.join("tsconfig.json"), GENERATED_TSCONFIG).unwrap();
    std::fs::write(
        root.join("package.json"),
        r#"{"dependencies": {"next": "13.0.0", "react": "18.0.0", "react-dom": "18.0.0"}}"#,
    )
    .unwrap();
}

/// Prompt gateway that answers from queues and records what was asked
#[derive(Default)]
pub struct ScriptedPrompts {
    texts: RefCell<VecDeque<String>>,
    selects: RefCell<VecDeque<usize>>,
    confirms: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_texts(self, texts: &[&str]) -> Self {
        self.texts
            .borrow_mut()
            .extend(texts.iter().map(|s| s.to_string()));
        self
    }

    pub fn with_select(self, idx: usize) -> Self {
        self.selects.borrow_mut().push_back(idx);
        self
    }

    pub fn with_confirm(self, answer: bool) -> Self {
        self.confirms.borrow_mut().push_back(answer);
        self
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl PromptGateway for ScriptedPrompts {
    fn text(&self, message: &str) -> Result<String> {
        self.asked.borrow_mut().push(message.to_string());
        Ok(self.texts.borrow_mut().pop_front().unwrap_or_default())
    }

    fn select(&self, message: &str, _items: &[&str]) -> Result<usize> {
        self.asked.borrow_mut().push(message.to_string());
        Ok(self.selects.borrow_mut().pop_front().unwrap_or(0))
    }

    fn confirm(&self, message: &str, initial: bool) -> Result<bool> {
        self.asked.borrow_mut().push(message.to_string());
        Ok(self.confirms.borrow_mut().pop_front().unwrap_or(initial))
    }

    fn retry_notice(&self, _message: &str) {}
}

pub fn test_settings(lock_dir: &Path) -> Settings {
    Settings {
        lock_dir: lock_dir.to_path_buf(),
        ..Settings::default()
    }
}
