//! Test-only helpers: attempt constructors and a scripted push runner.

use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::{Result, anyhow};

use crate::core::types::AttemptOutput;
use crate::io::push::PushRunner;

/// Attempt that exited with `code` and produced `output`.
pub fn exited(code: i32, output: &str) -> AttemptOutput {
    AttemptOutput {
        exit_code: Some(code),
        output: output.to_string(),
        timed_out: false,
    }
}

/// Attempt whose child was killed on timeout.
pub fn killed_on_timeout() -> AttemptOutput {
    AttemptOutput {
        exit_code: None,
        output: String::new(),
        timed_out: true,
    }
}

/// Runner that replays a fixed sequence of attempt outputs.
///
/// Errors once the sequence is exhausted, so a test that loops more than
/// scripted fails instead of hanging.
pub struct ScriptedPush {
    outputs: RefCell<VecDeque<AttemptOutput>>,
}

impl ScriptedPush {
    pub fn new(outputs: Vec<AttemptOutput>) -> Self {
        Self {
            outputs: RefCell::new(outputs.into()),
        }
    }
}

impl PushRunner for ScriptedPush {
    fn attempt(&self) -> Result<AttemptOutput> {
        self.outputs
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("scripted runner exhausted"))
    }
}
