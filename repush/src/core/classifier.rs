//! Deterministic classification of push attempts.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::types::{AttemptOutput, Verdict};
use crate::exit_codes;

/// Error text the registry client emits when a long-lived upload connection
/// drops mid-write. Case-sensitive, matched anywhere in the combined output.
static TRANSIENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)write tcp.*broken pipe").unwrap());

/// Classify one attempt into `Succeeded` / `Transient` / `Fatal`.
///
/// Success is determined solely by the exit code: a zero exit still succeeds
/// even when the output carries warnings or transient-looking text. A
/// timed-out attempt maps to [`exit_codes::TIMEOUT`], and a child that died
/// without an exit code maps to [`exit_codes::ERROR`].
pub fn classify(attempt: &AttemptOutput) -> Verdict {
    if attempt.exit_code == Some(0) {
        return Verdict::Succeeded;
    }
    if attempt.timed_out {
        return Verdict::Fatal {
            exit_code: exit_codes::TIMEOUT,
        };
    }
    if TRANSIENT_RE.is_match(&attempt.output) {
        return Verdict::Transient;
    }
    Verdict::Fatal {
        exit_code: attempt.exit_code.unwrap_or(exit_codes::ERROR),
    }
}
