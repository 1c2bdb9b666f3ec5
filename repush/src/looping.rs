//! The unbounded retry loop around the push command.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::core::classifier::classify;
use crate::core::types::Verdict;
use crate::io::push::PushRunner;

/// Fixed delay between retryable attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Loop pacing. Tests inject millisecond delays; the production path uses
/// the default.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub retry_delay: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            retry_delay: RETRY_DELAY,
        }
    }
}

/// Reason why the loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopStop {
    /// The push exited 0.
    Succeeded { output: String },
    /// The push failed with a non-retryable error.
    Failed { exit_code: i32, output: String },
}

/// Summary of a loop invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopOutcome {
    /// Number of the attempt the loop stopped on (1-indexed).
    pub attempts: u32,
    pub stop: LoopStop,
}

/// One classified attempt, reported before the loop sleeps or stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReport {
    pub attempt: u32,
    pub verdict: Verdict,
    pub output: String,
}

/// Run push attempts until one succeeds or fails non-retryably.
///
/// A transient failure sleeps `config.retry_delay` and retries with an
/// incremented attempt counter; there is no upper bound on retries. The loop
/// never prints: `on_attempt` is invoked once per classified attempt so the
/// caller owns all reporting. Stops immediately on any runner-internal error
/// (spawn failure, capture failure).
pub fn run_push_loop<R: PushRunner, F: FnMut(&AttemptReport)>(
    runner: &R,
    config: &LoopConfig,
    mut on_attempt: F,
) -> Result<LoopOutcome> {
    let mut attempt = 1u32;
    loop {
        let result = runner.attempt()?;
        let verdict = classify(&result);
        on_attempt(&AttemptReport {
            attempt,
            verdict,
            output: result.output.clone(),
        });
        match verdict {
            Verdict::Succeeded => {
                info!(attempt, "push succeeded");
                return Ok(LoopOutcome {
                    attempts: attempt,
                    stop: LoopStop::Succeeded {
                        output: result.output,
                    },
                });
            }
            Verdict::Transient => {
                warn!(
                    attempt,
                    delay_secs = config.retry_delay.as_secs(),
                    "transient network error, retrying"
                );
                thread::sleep(config.retry_delay);
                attempt += 1;
            }
            Verdict::Fatal { exit_code } => {
                warn!(attempt, exit_code, "non-retryable failure");
                return Ok(LoopOutcome {
                    attempts: attempt,
                    stop: LoopStop::Failed {
                        exit_code,
                        output: result.output,
                    },
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedPush, exited};
    use std::time::Instant;

    const BROKEN_PIPE: &str = "write tcp 10.0.0.1:443: broken pipe";

    fn fast() -> LoopConfig {
        LoopConfig {
            retry_delay: Duration::from_millis(1),
        }
    }

    #[test]
    fn retries_transient_failures_then_succeeds() {
        let runner = ScriptedPush::new(vec![
            exited(1, BROKEN_PIPE),
            exited(1, BROKEN_PIPE),
            exited(0, "latest: digest: sha256:49d2 size: 2048"),
        ]);
        let mut reports = Vec::new();

        let outcome = run_push_loop(&runner, &fast(), |report| reports.push(report.clone()))
            .expect("loop");

        assert_eq!(outcome.attempts, 3);
        assert!(matches!(outcome.stop, LoopStop::Succeeded { .. }));
        let verdicts: Vec<_> = reports.iter().map(|r| r.verdict).collect();
        assert_eq!(
            verdicts,
            [Verdict::Transient, Verdict::Transient, Verdict::Succeeded]
        );
        let attempts: Vec<_> = reports.iter().map(|r| r.attempt).collect();
        assert_eq!(attempts, [1, 2, 3]);
    }

    #[test]
    fn stops_immediately_on_non_retryable_failure() {
        let runner = ScriptedPush::new(vec![exited(
            1,
            "unauthorized: authentication required",
        )]);
        let mut reports = 0;

        let outcome = run_push_loop(&runner, &fast(), |_| reports += 1).expect("loop");

        assert_eq!(outcome.attempts, 1);
        assert_eq!(reports, 1);
        assert_eq!(
            outcome.stop,
            LoopStop::Failed {
                exit_code: 1,
                output: "unauthorized: authentication required".to_string(),
            }
        );
    }

    #[test]
    fn fatal_propagates_child_exit_code() {
        let runner = ScriptedPush::new(vec![exited(125, "docker: invalid reference format")]);

        let outcome = run_push_loop(&runner, &fast(), |_| {}).expect("loop");

        assert_eq!(
            outcome.stop,
            LoopStop::Failed {
                exit_code: 125,
                output: "docker: invalid reference format".to_string(),
            }
        );
    }

    #[test]
    fn first_attempt_success_does_not_sleep() {
        let runner = ScriptedPush::new(vec![exited(0, "latest: digest: sha256:aaaa size: 128")]);
        let config = LoopConfig {
            retry_delay: Duration::from_secs(60),
        };

        let start = Instant::now();
        let outcome = run_push_loop(&runner, &config, |_| {}).expect("loop");

        assert_eq!(outcome.attempts, 1);
        assert!(matches!(outcome.stop, LoopStop::Succeeded { .. }));
        assert!(
            start.elapsed() < Duration::from_secs(1),
            "success must not wait out the retry delay"
        );
    }

    #[test]
    fn sleeps_between_retries() {
        let runner = ScriptedPush::new(vec![
            exited(1, BROKEN_PIPE),
            exited(1, BROKEN_PIPE),
            exited(0, ""),
        ]);
        let config = LoopConfig {
            retry_delay: Duration::from_millis(50),
        };

        let start = Instant::now();
        run_push_loop(&runner, &config, |_| {}).expect("loop");

        assert!(
            start.elapsed() >= Duration::from_millis(100),
            "two retries must wait out the delay twice, waited {:?}",
            start.elapsed()
        );
    }

    #[test]
    fn runner_error_stops_the_loop() {
        let runner = ScriptedPush::new(Vec::new());

        let err = run_push_loop(&runner, &fast(), |_| {}).unwrap_err();

        assert!(err.to_string().contains("scripted runner exhausted"));
    }
}
