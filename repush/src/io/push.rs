//! The fixed push command and the runner seam.
//!
//! The [`PushRunner`] trait decouples the retry loop from the actual
//! `docker push` invocation. Tests use scripted runners that return
//! predetermined outputs without spawning processes.

use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::core::types::AttemptOutput;
use crate::io::process::run_command_merged;

/// Image reference pushed by every attempt.
pub const PUSH_IMAGE: &str = "docker.io/labring/sealos-brain:latest";

/// Wall-clock budget for a single push attempt.
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Truncate captured push output beyond this many bytes per stream.
pub const OUTPUT_LIMIT_BYTES: usize = 100_000;

/// Abstraction over push execution.
pub trait PushRunner {
    /// Run one push attempt and return its normalized output.
    fn attempt(&self) -> Result<AttemptOutput>;
}

/// Runner that spawns `docker push`.
pub struct DockerPushRunner;

impl DockerPushRunner {
    /// The exact command line used for every attempt.
    pub fn command() -> Command {
        let mut cmd = Command::new("docker");
        cmd.arg("push").arg(PUSH_IMAGE);
        cmd
    }
}

impl PushRunner for DockerPushRunner {
    #[instrument(skip_all)]
    fn attempt(&self) -> Result<AttemptOutput> {
        info!(image = PUSH_IMAGE, "starting docker push");
        let output = run_command_merged(Self::command(), ATTEMPT_TIMEOUT, OUTPUT_LIMIT_BYTES)
            .context("run docker push")?;
        debug!(
            exit_code = ?output.status.code(),
            timed_out = output.timed_out,
            "docker push finished"
        );
        Ok(AttemptOutput {
            exit_code: output.status.code(),
            output: output.text(),
            timed_out: output.timed_out,
        })
    }
}
