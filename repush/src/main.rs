//! CLI entry point: push with retry, report progress, propagate exit codes.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;

use repush::core::types::Verdict;
use repush::exit_codes;
use repush::io::push::{DockerPushRunner, PUSH_IMAGE};
use repush::logging;
use repush::looping::{AttemptReport, LoopConfig, LoopStop, run_push_loop};

#[derive(Parser)]
#[command(
    name = "repush",
    version,
    about = "Push the container image, retrying transient network failures"
)]
struct Cli {}

fn main() {
    logging::init();
    let _cli = Cli::parse();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let runner = DockerPushRunner;
    let config = LoopConfig::default();
    let delay_secs = config.retry_delay.as_secs();

    let outcome = run_push_loop(&runner, &config, |report| {
        print_attempt(report, delay_secs);
    })?;

    match outcome.stop {
        LoopStop::Succeeded { output } => {
            println!(
                "=== pushed {PUSH_IMAGE} after {} attempt(s) ===",
                outcome.attempts
            );
            print_output(&output);
            Ok(exit_codes::OK)
        }
        LoopStop::Failed { exit_code, .. } => {
            println!(
                "=== push failed after {} attempt(s), giving up ===",
                outcome.attempts
            );
            Ok(exit_code)
        }
    }
}

fn print_attempt(report: &AttemptReport, delay_secs: u64) {
    let now = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    match report.verdict {
        Verdict::Succeeded => {
            println!("[{now}] attempt {}: push succeeded", report.attempt);
        }
        Verdict::Transient => {
            println!(
                "[{now}] attempt {}: transient network error, retrying in {delay_secs}s",
                report.attempt
            );
            print_output(&report.output);
        }
        Verdict::Fatal { exit_code } => {
            println!(
                "[{now}] attempt {}: push failed (exit code {exit_code})",
                report.attempt
            );
            print_output(&report.output);
        }
    }
}

fn print_output(output: &str) {
    let trimmed = output.trim_end();
    if !trimmed.is_empty() {
        println!("{trimmed}");
    }
}
