//! Retrying container-image push runner.
//!
//! Wraps a single fixed `docker push` invocation in an unbounded retry loop:
//! a transient broken-pipe network error is waited out and retried, any other
//! failure terminates immediately with the child's exit code. The
//! architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (attempt classification).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (child-process execution, the
//!   real push command). Isolated behind [`io::push::PushRunner`] to enable
//!   scripted fakes in tests.
//!
//! [`looping`] coordinates core logic with I/O to implement the CLI.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod looping;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
