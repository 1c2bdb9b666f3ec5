//! Stable exit codes for the repush binary.
//!
//! A non-retryable push failure propagates the child's own exit code; the
//! constants below cover everything else.

/// The push succeeded.
pub const OK: i32 = 0;
/// The runner itself failed (spawn or capture error), or the child died
/// without reporting an exit code.
pub const ERROR: i32 = 1;
/// The push exceeded the per-attempt timeout. Matches the GNU `timeout`
/// convention.
pub const TIMEOUT: i32 = 124;
