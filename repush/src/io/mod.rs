//! Side-effecting operations: child-process execution and the push command.

pub mod process;
pub mod push;
