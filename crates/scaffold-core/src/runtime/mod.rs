//! External programs and toolchain detection
//!
//! This module provides:
//! - A `CommandRunner` seam for running external programs, with a tokio-backed default
//! - The `Toolchain` that builds flutter and git invocations
//! - Toolchain detection run before scaffolding starts

pub mod check;
pub mod process;
pub mod tool;

pub use check::{check_flutter, check_git, check_toolchain, install_hint, RuntimeInfo};
pub use process::{CommandRunner, Invocation, ProcessOutput, SystemRunner};
pub use tool::Toolchain;
