//! CLI subcommands.

pub mod init;
pub mod levels;
pub mod sync;
pub mod watch;
