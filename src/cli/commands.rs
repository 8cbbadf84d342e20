//! CLI subcommands / CLI 子命令

pub mod init;
pub mod run;
