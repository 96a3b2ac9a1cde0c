// Library root for the tradewise binary: configuration, argument parsing,
// command handlers and report rendering, exposed for integration tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod report;
