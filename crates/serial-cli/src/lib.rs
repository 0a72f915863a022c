//! Library side of the `serial-recon` command.

pub mod config;
pub mod export;
pub mod logging;
pub mod report;
