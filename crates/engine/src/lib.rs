pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod sink;
pub mod stages;
