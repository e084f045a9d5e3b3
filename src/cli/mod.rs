//! Command-line front end: argument parsing, project files, console
//! reporting, output sinks and the generation driver.

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod sink;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod driver_tests;
#[cfg(test)]
#[path = "tests/sink_tests.rs"]
mod sink_tests;
