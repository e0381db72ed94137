//! CLI argument parsing and configuration loading.

mod args;
mod config;

pub use args::{Args, VERSION};
pub use config::Settings;

#[cfg(test)]
pub use config::FileConfig;
