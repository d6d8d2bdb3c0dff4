mod config;
mod preferences;

pub use config::*;
pub use preferences::*;
