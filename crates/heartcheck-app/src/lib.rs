//! HeartCheck application
//!
//! The interactive form server and the command-line front end. Both run the
//! same cycle: take the thirteen inputs, use the process-wide cached
//! classifier, and show the label, the probability and the exact record.

pub mod catalogue;
pub mod cli;
pub mod config;
pub mod evaluate;
pub mod server;
pub mod state;

pub use cli::*;
pub use config::{AppConfig, ConfigOverrides, ListenConfig};
pub use evaluate::{evaluate, Outcome};
pub use server::*;
pub use state::*;
