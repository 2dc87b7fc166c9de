//! Shared utilities for stock-insight
//!
//! Logging setup and environment handling used by the binaries and the
//! domain crate's configuration layer.

pub mod config;
pub mod logging;

pub use config::{env_opt, env_or, load_dotenv};
pub use logging::{init_tracing, init_tracing_with};
