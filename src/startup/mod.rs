//! Startup wiring with dependency injection.
//!
//! # Components
//!
//! - [`config`] - Client configuration, from builders or the environment
//! - [`services`] - Assembly of the session core and its background tasks
//!
//! # Usage
//!
//! ```ignore
//! use splitpay::startup::{ClientConfig, ClientServices};
//!
//! let config = ClientConfig::from_env()?;
//! let services = ClientServices::build(&config, google, push)?;
//! services.start().await;
//! ```

pub mod config;
pub mod services;

pub use config::ClientConfig;
pub use services::ClientServices;
