//! Page behaviors for a static portfolio site, independent of any browser
//! binding. Components take sampled page state or events and return the
//! [`DomCommand`](portfolio_fx_protocol::DomCommand)s the host should apply.

pub mod bootstrap;
pub mod config;
pub mod effects;
pub mod model;
pub mod monitor;
pub mod timing;

pub use bootstrap::{ComponentPlan, HostEnvironment, plan};
pub use config::{ConfigError, PageConfig};
