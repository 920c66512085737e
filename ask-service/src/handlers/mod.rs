//! HTTP handlers for the ask service.

pub mod ask;
pub mod health;

pub use ask::{ask, method_not_allowed};
pub use health::{health_check, readiness_check};
