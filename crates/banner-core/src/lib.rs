//! Core notification pipeline types: the request value and the bounded
//! admission queue shared by every ingestion path.
//!
//! This crate has no dependency on sockets, timers, or the display layer;
//! it is used by the daemon and by any tooling that builds requests.

pub mod queue;
pub mod request;

pub use queue::AdmissionQueue;
pub use request::{BannerPosition, NotificationRequest, VisualHints};

#[cfg(test)]
mod tests;
