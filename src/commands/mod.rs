//! Session commands for trains

pub mod dispatch;
pub mod session;
