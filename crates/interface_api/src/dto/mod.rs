//! Request and response data transfer objects

pub mod billing;
pub mod client;
pub mod content;
pub mod session;
