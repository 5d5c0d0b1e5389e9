//! MSG91 email integration
//!
//! Thin client for the MSG91 transactional email API
//! (<https://docs.msg91.com/email>). Payloads are forwarded as given.

mod client;

pub use client::{EmailSender, Msg91Client, Msg91Config, Msg91Error};
