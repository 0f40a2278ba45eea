//! Outgoing email module.

mod message;
mod service;

pub mod errors;

pub use message::{EmailMessage, ValidationError};
pub use service::{EmailService, EmailServiceImpl};
