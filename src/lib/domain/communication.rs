//! Outbound communication module

pub mod emails;
pub mod mailer;
pub mod templates;
