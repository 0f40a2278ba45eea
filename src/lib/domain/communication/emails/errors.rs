//! Email service errors

use thiserror::Error;
use tracing::debug;

use crate::domain::communication::{mailer::errors::SendError, templates::TemplateError};

/// An error returned by the email service, identifying the failing stage
#[derive(Debug, Error)]
pub enum EmailError {
    /// The message could not be built
    #[error("error building the email request")]
    Build(#[source] TemplateError),

    /// The message could not be delivered
    #[error("error sending the email")]
    Send(#[source] SendError),
}

impl From<TemplateError> for EmailError {
    fn from(err: TemplateError) -> Self {
        debug!("TemplateError -> EmailError");

        EmailError::Build(err)
    }
}

impl From<SendError> for EmailError {
    fn from(err: SendError) -> Self {
        debug!("SendError -> EmailError");

        EmailError::Send(err)
    }
}
