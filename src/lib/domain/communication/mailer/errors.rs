//! Mail transport errors

use lettre::{address::AddressError, transport::smtp::Error as SmtpError};
use thiserror::Error;

use crate::domain::communication::emails::ValidationError;

/// An error from a single step of the send pipeline.
///
/// Each variant is a distinct failure site; a failure at any step aborts
/// the whole send, and nothing is retried.
#[derive(Debug, Error)]
pub enum SendError {
    /// The message failed validation; no network activity took place
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The configured envelope sender is not a usable address
    #[error("invalid sender address {address:?}")]
    SenderAddress {
        /// The rejected address
        address: String,

        /// The parse failure
        source: AddressError,
    },

    /// The recipient is not a usable address
    #[error("invalid recipient address {address:?}")]
    RecipientAddress {
        /// The rejected address
        address: String,

        /// The parse failure
        source: AddressError,
    },

    /// The TLS connection to the server could not be established
    #[error("failed to connect to the server")]
    Connect(#[source] SmtpError),

    /// The server rejected the SMTP session before authentication
    #[error("failed to create the SMTP client")]
    Session(#[source] SmtpError),

    /// The server rejected the credentials
    #[error("failed to authenticate")]
    Authentication(#[source] SmtpError),

    /// The server rejected the MAIL command
    #[error("failed to set the sender")]
    Sender(#[source] SmtpError),

    /// The server rejected the RCPT command
    #[error("failed to set the recipient")]
    Recipient(#[source] SmtpError),

    /// The server refused to open the data stream
    #[error("failed to open the data stream")]
    DataStream(#[source] SmtpError),

    /// The message payload could not be written to the stream
    #[error("failed to write the message")]
    Write(#[source] SmtpError),

    /// The server rejected the message at the end-of-data marker
    #[error("failed to close the data stream")]
    Finalize(#[source] SmtpError),
}
