//! Outgoing email message

use thiserror::Error;

use ValidationError::*;

/// An error that can occur when validating an outgoing message
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The subject is empty
    #[error("subject is required")]
    MissingSubject,

    /// The body is empty
    #[error("body is required")]
    MissingBody,

    /// The recipient list is empty
    #[error("receiving email is empty")]
    NoRecipients,

    /// A recipient entry is an empty string
    #[error("receiving email at position {position} is empty")]
    EmptyRecipient {
        /// Position of the offending entry in the recipient list
        position: usize,
    },

    /// A recipient entry does not look like an email address
    #[error("receiving email {address:?} at position {position} is invalid")]
    InvalidRecipient {
        /// Position of the offending entry in the recipient list
        position: usize,

        /// The offending entry
        address: String,
    },
}

/// An outgoing email message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    /// The recipients of the email
    pub recipients: Vec<String>,

    /// The subject of the email
    pub subject: String,

    /// The HTML body of the email
    pub body: String,
}

impl EmailMessage {
    /// Creates a new message from literal parts.
    pub fn new(recipients: Vec<String>, subject: &str, body: &str) -> Self {
        Self {
            recipients,
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }

    /// The address the message is delivered to.
    ///
    /// Only the first listed recipient is addressed on the wire.
    pub fn first_recipient(&self) -> Option<&str> {
        self.recipients.first().map(String::as_str)
    }

    /// Validates the message before it is handed to a transport.
    ///
    /// Conditions are checked in order: missing subject, missing body,
    /// empty recipient list, empty recipient entry, recipient entry
    /// without an `@`. The address check is deliberately weak; full
    /// RFC 5322 validation is the mail server's problem.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subject.is_empty() {
            return Err(MissingSubject);
        }

        if self.body.is_empty() {
            return Err(MissingBody);
        }

        if self.recipients.is_empty() {
            return Err(NoRecipients);
        }

        for (position, address) in self.recipients.iter().enumerate() {
            if address.is_empty() {
                return Err(EmptyRecipient { position });
            }

            if !address.contains('@') {
                return Err(InvalidRecipient {
                    position,
                    address: address.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn message() -> EmailMessage {
        EmailMessage::new(
            vec!["a@x.com".to_string(), "b@x.com".to_string()],
            "Hi",
            "<p>hello</p>",
        )
    }

    #[test]
    fn test_valid_message_passes_validation() -> TestResult {
        message().validate()?;

        Ok(())
    }

    #[test]
    fn test_missing_subject_is_reported_first() {
        let mut message = message();
        message.subject = String::new();
        message.body = String::new();
        message.recipients = vec![];

        assert_eq!(message.validate().unwrap_err(), MissingSubject);
    }

    #[test]
    fn test_missing_body_is_invalid() {
        let mut message = message();
        message.body = String::new();

        assert_eq!(message.validate().unwrap_err(), MissingBody);
    }

    #[test]
    fn test_empty_recipient_list_is_invalid() {
        let mut message = message();
        message.recipients = vec![];

        assert_eq!(message.validate().unwrap_err(), NoRecipients);
    }

    #[test]
    fn test_empty_recipient_entry_is_reported_by_position() {
        let mut message = message();
        message.recipients = vec!["a@x.com".to_string(), String::new()];

        assert_eq!(
            message.validate().unwrap_err(),
            EmptyRecipient { position: 1 }
        );
    }

    #[test]
    fn test_recipient_without_at_sign_is_reported_with_address() {
        let mut message = message();
        message.recipients = vec!["a@x.com".to_string(), "not-an-address".to_string()];

        assert_eq!(
            message.validate().unwrap_err(),
            InvalidRecipient {
                position: 1,
                address: "not-an-address".to_string(),
            }
        );
    }

    #[test]
    fn test_first_recipient() {
        assert_eq!(message().first_recipient(), Some("a@x.com"));

        let mut message = message();
        message.recipients = vec![];
        assert_eq!(message.first_recipient(), None);
    }
}
