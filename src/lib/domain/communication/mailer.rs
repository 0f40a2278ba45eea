//! Mail transport module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::emails::EmailMessage;

pub mod errors;

use errors::SendError;

/// Mail transport
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Deliver a message
    ///
    /// # Arguments
    /// * `message` - The [`EmailMessage`] to deliver.
    ///
    /// # Returns
    /// A [`Result`] indicating success or the [`SendError`] of the step
    /// that failed.
    async fn send(&self, message: &EmailMessage) -> Result<(), SendError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(&self, message: &EmailMessage) -> Result<(), SendError>;
    }
}
