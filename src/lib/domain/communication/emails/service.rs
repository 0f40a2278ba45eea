//! Email service

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::error;

use crate::domain::communication::{
    emails::{errors::EmailError, EmailMessage},
    mailer::Mailer,
    templates::TemplateRenderer,
};

/// Email service
#[async_trait]
pub trait EmailService: Clone + Send + Sync + 'static {
    /// Renders the named template and sends the result to a single
    /// recipient.
    ///
    /// # Arguments
    /// * `to` - The address the email is sent to.
    /// * `subject` - The subject of the email.
    /// * `template` - Name of the content template to render.
    /// * `layout` - Name of the layout the content is wrapped in.
    /// * `data` - Key-value mapping exposed to the templates.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] on success, or an [`EmailError`]
    /// identifying whether the build or the send stage failed.
    async fn send_templated(
        &self,
        to: &str,
        subject: &str,
        template: &str,
        layout: &str,
        data: &Value,
    ) -> Result<(), EmailError>;

    /// Sends a prebuilt message, bypassing template rendering.
    ///
    /// # Arguments
    /// * `message` - The [`EmailMessage`] to send.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure.
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError>;
}

/// Email service implementation
#[derive(Debug, Clone)]
pub struct EmailServiceImpl<T, M>
where
    T: TemplateRenderer,
    M: Mailer,
{
    renderer: Arc<T>,
    mailer: Arc<M>,
}

impl<T, M> EmailServiceImpl<T, M>
where
    T: TemplateRenderer,
    M: Mailer,
{
    /// Creates a new email service.
    pub fn new(renderer: Arc<T>, mailer: Arc<M>) -> Self {
        Self { renderer, mailer }
    }
}

#[async_trait]
impl<T, M> EmailService for EmailServiceImpl<T, M>
where
    T: TemplateRenderer,
    M: Mailer,
{
    async fn send_templated(
        &self,
        to: &str,
        subject: &str,
        template: &str,
        layout: &str,
        data: &Value,
    ) -> Result<(), EmailError> {
        let body = self.renderer.render(template, layout, data)?;

        let message = EmailMessage::new(vec![to.to_string()], subject, &body);

        self.send(message).await
    }

    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if let Err(err) = self.mailer.send(&message).await {
            error!("error sending email: {err}");

            return Err(err.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::domain::communication::{
        emails::ValidationError,
        mailer::{errors::SendError, MockMailer},
        templates::{MockTemplateRenderer, TemplateError},
    };

    use super::*;

    #[tokio::test]
    async fn test_send_templated_renders_and_sends() -> TestResult {
        let mut renderer = MockTemplateRenderer::new();

        renderer
            .expect_render()
            .times(1)
            .withf(|template, layout, _| {
                template == "emails/notification.html" && layout == "emails/layouts/base.html"
            })
            .returning(|_, _, _| Ok("<p>rendered</p>".to_string()));

        let mut mailer = MockMailer::new();

        mailer
            .expect_send()
            .times(1)
            .withf(|message| {
                message.recipients == vec!["a@x.com".to_string()]
                    && message.subject == "Hi"
                    && message.body == "<p>rendered</p>"
            })
            .returning(|_| Ok(()));

        let service = EmailServiceImpl::new(Arc::new(renderer), Arc::new(mailer));

        service
            .send_templated(
                "a@x.com",
                "Hi",
                "emails/notification.html",
                "emails/layouts/base.html",
                &json!({ "message": "hello" }),
            )
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_send_templated_render_failure_is_a_build_error() -> TestResult {
        let mut renderer = MockTemplateRenderer::new();

        renderer.expect_render().times(1).returning(|_, _, _| {
            Err(TemplateError::Render {
                name: "emails/notification.html".to_string(),
                source: tera::Error::msg("template not found"),
            })
        });

        let mut mailer = MockMailer::new();

        mailer.expect_send().times(0);

        let service = EmailServiceImpl::new(Arc::new(renderer), Arc::new(mailer));

        let result = service
            .send_templated(
                "a@x.com",
                "Hi",
                "emails/notification.html",
                "emails/layouts/base.html",
                &json!({}),
            )
            .await;

        assert!(matches!(result.unwrap_err(), EmailError::Build(_)));

        Ok(())
    }

    #[tokio::test]
    async fn test_send_failure_is_a_send_error() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(SendError::Validation(ValidationError::MissingSubject)));

        let service =
            EmailServiceImpl::new(Arc::new(MockTemplateRenderer::new()), Arc::new(mailer));

        let result = service
            .send(EmailMessage::new(vec!["a@x.com".to_string()], "", "body"))
            .await;

        assert!(matches!(result.unwrap_err(), EmailError::Send(_)));

        Ok(())
    }

    #[tokio::test]
    async fn test_send_passes_the_message_through_unchanged() -> TestResult {
        let message = EmailMessage::new(
            vec!["a@x.com".to_string(), "b@x.com".to_string()],
            "Hi",
            "<p>hello</p>",
        );

        let expected = message.clone();

        let mut mailer = MockMailer::new();

        mailer
            .expect_send()
            .times(1)
            .withf(move |sent| *sent == expected)
            .returning(|_| Ok(()));

        let service =
            EmailServiceImpl::new(Arc::new(MockTemplateRenderer::new()), Arc::new(mailer));

        service.send(message).await?;

        Ok(())
    }
}
