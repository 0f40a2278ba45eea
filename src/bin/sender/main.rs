#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Command-line transactional email sender

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use mailroom::{
    domain::communication::emails::{EmailMessage, EmailService, EmailServiceImpl},
    infrastructure::{
        email::smtp::{SMTPConfig, SMTPMailer},
        templates::tera::{TemplateConfig, TeraRenderer},
    },
};
use serde_json::Value;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The mail server configuration
    #[clap(flatten)]
    pub smtp: SMTPConfig,

    /// The template environment configuration
    #[clap(flatten)]
    pub templates: TemplateConfig,

    /// The recipient address
    #[clap(long)]
    pub to: String,

    /// The subject line
    #[clap(long)]
    pub subject: String,

    /// A literal HTML body
    #[clap(long, conflicts_with = "template")]
    pub body: Option<String>,

    /// The name of the content template to render instead of a literal body
    #[clap(long)]
    pub template: Option<String>,

    /// The name of the layout the content template is wrapped in
    #[clap(long, default_value = "emails/layouts/base.html")]
    pub layout: String,

    /// A JSON object exposed to the templates
    #[clap(long, default_value = "{}")]
    pub data: String,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Failed to load environment: {}", e);

        return Err(e.into());
    }

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let renderer = TeraRenderer::new(&args.templates)?;
    let mailer = SMTPMailer::new(args.smtp);
    let service = EmailServiceImpl::new(Arc::new(renderer), Arc::new(mailer));

    match (&args.body, &args.template) {
        (Some(body), _) => {
            service
                .send(EmailMessage::new(
                    vec![args.to.clone()],
                    &args.subject,
                    body,
                ))
                .await?;
        }
        (None, Some(template)) => {
            let data: Value = serde_json::from_str(&args.data)?;

            service
                .send_templated(&args.to, &args.subject, template, &args.layout, &data)
                .await?;
        }
        (None, None) => anyhow::bail!("either --body or --template is required"),
    }

    println!("email sent to {}", args.to);

    Ok(())
}
