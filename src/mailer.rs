//! EmailJS relay client for the contact form.
//!
//! The four form fields are sent as template params; the relay answers with
//! a plain "OK" on success. Single attempt, no retries.

use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::header::USER_AGENT;
use serde::Serialize;
use tracing::{info, instrument};

use crate::domain::ContactForm;

const DEFAULT_BASE_URL: &str = "https://api.emailjs.com";

#[derive(Clone)]
pub struct Mailer {
  pub client: reqwest::Client,
  pub base_url: String,
  pub service_id: String,
  pub template_id: String,
  pub public_key: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
  service_id: &'a str,
  template_id: &'a str,
  user_id: &'a str,
  template_params: &'a ContactForm,
}

impl Mailer {
  /// Construct the client when all three EMAILJS_* credentials are set.
  pub fn from_env() -> Option<Self> {
    let service_id = std::env::var("EMAILJS_SERVICE_ID").ok()?;
    let template_id = std::env::var("EMAILJS_TEMPLATE_ID").ok()?;
    let public_key = std::env::var("EMAILJS_PUBLIC_KEY").ok()?;
    let base_url = std::env::var("EMAILJS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
    Self::new(base_url, service_id, template_id, public_key).ok()
  }

  pub fn new(
    base_url: impl Into<String>,
    service_id: impl Into<String>,
    template_id: impl Into<String>,
    public_key: impl Into<String>,
  ) -> anyhow::Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(15))
      .build()
      .context("building HTTP client")?;
    Ok(Self {
      client,
      base_url: base_url.into().trim_end_matches('/').to_string(),
      service_id: service_id.into(),
      template_id: template_id.into(),
      public_key: public_key.into(),
    })
  }

  #[instrument(level = "info", skip(self, form), fields(service = %self.service_id, message_len = form.message.len()))]
  pub async fn send(&self, form: &ContactForm) -> anyhow::Result<()> {
    let url = format!("{}/api/v1.0/email/send", self.base_url);
    let req = SendRequest {
      service_id: &self.service_id,
      template_id: &self.template_id,
      user_id: &self.public_key,
      template_params: form,
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "portfolio-backend/0.1")
      .json(&req).send().await.context("sending email relay request")?;

    let status = res.status();
    if !status.is_success() {
      let body = res.text().await.unwrap_or_default();
      bail!("EmailJS HTTP {}: {}", status, crate::util::trunc_for_log(&body, 200));
    }
    info!(%status, "Contact message relayed");
    Ok(())
  }
}
