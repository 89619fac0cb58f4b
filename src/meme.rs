//! Imgflip caption client. Failures here never abort a comparison: callers
//! go through [`caption_or_none`], which degrades to "no meme available".

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::MemePrompt;

const CAPTION_ENDPOINT: &str = "https://api.imgflip.com/caption_image";

#[derive(Debug, Clone)]
pub struct MemeImage {
    pub image_url: String,
    pub page_url: String,
}

#[async_trait]
pub trait CaptionService: Send + Sync {
    async fn caption(&self, prompt: &MemePrompt) -> Result<MemeImage>;
}

pub struct ImgflipClient {
    client: Client,
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct ImgflipResponse {
    success: bool,
    data: Option<ImgflipData>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct ImgflipData {
    url: String,
    page_url: String,
}

impl ImgflipClient {
    pub fn new(username: String, password: String) -> Self {
        Self {
            client: Client::new(),
            username,
            password,
        }
    }

    /// `None` when either credential is missing.
    pub fn from_credentials(username: Option<String>, password: Option<String>) -> Option<Self> {
        Some(Self::new(username?, password?))
    }
}

#[async_trait]
impl CaptionService for ImgflipClient {
    async fn caption(&self, prompt: &MemePrompt) -> Result<MemeImage> {
        let params = [
            ("template_id", prompt.template_id.as_str()),
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
            ("text0", prompt.top_text.as_str()),
            ("text1", prompt.bottom_text.as_str()),
        ];

        let response = self
            .client
            .post(CAPTION_ENDPOINT)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UpstreamApi { status, body });
        }

        let result: ImgflipResponse = response.json().await?;
        if !result.success {
            return Err(Error::UpstreamApi {
                status: 200,
                body: result
                    .error_message
                    .unwrap_or_else(|| "caption request rejected".to_string()),
            });
        }

        let data = result.data.ok_or_else(|| Error::UpstreamApi {
            status: 200,
            body: "caption response missing data".to_string(),
        })?;

        Ok(MemeImage {
            image_url: data.url,
            page_url: data.page_url,
        })
    }
}

/// Renders the prompt if a service is configured, swallowing any failure.
pub async fn caption_or_none(
    service: Option<&dyn CaptionService>,
    prompt: &MemePrompt,
) -> Option<MemeImage> {
    match service {
        None => {
            tracing::debug!("No caption service configured, skipping meme render");
            None
        }
        Some(service) => match service.caption(prompt).await {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!("Caption service failed, continuing without meme: {}", e);
                None
            }
        },
    }
}
