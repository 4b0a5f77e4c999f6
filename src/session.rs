// src/session.rs

use crate::{
    config::AppConfig,
    constants,
    error::*,
    extractor::courses::{login_rejected, parse_login_token},
    models::ContentMeta,
    ui,
};
use encoding_rs::Encoding;
use log::{debug, error, info, warn};
use reqwest::{Client, Response};
use std::sync::Arc;
use url::Url;

/// The one authenticated HTTP session of a run.
///
/// Cookies live in the client's store and are updated by every response.
/// All requests carry the configured browser user agent and follow redirects.
#[derive(Clone)]
pub struct LearnSession {
    client: Client,
    config: Arc<AppConfig>,
}

impl LearnSession {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .cookie_store(true)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Resolves a possibly relative href against the portal base URL.
    pub fn resolve(&self, href: &str) -> AppResult<Url> {
        Ok(self.config.base_url.join(href)?)
    }

    pub fn is_portal_url(&self, url: &Url) -> bool {
        url.origin() == self.config.base_url.origin()
    }

    /// Scrapes the login token from the landing page, posts the credentials
    /// and checks that the portal no longer shows the login form.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<()> {
        info!("Logging in as '{}'", username);
        let landing_page = self.fetch_text(&self.config.landing_path).await?;
        let token = parse_login_token(&landing_page)?;
        debug!("Login token found");

        let form = [
            ("username", username),
            ("password", password),
            ("logintoken", token.as_str()),
        ];
        let page = self.post_form(&self.config.login_path, &form).await?;
        if login_rejected(&page) {
            error!("Login rejected for '{}'", username);
            return Err(AppError::Authentication(
                "the portal rejected the username or password".into(),
            ));
        }
        info!("Login succeeded for '{}'", username);
        Ok(())
    }

    /// GETs a page and decodes it with the charset its response declares.
    pub async fn fetch_text(&self, url: &str) -> AppResult<String> {
        let res = self.fetch_response(url).await?;
        decode_response(res).await
    }

    /// POSTs URL-encoded form data and decodes the answer page.
    pub async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> AppResult<String> {
        let url = self.resolve(url)?;
        debug!("POST {}", url);
        let res = self.client.post(url).form(form).send().await?.error_for_status()?;
        decode_response(res).await
    }

    /// Raw response, body still unread. Non-2xx statuses are errors.
    pub async fn fetch_response(&self, url: &str) -> AppResult<Response> {
        let url = self.resolve(url)?;
        debug!("GET {}", url);
        let res = self.client.get(url).send().await?;
        Ok(res.error_for_status()?)
    }

    /// Headers of a GET; the body is dropped unread.
    pub async fn fetch_headers(&self, url: &str) -> AppResult<ContentMeta> {
        let res = self.fetch_response(url).await?;
        let meta = ContentMeta::from_headers(res.headers());
        debug!("Headers of {}: {:?}", res.url(), meta);
        Ok(meta)
    }
}

async fn decode_response(res: Response) -> AppResult<String> {
    let url = res.url().to_string();
    let meta = ContentMeta::from_headers(res.headers());
    let bytes = res.bytes().await?;
    decode_body(&url, meta.charset.as_deref(), &bytes)
}

/// Strict decoding: malformed input is an error, never replaced.
pub(crate) fn decode_body(url: &str, charset: Option<&str>, bytes: &[u8]) -> AppResult<String> {
    let label = match charset {
        Some(label) => label,
        None => {
            warn!("No charset declared by {}, decoding as {}", url, constants::FALLBACK_ENCODING);
            ui::warn(&format!(
                "No character set declared by '{}', attempting to decode with {}.",
                url,
                constants::FALLBACK_ENCODING
            ));
            constants::FALLBACK_ENCODING
        }
    };

    let decode_error = || AppError::Decode {
        url: url.to_string(),
        encoding: label.to_string(),
    };
    let Some(encoding) = Encoding::for_label(label.trim().as_bytes()) else {
        error!("Unknown encoding '{}' declared by {}", label, url);
        return Err(decode_error());
    };
    match encoding.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => Ok(text.into_owned()),
        None => {
            error!(
                "Could not decode {} as {}. Raw bytes:\n{}",
                url,
                encoding.name(),
                String::from_utf8_lossy(bytes)
            );
            Err(decode_error())
        }
    }
}
