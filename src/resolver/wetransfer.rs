//! WeTransfer resolver for `wetransfer.com` transfer pages and `we.tl` short links.
//!
//! Resolution takes three requests on one cookie session:
//! 1. fetch the transfer page (following short-link redirects) to learn the
//!    transfer id and security hash, and pick up session cookies and the CSRF token
//! 2. ask the download API for a direct link, submitting the password if given
//! 3. open the direct link; its body becomes the [`FileBody`]

use std::sync::Arc;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use reqwest::cookie::Jar;
use reqwest::header::{ACCEPT, CONTENT_DISPOSITION};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::config::DEFAULT_BASE_URL;
use crate::download::{FileBody, parse_content_disposition};

use super::http_client::{ResolverHttpTimeouts, build_resolver_http_client};
use super::utils::{compile_static_regex, extract_meta_value, host_within, hosts_match};
use super::{Resolution, ResolveError, ResolvedFile, Resolver};

const TRANSFER_DOMAIN: &str = "wetransfer.com";
const SHORT_LINK_HOST: &str = "we.tl";
const DOWNLOAD_INTENT: &str = "entire_transfer";

static CSRF_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r#"(?is)<meta\s+[^>]*name\s*=\s*["']csrf-token["'][^>]*content\s*=\s*["']([^"']+)["']"#,
    )
});

/// Identifies one transfer, as encoded in the transfer page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TransferRef {
    transfer_id: String,
    recipient_id: Option<String>,
    security_hash: String,
}

#[derive(Debug, Serialize)]
struct DownloadApiRequest<'a> {
    security_hash: &'a str,
    intent: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipient_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
struct DownloadApiResponse {
    #[serde(default)]
    direct_link: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Resolver for WeTransfer links.
pub struct WeTransferResolver {
    base_url: Url,
    base_host: String,
    timeouts: ResolverHttpTimeouts,
}

impl WeTransferResolver {
    /// Creates a resolver talking to the public WeTransfer endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the built-in base URL cannot be parsed.
    pub fn new(timeouts: ResolverHttpTimeouts) -> Result<Self, ResolveError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeouts)
    }

    /// Creates a resolver with a custom API base URL (for tests and mirrors).
    ///
    /// Links on the base URL's host are accepted in addition to the
    /// WeTransfer hosts.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Client`] when `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeouts: ResolverHttpTimeouts,
    ) -> Result<Self, ResolveError> {
        let base_url = Url::parse(base_url)
            .map_err(|error| ResolveError::client(format!("invalid base URL '{base_url}': {error}")))?;
        let base_host = base_url.host_str().unwrap_or_default().to_string();
        Ok(Self {
            base_url,
            base_host,
            timeouts,
        })
    }

    fn parse_link(&self, input: &str) -> Result<Url, ResolveError> {
        let url = Url::parse(input.trim())
            .map_err(|_| ResolveError::invalid_link(input, "not a valid URL"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ResolveError::invalid_link(input, "only http and https links are supported"));
        }
        let Some(host) = url.host_str() else {
            return Err(ResolveError::invalid_link(input, "link has no host"));
        };
        if !self.is_transfer_host(host) {
            return Err(ResolveError::invalid_link(input, "not a WeTransfer link"));
        }
        Ok(url)
    }

    fn is_transfer_host(&self, host: &str) -> bool {
        host_within(host, TRANSFER_DOMAIN)
            || hosts_match(host, SHORT_LINK_HOST)
            || (!self.base_host.is_empty() && hosts_match(host, &self.base_host))
    }

    fn download_api_url(&self, transfer_id: &str) -> Result<Url, ResolveError> {
        self.base_url
            .join(&format!("/api/v4/transfers/{transfer_id}/download"))
            .map_err(|error| ResolveError::client(format!("invalid download API URL: {error}")))
    }

    async fn open_transfer_page(
        &self,
        client: &Client,
        link: &Url,
    ) -> Result<(TransferRef, Option<String>), ResolveError> {
        let response = client
            .get(link.clone())
            .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|error| ResolveError::network(link.as_str(), error))?;

        let status = response.status();
        let page_url = response.url().clone();
        if !status.is_success() {
            return Err(ResolveError::http_status(page_url.as_str(), status.as_u16()));
        }

        let transfer = parse_transfer_path(&page_url).ok_or_else(|| {
            ResolveError::invalid_link(link.as_str(), "link does not point to a transfer")
        })?;
        let html = response
            .text()
            .await
            .map_err(|error| ResolveError::network(page_url.as_str(), error))?;
        let csrf_token = extract_meta_value(&html, &CSRF_TOKEN_RE);

        debug!(
            transfer_id = %transfer.transfer_id,
            has_recipient = transfer.recipient_id.is_some(),
            has_csrf_token = csrf_token.is_some(),
            "transfer page parsed"
        );
        Ok((transfer, csrf_token))
    }

    async fn request_direct_link(
        &self,
        client: &Client,
        transfer: &TransferRef,
        csrf_token: Option<&str>,
        password: Option<&str>,
    ) -> Result<String, ResolveError> {
        let api_url = self.download_api_url(&transfer.transfer_id)?;
        let payload = DownloadApiRequest {
            security_hash: &transfer.security_hash,
            intent: DOWNLOAD_INTENT,
            recipient_id: transfer.recipient_id.as_deref(),
            password,
        };

        let mut request = client
            .post(api_url.clone())
            .header("X-Requested-With", "XMLHttpRequest")
            .json(&payload);
        if let Some(token) = csrf_token {
            request = request.header("X-CSRF-Token", token);
        }

        let response = request
            .send()
            .await
            .map_err(|error| ResolveError::network(api_url.as_str(), error))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|error| ResolveError::network(api_url.as_str(), error))?;
        let reply: DownloadApiResponse = serde_json::from_str(&text).unwrap_or_default();

        if status.is_success()
            && let Some(link) = reply.direct_link.filter(|link| !link.is_empty())
        {
            return Ok(link);
        }
        if let Some(message) = reply
            .error
            .or(reply.message)
            .filter(|message| !message.is_empty())
        {
            return Err(ResolveError::rejected(message));
        }
        if !status.is_success() {
            return Err(ResolveError::http_status(api_url.as_str(), status.as_u16()));
        }
        Err(ResolveError::missing_direct_link(&transfer.transfer_id))
    }
}

impl std::fmt::Debug for WeTransferResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeTransferResolver")
            .field("base_url", &self.base_url.as_str())
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Resolver for WeTransferResolver {
    fn name(&self) -> &'static str {
        "wetransfer"
    }

    #[tracing::instrument(skip(self, password), fields(resolver = "wetransfer", has_password = password.is_some()))]
    async fn resolve(
        &self,
        source_url: &str,
        password: Option<&str>,
    ) -> Result<Resolution, ResolveError> {
        let link = self.parse_link(source_url)?;
        let client = build_resolver_http_client(self.timeouts, Arc::new(Jar::default()))?;

        let (transfer, csrf_token) = self.open_transfer_page(&client, &link).await?;
        let direct_url = self
            .request_direct_link(&client, &transfer, csrf_token.as_deref(), password)
            .await?;

        let response = client
            .get(&direct_url)
            .send()
            .await
            .map_err(|error| ResolveError::network(direct_url.as_str(), error))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::http_status(direct_url, status.as_u16()));
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_disposition)
            .unwrap_or_default();
        let file = ResolvedFile {
            final_url: response.url().to_string(),
            filename,
            size: response.content_length().unwrap_or(0),
            direct_url,
        };

        info!(
            transfer_id = %transfer.transfer_id,
            filename = %file.filename,
            size = file.size,
            "transfer resolved"
        );
        Ok(Resolution::new(FileBody::from_response(response), file))
    }
}

/// Extracts transfer identifiers from `/downloads/{id}/{hash}` or
/// `/downloads/{id}/{recipient}/{hash}`.
fn parse_transfer_path(url: &Url) -> Option<TransferRef> {
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["downloads", transfer_id, security_hash] => Some(TransferRef {
            transfer_id: (*transfer_id).to_string(),
            recipient_id: None,
            security_hash: (*security_hash).to_string(),
        }),
        ["downloads", transfer_id, recipient_id, security_hash] => Some(TransferRef {
            transfer_id: (*transfer_id).to_string(),
            recipient_id: Some((*recipient_id).to_string()),
            security_hash: (*security_hash).to_string(),
        }),
        _ => None,
    }
}
