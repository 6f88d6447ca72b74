use crate::error::{F2rnError, Result};
use crate::types::DesignTree;
#[cfg(test)]
use reqwest::header::HeaderMap;
use reqwest::{header::RETRY_AFTER, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::api_types::{FigmaFileResponse, FigmaNodesResponse};
use super::conversion::{build_design_tree, select_from_file, select_from_nodes};

pub const DEFAULT_BASE_URL: &str = "https://api.figma.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub enum FigmaAuth {
    PersonalAccessToken(String),
    OAuthToken(String),
}

impl FigmaAuth {
    pub fn from_env() -> Option<Self> {
        if let Ok(token) = std::env::var("FIGMA_TOKEN") {
            if !token.is_empty() {
                return Some(Self::PersonalAccessToken(token));
            }
        }

        if let Ok(token) = std::env::var("FIGMA_OAUTH_TOKEN") {
            if !token.is_empty() {
                return Some(Self::OAuthToken(token));
            }
        }

        None
    }

    /// Like [`FigmaAuth::from_env`] but a missing token is a config error.
    pub fn require_from_env() -> Result<Self> {
        Self::from_env().ok_or_else(|| {
            F2rnError::Config(
                "FIGMA_TOKEN or FIGMA_OAUTH_TOKEN environment variable is required for Figma inputs"
                    .to_string(),
            )
        })
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            FigmaAuth::PersonalAccessToken(token) => builder.header("X-FIGMA-TOKEN", token),
            FigmaAuth::OAuthToken(token) => builder.bearer_auth(token),
        }
    }

    #[cfg(test)]
    fn apply_to_header_map(&self, headers: &mut HeaderMap) {
        match self {
            FigmaAuth::PersonalAccessToken(token) => {
                headers.insert("X-FIGMA-TOKEN", token.parse().unwrap());
            }
            FigmaAuth::OAuthToken(token) => {
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    format!("Bearer {token}").parse().unwrap(),
                );
            }
        }
    }
}

/// Thin client for the read-only Figma REST endpoints the generator needs.
#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: Client,
    auth: FigmaAuth,
    base_url: Url,
}

impl FigmaClient {
    pub fn new(auth: FigmaAuth) -> Result<Self> {
        Self::with_base_url_and_timeout(auth, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_base_url_and_timeout(
        auth: FigmaAuth,
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(F2rnError::Network)?;

        Ok(Self {
            http,
            auth,
            base_url,
        })
    }

    pub async fn fetch_file(&self, file_key: &str) -> Result<FigmaFileResponse> {
        let url = self.endpoint(&format!("/v1/files/{file_key}"))?;
        let req = self.auth.apply(self.http.get(url));
        self.send_json(req).await
    }

    pub async fn fetch_nodes(
        &self,
        file_key: &str,
        node_ids: &[String],
    ) -> Result<FigmaNodesResponse> {
        if node_ids.is_empty() {
            return Err(F2rnError::Config(
                "node_ids cannot be empty when fetching nodes from Figma".into(),
            ));
        }

        let mut url = self.endpoint(&format!("/v1/files/{file_key}/nodes"))?;
        url.query_pairs_mut().append_pair("ids", &node_ids.join(","));
        let req = self.auth.apply(self.http.get(url));
        self.send_json(req).await
    }

    /// Fetch one node (or the file's first page when `node_id` is `None`) as a tree.
    pub async fn fetch_design_tree(
        &self,
        file_key: &str,
        node_id: Option<&str>,
    ) -> Result<DesignTree> {
        let root = match node_id {
            Some(id) => {
                let response = self.fetch_nodes(file_key, &[id.to_string()]).await?;
                select_from_nodes(response, Some(id))?
            }
            None => select_from_file(self.fetch_file(file_key).await?),
        };
        Ok(build_design_tree(&root))
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(F2rnError::InvalidUrl)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(F2rnError::Network)?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            return serde_json::from_str(&body).map_err(F2rnError::Serialization);
        }

        Err(F2rnError::figma_api(
            Some(status),
            error_message(status, &body, retry_after.as_deref()),
        ))
    }
}

fn error_message(status: StatusCode, body: &str, retry_after: Option<&str>) -> String {
    let fallback = format!("Figma API returned status {}", status.as_u16());
    let parsed = serde_json::from_str::<Value>(body).ok();
    let from_body = parsed
        .as_ref()
        .and_then(|value| value.get("err").or_else(|| value.get("error")))
        .and_then(Value::as_str)
        .map(str::to_owned);

    match (status, retry_after, from_body) {
        (StatusCode::TOO_MANY_REQUESTS, Some(retry), Some(msg)) => {
            format!("{msg} (rate limited, retry after {retry}s)")
        }
        (StatusCode::TOO_MANY_REQUESTS, Some(retry), None) => {
            format!("rate limited by Figma API, retry after {retry}s")
        }
        (_, _, Some(msg)) => msg,
        _ => fallback,
    }
}
