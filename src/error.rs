use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

/// Structural problem found by the pre-flight check.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("root node '{name}' ({node_id}) has nothing renderable: it is hidden or has no visible fills, strokes, effects, text or renderable children")]
    NoRenderableRoot { node_id: String, name: String },
}

/// Failure of one component generation run.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("Cannot generate component '{component}': {}", join_errors(.errors))]
    Validation {
        component: String,
        errors: Vec<ValidationError>,
    },

    #[error("Internal error while generating component '{component}': {message}")]
    Internal { component: String, message: String },
}

impl GenerationError {
    pub fn component(&self) -> &str {
        match self {
            GenerationError::Validation { component, .. }
            | GenerationError::Internal { component, .. } => component,
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum F2rnError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Figma API error (status: {status:?}): {message}")]
    FigmaApi {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl F2rnError {
    pub fn figma_api(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        F2rnError::FigmaApi {
            status,
            message: message.into(),
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            F2rnError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            F2rnError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check connectivity/proxy/VPN and retry.",
            ),
            F2rnError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify the Figma URL (e.g., https://www.figma.com/design/<FILE_KEY>/Name?node-id=1-2).",
            ),
            F2rnError::FigmaApi { status, message } => {
                let remediation = if *status == Some(StatusCode::TOO_MANY_REQUESTS) {
                    "Rate limited by Figma; lower --concurrency or raise --delay-ms and retry after waiting."
                } else if matches!(
                    status,
                    Some(StatusCode::FORBIDDEN) | Some(StatusCode::UNAUTHORIZED)
                ) {
                    "Check FIGMA_TOKEN (or FIGMA_OAUTH_TOKEN) and that it can read this file."
                } else {
                    "Check FIGMA_TOKEN/URL and rate limits; retry after waiting."
                };
                ErrorPayload::new(
                    ErrorCategory::Figma,
                    format!("Figma API error (status {:?}): {}", status, message),
                    remediation,
                )
            }
            F2rnError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check that the input is Figma node JSON (a node, a /nodes response, or a /files response).",
            ),
            F2rnError::Input(msg) => ErrorPayload::new(
                ErrorCategory::Input,
                msg.to_string(),
                "Check that the input is Figma node JSON (a node, a /nodes response, or a /files response).",
            ),
            F2rnError::Generation(GenerationError::Validation { .. }) => ErrorPayload::new(
                ErrorCategory::Generation,
                self.to_string(),
                "Select a visible node with content (fills, strokes, effects, text or visible children).",
            ),
            F2rnError::Generation(GenerationError::Internal { .. }) => ErrorPayload::new(
                ErrorCategory::Generation,
                self.to_string(),
                "Re-run with --verbose; file an issue with the input JSON if persistent.",
            ),
            F2rnError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("figma_token") || lower.contains("figma token") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set FIGMA_TOKEN (or FIGMA_OAUTH_TOKEN) before running Figma inputs.",
                    )
                } else if lower.contains("node-id") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Include a Figma node-id in the URL (e.g., ?node-id=1-2).",
                    )
                } else if lower.contains("file key") && lower.contains("figma") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a Figma URL with a file key: https://www.figma.com/design/<FILE_KEY>/... with node-id.",
                    )
                } else if lower.contains("unsupported file extension") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Pass a Figma URL or a local .json export of a node, or override with --input-type.",
                    )
                } else if lower.contains("file not found") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Verify the file exists; use an absolute path or run from the working directory.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths and the config file (--config).",
                    )
                }
            }
            F2rnError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, F2rnError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Network,
    Figma,
    Input,
    Generation,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_payload_uses_default_remediation_for_other_messages() {
        let err = F2rnError::Config("Some other config issue".to_string());
        let payload = err.to_payload();
        let remediation = payload.remediation.unwrap_or_default();
        assert!(
            remediation.contains("Check flags/paths"),
            "expected default remediation for generic config errors"
        );
    }

    #[test]
    fn config_payload_includes_figma_token_remediation() {
        let err = F2rnError::Config("FIGMA_TOKEN environment variable is required".to_string());
        let payload = err.to_payload();
        let remediation = payload.remediation.unwrap_or_default();
        assert!(
            remediation.contains("FIGMA_TOKEN"),
            "expected FIGMA token remediation, got: {remediation}"
        );
    }

    #[test]
    fn config_payload_includes_node_id_hint() {
        let err = F2rnError::Config("Figma URL missing node-id in query".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.to_ascii_lowercase().contains("node-id"),
            "expected node-id remediation, got: {remediation}"
        );
    }

    #[test]
    fn rate_limited_payload_suggests_slowing_down() {
        let err = F2rnError::figma_api(Some(StatusCode::TOO_MANY_REQUESTS), "slow down");
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Figma);
        assert!(payload
            .remediation
            .unwrap_or_default()
            .contains("--concurrency"));
    }

    #[test]
    fn validation_error_names_the_component() {
        let err: F2rnError = GenerationError::Validation {
            component: "LoginButton".into(),
            errors: vec![ValidationError::NoRenderableRoot {
                node_id: "1:2".into(),
                name: "Login Button".into(),
            }],
        }
        .into();

        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Generation);
        assert!(payload.message.contains("LoginButton"));
        assert!(payload.message.contains("1:2"));
    }

    #[test]
    fn generation_error_exposes_component_name() {
        let err = GenerationError::Internal {
            component: "Card".into(),
            message: "style missing".into(),
        };
        assert_eq!(err.component(), "Card");
        assert_eq!(
            err.to_string(),
            "Internal error while generating component 'Card': style missing"
        );
    }
}
