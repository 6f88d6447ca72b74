use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Where a design comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Figma file URL, fetched through the REST API
    Figma,
    /// Local JSON export of a node
    File,
}

#[derive(Debug, Clone)]
pub struct ParsedResource {
    pub kind: ResourceKind,
    pub value: String,
    pub figma_info: Option<FigmaInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigmaInfo {
    pub file_key: String,
    pub node_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum ResourceParseError {
    #[error("Invalid URL '{value}': {message}. Hint: include http(s):// and ensure the URL is well-formed.")]
    InvalidUrl { value: String, message: String },
    #[error("Figma URL missing file key in '{url}'. Hint: use https://www.figma.com/design/<FILE_KEY>/... with a node-id.")]
    FigmaMissingFileKey { url: String },
    #[error("Unsupported URL '{url}'. Hint: only figma.com file/design URLs can be fetched.")]
    UnsupportedUrl { url: String },
    #[error("Local file not found: {path}. Hint: check the path relative to the current working directory or use an absolute path.")]
    FileNotFound { path: String },
    #[error("Unsupported file extension '{extension}'. Supported extensions: {supported}.")]
    UnsupportedExtension {
        extension: String,
        supported: String,
    },
}

const FILE_EXTENSIONS: &[&str] = &["json"];

pub fn parse_resource(
    value: &str,
    override_type: Option<ResourceKind>,
) -> Result<ParsedResource, ResourceParseError> {
    match override_type {
        Some(ResourceKind::Figma) => {
            let figma_info = parse_figma_url(value)?;
            return Ok(ParsedResource {
                kind: ResourceKind::Figma,
                value: value.to_string(),
                figma_info: Some(figma_info),
            });
        }
        Some(ResourceKind::File) => {
            ensure_file_exists(Path::new(value))?;
            return Ok(ParsedResource {
                kind: ResourceKind::File,
                value: value.to_string(),
                figma_info: None,
            });
        }
        None => {}
    }

    if value.starts_with("http://") || value.starts_with("https://") {
        parse_url_resource(value)
    } else {
        parse_local_resource(value)
    }
}

fn parse_url_resource(value: &str) -> Result<ParsedResource, ResourceParseError> {
    let url = Url::parse(value).map_err(|e| ResourceParseError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    let host = url.host_str().unwrap_or("");
    if !host.contains("figma.com") {
        return Err(ResourceParseError::UnsupportedUrl {
            url: value.to_string(),
        });
    }

    let figma_info = parse_figma_url(value)?;
    Ok(ParsedResource {
        kind: ResourceKind::Figma,
        value: value.to_string(),
        figma_info: Some(figma_info),
    })
}

/// File key and node id (`1-2` normalized to `1:2`) from a Figma URL.
pub fn parse_figma_url(value: &str) -> Result<FigmaInfo, ResourceParseError> {
    let url = Url::parse(value).map_err(|e| ResourceParseError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    let path_segments: Vec<&str> = url.path_segments().map(|c| c.collect()).unwrap_or_default();

    let file_key = path_segments
        .iter()
        .position(|&s| s == "file" || s == "design")
        .and_then(|i| path_segments.get(i + 1))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| ResourceParseError::FigmaMissingFileKey {
            url: value.to_string(),
        })?;

    let node_id = url
        .query_pairs()
        .find(|(k, _)| k == "node-id")
        .map(|(_, v)| v.replace('-', ":"))
        .filter(|v| !v.is_empty());

    Ok(FigmaInfo { file_key, node_id })
}

fn parse_local_resource(value: &str) -> Result<ParsedResource, ResourceParseError> {
    let path = Path::new(value);

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !FILE_EXTENSIONS.contains(&extension.as_str()) {
        let extension = if extension.is_empty() {
            "no extension".to_string()
        } else {
            extension
        };
        return Err(ResourceParseError::UnsupportedExtension {
            extension,
            supported: FILE_EXTENSIONS.join(", "),
        });
    }

    ensure_file_exists(path)?;

    Ok(ParsedResource {
        kind: ResourceKind::File,
        value: value.to_string(),
        figma_info: None,
    })
}

fn ensure_file_exists(path: &Path) -> Result<(), ResourceParseError> {
    let not_found = || ResourceParseError::FileNotFound {
        path: path.to_string_lossy().into_owned(),
    };
    let metadata = fs::metadata(path).map_err(|_| not_found())?;
    if !metadata.is_file() {
        return Err(not_found());
    }
    Ok(())
}
