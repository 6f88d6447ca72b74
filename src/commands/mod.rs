mod batch;
mod generate;

pub use batch::run_batch;
pub use generate::run_generate;

use std::path::{Path, PathBuf};

use f2rn_lib::{
    design_tree_from_str, parse_resource, DesignTree, F2rnError, FigmaAuth, FigmaClient,
    FigmaConfig, ParsedResource, ResourceKind, Result,
};
use tokio::sync::OnceCell;

/// Resolves inputs to design trees. The Figma client is built on first use.
pub struct DesignSource {
    figma_config: FigmaConfig,
    client: OnceCell<FigmaClient>,
}

impl DesignSource {
    pub fn new(figma_config: FigmaConfig) -> Self {
        Self {
            figma_config,
            client: OnceCell::new(),
        }
    }

    pub async fn load(&self, resource: &ParsedResource) -> Result<DesignTree> {
        match resource.kind {
            ResourceKind::File => {
                let json = tokio::fs::read_to_string(&resource.value).await?;
                design_tree_from_str(&json, None)
            }
            ResourceKind::Figma => {
                let info = resource.figma_info.as_ref().ok_or_else(|| {
                    F2rnError::Config(format!("Figma URL missing file key: {}", resource.value))
                })?;
                let client = self.client().await?;
                client
                    .fetch_design_tree(&info.file_key, info.node_id.as_deref())
                    .await
            }
        }
    }

    async fn client(&self) -> Result<&FigmaClient> {
        self.client
            .get_or_try_init(|| async {
                FigmaClient::with_base_url_and_timeout(
                    FigmaAuth::require_from_env()?,
                    &self.figma_config.base_url,
                    self.figma_config.timeout,
                )
            })
            .await
    }
}

pub fn parse_input(
    input: &str,
    override_type: Option<ResourceKind>,
) -> Result<ParsedResource> {
    parse_resource(input, override_type).map_err(|err| F2rnError::Config(err.to_string()))
}

/// `Card.tsx` -> `Card.test.tsx`, in the same directory.
pub fn sibling_test_path(component_path: &Path) -> PathBuf {
    let stem = component_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Component".to_string());
    component_path.with_file_name(format!("{stem}.test.tsx"))
}

/// Write `content` to `path`, creating parent directories.
pub fn write_source(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sibling_test_path_keeps_directory() {
        assert_eq!(
            sibling_test_path(Path::new("out/LoginButton.tsx")),
            PathBuf::from("out/LoginButton.test.tsx")
        );
        assert_eq!(
            sibling_test_path(Path::new("Card.tsx")),
            PathBuf::from("Card.test.tsx")
        );
    }

    #[test]
    fn write_source_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/Card.tsx");
        write_source(&path, "export default Card;\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "export default Card;\n"
        );
    }

    #[test]
    fn parse_input_maps_resource_errors_to_config() {
        let err = parse_input("missing-file.json", None).unwrap_err();
        assert!(matches!(err, F2rnError::Config(ref msg) if msg.contains("not found")));
    }

    #[tokio::test]
    async fn design_source_loads_local_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("card.json");
        std::fs::write(
            &path,
            r#"{"id":"1:1","name":"Card","type":"FRAME","width":100,"height":40,
                "fills":[{"type":"SOLID","color":{"r":1,"g":1,"b":1,"a":1}}]}"#,
        )
        .unwrap();

        let resource = parse_input(path.to_str().unwrap(), None).unwrap();
        let tree = DesignSource::new(FigmaConfig::default())
            .load(&resource)
            .await
            .unwrap();
        assert_eq!(tree.root().name, "Card");
    }
}
