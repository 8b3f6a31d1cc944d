use anyhow::Context;
use block_compiler::GeneratorConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up when the project path names a directory.
pub const PROJECT_FILE: &str = "blocks.json";

const DEFAULT_OUT_DIR: &str = "generated";

/// Contents of `blocks.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectConfig {
    /// Glob patterns, relative to the project directory, of workspace files.
    pub inputs: Vec<String>,
    /// Glob patterns of files to skip.
    pub exclude: Vec<String>,
    pub out_dir: Option<String>,
    pub generator: GeneratorConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            inputs: vec!["**/*.blocks.json".to_string()],
            exclude: Vec::new(),
            out_dir: None,
            generator: GeneratorConfig::default(),
        }
    }
}

impl ProjectConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: ProjectConfig = serde_json::from_str(&content)
            .with_context(|| format!("invalid project file {}", path.display()))?;
        Ok(config)
    }

    /// Load the project at `project`, which is either a project file or a
    /// directory holding one. A directory without a project file gets the
    /// defaults. Returns the configuration and the directory that input
    /// patterns are relative to.
    pub fn resolve(project: &Path) -> anyhow::Result<(Self, PathBuf)> {
        if project.is_dir() {
            let file = project.join(PROJECT_FILE);
            let config = if file.is_file() {
                Self::load(&file)?
            } else {
                Self::default()
            };
            return Ok((config, project.to_path_buf()));
        }
        if !project.is_file() {
            anyhow::bail!("project path does not exist: {}", project.display());
        }
        let base_dir = project
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
        Ok((Self::load(project)?, base_dir))
    }

    pub fn out_dir(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(self.out_dir.as_deref().unwrap_or(DEFAULT_OUT_DIR))
    }
}
