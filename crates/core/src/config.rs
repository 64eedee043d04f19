use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use crate::{TendrilError, TendrilResult};

/// Project-level configuration file, looked up in the project root.
pub const CONFIG_FILE: &str = ".tendril.yml";

/// Settings shared by every generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory holding the applications, relative to the project root.
    pub path: PathBuf,
    /// Flavour of the companion spec files.
    pub test: TestFramework,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("apps"),
            test: TestFramework::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load `.tendril.yml` from `project_root`, falling back to defaults
    /// when the file is absent or empty.
    pub fn load(project_root: &Path) -> TendrilResult<Self> {
        let path = Self::config_path(project_root);
        if !path.exists() {
            tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, project_root.display());
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&path).map_err(|e| TendrilError::filesystem(&path, e))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(?config, "loaded {}", path.display());
        Ok(config)
    }

    pub fn config_path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE)
    }

    /// Apply command-line overrides on top of the file values.
    pub fn with_overrides(mut self, path: Option<PathBuf>, test: Option<TestFramework>) -> Self {
        if let Some(path) = path {
            self.path = path;
        }
        if let Some(test) = test {
            self.test = test;
        }
        self
    }

    pub fn validate(&self) -> TendrilResult<()> {
        if self.path.as_os_str().is_empty() {
            return Err(TendrilError::Configuration {
                message: "`path` must name the applications directory".to_string(),
            });
        }
        if self.path.is_absolute() {
            return Err(TendrilError::Configuration {
                message: format!(
                    "`path` must be relative to the project root, got {}",
                    self.path.display()
                ),
            });
        }
        if self.path.components().any(|c| c == Component::ParentDir) {
            return Err(TendrilError::Configuration {
                message: format!(
                    "`path` must stay inside the project root, got {}",
                    self.path.display()
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    #[default]
    Minitest,
    Rspec,
}

impl TestFramework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minitest => "minitest",
            Self::Rspec => "rspec",
        }
    }
}

impl fmt::Display for TestFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestFramework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minitest" => Ok(Self::Minitest),
            "rspec" => Ok(Self::Rspec),
            other => Err(format!(
                "Unknown test framework: {}. Use minitest or rspec",
                other
            )),
        }
    }
}
