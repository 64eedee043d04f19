use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tendril_core::{GeneratorConfig, TendrilResult};

use crate::naming::{classify, validate_name};

/// Everything a single generation needs to know about its target.
/// Built once per invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    pub project_root: PathBuf,
    pub apps_path: PathBuf,
    pub app_name: String,
    pub app_class: String,
    pub resource_name: String,
    pub class_name: String,
    pub app_root: PathBuf,
}

impl GenerationContext {
    pub fn new(
        project_root: &Path,
        config: &GeneratorConfig,
        app_name: &str,
        resource_name: &str,
    ) -> TendrilResult<Self> {
        validate_name("application", app_name)?;
        validate_name("resource", resource_name)?;

        Ok(Self {
            project_root: project_root.to_path_buf(),
            apps_path: config.path.clone(),
            app_name: app_name.to_string(),
            app_class: classify(app_name),
            resource_name: resource_name.to_string(),
            class_name: classify(resource_name),
            app_root: project_root.join(&config.path).join(app_name),
        })
    }

    /// Placeholder values shared by every template.
    pub fn template_vars(&self) -> HashMap<&'static str, String> {
        let mut vars = HashMap::new();
        vars.insert("app", self.app_name.clone());
        vars.insert("app_class", self.app_class.clone());
        vars.insert("apps_path", self.apps_path.to_string_lossy().replace('\\', "/"));
        vars.insert("name", self.resource_name.clone());
        vars.insert("class_name", self.class_name.clone());
        vars
    }

    /// Display form of `path` relative to the project root.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.project_root).unwrap_or(path)
    }
}
