use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tendril_core::{GeneratorConfig, TendrilError, TendrilResult, TestFramework};

use crate::context::GenerationContext;
use crate::naming::{classify, validate_name};
use crate::paths::{CrudAction, PathResolver};
use crate::routes::{insert_routes, RouteBlock};
use crate::templates::TemplateRegistry;
use crate::writer::{CodeWriter, WriteOutcome};

/// What to scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateTarget {
    /// Entity, repository, seven CRUD actions and their routes.
    Resource { app: String, name: String },
    /// Entity and repository only.
    Model { app: String, name: String },
    /// One controller action with its view, template, specs and route.
    Action {
        app: String,
        controller: String,
        action: String,
    },
}

impl GenerateTarget {
    /// Build an action target from `controller#action` notation.
    pub fn action(app: &str, target: &str) -> TendrilResult<Self> {
        match target.split_once('#') {
            Some((controller, action)) if !controller.is_empty() && !action.is_empty() => {
                Ok(Self::Action {
                    app: app.to_string(),
                    controller: controller.to_string(),
                    action: action.to_string(),
                })
            }
            _ => Err(TendrilError::Validation(format!(
                "Invalid action: {}. Expected controller#action format",
                target
            ))),
        }
    }

    pub fn app(&self) -> &str {
        match self {
            Self::Resource { app, .. } | Self::Model { app, .. } | Self::Action { app, .. } => app,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Resource { .. } => "resource",
            Self::Model { .. } => "model",
            Self::Action { .. } => "action",
        }
    }
}

impl fmt::Display for GenerateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource { name, .. } | Self::Model { name, .. } => f.write_str(name),
            Self::Action { controller, action, .. } => write!(f, "{}#{}", controller, action),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeneratorState {
    Init,
    ValidateApp,
    RenderTemplates,
    EmitFiles,
    InsertRoutes,
    Done,
    Failed,
}

struct StateMachine {
    state: GeneratorState,
}

impl StateMachine {
    fn new() -> Self {
        Self {
            state: GeneratorState::Init,
        }
    }

    fn advance(&mut self, next: GeneratorState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "generator state");
            self.state = next;
        }
    }

    fn fail(&mut self, err: &TendrilError) {
        tracing::debug!(from = ?self.state, error = %err, "generator failed");
        self.state = GeneratorState::Failed;
    }
}

/// One file to render: which template, and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpec {
    pub template_id: &'static str,
    pub path: PathBuf,
}

impl TemplateSpec {
    fn new(template_id: &'static str, path: PathBuf) -> Self {
        Self { template_id, path }
    }
}

/// Fully resolved work for one invocation, computed before anything is written.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub context: GenerationContext,
    pub vars: HashMap<&'static str, String>,
    pub templates: Vec<TemplateSpec>,
    pub routes: Option<(PathBuf, RouteBlock)>,
}

impl GenerationPlan {
    pub fn build(
        project_root: &Path,
        config: &GeneratorConfig,
        target: &GenerateTarget,
    ) -> TendrilResult<Self> {
        match target {
            GenerateTarget::Resource { app, name } => {
                let context = GenerationContext::new(project_root, config, app, name)?;
                let paths = PathResolver::new(&context);

                let mut templates = Self::model_templates(&paths);
                templates.extend(
                    CrudAction::ALL
                        .iter()
                        .map(|action| TemplateSpec::new(action.template_id(), paths.action(action.as_str()))),
                );
                let routes = Some((paths.routes(), RouteBlock::resource(name)));

                Ok(Self {
                    vars: context.template_vars(),
                    context,
                    templates,
                    routes,
                })
            }
            GenerateTarget::Model { app, name } => {
                let context = GenerationContext::new(project_root, config, app, name)?;
                let templates = Self::model_templates(&PathResolver::new(&context));

                Ok(Self {
                    vars: context.template_vars(),
                    context,
                    templates,
                    routes: None,
                })
            }
            GenerateTarget::Action { app, controller, action } => {
                validate_name("action", action)?;
                let context = GenerationContext::new(project_root, config, app, controller)?;
                let paths = PathResolver::new(&context);

                let (action_spec, view_spec) = match config.test {
                    TestFramework::Minitest => ("action_spec_minitest", "view_spec_minitest"),
                    TestFramework::Rspec => ("action_spec_rspec", "view_spec_rspec"),
                };
                let templates = vec![
                    TemplateSpec::new("action", paths.action(action)),
                    TemplateSpec::new(action_spec, paths.action_spec(action)),
                    TemplateSpec::new("view", paths.view(action)),
                    TemplateSpec::new(view_spec, paths.view_spec(action)),
                    TemplateSpec::new("view_template", paths.view_template(action)),
                ];
                let routes = Some((paths.routes(), RouteBlock::action(controller, action)));

                let mut vars = context.template_vars();
                vars.insert("action", action.clone());
                vars.insert("action_class", classify(action));

                Ok(Self {
                    context,
                    vars,
                    templates,
                    routes,
                })
            }
        }
    }

    fn model_templates(paths: &PathResolver<'_>) -> Vec<TemplateSpec> {
        vec![
            TemplateSpec::new("entity", paths.entity()),
            TemplateSpec::new("repository", paths.repository()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    /// `path` relative to the project root, for display.
    pub relative: PathBuf,
    pub outcome: WriteOutcome,
}

/// Files touched by a successful run, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub files: Vec<GeneratedFile>,
}

impl GenerationReport {
    fn record(&mut self, context: &GenerationContext, path: &Path, outcome: WriteOutcome) {
        self.files.push(GeneratedFile {
            path: path.to_path_buf(),
            relative: context.relative(path).to_path_buf(),
            outcome,
        });
    }

    /// Files written from templates, not counting route insertions.
    pub fn emitted(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files
            .iter()
            .filter(|file| file.outcome != WriteOutcome::Prepended)
    }
}

/// Scaffolds resources, models and actions into an existing project.
pub struct ScaffoldGenerator {
    project_root: PathBuf,
    config: GeneratorConfig,
    registry: TemplateRegistry,
    writer: CodeWriter,
}

impl ScaffoldGenerator {
    pub fn new(project_root: PathBuf, config: GeneratorConfig) -> TendrilResult<Self> {
        Ok(Self {
            project_root,
            config,
            registry: TemplateRegistry::builtin()?,
            writer: CodeWriter::new(),
        })
    }

    /// Swap the template table, e.g. to target a different framework release.
    pub fn with_registry(mut self, registry: TemplateRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn generate(&self, target: &GenerateTarget) -> TendrilResult<GenerationReport> {
        let mut machine = StateMachine::new();

        match self.run(target, &mut machine) {
            Ok(report) => {
                tracing::info!(
                    kind = target.kind(),
                    files = report.files.len(),
                    "generated {} for {}",
                    target,
                    target.app()
                );
                Ok(report)
            }
            Err(err) => {
                machine.fail(&err);
                Err(err)
            }
        }
    }

    fn run(&self, target: &GenerateTarget, machine: &mut StateMachine) -> TendrilResult<GenerationReport> {
        let plan = GenerationPlan::build(&self.project_root, &self.config, target)?;

        machine.advance(GeneratorState::ValidateApp);
        self.validate_app(&plan.context)?;

        let mut report = GenerationReport::default();
        for spec in &plan.templates {
            machine.advance(GeneratorState::RenderTemplates);
            let content = self.registry.render(spec.template_id, &plan.vars)?;

            machine.advance(GeneratorState::EmitFiles);
            let outcome = self.writer.write(&spec.path, &content)?;
            report.record(&plan.context, &spec.path, outcome);
        }

        if let Some((routes_path, block)) = &plan.routes {
            machine.advance(GeneratorState::InsertRoutes);
            let outcome = insert_routes(&self.writer, routes_path, block)?;
            report.record(&plan.context, routes_path, outcome);
        }

        machine.advance(GeneratorState::Done);
        Ok(report)
    }

    fn validate_app(&self, context: &GenerationContext) -> TendrilResult<()> {
        if context.app_root.is_dir() {
            return Ok(());
        }

        Err(TendrilError::UnknownApplication {
            name: context.app_name.clone(),
            path: context.relative(&context.app_root).to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_action_target_parsing() {
        assert_eq!(
            GenerateTarget::action("web", "dashboard#index").unwrap(),
            GenerateTarget::Action {
                app: "web".to_string(),
                controller: "dashboard".to_string(),
                action: "index".to_string(),
            }
        );

        assert!(GenerateTarget::action("web", "dashboard").is_err());
        assert!(GenerateTarget::action("web", "#index").is_err());
        assert!(GenerateTarget::action("web", "dashboard#").is_err());
    }

    #[test]
    fn test_resource_plan_order() {
        let target = GenerateTarget::Resource {
            app: "web".to_string(),
            name: "user".to_string(),
        };
        let plan = GenerationPlan::build(Path::new("/project"), &GeneratorConfig::default(), &target).unwrap();

        let ids: Vec<_> = plan.templates.iter().map(|spec| spec.template_id).collect();
        assert_eq!(
            ids,
            [
                "entity",
                "repository",
                "index_action",
                "show_action",
                "new_action",
                "create_action",
                "edit_action",
                "update_action",
                "destroy_action",
            ]
        );

        let (routes_path, block) = plan.routes.unwrap();
        assert_eq!(routes_path, PathBuf::from("/project/apps/web/config/routes.rb"));
        assert_eq!(block, RouteBlock::resource("user"));
    }

    #[test]
    fn test_model_plan_has_no_routes() {
        let target = GenerateTarget::Model {
            app: "web".to_string(),
            name: "user".to_string(),
        };
        let plan = GenerationPlan::build(Path::new("/project"), &GeneratorConfig::default(), &target).unwrap();

        assert_eq!(plan.templates.len(), 2);
        assert!(plan.routes.is_none());
    }

    #[test]
    fn test_action_plan_follows_test_framework() {
        let target = GenerateTarget::action("web", "dashboard#index").unwrap();
        let config = GeneratorConfig {
            test: TestFramework::Rspec,
            ..Default::default()
        };
        let plan = GenerationPlan::build(Path::new("/project"), &config, &target).unwrap();

        let ids: Vec<_> = plan.templates.iter().map(|spec| spec.template_id).collect();
        assert!(ids.contains(&"action_spec_rspec"));
        assert!(ids.contains(&"view_spec_rspec"));
        assert_eq!(plan.vars["action_class"], "Index");
    }

    #[test]
    fn test_missing_template_fails_after_validation() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("apps/web")).unwrap();

        let mut registry = TemplateRegistry::new();
        registry.register("entity", crate::templates::ENTITY_TEMPLATE).unwrap();

        let generator = ScaffoldGenerator::new(temp_dir.path().to_path_buf(), GeneratorConfig::default())
            .unwrap()
            .with_registry(registry);
        let target = GenerateTarget::Model {
            app: "web".to_string(),
            name: "user".to_string(),
        };

        let err = generator.generate(&target).unwrap_err();
        assert!(matches!(err, TendrilError::TemplateNotFound { ref id } if id == "repository"));
        // No rollback: the entity written before the failure stays.
        assert!(temp_dir.path().join("lib/web/entities/user.rb").exists());
    }

    #[test]
    fn test_state_machine_records_failure() {
        let mut machine = StateMachine::new();
        machine.advance(GeneratorState::ValidateApp);
        assert_eq!(machine.state, GeneratorState::ValidateApp);

        machine.fail(&TendrilError::Validation("boom".to_string()));
        assert_eq!(machine.state, GeneratorState::Failed);
    }
}
