use std::path::PathBuf;

use crate::context::GenerationContext;

/// Extension of every generated source file.
pub const SOURCE_EXT: &str = "rb";

/// Extension of generated view templates.
pub const VIEW_TEMPLATE_EXT: &str = "html.erb";

/// The seven REST actions, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrudAction {
    Index,
    Show,
    New,
    Create,
    Edit,
    Update,
    Destroy,
}

impl CrudAction {
    pub const ALL: [CrudAction; 7] = [
        CrudAction::Index,
        CrudAction::Show,
        CrudAction::New,
        CrudAction::Create,
        CrudAction::Edit,
        CrudAction::Update,
        CrudAction::Destroy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Show => "show",
            Self::New => "new",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Update => "update",
            Self::Destroy => "destroy",
        }
    }

    pub fn template_id(&self) -> &'static str {
        match self {
            Self::Index => "index_action",
            Self::Show => "show_action",
            Self::New => "new_action",
            Self::Create => "create_action",
            Self::Edit => "edit_action",
            Self::Update => "update_action",
            Self::Destroy => "destroy_action",
        }
    }
}

/// Computes where each generated file lives for a given context.
pub struct PathResolver<'a> {
    context: &'a GenerationContext,
}

impl<'a> PathResolver<'a> {
    pub fn new(context: &'a GenerationContext) -> Self {
        Self { context }
    }

    /// `lib/<app>/entities/<name>.rb`
    pub fn entity(&self) -> PathBuf {
        self.lib_dir("entities").join(source_file(&self.context.resource_name))
    }

    /// `lib/<app>/repositories/<name>.rb`
    pub fn repository(&self) -> PathBuf {
        self.lib_dir("repositories").join(source_file(&self.context.resource_name))
    }

    /// `<app_root>/controllers/<name>/<action>.rb`
    pub fn action(&self, action: &str) -> PathBuf {
        self.context
            .app_root
            .join("controllers")
            .join(&self.context.resource_name)
            .join(source_file(action))
    }

    /// `<app_root>/views/<name>/<action>.rb`
    pub fn view(&self, action: &str) -> PathBuf {
        self.context
            .app_root
            .join("views")
            .join(&self.context.resource_name)
            .join(source_file(action))
    }

    /// `<app_root>/templates/<name>/<action>.html.erb`
    pub fn view_template(&self, action: &str) -> PathBuf {
        self.context
            .app_root
            .join("templates")
            .join(&self.context.resource_name)
            .join(format!("{}.{}", action, VIEW_TEMPLATE_EXT))
    }

    /// `spec/<app>/controllers/<name>/<action>_spec.rb`
    pub fn action_spec(&self, action: &str) -> PathBuf {
        self.spec_dir("controllers").join(spec_file(action))
    }

    /// `spec/<app>/views/<name>/<action>_spec.rb`
    pub fn view_spec(&self, action: &str) -> PathBuf {
        self.spec_dir("views").join(spec_file(action))
    }

    /// `<app_root>/config/routes.rb`
    pub fn routes(&self) -> PathBuf {
        self.context.app_root.join("config").join(source_file("routes"))
    }

    fn lib_dir(&self, kind: &str) -> PathBuf {
        self.context
            .project_root
            .join("lib")
            .join(&self.context.app_name)
            .join(kind)
    }

    fn spec_dir(&self, kind: &str) -> PathBuf {
        self.context
            .project_root
            .join("spec")
            .join(&self.context.app_name)
            .join(kind)
            .join(&self.context.resource_name)
    }
}

fn source_file(stem: &str) -> String {
    format!("{}.{}", stem, SOURCE_EXT)
}

fn spec_file(stem: &str) -> String {
    format!("{}_spec.{}", stem, SOURCE_EXT)
}
