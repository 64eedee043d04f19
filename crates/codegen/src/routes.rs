use std::fmt;
use std::path::Path;

use tendril_core::TendrilResult;

use crate::paths::CrudAction;
use crate::writer::{CodeWriter, WriteOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

/// One `verb '/path', to: 'controller#action'` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDeclaration {
    pub verb: HttpVerb,
    pub path: String,
    pub endpoint: String,
}

impl fmt::Display for RouteDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}', to: '{}'", self.verb.as_str(), self.path, self.endpoint)
    }
}

/// Route lines inserted together at the top of a routes file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteBlock {
    routes: Vec<RouteDeclaration>,
}

impl RouteBlock {
    /// The seven REST routes for `name`, index first, destroy last.
    pub fn resource(name: &str) -> Self {
        let routes = CrudAction::ALL
            .iter()
            .map(|action| {
                let (verb, suffix) = match action {
                    CrudAction::Index => (HttpVerb::Get, ""),
                    CrudAction::Show => (HttpVerb::Get, "/:id"),
                    CrudAction::New => (HttpVerb::Get, "/new"),
                    CrudAction::Create => (HttpVerb::Post, ""),
                    CrudAction::Edit => (HttpVerb::Get, "/:id/edit"),
                    CrudAction::Update => (HttpVerb::Patch, "/:id"),
                    CrudAction::Destroy => (HttpVerb::Delete, "/:id"),
                };
                RouteDeclaration {
                    verb,
                    path: format!("/{}{}", name, suffix),
                    endpoint: format!("{}#{}", name, action.as_str()),
                }
            })
            .collect();

        Self { routes }
    }

    /// A single `GET /<controller>` route pointing at `controller#action`.
    pub fn action(controller: &str, action: &str) -> Self {
        Self {
            routes: vec![RouteDeclaration {
                verb: HttpVerb::Get,
                path: format!("/{}", controller),
                endpoint: format!("{}#{}", controller, action),
            }],
        }
    }

    /// Every route on its own line, each terminated by `\n`.
    pub fn render(&self) -> String {
        self.routes
            .iter()
            .map(|route| format!("{}\n", route))
            .collect()
    }
}

/// Prepend `block` to the routes file at `path`, creating it if needed.
///
/// Running this twice for the same block leaves two copies in the file.
pub fn insert_routes(writer: &CodeWriter, path: &Path, block: &RouteBlock) -> TendrilResult<WriteOutcome> {
    tracing::debug!(routes = block.routes.len(), "inserting routes into {}", path.display());
    writer.prepend(path, &block.render())
}
