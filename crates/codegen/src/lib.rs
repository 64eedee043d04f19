pub mod context;
pub mod generator;
pub mod naming;
pub mod paths;
pub mod routes;
pub mod templates;
pub mod writer;

pub use context::GenerationContext;
pub use generator::*;
pub use naming::classify;
pub use routes::{insert_routes, RouteBlock};
pub use templates::TemplateRegistry;
pub use writer::*;
