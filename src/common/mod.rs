pub mod component;
pub mod datapack;
pub mod resource;

pub use component::{Component, ComponentPath, Macro};
pub use datapack::{Datapack, NamespaceGroup, ParsedNamespace, SharedResources};
pub use resource::{Scoreboard, Storage};
