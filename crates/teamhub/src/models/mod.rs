//! Data models for cached team entities

mod document;
mod folder;
mod smart_folder;
mod tag;
mod team;
mod template;
mod workspace;

pub use document::*;
pub use folder::*;
pub use smart_folder::*;
pub use tag::*;
pub use team::*;
pub use template::*;
pub use workspace::*;

/// Fields the server sends that a model does not name explicitly.
///
/// Kept so a cached entity serializes back exactly as it was received.
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;

/// An entity that can live in an id-keyed cache
pub trait Entity {
    fn id(&self) -> &str;
}
