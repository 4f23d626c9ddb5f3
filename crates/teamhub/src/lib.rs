//! TeamHub client core
//!
//! This crate holds the logic a TeamHub client needs besides rendering:
//! the smart folder condition evaluator and the real-time event stream that
//! keeps the client-side entity caches in sync with the server.
//!
//! # Features
//! - Entity models for documents, folders, workspaces, tags, templates and smart folders
//! - Id-keyed entity caches shared between the event stream and readers
//! - Smart folder evaluation with `and` / `or` combinators and date relations
//! - Typed decoding and dispatch of server-pushed app events
//! - A reconnecting push connection with bounded exponential backoff
//! - An HTTP client for the resource and template endpoints

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod smart_folder;
pub mod store;
pub mod stream;

pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use events::{AppEvent, EventDispatcher, EventKind};
pub use smart_folder::{filter_documents, matches};
pub use store::{SharedStores, Stores};
pub use stream::{Backoff, ConnectionState, EventStream};
