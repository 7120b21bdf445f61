//! Snippets: domain types, owner-or-read-only permission, repository and service.

pub mod domain;
pub mod permissions;
pub mod repository;
pub mod service;

pub use domain::{Snippet, SnippetInput};
pub use service::{SnippetDefaults, SnippetService};
