//! Service layer providing the business rules on top of `models`.
//! - Separates business logic from data access through repository traits.
//! - Each repository has a SeaORM implementation and an in-memory mock.
//! - Highlighting is rendered here when a snippet is saved.

pub mod errors;
pub mod pagination;
pub mod highlight;
pub mod auth;
pub mod snippet;
pub mod user;
#[cfg(test)]
pub mod test_support;
