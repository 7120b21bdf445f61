//! SeaORM entities and row-level helpers for users, their credentials and
//! their snippets.

pub mod errors;
pub mod db;
pub mod user;
pub mod user_credentials;
pub mod snippet;

#[cfg(test)]
mod tests;
