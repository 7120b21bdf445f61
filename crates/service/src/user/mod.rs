pub mod domain;
pub mod repository;
pub mod service;

pub use domain::UserProfile;
pub use service::UserService;
