//! Auth module: domain, repository, service, and session tokens.
//!
//! Registration and login live here; the HTTP layer only maps results to
//! status codes and verifies bearer tokens via [`token`].

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod token;

pub use service::AuthService;
