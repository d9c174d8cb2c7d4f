//! Email/password authentication against the Fixr auth backend.
//!
//! `AuthClient` talks to the backend's register/login routes;
//! `CredentialStore` keeps the last successful session on disk so the
//! user stays signed in across launches.

pub mod client;
pub mod store;
pub mod types;

pub use client::AuthClient;
pub use store::CredentialStore;
pub use types::{AuthError, AuthSession, User};
