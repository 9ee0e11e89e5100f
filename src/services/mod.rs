//! Contracts for the collaborators the resolver talks to.
//!
//! The resolver only sees these traits; AWS-backed implementations live in
//! [`crate::infra`], and tests substitute in-memory fakes.

pub mod browser;
pub mod credentials;
pub mod engine;
pub mod parameter_store;

pub use browser::BrowserLauncher;
pub use credentials::{
    ClusterCredentialIssuer, ClusterCredentials, CredentialRequest, IdentityService,
};
pub use engine::{ConnectionRequest, EngineFactory, SslMode};
pub use parameter_store::ParameterStore;
