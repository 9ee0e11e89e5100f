//! Connect to named databases without hardcoding credentials.
//!
//! Connection attributes (user, password, endpoint, port, database, Athena
//! staging location) live in a parameter store under
//! `/<namespace>/<database>/<field>`. [`ConnectionResolver`] reads them,
//! applies local [`Overrides`], exchanges IAM identities for temporary
//! Redshift logins, and produces a [`ConnectionRequest`] for whatever driver
//! the caller uses.

pub mod backend;
pub mod credentials;
pub mod docs;
pub mod error;
pub mod infra;
pub mod overrides;
pub mod resolver;
pub mod services;
pub mod uri;

pub use backend::Backend;
pub use error::{DbConnectError, Result};
pub use overrides::Overrides;
pub use resolver::ConnectionResolver;
pub use services::{ConnectionRequest, SslMode};
pub use uri::ConnectionUri;
