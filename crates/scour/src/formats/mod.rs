//! Pure format predicates, applied by the domain-pattern fields after
//! ordinary string validation succeeds.

pub mod email;
pub mod host;
pub mod uri;

pub use email::{MAX_EMAIL_LENGTH, is_email};
pub use host::{HostKind, MAX_DOMAIN_LENGTH, is_host};
pub use uri::{UriOptions, is_uri};
