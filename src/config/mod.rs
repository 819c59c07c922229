pub mod credentials;
pub mod environment;

pub use credentials::{Credentials, VerifiedCredentials};
pub use environment::Config;
