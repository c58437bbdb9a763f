//! Auth provider - password hashing and opaque bearer tokens

mod password;
mod token;

pub use password::{hash_password, verify_password, PasswordService};
pub use token::{Claims, TokenProvider};
