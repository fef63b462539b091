//! Credential adapters: Argon2id password hashing and the signed-token
//! issuer backing the auth cookie.

#[cfg(feature = "auth-jwt")]
pub mod jwt;
pub mod password;

#[cfg(feature = "auth-jwt")]
pub use jwt::JwtTokenIssuer;
pub use password::Argon2PasswordHasher;
