//! Authentication adapters.
//!
//! Implementations of the `SessionValidator`, `TokenIssuer` and
//! `PasswordHasher` ports:
//!
//! - `jwt` - HS256 access/refresh tokens
//! - `bcrypt_hasher` - bcrypt password hashing
//! - `mock` - Test validator that doesn't require signed tokens

mod bcrypt_hasher;
mod jwt;
mod mock;

pub use bcrypt_hasher::BcryptPasswordHasher;
pub use jwt::JwtTokenService;
pub use mock::MockSessionValidator;
