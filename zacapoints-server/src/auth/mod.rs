//! Authentication and authorization
//!
//! - [`jwt`]: session token issue/validation
//! - [`password`]: bcrypt hashing
//! - [`middleware`]: `require_auth` / `require_role` interceptors
//! - `extractor`: `CurrentUser` as a handler argument

mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtError, JwtService};
pub use middleware::{require_auth, require_role};
pub use password::{MIN_PASSWORD_LEN, PasswordHasher, is_bcrypt_hash};
