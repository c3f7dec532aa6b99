/// Authentication building blocks
///
/// - `password`: Argon2id hashing and verification
/// - `jwt`: HS256 access token issuance and validation
/// - `middleware`: Axum middleware that turns a Bearer token into an
///   `AuthContext` request extension
///
/// # Example
///
/// ```no_run
/// use tasklane_shared::auth::jwt::{create_token, validate_token, Claims};
/// use tasklane_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("hunter2hunter2")?;
/// assert!(verify_password("hunter2hunter2", &hash)?);
///
/// let token = create_token(&Claims::new(42), "secret-key-that-is-32-bytes-long!")?;
/// let claims = validate_token(&token, "secret-key-that-is-32-bytes-long!")?;
/// assert_eq!(claims.sub, 42);
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{create_token, validate_token, Claims, JwtError};
pub use middleware::{create_jwt_middleware, AuthContext, AuthError};
pub use password::{hash_password, verify_password, PasswordError};
