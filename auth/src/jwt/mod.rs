use jsonwebtoken::Algorithm;

pub mod claims;
pub mod errors;
pub mod issuer;
pub mod secret;
pub mod validator;

pub use claims::SessionClaims;
pub use claims::SessionIdentity;
pub use errors::TokenError;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use issuer::TokenLifetimes;
pub use secret::SigningSecret;
pub use validator::TokenValidator;

/// The only signing algorithm issued or accepted.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Header `alg` value matching [`ALGORITHM`].
pub const ALGORITHM_NAME: &str = "HS256";
