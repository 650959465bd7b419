use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::AuthError;

/// JWT Claims - data stored in the token
///
/// The `role` claim is a snapshot of role names at issuance, for coarse
/// display only. Permission checks never read it; they re-resolve from
/// the store.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,   // Subject (user id as string)
    pub id: i64,       // User id
    pub email: String, // Email at issuance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Vec<String>>, // Role names at issuance
    pub iat: i64,      // Issued at timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>, // Expiration timestamp (absent = no expiry)
    pub iss: String,   // Issuer
    pub jti: String,   // JWT ID (unique token identifier)
}

/// JWT Service - creates and verifies JWT tokens
///
/// Stateless: validity is purely a function of signature and embedded
/// expiry. There is no revocation list and no refresh flow.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Option<chrono::Duration>,
}

impl JwtService {
    /// Create new JWT service.
    ///
    /// `ttl_secs` controls the expiry policy: `Some(n)` stamps tokens
    /// with an expiry `n` seconds out, `None` issues tokens without one.
    pub fn new(secret: &str, issuer: String, ttl_secs: Option<i64>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            ttl: ttl_secs.map(chrono::Duration::seconds),
        }
    }

    /// Issue a signed token for a user.
    pub fn issue(
        &self,
        user_id: i64,
        email: String,
        roles: Option<Vec<String>>,
    ) -> Result<String, AuthError> {
        let now = chrono::Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            id: user_id,
            email,
            role: roles,
            iat: now.timestamp(),
            exp: self.ttl.map(|ttl| (now + ttl).timestamp()),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(e.into()))
    }

    /// Verify and decode a token.
    ///
    /// Tokens without an `exp` claim verify regardless of the configured
    /// TTL; tokens carrying one are checked with zero leeway.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims::<&str>(&[]);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature => AuthError::TokenInvalidSignature,
                _ => AuthError::TokenMalformed,
            })
    }
}
