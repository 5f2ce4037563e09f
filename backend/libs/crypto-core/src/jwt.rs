/// JWT issuance and validation for the identity stack
///
/// Tokens are HS256-signed with a single symmetric secret owned by
/// identity-service. Other services never hold the secret; they ask
/// identity-service to validate tokens on their behalf.
///
/// ## Security Design
///
/// - **HS256 ONLY**: a token whose header names any other algorithm (including
///   `none`) is rejected with `InvalidToken::AlgorithmMismatch`
/// - **Strict expiry**: `now >= exp` is expired, no leeway
/// - **Opaque reasons**: rejection reasons never carry key material or
///   decoder internals
///
/// ## Usage
///
/// ```rust
/// use crypto_core::jwt::TokenManager;
/// use std::time::Duration;
///
/// let tokens = TokenManager::new("dev-secret", Duration::from_secs(3600));
/// let issued = tokens.issue("8d3c6a0e-9f7e-4a43-8d8a-3b1f0e1c2d3e", "a@x.com").unwrap();
/// let claims = tokens.validate(&issued.access_token).unwrap();
/// assert_eq!(claims.email, "a@x.com");
/// ```
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Access token lifetime used when the configured TTL is zero
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;
const JWT_ALGORITHM_NAME: &str = "HS256";

// ============================================================================
// Data Structures
// ============================================================================

/// Wire claims embedded in every access token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID as UUID string)
    #[serde(default)]
    pub sub: String,
    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
    /// Email at issuance time
    #[serde(default)]
    pub email: String,
}

/// Verified identity extracted from a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub user_id: String,
    pub email: String,
}

/// A freshly signed access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("token subject is empty")]
    EmptySubject,

    #[error("signing secret is not configured")]
    MissingSecret,

    #[error("failed to sign token")]
    Encode(#[source] jsonwebtoken::errors::Error),
}

/// Why a token was rejected. `Display` is the caller-facing reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidToken {
    #[error("malformed token")]
    Malformed,

    #[error("token expired")]
    Expired,

    #[error("invalid token signature")]
    BadSignature,

    #[error("unexpected signing algorithm")]
    AlgorithmMismatch,

    #[error("token missing subject")]
    MissingSubject,
}

impl From<jsonwebtoken::errors::Error> for InvalidToken {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => InvalidToken::BadSignature,
            ErrorKind::InvalidAlgorithm => InvalidToken::AlgorithmMismatch,
            ErrorKind::ExpiredSignature => InvalidToken::Expired,
            _ => InvalidToken::Malformed,
        }
    }
}

// ============================================================================
// Token Manager
// ============================================================================

/// Mints and verifies access tokens with one symmetric secret
///
/// Built once at startup from configuration and shared read-only.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    has_secret: bool,
    ttl_secs: i64,
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("secret", &"[REDACTED]")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl TokenManager {
    /// Create a manager; a zero `ttl` falls back to one hour
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let ttl_secs = match ttl.as_secs() {
            0 => DEFAULT_TOKEN_TTL_SECS,
            secs => secs,
        };

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            has_secret: !secret.is_empty(),
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    /// Sign an access token for `subject`
    ///
    /// ## Errors
    ///
    /// - `EmptySubject` when `subject` is blank
    /// - `MissingSecret` when the manager was built with an empty secret
    /// - `Encode` when the encoder fails
    pub fn issue(&self, subject: &str, email: &str) -> Result<IssuedToken, SigningError> {
        if subject.trim().is_empty() {
            return Err(SigningError::EmptySubject);
        }
        if !self.has_secret {
            return Err(SigningError::MissingSecret);
        }

        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
            email: email.to_string(),
        };

        let access_token = encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(SigningError::Encode)?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.ttl_secs,
        })
    }

    /// Verify signature, algorithm, expiry and subject of `token`
    ///
    /// A manager without a secret verifies nothing.
    pub fn validate(&self, token: &str) -> Result<Claims, InvalidToken> {
        if !self.has_secret {
            return Err(InvalidToken::BadSignature);
        }

        match header_algorithm(token) {
            Some(alg) if alg == JWT_ALGORITHM_NAME => {}
            Some(_) => return Err(InvalidToken::AlgorithmMismatch),
            None => return Err(InvalidToken::Malformed),
        }

        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.leeway = 0;
        // Expiry is compared below with `>=`; the library uses `<` plus leeway.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation)?;
        let claims = data.claims;

        if Utc::now().timestamp() >= claims.exp {
            return Err(InvalidToken::Expired);
        }
        if claims.sub.trim().is_empty() {
            return Err(InvalidToken::MissingSubject);
        }

        Ok(Claims {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

/// Read `alg` from the JOSE header without trusting it
fn header_algorithm(token: &str) -> Option<String> {
    let header_segment = token.split('.').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(header_segment).ok()?;
    let header: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    header.get("alg")?.as_str().map(str::to_owned)
}

// ============================================================================
// Tests
// ============================================================================
