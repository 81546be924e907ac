use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("missing subject claim ('sub' or 'id')")]
    MissingSubject,
    #[error("invalid subject (expected UUID)")]
    InvalidSubUuid,
}

/// Access token (JWT) claims.
///
/// NOTE:
/// - `sub` is the standard subject claim. Older tokens carry the user id in `id`;
///   it is only consulted when `sub` is absent.
/// - `exp` is required and checked by `jsonwebtoken::Validation`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub id: Option<String>,

    pub exp: u64,

    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default)]
    pub jti: Option<String>,
}

impl AccessTokenClaims {
    fn subject(&self) -> Option<&str> {
        self.sub
            .as_deref()
            .or(self.id.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// AuthService が返す「検証済み・アプリ側で使う型」
///
/// - subject はプロジェクト規約として UUID なので、ここでは `Uuid` に昇格させる
#[derive(Debug, Clone)]
pub struct VerifiedAccessToken {
    pub user_id: Uuid,
    pub jti: Option<String>,
}

/// HS256 access-token verifier over a shared secret.
///
/// - The secret is handed in at construction; nothing reads the environment here.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(
        secret: &[u8],
        issuer: Option<&str>,
        audience: Option<&str>,
        leeway_seconds: u64,
    ) -> Self {
        let decoding_key = DecodingKey::from_secret(secret);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            // Without a configured audience, an `aud` claim in the token is not an error.
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key,
            validation,
        }
    }

    // Verify signature + exp (and iss/aud when configured) and decode the claims.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify, then convert claims into an application-friendly type.
    ///
    /// This is the entry-point for the auth middleware.
    pub fn verify_verified(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let claims = self.verify(token)?;

        let subject = claims.subject().ok_or(AccessJwtError::MissingSubject)?;
        let user_id = Uuid::parse_str(subject).map_err(|_| AccessJwtError::InvalidSubUuid)?;

        Ok(VerifiedAccessToken {
            user_id,
            jti: claims.jti,
        })
    }
}
