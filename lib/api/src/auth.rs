//! Bearer-token authentication
//!
//! The matching core only needs the caller's user id; this module turns an
//! `Authorization: Bearer <token>` header into one.

use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;
use ahash::AHashMap;
use pawmatch_core::{Error, Result, UserId};
use std::path::Path;

/// Resolves a bearer credential to a user id
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, token: &str) -> Option<UserId>;
}

/// Static token table, loaded from a JSON object of `token -> user id`
#[derive(Debug, Clone, Default)]
pub struct TokenAuthenticator {
    tokens: AHashMap<String, UserId>,
}

impl TokenAuthenticator {
    pub fn new(tokens: impl IntoIterator<Item = (String, UserId)>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        let tokens: AHashMap<String, UserId> = serde_json::from_slice(&data)?;
        Ok(Self { tokens })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Authenticator for TokenAuthenticator {
    fn authenticate(&self, token: &str) -> Option<UserId> {
        self.tokens.get(token).cloned()
    }
}

/// Extract the token from an `Authorization` header value
pub fn bearer_token(header: Option<&str>) -> Result<&str> {
    let value = header.ok_or_else(|| Error::Unauthorized("missing credential".to_string()))?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::trim)
        .unwrap_or("");
    if token.is_empty() {
        return Err(Error::Unauthorized("malformed credential".to_string()));
    }
    Ok(token)
}

/// Resolve the caller of `req`, or fail with [`Error::Unauthorized`]
pub fn resolve_caller(auth: &dyn Authenticator, req: &HttpRequest) -> Result<UserId> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let token = bearer_token(header)?;
    auth.authenticate(token)
        .ok_or_else(|| Error::Unauthorized("invalid credential".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc")).unwrap(), "abc");
        assert_eq!(bearer_token(Some("bearer  abc ")).unwrap(), "abc");
        assert!(matches!(bearer_token(None), Err(Error::Unauthorized(_))));
        assert!(matches!(bearer_token(Some("Basic abc")), Err(Error::Unauthorized(_))));
        assert!(matches!(bearer_token(Some("Bearer ")), Err(Error::Unauthorized(_))));
    }

    #[test]
    fn test_token_table() {
        let auth = TokenAuthenticator::new(vec![("t1".to_string(), "u1".to_string())]);
        assert_eq!(auth.authenticate("t1").as_deref(), Some("u1"));
        assert!(auth.authenticate("t2").is_none());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, r#"{ "alpha": "u1", "beta": "u2" }"#).unwrap();

        let auth = TokenAuthenticator::from_file(&path).unwrap();
        assert_eq!(auth.len(), 2);
        assert_eq!(auth.authenticate("beta").as_deref(), Some("u2"));
    }
}
