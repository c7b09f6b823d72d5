use std::fmt;

use crate::errors::ServiceError;

/// Shared secret that authorizes destructive cafe operations.
///
/// Loaded from configuration and handed to `CafeService`; never logged.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(secret: impl Into<String>) -> Result<Self, ServiceError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ServiceError::Validation("api key must not be empty".into()));
        }
        Ok(Self(secret))
    }

    /// True only when `presented` matches the configured secret exactly.
    pub fn verify(&self, presented: Option<&str>) -> bool {
        match presented {
            Some(p) => constant_time_eq(self.0.as_bytes(), p.as_bytes()),
            None => false,
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_requires_exact_match() {
        let key = ApiKey::new("topsecretkey").unwrap();
        assert!(key.verify(Some("topsecretkey")));
        assert!(!key.verify(Some("topsecretke")));
        assert!(!key.verify(Some("TOPSECRETKEY")));
        assert!(!key.verify(Some("")));
        assert!(!key.verify(None));
    }

    #[test]
    fn empty_secret_rejected_and_debug_redacted() {
        assert!(ApiKey::new("  ").is_err());
        let key = ApiKey::new("hunter2").unwrap();
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
    }
}
