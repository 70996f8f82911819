use std::collections::HashSet;
use std::sync::Mutex;

use uuid::Uuid;

use crate::config::HistoryConfig;

/// Opaque capability token granting read access to the screening history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityToken(pub String);

/// Pluggable authenticator guarding the history surface. Implementations
/// exchange credentials for a capability token and later verify presented
/// tokens; the HTTP layer never sees credentials beyond this seam.
pub trait HistoryGate: Send + Sync {
    /// Exchange credentials for a token, or `None` when they are rejected.
    fn issue(&self, username: &str, password: &str) -> Option<CapabilityToken>;
    /// Check a previously issued token.
    fn verify(&self, token: &str) -> bool;
}

/// Gate backed by a single configured credential pair. When the credentials
/// are not configured the history stays locked rather than falling open.
pub struct StaticCredentialGate {
    username: Option<String>,
    password: Option<String>,
    issued: Mutex<HashSet<String>>,
}

impl StaticCredentialGate {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
            issued: Mutex::new(HashSet::new()),
        }
    }
}

impl HistoryGate for StaticCredentialGate {
    fn issue(&self, username: &str, password: &str) -> Option<CapabilityToken> {
        let (expected_user, expected_pass) =
            match (self.username.as_deref(), self.password.as_deref()) {
                (Some(user), Some(pass)) => (user, pass),
                _ => return None,
            };

        if username != expected_user || password != expected_pass {
            return None;
        }

        let token = Uuid::new_v4().to_string();
        self.issued
            .lock()
            .expect("token set mutex poisoned")
            .insert(token.clone());
        Some(CapabilityToken(token))
    }

    fn verify(&self, token: &str) -> bool {
        self.issued
            .lock()
            .expect("token set mutex poisoned")
            .contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured_gate() -> StaticCredentialGate {
        StaticCredentialGate::new(&HistoryConfig {
            username: Some("keeper".to_string()),
            password: Some("s3cret".to_string()),
        })
    }

    #[test]
    fn issues_verifiable_tokens_for_good_credentials() {
        let gate = configured_gate();
        let token = gate.issue("keeper", "s3cret").expect("token issued");
        assert!(gate.verify(&token.0));
    }

    #[test]
    fn rejects_bad_credentials_and_foreign_tokens() {
        let gate = configured_gate();
        assert!(gate.issue("keeper", "wrong").is_none());
        assert!(gate.issue("intruder", "s3cret").is_none());
        assert!(!gate.verify("made-up-token"));
    }

    #[test]
    fn unconfigured_gate_stays_locked() {
        let gate = StaticCredentialGate::new(&HistoryConfig {
            username: None,
            password: None,
        });
        assert!(gate.issue("", "").is_none());
        assert!(gate.issue("keeper", "s3cret").is_none());
    }
}
