use secrecy::{ExposeSecret, SecretString};

/// API key authorizing one call to the completion service.
///
/// Resolved per request and passed explicitly into the outbound request;
/// never written to the process environment.
#[derive(Clone, Debug)]
pub struct Credential(SecretString);

impl Credential {
    /// Pick the key for a request: a non-empty form value wins, otherwise the
    /// configured fallback. `None` when neither is a non-empty string.
    pub fn resolve(form_value: Option<&str>, fallback: Option<&SecretString>) -> Option<Self> {
        if let Some(value) = form_value.filter(|v| !v.is_empty()) {
            return Some(Self(SecretString::from(value)));
        }
        fallback
            .filter(|key| !key.expose_secret().is_empty())
            .map(|key| Self(key.clone()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self(SecretString::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s)
    }

    #[test]
    fn form_value_wins_over_fallback() {
        let fallback = secret("ENVKEY");
        let cred = Credential::resolve(Some("FORMKEY"), Some(&fallback)).unwrap();
        assert_eq!(cred.expose(), "FORMKEY");
    }

    #[test]
    fn empty_form_value_uses_fallback() {
        let fallback = secret("ENVKEY");
        let cred = Credential::resolve(Some(""), Some(&fallback)).unwrap();
        assert_eq!(cred.expose(), "ENVKEY");
    }

    #[test]
    fn nothing_resolves_to_none() {
        assert!(Credential::resolve(None, None).is_none());
        assert!(Credential::resolve(Some(""), None).is_none());
        assert!(Credential::resolve(Some(""), Some(&secret(""))).is_none());
    }

    #[test]
    fn debug_does_not_leak_the_key() {
        let cred = Credential::from("VALIDKEY");
        assert!(!format!("{cred:?}").contains("VALIDKEY"));
    }
}
