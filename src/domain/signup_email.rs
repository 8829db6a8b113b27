#[derive(Debug, Clone)]
pub struct SignupEmail(String);

impl SignupEmail {
    /// Only checks for a non-empty address containing an `@`.
    /// Anything stricter is left to the collector.
    pub fn parse(s: String) -> Result<SignupEmail, String> {
        if !s.is_empty() && s.contains('@') {
            return Ok(Self(s));
        }

        Err(format!("{s:?} is not a valid email."))
    }
}

impl std::fmt::Display for SignupEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for SignupEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
