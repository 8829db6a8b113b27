/// Page section a signup came from, as forwarded to the collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupSource(String);

impl SignupSource {
    pub const FALLBACK: &'static str = "landing";

    /// Absent and empty tags both fall back to [`SignupSource::FALLBACK`].
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if !s.is_empty() => Self(s.to_owned()),
            _ => Self(Self::FALLBACK.to_owned()),
        }
    }
}

impl AsRef<str> for SignupSource {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SignupSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
