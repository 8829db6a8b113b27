use serde::Serialize;

use super::{SignupEmail, SignupSource};

#[derive(Debug)]
pub struct NewSignup {
    pub email: SignupEmail,
    /// Kept as submitted for the local record; see [`SignupSource`] for the forwarded value.
    pub source: Option<String>,
}

impl NewSignup {
    pub fn forward_payload<'a>(
        &'a self,
        source: &'a SignupSource,
        project_slug: &'a str,
        idea_id: &'a str,
    ) -> SignupForwardPayload<'a> {
        SignupForwardPayload {
            email: self.email.as_ref(),
            source: source.as_ref(),
            project_slug,
            idea_id,
        }
    }
}

/// Body of `POST {collector}/api/signups`.
#[derive(Debug, Serialize)]
pub struct SignupForwardPayload<'a> {
    pub email: &'a str,
    pub source: &'a str,
    pub project_slug: &'a str,
    pub idea_id: &'a str,
}
