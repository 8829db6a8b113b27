use anyhow::Context;
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::{
    collector_client::relay_signup,
    configuration::SignupConfiguration,
    domain::{NewSignup, SignupEmail, SignupSource},
    error::FormatterExt,
    startup::AppState,
};

#[derive(Debug)]
pub(crate) struct SignupRequest {
    email: Option<String>,
    source: Option<String>,
}

impl TryFrom<Value> for SignupRequest {
    type Error = anyhow::Error;

    /// Only an object carries fields; any other non-null body reads as an
    /// empty submission. Falsy emails count as missing, a truthy non-string
    /// email is not a signup at all. A non-string `source` is ignored.
    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let mut fields = match body {
            Value::Null => anyhow::bail!("The request body is null"),
            Value::Object(fields) => fields,
            _ => Map::new(),
        };

        let email = match fields.remove("email") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => None,
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => anyhow::bail!("Expected `email` to be a string, got {other}"),
        };

        let source = match fields.remove("source") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };

        Ok(Self { email, source })
    }
}

impl TryFrom<SignupRequest> for NewSignup {
    type Error = String;

    fn try_from(request: SignupRequest) -> Result<Self, Self::Error> {
        let email = SignupEmail::parse(request.email.unwrap_or_default())?;

        Ok(NewSignup {
            email,
            source: request.source,
        })
    }
}

#[derive(Serialize)]
pub(crate) struct SubscribeResponse {
    success: bool,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("Invalid email")]
    InvalidInput(String),
    #[error("Failed to subscribe")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_error_chain(self)
    }
}

impl IntoResponse for SubscribeError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            SubscribeError::InvalidInput(reason) => {
                tracing::warn!(reason = %reason, "Rejected signup");
                StatusCode::BAD_REQUEST
            }
            SubscribeError::UnexpectedError(_) => {
                tracing::error!(exception.details = ?self, exception.message = %self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

/// Handles signups coming from the landing and thank-you pages.
///
/// The body is read as JSON whatever the `Content-Type` says.
///
/// # Responses
///
/// - **`200 OK`** `{ "success": true }`, also when relaying to the collector failed.
/// - **`400 Bad Request`** `{ "error": "Invalid email" }` when the email is missing or has no `@`.
/// - **`500 Internal Server Error`** `{ "error": "Failed to subscribe" }` when the body
///   cannot be read, is not JSON, is `null`, or carries a non-string email.
#[tracing::instrument(
    name = "Adding a new signup",
    skip(state, body),
    fields(signup_email = tracing::field::Empty)
)]
pub(crate) async fn subscribe(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SubscribeResponse>, SubscribeError> {
    let body = body.context("Failed to read the request body")?;

    let body: Value =
        serde_json::from_slice(&body).context("Failed to parse the request body as JSON")?;

    let request = SignupRequest::try_from(body)?;

    let new_signup: NewSignup = request.try_into().map_err(SubscribeError::InvalidInput)?;

    tracing::Span::current().record("signup_email", tracing::field::display(&new_signup.email));

    let source = SignupSource::resolve(new_signup.source.as_deref());
    let payload = new_signup.forward_payload(
        &source,
        &state.signup.project_slug,
        &state.signup.idea_id,
    );

    relay_signup(state.collector.as_ref(), &payload).await;

    record_signup(&new_signup, &state.signup);

    Ok(Json(SubscribeResponse { success: true }))
}

/// Fallback audit trail, emitted whether or not the relay ran.
fn record_signup(new_signup: &NewSignup, signup: &SignupConfiguration) {
    tracing::info!(
        email = %new_signup.email,
        source = new_signup.source.as_deref(),
        project_slug = %signup.project_slug,
        idea_id = %signup.idea_id,
        timestamp = %Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "New signup"
    );
}
