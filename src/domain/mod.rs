mod new_signup;
mod signup_email;
mod signup_source;

// re-exports
pub use new_signup::{NewSignup, SignupForwardPayload};
pub use signup_email::SignupEmail;
pub use signup_source::SignupSource;
