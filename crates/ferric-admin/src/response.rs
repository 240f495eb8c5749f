//! Admin responses.
//!
//! The post/redirect/get loop for forms: a failed submit flashes the
//! validation errors and old input into the session and redirects back;
//! the redisplaying handler takes them out and reinstates them on the
//! form.

use std::collections::HashMap;

use ferric_auth::AdminSession;
use ferric_forms::{DataMap, ValidationErrors};
use tracing::debug;

/// A response produced by an admin handler.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Creates a 200 response with HTML content.
    pub fn html(body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self {
            status: 200,
            headers: [(
                "Content-Type".to_string(),
                "text/html; charset=utf-8".to_string(),
            )]
            .into_iter()
            .collect(),
            body: body.into_bytes(),
        }
    }

    /// Creates a 302 redirect to another admin URL.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            status: 302,
            headers: [("Location".to_string(), location.into())]
                .into_iter()
                .collect(),
            body: Vec::new(),
        }
    }

    /// Redirects back after a failed submit, flashing the errors and
    /// the submitted input into the session for one redisplay.
    pub fn redirect_with_errors(
        location: impl Into<String>,
        errors: ValidationErrors,
        old_input: DataMap,
        session: &mut AdminSession,
    ) -> Self {
        let location = location.into();
        debug!(%location, failed_fields = errors.len(), "form submit failed, redirecting back");
        session.flash("errors", &errors);
        session.flash("old_input", &old_input);
        Self::redirect(location)
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the status code.
    #[must_use]
    pub const fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Returns the redirect target, when this is a redirect.
    pub fn location(&self) -> Option<&str> {
        self.headers.get("Location").map(String::as_str)
    }

    /// Returns the body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }
}

/// Takes flashed form state out of the session, if a failed submit
/// left any.
pub fn take_form_state(session: &mut AdminSession) -> (Option<ValidationErrors>, Option<DataMap>) {
    (
        session.take_flash("errors"),
        session.take_flash("old_input"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_redirect_flashes_form_state() {
        let mut session = AdminSession::new();
        let mut errors = ValidationErrors::new();
        errors.add("email", "The Email field is required.");
        let old_input = json!({"name": "Alice"}).as_object().cloned().unwrap();

        let response = Response::redirect_with_errors(
            "/admin/users/create",
            errors,
            old_input,
            &mut session,
        );
        assert_eq!(response.status, 302);
        assert_eq!(response.location(), Some("/admin/users/create"));

        let (errors, old_input) = take_form_state(&mut session);
        assert!(errors.is_some_and(|e| e.get("email").is_some()));
        assert_eq!(
            old_input.and_then(|i| i.get("name").cloned()),
            Some(json!("Alice"))
        );

        // The flash is one-shot.
        let (errors, old_input) = take_form_state(&mut session);
        assert!(errors.is_none());
        assert!(old_input.is_none());
    }

    #[test]
    fn test_html_response() {
        let response = Response::html("<p>ok</p>");
        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get("Content-Type"),
            Some(&"text/html; charset=utf-8".to_string())
        );
        assert_eq!(response.body_string(), Some("<p>ok</p>".to_string()));
    }

    #[test]
    fn test_header_builder() {
        let response = Response::html("x").header("X-Pjax-Url", "/admin").status(201);
        assert_eq!(response.status, 201);
        assert_eq!(response.headers.get("X-Pjax-Url"), Some(&"/admin".to_string()));
    }
}
