//! # Views
//!
//! Bare HTML for the auth forms and the landing page. There is no template
//! engine; every dynamic value goes through `escape`.

use crate::auth::CurrentUser;
use axum::response::{Html, IntoResponse, Response};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthForm {
    Register,
    Login,
}

impl AuthForm {
    fn title(self) -> &'static str {
        match self {
            AuthForm::Register => "Register",
            AuthForm::Login => "Log In",
        }
    }

    fn action(self) -> &'static str {
        match self {
            AuthForm::Register => "/auth/register",
            AuthForm::Login => "/auth/login",
        }
    }
}

/// A form to render together with the one-shot message for this response.
///
/// The flash is not stored anywhere: it exists only in the page it is
/// rendered into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPage {
    pub form: AuthForm,
    pub flash: Option<String>,
}

impl FormPage {
    pub fn new(form: AuthForm) -> Self {
        Self { form, flash: None }
    }

    pub fn with_flash(form: AuthForm, message: impl Into<String>) -> Self {
        Self {
            form,
            flash: Some(message.into()),
        }
    }

    pub fn render(&self) -> String {
        let title = self.form.title();
        let flash = self
            .flash
            .as_deref()
            .map(|message| format!("<div class=\"flash\">{}</div>\n", escape(message)))
            .unwrap_or_default();

        layout(
            title,
            &format!(
                "<h1>{title}</h1>\n\
                 {flash}\
                 <form method=\"post\" action=\"{action}\">\n\
                 <label for=\"username\">Username</label>\n\
                 <input name=\"username\" id=\"username\" required>\n\
                 <label for=\"password\">Password</label>\n\
                 <input type=\"password\" name=\"password\" id=\"password\" required>\n\
                 <input type=\"submit\" value=\"{title}\">\n\
                 </form>\n",
                action = self.form.action(),
            ),
        )
    }
}

impl IntoResponse for FormPage {
    fn into_response(self) -> Response {
        Html(self.render()).into_response()
    }
}

/// The landing page: who is logged in, and where to go next.
pub fn landing_page(current_user: &CurrentUser) -> Html<String> {
    let nav = match current_user.user() {
        Some(user) => format!(
            "<span>{}</span> <a href=\"/auth/logout\">Log Out</a>",
            escape(&user.username)
        ),
        None => "<a href=\"/auth/register\">Register</a> <a href=\"/auth/login\">Log In</a>"
            .to_string(),
    };

    Html(layout("Posts", &format!("<nav>{nav}</nav>\n<h1>Posts</h1>\n")))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><title>{title} - Blog</title></head>\n<body>\n{body}</body>\n</html>\n"
    )
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::User;

    #[test]
    fn flash_is_rendered_escaped() {
        let page = FormPage::with_flash(AuthForm::Register, "User <b>x</b> is already registered.");
        let html = page.render();

        assert!(html.contains("User &lt;b&gt;x&lt;/b&gt; is already registered."));
        assert!(!html.contains("<b>x</b>"));
        assert!(html.contains("action=\"/auth/register\""));
    }

    #[test]
    fn empty_form_has_no_flash() {
        let html = FormPage::new(AuthForm::Login).render();
        assert!(!html.contains("class=\"flash\""));
        assert!(html.contains("action=\"/auth/login\""));
    }

    #[test]
    fn landing_page_reflects_identity() {
        let anonymous = landing_page(&CurrentUser::anonymous()).0;
        assert!(anonymous.contains("/auth/login"));
        assert!(!anonymous.contains("/auth/logout"));

        let user = User {
            id: 7,
            username: "alice".into(),
            password_hash: "hash".into(),
            created_at: "2024-01-15T10:30:00+00:00".into(),
        };
        let logged_in = landing_page(&CurrentUser::authenticated(user)).0;
        assert!(logged_in.contains("alice"));
        assert!(logged_in.contains("/auth/logout"));
    }

    #[test]
    fn escape_handles_quotes_and_ampersands() {
        assert_eq!(escape(r#"a&b "c" 'd'"#), "a&amp;b &quot;c&quot; &#x27;d&#x27;");
    }
}
