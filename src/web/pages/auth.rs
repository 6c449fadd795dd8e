//! Authentication pages: login, registration and the profile view.

use maud::{html, Markup};

use crate::cms::User;
use crate::components::{
    format_date, Alert, BaseLayout, Button, ConfirmationBadge, Field, Form, KeyValueTable,
};
use crate::config::Config;

/// Render the login page.
///
/// `email` is echoed back into the form after a rejected attempt; the
/// password never is.
///
/// # Example
///
/// ```ignore
/// let page = render_login_page(&config, Some("Invalid identifier or password"), Some("a@b.c"));
/// ```
#[must_use]
pub fn render_login_page(config: &Config, error: Option<&str>, email: Option<&str>) -> Markup {
    let content = html! {
        div class="auth-container" {
            h1 { "Login" }
            @if let Some(message) = error {
                (Alert::error(message))
            }
            (Form::post("/login", "auth-form", html! {
                (Field::email("email", "Email").value(email).autocomplete("email"))
                (Field::password("password", "Password").autocomplete("current-password"))
                (Button::primary("Login").submit())
            }))
            p class="auth-switch" {
                "Don't have an account? "
                a href="/register" { "Register" }
            }
        }
    };

    BaseLayout::new("Login", &config.site_name)
        .with_description("Sign in to your account.")
        .render(content)
}

/// Values echoed back into the registration form.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisterFormValues<'a> {
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
}

/// Render the registration page.
#[must_use]
pub fn render_register_page(
    config: &Config,
    error: Option<&str>,
    values: &RegisterFormValues<'_>,
) -> Markup {
    let content = html! {
        div class="auth-container" {
            h1 { "Register" }
            @if let Some(message) = error {
                (Alert::error(message))
            }
            (Form::post("/register", "auth-form", html! {
                (Field::text("username", "Username")
                    .value(values.username)
                    .autocomplete("username"))
                (Field::email("email", "Email").value(values.email).autocomplete("email"))
                (Field::password("password", "Password")
                    .autocomplete("new-password")
                    .minlength(6)
                    .help("At least 6 characters."))
                (Button::primary("Create Account").submit())
            }))
            p class="auth-switch" {
                "Already have an account? "
                a href="/login" { "Login" }
            }
        }
    };

    BaseLayout::new("Register", &config.site_name)
        .with_description("Create a new account.")
        .render(content)
}

/// Render the signed-in user's profile.
#[must_use]
pub fn render_profile_page(config: &Config, user: &User) -> Markup {
    let table = KeyValueTable::profile()
        .row("Username", &user.username)
        .row("Email", &user.email)
        .row("User ID", user.id)
        .row_if("Provider", user.provider.as_deref())
        .row("Account Status", ConfirmationBadge::new(user.confirmed))
        .row_if("Member Since", user.created_at.as_ref().map(format_date))
        .row_if("Role", user.role.as_ref().map(|r| r.name.as_str()));

    let content = html! {
        div class="profile-container" {
            h1 { "Welcome, " (user.username) }
            @if user.blocked {
                (Alert::warning("This account has been blocked."))
            }
            (table)
            div class="profile-actions" {
                (Button::outline("Logout").href("/logout"))
            }
        }
    };

    BaseLayout::new("Profile", &config.site_name)
        .signed_in(true)
        .render(content)
}
