use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use maud::Markup;
use serde::Deserialize;

use super::pages::{
    render_about_page, render_article_page, render_articles_page, render_contact_page,
    render_debug_api_page, render_debug_article_page, render_home_page, render_login_page,
    render_not_found_page, render_profile_page, render_register_page, ContactPageParams,
    DebugProbe, ListingParams, RegisterFormValues,
};
use super::AppState;
use crate::blocks::BLOCKS;
use crate::cms::{AuthSession, CmsError};

/// Create the router with all routes.
///
/// The diagnostic pages are only mounted when `debug_routes` is set.
pub fn router(debug_routes: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(home))
        .route("/articles", get(articles))
        .route("/articles/:key", get(article_detail))
        .route("/about", get(about))
        .route("/contact", get(contact_form).post(contact_submit))
        .route("/login", get(login_form).post(login_submit))
        .route("/register", get(register_form).post(register_submit))
        .route("/profile", get(profile))
        .route("/logout", get(logout))
        .route("/healthz", get(health))
        .route("/favicon.ico", get(favicon));

    let router = if debug_routes {
        router
            .route("/debug/articles/:id", get(debug_article))
            .route("/debug/api", get(debug_api))
    } else {
        router
    };

    router.fallback(not_found)
}

fn page(markup: Markup) -> Response {
    Html(markup.into_string()).into_response()
}

fn page_with_status(status: StatusCode, markup: Markup) -> Response {
    (status, Html(markup.into_string())).into_response()
}

// ========== Content Routes ==========

async fn home(State(state): State<AppState>) -> Response {
    match state.cms.get_articles().await {
        Ok(collection) => {
            let params =
                ListingParams::new(&collection.articles, collection.pagination.total);
            page(render_home_page(&state.config, &params))
        }
        Err(e) => {
            tracing::error!("Failed to fetch articles: {e}");
            let message = e.to_string();
            page(render_home_page(&state.config, &ListingParams::failed(&message)))
        }
    }
}

async fn articles(State(state): State<AppState>) -> Response {
    match state.cms.get_articles().await {
        Ok(collection) => {
            let params =
                ListingParams::new(&collection.articles, collection.pagination.total);
            page(render_articles_page(&state.config, &params))
        }
        Err(e) => {
            tracing::error!("Failed to fetch articles: {e}");
            let message = e.to_string();
            page(render_articles_page(&state.config, &ListingParams::failed(&message)))
        }
    }
}

async fn article_detail(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    let article = match state.cms.find_article(&key).await {
        Ok(a) => a,
        Err(CmsError::NotFound(what)) => {
            tracing::debug!(key = %key, "{what} not found");
            return not_found_page(&state);
        }
        Err(e) => {
            tracing::error!(key = %key, "Failed to fetch article: {e}");
            return not_found_page(&state);
        }
    };

    let output = BLOCKS.dispatch(&article.blocks);
    page(render_article_page(&state.config, &article, &output.fragments))
}

async fn about(State(state): State<AppState>) -> Response {
    page(render_about_page(&state.config))
}

// ========== Contact ==========

#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    success: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    message: String,
}

async fn contact_form(State(state): State<AppState>, Query(query): Query<ContactQuery>) -> Response {
    let params = ContactPageParams {
        success: query.success.as_deref().is_some_and(is_truthy),
        ..ContactPageParams::default()
    };
    page(render_contact_page(&state.config, &params))
}

async fn contact_submit(State(state): State<AppState>, Form(form): Form<ContactForm>) -> Response {
    match state.cms.submit_contact(&form.message).await {
        Ok(()) => Redirect::to("/contact?success=1").into_response(),
        Err(e) => {
            tracing::error!("Failed to submit contact message: {e}");
            let params = ContactPageParams {
                success: false,
                error: Some("Failed to send your message. Please try again."),
                message: Some(&form.message),
            };
            page_with_status(
                StatusCode::BAD_REQUEST,
                render_contact_page(&state.config, &params),
            )
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes")
}

// ========== Authentication ==========

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    token: Option<String>,
}

/// Map a failed login or registration to a status and the message to show.
///
/// Backend rejections keep their status and literal message; anything else
/// is a gateway failure with `generic` as the message.
fn auth_error(err: &CmsError, generic: &str) -> (StatusCode, String) {
    match err {
        CmsError::Auth(failure) => (
            StatusCode::from_u16(failure.status).unwrap_or(StatusCode::BAD_REQUEST),
            failure.message.clone(),
        ),
        other => {
            tracing::error!("Authentication request failed: {other}");
            (StatusCode::BAD_GATEWAY, generic.to_string())
        }
    }
}

fn redirect_to_profile(session: &AuthSession) -> Response {
    let location = format!("/profile?token={}", urlencoding::encode(&session.jwt));
    Redirect::to(&location).into_response()
}

async fn login_form(State(state): State<AppState>) -> Response {
    page(render_login_page(&state.config, None, None))
}

async fn login_submit(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state.cms.login(&form.email, &form.password).await {
        Ok(session) => {
            tracing::info!(user_id = session.user.id, "User logged in");
            redirect_to_profile(&session)
        }
        Err(e) => {
            let (status, message) =
                auth_error(&e, "An error occurred during login. Please try again later.");
            page_with_status(
                status,
                render_login_page(&state.config, Some(&message), Some(&form.email)),
            )
        }
    }
}

async fn register_form(State(state): State<AppState>) -> Response {
    page(render_register_page(
        &state.config,
        None,
        &RegisterFormValues::default(),
    ))
}

async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    match state
        .cms
        .register(&form.username, &form.email, &form.password)
        .await
    {
        Ok(session) => {
            tracing::info!(user_id = session.user.id, "User registered");
            redirect_to_profile(&session)
        }
        Err(e) => {
            let (status, message) = auth_error(
                &e,
                "An error occurred during registration. Please try again later.",
            );
            let values = RegisterFormValues {
                username: Some(&form.username),
                email: Some(&form.email),
            };
            page_with_status(
                status,
                render_register_page(&state.config, Some(&message), &values),
            )
        }
    }
}

async fn profile(State(state): State<AppState>, Query(query): Query<ProfileQuery>) -> Response {
    let Some(token) = query.token.filter(|t| !t.is_empty()) else {
        return Redirect::to("/login").into_response();
    };

    match state.cms.get_current_user(&token).await {
        Ok(user) => (
            [
                (header::REFERRER_POLICY, "no-referrer"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            Html(render_profile_page(&state.config, &user).into_string()),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Failed to fetch current user: {e}");
            Redirect::to("/login").into_response()
        }
    }
}

async fn logout() -> Redirect {
    Redirect::to("/login")
}

// ========== Misc ==========

async fn health() -> &'static str {
    "OK"
}

async fn favicon() -> Response {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><text y=".9em" font-size="90">📰</text></svg>"#;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/svg+xml")],
        svg,
    )
        .into_response()
}

fn not_found_page(state: &AppState) -> Response {
    page_with_status(StatusCode::NOT_FOUND, render_not_found_page(&state.config))
}

async fn not_found(State(state): State<AppState>) -> Response {
    not_found_page(&state)
}

// ========== Debug Routes ==========

async fn debug_article(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let direct_path = format!("/articles/{}", urlencoding::encode(&id));
    let direct = state.cms.fetch_raw(&direct_path, &[("populate", "*")]).await;
    let filtered = state
        .cms
        .fetch_raw(
            "/articles",
            &[("filters[id][$eq]", id.as_str()), ("populate", "*")],
        )
        .await;

    let direct = DebugProbe::new("Direct lookup", direct.as_ref().map_err(ToString::to_string));
    let filtered =
        DebugProbe::new("Filtered lookup", filtered.as_ref().map_err(ToString::to_string));
    page(render_debug_article_page(&state.config, &id, &direct, &filtered))
}

async fn debug_api(State(state): State<AppState>) -> Response {
    let response = state.cms.fetch_raw("/articles", &[("populate", "*")]).await;
    let probe = DebugProbe::new("Articles", response.as_ref().map_err(ToString::to_string));
    page(render_debug_api_page(&state.config, &probe))
}
