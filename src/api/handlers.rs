use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite as ActixSameSite};
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, HttpResponseBuilder};
use chrono::Utc;

use crate::credentials::Credentials;
use crate::crypto::PasswordHasher;
use crate::secret::SecretString;
use crate::session::{
    open_token, seal_token, Gate, SameSite, SessionConfig, SessionToken, Verdict,
};
use crate::AuthError;

use super::flash::{clear_flash_cookie, flash_cookie, pending_flash};
use super::pages;
use super::proxy::script_name;
use super::types::LoginForm;

const EXPIRED_NOTICE: &str = "Session expired";
const DELETE_NOTICE: &str = "Data deletion in progress...";

fn build_session_cookie(sealed_value: String, config: &SessionConfig) -> Cookie<'static> {
    let same_site = match config.cookie_same_site {
        SameSite::None => ActixSameSite::None,
        SameSite::Lax => ActixSameSite::Lax,
        SameSite::Strict => ActixSameSite::Strict,
    };

    // The cookie outlives the idle window so expiry is decided by the gate,
    // not by the browser silently dropping the cookie first.
    let max_age_secs = config.idle_timeout.num_seconds() * 2;

    Cookie::build(config.cookie_name.clone(), sealed_value)
        .path(config.cookie_path.clone())
        .secure(config.cookie_secure)
        .http_only(config.cookie_http_only)
        .same_site(same_site)
        .max_age(CookieDuration::seconds(max_age_secs))
        .finish()
}

fn build_removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), String::new())
        .path(config.cookie_path.clone())
        .max_age(CookieDuration::ZERO)
        .finish()
}

/// The session token the request carried in. A missing, tampered, or
/// unparseable cookie all read as an anonymous token; the gate fails
/// closed on anything partial.
fn read_token(req: &HttpRequest, config: &SessionConfig) -> SessionToken {
    req.cookie(&config.cookie_name)
        .and_then(|cookie| open_token(cookie.value(), &config.secret_key))
        .unwrap_or_else(SessionToken::anonymous)
}

fn redirect(req: &HttpRequest, path: &str) -> HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, format!("{}{}", script_name(req), path)));
    builder
}

fn html(mut builder: HttpResponseBuilder, body: String) -> HttpResponse {
    builder
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Redirect to the login page after an expired session: the stale cookie is
/// dropped and the notice is queued for the login form.
fn expired_response(req: &HttpRequest, config: &SessionConfig) -> HttpResponse {
    log::info!(target: "wicket::session", "msg=\"session expired\"");
    redirect(req, "/login")
        .cookie(build_removal_cookie(config))
        .cookie(flash_cookie(EXPIRED_NOTICE))
        .finish()
}

/// `GET /` — the protected page.
pub async fn index(req: HttpRequest, config: web::Data<SessionConfig>) -> HttpResponse {
    let gate = Gate::new(config.idle_timeout);
    let mut token = read_token(&req, &config);

    match gate.authenticate(&mut token, Utc::now()) {
        Verdict::Authenticated => {
            let username = token.username.clone().unwrap_or_default();
            let notice = pending_flash(&req);

            let sealed = seal_token(&token, &config.secret_key);
            let mut builder = HttpResponse::Ok();
            builder.cookie(build_session_cookie(sealed, &config));
            if notice.is_some() {
                builder.cookie(clear_flash_cookie());
            }

            html(
                builder,
                pages::index_page(&script_name(&req), &username, notice.as_deref()),
            )
        }
        Verdict::Expired => expired_response(&req, &config),
        Verdict::NotLoggedIn => redirect(&req, "/login").finish(),
    }
}

/// `GET /login` — the login form, with any queued notice.
pub async fn show_login(req: HttpRequest) -> HttpResponse {
    let notice = pending_flash(&req);

    let mut builder = HttpResponse::Ok();
    if notice.is_some() {
        builder.cookie(clear_flash_cookie());
    }

    html(builder, pages::login_page(&script_name(&req), notice.as_deref()))
}

/// `POST /login` — verify credentials; set the session cookie and redirect
/// home on success, re-render the form on failure.
pub async fn submit_login<H>(
    req: HttpRequest,
    form: web::Form<LoginForm>,
    hasher: web::Data<H>,
    credentials: web::Data<Credentials>,
    config: web::Data<SessionConfig>,
) -> HttpResponse
where
    H: PasswordHasher + 'static,
{
    let gate = Gate::new(config.idle_timeout);
    let password = SecretString::new(form.password.clone());

    match gate.login(
        hasher.get_ref(),
        credentials.get_ref(),
        &form.username,
        &password,
        Utc::now(),
    ) {
        Ok(token) => {
            let sealed = seal_token(&token, &config.secret_key);
            redirect(&req, "/")
                .cookie(build_session_cookie(sealed, &config))
                .finish()
        }
        Err(AuthError::InvalidCredentials) => html(
            HttpResponse::Unauthorized(),
            pages::login_page(&script_name(&req), Some(&AuthError::InvalidCredentials.to_string())),
        ),
        Err(err) => {
            log::error!(target: "wicket", "msg=\"login check failed\" error=\"{err}\"");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// `GET /logout` — clear the session and return home (which redirects to
/// the login form). Never errors, logged in or not.
pub async fn logout(req: HttpRequest, config: web::Data<SessionConfig>) -> HttpResponse {
    let gate = Gate::new(config.idle_timeout);
    let mut token = read_token(&req, &config);
    gate.logout(&mut token);

    log::info!(target: "wicket::session", "msg=\"logout\"");
    redirect(&req, "/")
        .cookie(build_removal_cookie(&config))
        .finish()
}

/// `GET /delete` — placeholder action behind the same gate as the
/// protected page. Performs no deletion; queues a notice and returns home.
pub async fn delete_data(req: HttpRequest, config: web::Data<SessionConfig>) -> HttpResponse {
    let gate = Gate::new(config.idle_timeout);
    let mut token = read_token(&req, &config);

    match gate.authenticate(&mut token, Utc::now()) {
        Verdict::Authenticated => {
            let sealed = seal_token(&token, &config.secret_key);
            redirect(&req, "/")
                .cookie(build_session_cookie(sealed, &config))
                .cookie(flash_cookie(DELETE_NOTICE))
                .finish()
        }
        Verdict::Expired => expired_response(&req, &config),
        Verdict::NotLoggedIn => redirect(&req, "/login").finish(),
    }
}
