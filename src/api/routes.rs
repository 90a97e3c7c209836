//! Route table for the gated application.

use actix_web::web;

use crate::crypto::PasswordHasher;

use super::handlers;

/// Configures the application's routes.
///
/// # Routes
///
/// - `GET /` - The protected page (redirects to `/login` when not authenticated)
/// - `GET /login` - Login form
/// - `POST /login` - Credential check, sets the session cookie
/// - `GET /logout` - Clears the session
/// - `GET /delete` - Placeholder action, protected by the same gate
///
/// # Example
///
/// ```rust,ignore
/// use wicket::api::gate_routes;
/// use wicket::Argon2Hasher;
///
/// App::new()
///     .app_data(web::Data::new(session_config))
///     .app_data(web::Data::new(credentials))
///     .app_data(web::Data::new(hasher))
///     .configure(gate_routes::<Argon2Hasher>)
/// ```
pub fn gate_routes<H>(cfg: &mut web::ServiceConfig)
where
    H: PasswordHasher + 'static,
{
    cfg.route("/", web::get().to(handlers::index))
        .route("/login", web::get().to(handlers::show_login))
        .route("/login", web::post().to(handlers::submit_login::<H>))
        .route("/logout", web::get().to(handlers::logout))
        .route("/delete", web::get().to(handlers::delete_data));
}
