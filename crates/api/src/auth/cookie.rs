//! Session cookie helpers over [`CookieJar`].

use axum_extra::extract::cookie::{Cookie, CookieJar};

use super::session::SessionConfig;

/// The session token carried in `jar`. An empty value is treated as absent.
pub fn session_token<'a>(jar: &'a CookieJar, config: &SessionConfig) -> Option<&'a str> {
    jar.get(&config.cookie_name)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
}

/// Removal cookie for the session, scoped with the same `Path` and `Domain`
/// the login flow sets it with.
pub fn session_removal(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build((config.cookie_name.clone(), ""))
        .path(config.cookie_path.clone())
        .http_only(true)
        .removal();
    if let Some(domain) = &config.cookie_domain {
        cookie = cookie.domain(domain.clone());
    }
    cookie.build()
}
