//! Session cookie handling.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::domain::SessionId;

/// Name of the cookie carrying the session identifier
pub const SESSION_COOKIE: &str = "sessionId";

/// Lifetime of a minted session cookie
pub const SESSION_MAX_AGE: Duration = Duration::days(7);

/// Read the session identifier from the request cookies, if any.
pub fn session_from_jar(jar: &CookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value()))
}

/// Build the cookie echoing `session` back to the client.
pub fn session_cookie(session: &SessionId) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.to_string()))
        .path("/")
        .max_age(SESSION_MAX_AGE)
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Return the caller's session, minting one and adding its cookie to `jar`
/// when the request carried none.
pub fn resolve_or_mint(jar: CookieJar) -> (CookieJar, SessionId) {
    match session_from_jar(&jar) {
        Some(session) => (jar, session),
        None => {
            let session = SessionId::generate();
            tracing::info!("Minted new session");
            (jar.add(session_cookie(&session)), session)
        }
    }
}
