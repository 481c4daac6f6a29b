//! Auth cookie construction.
//!
//! Both cookies live for the refresh-token TTL; the access token inside its
//! cookie simply goes stale first and is replaced via `/auth/refresh`.

use axum_extra::extract::cookie::{Cookie, SameSite};

use stepflow_core::config::auth::AuthConfig;

/// Cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
/// Cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Build an auth cookie with the shared attribute set.
pub fn auth_cookie(name: &'static str, value: String, config: &AuthConfig) -> Cookie<'static> {
    let max_age = time::Duration::hours(config.refresh_ttl_hours as i64);

    let mut cookie = Cookie::new(name, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_secure(config.cookie_secure);
    cookie.set_max_age(max_age);
    cookie
}

/// Build an immediately-expiring cookie that clears `name` on the client.
pub fn removal_cookie(name: &'static str, config: &AuthConfig) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_secure(config.cookie_secure);
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_cookie_attributes() {
        let config = AuthConfig::default();
        let cookie = auth_cookie(ACCESS_TOKEN_COOKIE, "tok".to_string(), &config);

        assert_eq!(cookie.name(), "accessToken");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(6)));
    }

    #[test]
    fn test_removal_cookie_expires_now() {
        let config = AuthConfig::default();
        let cookie = removal_cookie(REFRESH_TOKEN_COOKIE, &config);
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert_eq!(cookie.value(), "");
    }
}
