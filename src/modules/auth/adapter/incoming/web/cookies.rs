use actix_web::cookie::{time::Duration, Cookie, SameSite};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Refresh cookies are only sent to the auth endpoints.
const REFRESH_COOKIE_PATH: &str = "/api/auth";

/// Attributes of the http-only session cookies issued at login and refresh.
#[derive(Debug, Clone)]
pub struct AuthCookieConfig {
    pub secure: bool,
    pub access_max_age_secs: i64,
    pub refresh_max_age_secs: i64,
}

impl AuthCookieConfig {
    pub fn new(secure: bool, access_max_age_secs: i64, refresh_max_age_secs: i64) -> Self {
        Self {
            secure,
            access_max_age_secs,
            refresh_max_age_secs,
        }
    }

    /// `COOKIE_SECURE` wins when set; otherwise cookies are secure outside development and test.
    pub fn secure_from_env() -> bool {
        match std::env::var("COOKIE_SECURE") {
            Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
            Err(_) => !matches!(
                std::env::var("RUST_ENV").as_deref(),
                Ok("development") | Ok("test") | Err(_)
            ),
        }
    }

    pub fn access_cookie(&self, token: &str) -> Cookie<'static> {
        self.build(ACCESS_TOKEN_COOKIE, "/", token.to_string(), self.access_max_age_secs)
    }

    pub fn refresh_cookie(&self, token: &str) -> Cookie<'static> {
        self.build(
            REFRESH_TOKEN_COOKIE,
            REFRESH_COOKIE_PATH,
            token.to_string(),
            self.refresh_max_age_secs,
        )
    }

    /// Expired, empty copies of both session cookies.
    pub fn cleared(&self) -> Vec<Cookie<'static>> {
        vec![
            self.build(ACCESS_TOKEN_COOKIE, "/", String::new(), 0),
            self.build(REFRESH_TOKEN_COOKIE, REFRESH_COOKIE_PATH, String::new(), 0),
        ]
    }

    fn build(
        &self,
        name: &'static str,
        path: &'static str,
        value: String,
        max_age_secs: i64,
    ) -> Cookie<'static> {
        Cookie::build(name, value)
            .path(path)
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(max_age_secs))
            .finish()
    }
}

impl Default for AuthCookieConfig {
    fn default() -> Self {
        Self::new(false, 1800, 604_800)
    }
}
