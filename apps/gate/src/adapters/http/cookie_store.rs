//! The `token` cookie as a [`TokenStore`].
//!
//! Changes accumulate in an axum-extra `CookieJar` and are written back as
//! `Set-Cookie` headers when the jar is returned with the response.

use std::sync::{Mutex, PoisonError};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use mentorship_sdk::{TOKEN_KEY, TokenStore};

pub struct CookieTokenStore {
    jar: Mutex<CookieJar>,
    secure: bool,
}

impl CookieTokenStore {
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self {
            jar: Mutex::new(jar),
            secure,
        }
    }

    /// The jar with every change made so far.
    pub fn jar(&self) -> CookieJar {
        self.jar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn cookie(&self, value: String) -> Cookie<'static> {
        // Session-scoped: the token's own `exp` bounds its lifetime.
        Cookie::build((TOKEN_KEY, value))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .build()
    }

    fn update(&self, cookie: Cookie<'static>) {
        let mut jar = self.jar.lock().unwrap_or_else(PoisonError::into_inner);
        *jar = jar.clone().add(cookie);
    }
}

impl TokenStore for CookieTokenStore {
    fn name(&self) -> &'static str {
        "cookie"
    }

    fn load(&self) -> Option<String> {
        self.jar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(TOKEN_KEY)
            .map(|c| c.value().to_owned())
            .filter(|v| !v.is_empty())
    }

    fn save(&self, token: &str) {
        self.update(self.cookie(token.to_owned()));
    }

    fn clear(&self) {
        let mut cookie = self.cookie(String::new());
        cookie.set_max_age(time::Duration::seconds(0));
        self.update(cookie);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_reads_request_cookie() {
        let jar = CookieJar::new().add(Cookie::new(TOKEN_KEY, "abc"));
        let store = CookieTokenStore::new(jar, false);

        assert_eq!(store.load(), Some("abc".to_string()));
        assert_eq!(store.name(), "cookie");
    }

    #[test]
    fn test_save_sets_hardened_cookie() {
        let store = CookieTokenStore::new(CookieJar::new(), true);

        store.save("eyJ.token");

        let jar = store.jar();
        let cookie = jar.get(TOKEN_KEY).unwrap();
        assert_eq!(cookie.value(), "eyJ.token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), None);
    }

    #[test]
    fn test_clear_expires_cookie() {
        let jar = CookieJar::new().add(Cookie::new(TOKEN_KEY, "abc"));
        let store = CookieTokenStore::new(jar, false);

        store.clear();

        assert_eq!(store.load(), None);
        let jar = store.jar();
        let cookie = jar.get(TOKEN_KEY).unwrap();
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(0)));
        assert!(cookie.to_string().contains("Max-Age=0"));
    }
}
