// src/common/session.rs
//
// Cookies do navegador: o token de sessão (JWT) e a mensagem "flash"
// que sobrevive a um redirect até a próxima view renderizada.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

// Para onde o guard manda quem não está autenticado.
pub const LOGIN_PATH: &str = "/my-login";

/// Mensagens de sucesso exibidas depois de um redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    AccountCreated,
    RecordCreated,
    RecordUpdated,
    RecordDeleted,
    LoggedOut,
}

impl Flash {
    // O cookie guarda só o código; o texto fica no servidor.
    fn code(self) -> &'static str {
        match self {
            Flash::AccountCreated => "account_created",
            Flash::RecordCreated => "record_created",
            Flash::RecordUpdated => "record_updated",
            Flash::RecordDeleted => "record_deleted",
            Flash::LoggedOut => "logged_out",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "account_created" => Some(Flash::AccountCreated),
            "record_created" => Some(Flash::RecordCreated),
            "record_updated" => Some(Flash::RecordUpdated),
            "record_deleted" => Some(Flash::RecordDeleted),
            "logged_out" => Some(Flash::LoggedOut),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::AccountCreated => "Account created successfully!",
            Flash::RecordCreated => "Your record was created!",
            Flash::RecordUpdated => "Your record was updated!",
            Flash::RecordDeleted => "Your record was deleted!",
            Flash::LoggedOut => "Logout success!",
        }
    }
}

fn base_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

// `CookieJar::remove` só gera o Set-Cookie se o cookie veio na requisição;
// adicionamos a versão "de remoção" explicitamente.
fn removal(name: &'static str) -> Cookie<'static> {
    let mut cookie = base_cookie(name, String::new());
    cookie.make_removal();
    cookie
}

pub fn start_session(jar: CookieJar, token: String, secure: bool) -> CookieJar {
    let mut cookie = base_cookie(SESSION_COOKIE, token);
    cookie.set_secure(secure);
    jar.add(cookie)
}

pub fn end_session(jar: CookieJar) -> CookieJar {
    jar.add(removal(SESSION_COOKIE))
}

pub fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|token| !token.is_empty())
}

pub fn push_flash(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(base_cookie(FLASH_COOKIE, flash.code().to_string()))
}

/// Consome a mensagem pendente (se houver).
pub fn take_flash(jar: CookieJar) -> (CookieJar, Vec<String>) {
    let Some(code) = jar.get(FLASH_COOKIE).map(|cookie| cookie.value().to_string()) else {
        return (jar, Vec::new());
    };

    let messages = Flash::from_code(&code)
        .map(|flash| vec![flash.message().to_string()])
        .unwrap_or_default();

    (jar.add(removal(FLASH_COOKIE)), messages)
}
