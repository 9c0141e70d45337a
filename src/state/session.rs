use crate::models::Session;
use crate::storage::{
    clear_session_cookie, read_document_cookie, write_session_cookie, SESSION_COOKIE,
};
use leptos::logging::warn;
use leptos::prelude::*;
use serde::Deserialize;

#[derive(Deserialize)]
struct SessionCookie {
    id: serde_json::Value,
}

/// Extract the session from a `document.cookie` string.
///
/// Anything unexpected (missing cookie, bad encoding, bad JSON, empty id) means
/// "anonymous"; it is never an error for the caller.
pub(crate) fn parse_session_cookie(cookies: &str) -> Option<Session> {
    let raw = cookies
        .split(';')
        .map(str::trim)
        .find_map(|c| c.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))?;

    let decoded = match urlencoding::decode(raw) {
        Ok(d) => d,
        Err(e) => {
            warn!("Error decoding user cookie: {e}");
            return None;
        }
    };

    let cookie: SessionCookie = match serde_json::from_str(&decoded) {
        Ok(c) => c,
        Err(e) => {
            warn!("Error parsing user cookie: {e}");
            return None;
        }
    };

    let user_id = match cookie.id {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };

    (!user_id.trim().is_empty()).then_some(Session { user_id })
}

/// Current session, shared from the application root.
///
/// Reads through [`SessionContext::user_id`] are tracked, so views and effects
/// re-run when the user signs in or out.
#[derive(Clone, Copy)]
pub(crate) struct SessionContext {
    current: RwSignal<Option<Session>>,
}

impl SessionContext {
    pub fn new(initial: Option<Session>) -> Self {
        Self {
            current: RwSignal::new(initial),
        }
    }

    pub fn from_document() -> Self {
        Self::new(read_document_cookie().and_then(|c| parse_session_cookie(&c)))
    }

    pub fn user_id(&self) -> Option<String> {
        self.current
            .with(|s| s.as_ref().map(|s| s.user_id.clone()))
    }

    pub fn user_id_untracked(&self) -> Option<String> {
        self.current
            .with_untracked(|s| s.as_ref().map(|s| s.user_id.clone()))
    }

    pub fn is_identified_untracked(&self) -> bool {
        self.current.with_untracked(Option::is_some)
    }

    pub fn sign_in(&self, session: Session) {
        write_session_cookie(&session);
        self.current.set(Some(session));
    }

    pub fn sign_out(&self) {
        clear_session_cookie();
        self.current.set(None);
    }
}
