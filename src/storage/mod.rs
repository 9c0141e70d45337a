use crate::models::Session;
use wasm_bindgen::JsCast;

pub(crate) const TOKEN_KEY: &str = "cookbook_access_token";

/// Cookie holding `{"id": <user id>}` as URL-encoded JSON.
pub(crate) const SESSION_COOKIE: &str = "user";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
}

pub(crate) fn load_access_token() -> Option<String> {
    local_storage()
        .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
        .filter(|t| !t.trim().is_empty())
}

pub(crate) fn save_access_token(token: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

pub(crate) fn clear_access_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

/// Raw `document.cookie`, or `None` outside a browser document.
pub(crate) fn read_document_cookie() -> Option<String> {
    html_document().and_then(|d| d.cookie().ok())
}

pub(crate) fn session_cookie_assignment(session: &Session) -> String {
    let json = serde_json::json!({ "id": session.user_id }).to_string();
    format!(
        "{SESSION_COOKIE}={}; path=/; SameSite=Lax",
        urlencoding::encode(&json)
    )
}

pub(crate) fn write_session_cookie(session: &Session) {
    if let Some(doc) = html_document() {
        let _ = doc.set_cookie(&session_cookie_assignment(session));
    }
}

pub(crate) fn clear_session_cookie() {
    if let Some(doc) = html_document() {
        let _ = doc.set_cookie(&format!(
            "{SESSION_COOKIE}=; path=/; expires=Thu, 01 Jan 1970 00:00:00 GMT"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_assignment_is_url_encoded_json() {
        let s = session_cookie_assignment(&Session {
            user_id: "5f0c-11".to_string(),
        });
        assert_eq!(s, "user=%7B%22id%22%3A%225f0c-11%22%7D; path=/; SameSite=Lax");
    }
}
