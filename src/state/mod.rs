pub(crate) mod session;

pub(crate) use session::SessionContext;

use crate::api::{ApiClient, Gateway};
use crate::models::Session;
use crate::storage::{clear_access_token, save_access_token};
use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// One auth-service lookup for the held access token.
pub(crate) async fn restore_session<G: Gateway>(gateway: &G) -> Option<Session> {
    match gateway.get_session().await {
        Ok(Some(s)) => {
            log!("Session restored for user {}", s.user_id);
            Some(s)
        }
        Ok(None) => {
            log!("No active session. Please log in.");
            None
        }
        Err(e) => {
            warn!("Error fetching session: {e}");
            None
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    /// The single gateway client, created at the composition root.
    pub api_client: RwSignal<ApiClient>,
    pub session: SessionContext,
}

impl AppState {
    pub fn new(api_client: ApiClient, session: SessionContext) -> Self {
        Self {
            api_client: RwSignal::new(api_client),
            session,
        }
    }

    /// Without a session cookie, ask the auth service once whether the stored
    /// access token still names a user.
    pub fn bootstrap_session(&self) {
        if self.session.is_identified_untracked() {
            return;
        }

        let api_client = self.api_client.get_untracked();
        if !api_client.is_authenticated() {
            return;
        }

        let session = self.session;
        spawn_local(async move {
            if let Some(s) = restore_session(&api_client).await {
                session.sign_in(s);
            }
        });
    }

    pub fn sign_in(&self, token: String, session: Session) {
        save_access_token(&token);
        self.api_client.update(|c| c.set_token(token));
        self.session.sign_in(session);
    }

    pub fn sign_out(&self) {
        clear_access_token();
        self.api_client.update(|c| c.clear_token());
        self.session.sign_out();
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{Call, MockGateway};

    #[tokio::test]
    async fn test_restore_session_asks_once() {
        let gw = MockGateway::new().with_session("u-7");
        assert_eq!(
            restore_session(&gw).await,
            Some(Session {
                user_id: "u-7".to_string()
            })
        );
        assert_eq!(gw.calls(), vec![Call::GetSession]);
    }

    #[tokio::test]
    async fn test_restore_session_without_user_stays_anonymous() {
        let gw = MockGateway::new();
        assert_eq!(restore_session(&gw).await, None);
    }
}
