use crate::api::{ApiClient, EnvConfig};
use crate::pages::{HomePage, LoginPage, NotFoundPage, RecipeManagementPage, RecordDetailPage};
use crate::state::{AppContext, AppState, SessionContext};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let config = EnvConfig::new();
    let app_state = AppState::new(
        ApiClient::load_from_storage(&config),
        SessionContext::from_document(),
    );
    provide_context(AppContext(app_state));
    app_state.bootstrap_session();

    view! {
        <Router>
            <Routes fallback=NotFoundPage>
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("admin/recipes") view=RecipeManagementPage />
                <Route path=path!("recipes/:kind/:id") view=RecordDetailPage />
                <Route path=path!("") view=HomePage />
            </Routes>
        </Router>
    }
}
