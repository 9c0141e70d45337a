mod api;
mod app;
mod collections;
mod components;
mod layout;
mod models;
mod pages;
mod profile;
mod state;
mod storage;

use crate::app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::api::{ApiClient, EnvConfig};
    use crate::collections::{CollectionSection, CreateRecordDialog};
    use crate::layout::Header;
    use crate::models::{CollectionItem, CollectionKind, Session};
    use crate::state::session::parse_session_cookie;
    use crate::state::{AppContext, AppState, SessionContext};
    use crate::storage::{
        clear_access_token, clear_session_cookie, load_access_token, read_document_cookie,
        save_access_token, write_session_cookie,
    };
    use leptos::mount::mount_to;
    use leptos::prelude::*;
    use leptos_router::components::Router;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn container() -> web_sys::HtmlElement {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("test page should have a document");
        let el = document
            .create_element("div")
            .expect("should create div")
            .dyn_into::<web_sys::HtmlElement>()
            .expect("div is an HtmlElement");
        document
            .body()
            .expect("test page should have a body")
            .append_child(&el)
            .expect("should attach container");
        el
    }

    /// Let queued effects and tasks run.
    async fn next_tick() {
        let promise = js_sys::Promise::new(&mut |resolve, _| {
            let _ = web_sys::window()
                .expect("window")
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0);
        });
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    }

    fn press_escape() {
        let init = web_sys::KeyboardEventInit::new();
        init.set_key("Escape");
        let ev = web_sys::KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
            .expect("should build keydown event");
        web_sys::window()
            .expect("window")
            .dispatch_event(&ev)
            .expect("should dispatch keydown");
    }

    #[wasm_bindgen_test]
    fn test_access_token_storage_roundtrip() {
        let config = EnvConfig::from_values(None, None);
        clear_access_token();
        assert!(!ApiClient::load_from_storage(&config).is_authenticated());

        save_access_token("t1");
        assert_eq!(load_access_token().as_deref(), Some("t1"));
        assert!(ApiClient::load_from_storage(&config).is_authenticated());

        clear_access_token();
        assert!(load_access_token().is_none());
    }

    #[wasm_bindgen_test]
    fn test_session_cookie_roundtrip() {
        write_session_cookie(&Session {
            user_id: "u-42".to_string(),
        });
        let cookies = read_document_cookie().expect("document.cookie should be readable");
        assert_eq!(
            parse_session_cookie(&cookies).map(|s| s.user_id).as_deref(),
            Some("u-42")
        );

        clear_session_cookie();
        let cookies = read_document_cookie().unwrap_or_default();
        assert!(parse_session_cookie(&cookies).is_none());
    }

    #[wasm_bindgen_test]
    fn test_empty_collections_render_empty_text_and_add_button() {
        let root = container();
        let added: RwSignal<Option<CollectionKind>> = RwSignal::new(None);

        let _handle = mount_to(root.clone(), move || {
            view! {
                <CollectionSection
                    kind=CollectionKind::Category
                    items=Signal::stored(Vec::<CollectionItem>::new())
                    on_add=Callback::new(move |_| added.set(Some(CollectionKind::Category)))
                />
                <CollectionSection
                    kind=CollectionKind::Occasion
                    items=Signal::stored(Vec::<CollectionItem>::new())
                    on_add=Callback::new(move |_| added.set(Some(CollectionKind::Occasion)))
                />
            }
        });

        let text = root.text_content().unwrap_or_default();
        assert!(text.contains("No categories available."));
        assert!(text.contains("No occasions available."));
        assert!(text.contains(CollectionKind::Category.add_label()));
        assert!(text.contains(CollectionKind::Occasion.add_label()));

        let buttons = root
            .query_selector_all("button")
            .expect("should query buttons");
        assert_eq!(buttons.length(), 2);

        let add_category = buttons
            .get(0)
            .and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok())
            .expect("add button");
        add_category.click();
        assert_eq!(added.get_untracked(), Some(CollectionKind::Category));
    }

    #[wasm_bindgen_test]
    fn test_populated_collection_keeps_add_button() {
        let root = container();

        let _handle = mount_to(root.clone(), move || {
            view! {
                <CollectionSection
                    kind=CollectionKind::Category
                    items=Signal::stored(vec![CollectionItem {
                        id: "1".to_string(),
                        name: "Soup".to_string(),
                        image: None,
                    }])
                    on_add=Callback::new(|_| {})
                />
            }
        });

        let text = root.text_content().unwrap_or_default();
        assert!(text.contains("Soup"));
        assert!(!text.contains("No categories available."));
        assert!(text.contains(CollectionKind::Category.add_label()));

        let link = root
            .query_selector("a")
            .ok()
            .flatten()
            .and_then(|a| a.get_attribute("href"));
        assert_eq!(link.as_deref(), Some("/recipes/category/1"));
    }

    #[wasm_bindgen_test]
    fn test_escape_closes_dialog_and_listener_goes_with_it() {
        let app_state = AppState::new(
            ApiClient::new(&EnvConfig::from_values(None, None)),
            SessionContext::new(None),
        );
        let open: RwSignal<bool> = RwSignal::new(true);

        let root = container();
        let handle = mount_to(root.clone(), move || {
            provide_context(AppContext(app_state));
            view! {
                <CreateRecordDialog
                    kind=CollectionKind::Category
                    open=open
                    on_created=Callback::new(|_| {})
                />
            }
        });
        assert!(root
            .text_content()
            .unwrap_or_default()
            .contains(CollectionKind::Category.dialog_title()));

        press_escape();
        assert!(!open.get_untracked());

        drop(handle);
        open.set(true);
        press_escape();
        assert!(open.get_untracked());
    }

    #[wasm_bindgen_test]
    async fn test_anonymous_header_shows_login() {
        clear_session_cookie();
        clear_access_token();

        let config = EnvConfig::from_values(None, None);
        let app_state = AppState::new(
            ApiClient::load_from_storage(&config),
            SessionContext::from_document(),
        );
        assert!(!app_state.api_client.get_untracked().is_authenticated());

        let root = container();
        let _handle = mount_to(root.clone(), move || {
            provide_context(AppContext(app_state));
            view! {
                <Router>
                    <Header />
                </Router>
            }
        });

        let text = root.text_content().unwrap_or_default();
        assert!(text.contains("Login"));
        assert!(!text.contains("Loading..."));

        next_tick().await;

        let text = root.text_content().unwrap_or_default();
        assert!(text.contains("Login"));
        assert!(!text.contains("Loading..."));
        assert_eq!(app_state.session.user_id_untracked(), None);
        assert!(root.query_selector("a[href^=\"/profile/\"]").ok().flatten().is_none());
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
