mod admin;
mod footer;
mod header;

pub(crate) use admin::AdminLayout;
pub(crate) use footer::Footer;
pub(crate) use header::Header;

use crate::profile::{resolve_profile, ResolvedProfile};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub(crate) struct MenuItem {
    pub label: &'static str,
    pub href: &'static str,
}

const fn item(label: &'static str, href: &'static str) -> MenuItem {
    MenuItem { label, href }
}

pub(crate) const ADMIN_MENU: [MenuItem; 5] = [
    item("Home", "/"),
    item("Dashboard", "/admin/dashboard"),
    item("Users", "/admin/users"),
    item("Recipes", "/admin/recipes"),
    item("Events", "/admin/events"),
];

pub(crate) const PRIMARY_LINKS: [MenuItem; 3] = [
    item("Home", "/"),
    item("Recipe", "/user/recipe"),
    item("About Us", "/user/about-us"),
];

pub(crate) const SECONDARY_LINKS: [MenuItem; 7] = [
    item("Event", "/user/event"),
    item("Popular", "/user/popular"),
    item("Soup", "/soup"),
    item("Stir Frieds", "/stir-frieds"),
    item("Occasions", "/occasion"),
    item("Drinks", "/drinks"),
    item("Dessert", "/dessert"),
];

pub(crate) const FOOTER_MENU: [MenuItem; 5] = [
    item("ABOUT US", "/user/about-us"),
    item("CONTACT US", "/user/contact-us"),
    item("FAQ", "/faq"),
    item("PRIVACY POLICY", "#"),
    item("DISCLAIMER", "#"),
];

/// Initials for an identity badge.
///
/// Uses the first character of each word of the display name; without a
/// display name, the first character of the email's local part.
pub(crate) fn initials(name: Option<&str>, email: Option<&str>) -> String {
    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        return name
            .split(' ')
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
    }

    email
        .and_then(|e| e.split('@').next())
        .and_then(|local| local.chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Exact path match; `/admin` does not activate `/admin/recipes`.
pub(crate) fn is_active(current: &str, target: &str) -> bool {
    current == target
}

/// User id to resolve a profile for; anonymous and blank ids resolve nothing.
pub(crate) fn profile_lookup_id(user_id: Option<String>) -> Option<String> {
    user_id.filter(|id| !id.trim().is_empty())
}

/// Profile of the signed-in user, re-resolved whenever the session changes.
///
/// The flag reads `true` until the first resolution for the current
/// session has finished. No request is made while anonymous.
pub(crate) fn use_current_profile() -> (
    ReadSignal<Option<ResolvedProfile>>,
    ReadSignal<bool>,
) {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session;

    let (profile, set_profile) = signal::<Option<ResolvedProfile>>(None);
    let (loading, set_loading) =
        signal(profile_lookup_id(session.user_id_untracked()).is_some());

    Effect::new(move |_| {
        let Some(user_id) = profile_lookup_id(session.user_id()) else {
            set_profile.set(None);
            set_loading.set(false);
            return;
        };

        set_loading.set(true);
        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let resolved = resolve_profile(&api_client, Some(&user_id)).await;
            // A newer session may have replaced this one while the request ran.
            if session.user_id_untracked().as_deref() == Some(user_id.as_str()) {
                let _ = set_profile.try_set(resolved);
                let _ = set_loading.try_set(false);
            }
        });
    });

    (profile, loading)
}
