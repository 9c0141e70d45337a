use super::{is_active, use_current_profile, PRIMARY_LINKS, SECONDARY_LINKS};
use crate::components::ui::Input;
use crate::profile::PLACEHOLDER_AVATAR;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::use_location;

#[component]
fn ProfileArea() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session;
    let (profile, loading) = use_current_profile();

    move || {
        if loading.get() {
            return view! { <span class="text-sm text-gray-500">"Loading..."</span> }.into_any();
        }

        match session.user_id() {
            Some(user_id) => {
                let avatar = profile
                    .get()
                    .map(|p| p.avatar_url)
                    .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string());
                view! {
                    <div class="flex items-center gap-3">
                        <a href="/profile/save-recipe" class="text-gray-600 hover:text-orange-500" title="Saved recipes">
                            <span class="material-icons">"bookmark"</span>
                        </a>
                        <a href=format!("/profile/{user_id}")>
                            <img src=avatar alt="Profile" class="h-9 w-9 rounded-full object-cover" />
                        </a>
                    </div>
                }
                .into_any()
            }
            None => view! {
                <a
                    href="/login"
                    class="rounded-md bg-orange-500 px-4 py-2 text-sm font-medium text-white hover:bg-orange-600"
                >
                    "Login"
                </a>
            }
            .into_any(),
        }
    }
}

/// Public header: logo, site links, search and the visitor's profile area.
#[component]
pub(crate) fn Header() -> impl IntoView {
    let pathname = use_location().pathname;
    let search: RwSignal<String> = RwSignal::new(String::new());

    let nav_link = move |label: &'static str, href: &'static str| {
        let class = move || {
            if pathname.with(|p| is_active(p, href)) {
                "font-semibold text-orange-500"
            } else {
                "text-gray-700 hover:text-orange-500"
            }
        };
        view! { <a href=href class=class>{label}</a> }
    };

    let primary = PRIMARY_LINKS
        .iter()
        .map(|l| nav_link(l.label, l.href))
        .collect_view();
    let secondary = SECONDARY_LINKS
        .iter()
        .map(|l| nav_link(l.label, l.href))
        .collect_view();

    view! {
        <header class="bg-white shadow-sm">
            <div class="mx-auto flex max-w-7xl flex-wrap items-center justify-between gap-4 px-4 py-3">
                <a href="/" class="flex items-center gap-2">
                    <img src="/image/logo.png" alt="Cookbook" class="h-10 w-auto" />
                </a>
                <nav class="flex items-center gap-6 text-sm">{primary}</nav>
                <div class="w-full max-w-xs">
                    <Input placeholder="Search recipes" bind_value=search class="py-1.5 text-sm" />
                </div>
                <div class="flex items-center gap-4">
                    <a href="/add-recipe" class="text-sm font-medium text-orange-500 hover:text-orange-600">
                        "+ Add a Recipe"
                    </a>
                    <ProfileArea />
                </div>
            </div>
            <nav class="border-t">
                <div class="mx-auto flex max-w-7xl flex-wrap gap-6 px-4 py-2 text-sm">{secondary}</div>
            </nav>
        </header>
    }
}
