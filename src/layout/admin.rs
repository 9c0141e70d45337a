use super::{initials, is_active, use_current_profile, ADMIN_MENU};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input};
use crate::state::AppContext;
use icons::{Menu, X};
use leptos::prelude::*;
use leptos_router::hooks::use_location;

#[component]
fn AdminIdentity() -> impl IntoView {
    let (profile, loading) = use_current_profile();

    let display_name = move || {
        if loading.get() {
            return "Loading...".to_string();
        }
        profile
            .get()
            .and_then(|p| p.user_name)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Admin".to_string())
    };

    let badge = move || {
        profile.with(|p| {
            p.as_ref()
                .map(|p| initials(p.user_name.as_deref(), p.email.as_deref()))
                .unwrap_or_default()
        })
    };

    view! {
        <div class="flex items-center gap-2">
            {move || match profile.with(|p| p.as_ref().and_then(|p| p.custom_avatar().map(str::to_string))) {
                Some(src) => view! {
                    <img src=src alt="Admin avatar" class="h-8 w-8 rounded-full object-cover" />
                }
                .into_any(),
                None => view! {
                    <div class="flex h-8 w-8 items-center justify-center rounded-full bg-orange-500 text-xs font-semibold text-white">
                        {badge}
                    </div>
                }
                .into_any(),
            }}
            <span class="text-sm font-medium text-gray-700">{display_name}</span>
        </div>
    }
}

/// Admin shell: sidebar menu, top bar with search and identity.
#[component]
pub(crate) fn AdminLayout(children: Children) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let pathname = use_location().pathname;

    let sidebar_open: RwSignal<bool> = RwSignal::new(false);
    let search: RwSignal<String> = RwSignal::new(String::new());

    let on_sign_out = move |_| {
        app_state.0.sign_out();
        let _ = window().location().set_href("/login");
    };

    let menu = ADMIN_MENU
        .iter()
        .map(|entry| {
            let href = entry.href;
            let link_class = move || {
                if pathname.with(|p| is_active(p, href)) {
                    "block rounded px-4 py-2 bg-orange-500 text-white"
                } else {
                    "block rounded px-4 py-2 text-gray-700 hover:bg-orange-100"
                }
            };
            view! {
                <li>
                    <a href=href class=link_class on:click=move |_| sidebar_open.set(false)>
                        {entry.label}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="flex min-h-screen bg-gray-100">
            <aside class=move || {
                let base = "fixed inset-y-0 left-0 z-40 w-64 transform bg-white shadow-md transition-transform duration-200 md:static md:translate-x-0";
                if sidebar_open.get() {
                    format!("{base} translate-x-0")
                } else {
                    format!("{base} -translate-x-full")
                }
            }>
                <div class="flex items-center justify-between p-4">
                    <a href="/" class="text-xl font-bold text-orange-500">"Cookbook Admin"</a>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="md:hidden"
                        on:click=move |_| sidebar_open.set(false)
                        attr:aria-label="Close menu"
                    >
                        <X />
                    </Button>
                </div>
                <nav>
                    <ul class="space-y-1 px-2">{menu}</ul>
                </nav>
            </aside>

            <div class="flex min-w-0 flex-1 flex-col">
                <header class="flex items-center justify-between gap-4 bg-white px-4 py-3 shadow-sm">
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="md:hidden"
                        on:click=move |_| sidebar_open.update(|v| *v = !*v)
                        attr:aria-label="Toggle menu"
                    >
                        <Menu />
                    </Button>
                    <div class="max-w-md flex-1">
                        <Input placeholder="Search..." bind_value=search class="py-1.5 text-sm" />
                    </div>
                    <div class="flex items-center gap-3">
                        <AdminIdentity />
                        <Button variant=ButtonVariant::Link size=ButtonSize::Sm on:click=on_sign_out>
                            "Sign out"
                        </Button>
                    </div>
                </header>

                <main class="flex-1 p-4 md:p-8">{children()}</main>
            </div>
        </div>
    }
}
