use crate::collections::{fetch_collection, fetch_record, CollectionSection, CreateRecordDialog};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardTitle, Input, Label, Spinner,
};
use crate::layout::{AdminLayout, Footer, Header};
use crate::models::{detail_target, CollectionItem, CollectionKind, Session};
use crate::state::AppContext;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

#[component]
pub fn PublicLayout(children: Children) -> impl IntoView {
    view! {
        <div class="flex min-h-screen flex-col bg-gray-50">
            <Header />
            <main class="mx-auto w-full max-w-7xl flex-1 px-4 py-8">{children()}</main>
            <Footer />
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <PublicLayout>
            <section class="py-12 text-center">
                <h1 class="mb-4 text-4xl font-bold text-gray-900">"Cook something good today"</h1>
                <p class="mb-8 text-gray-600">"Browse recipes by category and occasion."</p>
                <a
                    href="/user/recipe"
                    class="rounded-md bg-orange-500 px-6 py-3 font-medium text-white hover:bg-orange-600"
                >
                    "Explore recipes"
                </a>
            </section>
        </PublicLayout>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if loading.get_untracked() {
            return;
        }

        let email_val = email.get();
        let password_val = password.get();
        let api_client = app_state.0.api_client.get_untracked();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.sign_in_with_password(&email_val, &password_val).await {
                Ok(grant) => {
                    log!("Signed in as {}", grant.user.id);
                    app_state.0.sign_in(
                        grant.access_token,
                        Session {
                            user_id: grant.user.id,
                        },
                    );
                    let _ = window().location().set_href("/");
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-gray-50">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-xl font-bold text-orange-500">"Cookbook"</a>
                </div>

                <Card>
                    <CardTitle class="text-lg">"Log in"</CardTitle>
                    <CardDescription>"Use your email and password to continue."</CardDescription>

                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <div>
                                <Label html_for="email">"Email"</Label>
                                <Input
                                    id="email"
                                    r#type="email"
                                    placeholder="you@example.com"
                                    bind_value=email
                                    required=true
                                    disabled=loading
                                />
                            </div>

                            <div>
                                <Label html_for="password">"Password"</Label>
                                <Input
                                    id="password"
                                    r#type="password"
                                    placeholder="••••••••"
                                    bind_value=password
                                    required=true
                                    disabled=loading
                                />
                            </div>

                            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                                {move || {
                                    error.get().map(|e| {
                                        view! {
                                            <Alert>
                                                <AlertDescription>{e}</AlertDescription>
                                            </Alert>
                                        }
                                    })
                                }}
                            </Show>

                            <Button
                                variant=ButtonVariant::Brand
                                size=ButtonSize::Block
                                attr:r#type="submit"
                                attr:disabled=move || loading.get()
                            >
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if loading.get() { "Signing in..." } else { "Continue" }}
                            </Button>
                        </form>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

/// Admin screen listing categories and occasions, each with its own add dialog.
#[component]
pub fn RecipeManagementPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let categories: RwSignal<Vec<CollectionItem>> = RwSignal::new(Vec::new());
    let occasions: RwSignal<Vec<CollectionItem>> = RwSignal::new(Vec::new());
    let category_open: RwSignal<bool> = RwSignal::new(false);
    let occasion_open: RwSignal<bool> = RwSignal::new(false);

    let items_for = move |kind: CollectionKind| match kind {
        CollectionKind::Category => categories,
        CollectionKind::Occasion => occasions,
    };

    // Each collection loads on its own; one failing leaves the other intact.
    let reload = move |kind: CollectionKind| {
        let api_client = app_state.0.api_client.get_untracked();
        let target = items_for(kind);
        spawn_local(async move {
            let items = fetch_collection(&api_client, kind).await;
            let _ = target.try_set(items);
        });
    };

    reload(CollectionKind::Category);
    reload(CollectionKind::Occasion);

    view! {
        <AdminLayout>
            <div class="mx-auto max-w-6xl">
                <h1 class="mb-6 text-3xl font-bold md:mb-8">"Recipe Management"</h1>

                <CollectionSection
                    kind=CollectionKind::Category
                    items=categories
                    on_add=Callback::new(move |_| category_open.set(true))
                />
                <CollectionSection
                    kind=CollectionKind::Occasion
                    items=occasions
                    on_add=Callback::new(move |_| occasion_open.set(true))
                />

                <CreateRecordDialog
                    kind=CollectionKind::Category
                    open=category_open
                    on_created=Callback::new(move |_| reload(CollectionKind::Category))
                />
                <CreateRecordDialog
                    kind=CollectionKind::Occasion
                    open=occasion_open
                    on_created=Callback::new(move |_| reload(CollectionKind::Occasion))
                />
            </div>
        </AdminLayout>
    }
}

#[derive(Clone, PartialEq)]
enum DetailState {
    Loading,
    Found(CollectionKind, CollectionItem),
    Missing,
}

/// Single category or occasion, looked up from the `:kind` and `:id` route parameters.
#[component]
pub fn RecordDetailPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params_map();
    let state: RwSignal<DetailState> = RwSignal::new(DetailState::Loading);

    Effect::new(move |_| {
        let target = params.with(|p| {
            detail_target(
                p.get("kind").as_deref().unwrap_or_default(),
                p.get("id").as_deref().unwrap_or_default(),
            )
        });
        let Some((kind, id)) = target else {
            state.set(DetailState::Missing);
            return;
        };

        state.set(DetailState::Loading);
        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let next = match fetch_record(&api_client, kind, &id).await {
                Some(item) => DetailState::Found(kind, item),
                None => DetailState::Missing,
            };
            let _ = state.try_set(next);
        });
    });

    view! {
        <PublicLayout>
            <a href="/admin/recipes" class="mb-6 inline-block text-sm text-orange-500 hover:text-orange-600">
                "← Back to recipe management"
            </a>
            {move || match state.get() {
                DetailState::Loading => view! {
                    <div class="flex items-center gap-2 text-gray-500">
                        <Spinner />
                        "Loading..."
                    </div>
                }
                .into_any(),
                DetailState::Found(kind, item) => {
                    let src = item.image_src();
                    view! {
                        <Card class="mx-auto max-w-md items-center text-center">
                            <img
                                src=src
                                alt=item.name.clone()
                                class="mx-auto mb-4 h-40 w-40 rounded-full object-cover"
                            />
                            <CardTitle class="text-2xl">{item.name}</CardTitle>
                            <CardDescription>{kind.heading()}</CardDescription>
                        </Card>
                    }
                    .into_any()
                }
                DetailState::Missing => view! {
                    <p class="text-center text-gray-600">"This record could not be found."</p>
                }
                .into_any(),
            }}
        </PublicLayout>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <PublicLayout>
            <div class="py-16 text-center">
                <h1 class="mb-2 text-2xl font-bold">"Not found"</h1>
                <a href="/" class="text-orange-500 hover:text-orange-600">"Go home"</a>
            </div>
        </PublicLayout>
    }
}
