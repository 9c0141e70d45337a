use crate::components::ui::{AddTile, Card, CardGrid, CardTitle};
use crate::models::{CollectionItem, CollectionKind};
use leptos::prelude::*;

#[component]
fn RecordCard(kind: CollectionKind, item: CollectionItem) -> impl IntoView {
    let src = item.image_src();
    let href = kind.detail_href(&item.id);
    let alt = item.name.clone();

    view! {
        <Card class="items-center justify-center">
            <img
                src=src
                alt=alt
                width="80"
                height="80"
                class="mx-auto mb-2 h-20 w-20 rounded-full object-cover"
            />
            <CardTitle>{item.name}</CardTitle>
            <a
                href=href
                class="mx-auto block rounded-lg bg-orange-500 px-4 py-2 text-center text-white transition-colors duration-200 hover:bg-orange-600"
            >
                "View"
            </a>
        </Card>
    }
}

/// One collection of the recipe dashboard: cards, empty state and the add tile.
///
/// The add tile is rendered whatever the state of the list.
#[component]
pub(crate) fn CollectionSection(
    kind: CollectionKind,
    #[prop(into)] items: Signal<Vec<CollectionItem>>,
    on_add: Callback<()>,
) -> impl IntoView {
    view! {
        <section class="mb-8 md:mb-12">
            <h2 class="mb-4 text-2xl font-bold md:mb-6">{kind.heading()}</h2>
            <CardGrid>
                <Show
                    when=move || items.with(|v| !v.is_empty())
                    fallback=move || view! {
                        <p class="col-span-full text-center text-gray-600">{kind.empty_text()}</p>
                    }
                >
                    {move || {
                        items
                            .get()
                            .into_iter()
                            .map(|item| view! { <RecordCard kind=kind item=item /> })
                            .collect_view()
                    }}
                </Show>

                <AddTile>
                    <button
                        type="button"
                        class="text-lg font-medium text-orange-500 transition-colors duration-200 hover:text-orange-600"
                        on:click=move |_| on_add.run(())
                    >
                        {kind.add_label()}
                    </button>
                </AddTile>
            </CardGrid>
        </section>
    }
}
