use super::submit_new_record;
use crate::api::{ApiError, ApiResult, UploadObject};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Input, Label, Spinner,
};
use crate::models::CollectionKind;
use crate::state::AppContext;
use leptos::ev;
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use wasm_bindgen_futures::JsFuture;

const NAME_MAX_LEN: u32 = 80;

async fn read_upload(file: &web_sys::File) -> ApiResult<UploadObject> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::invalid(format!("Could not read {}: {:?}", file.name(), e)))?;

    let content_type = file.type_();
    Ok(UploadObject {
        file_name: file.name(),
        content_type: (!content_type.is_empty()).then_some(content_type),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

#[derive(Debug, PartialEq)]
enum SubmitGate {
    InFlight,
    MissingName,
    Ready,
}

/// Whether a submit event may start a new submission.
fn submit_gate(in_flight: bool, name: &str) -> SubmitGate {
    if in_flight {
        SubmitGate::InFlight
    } else if name.trim().is_empty() {
        SubmitGate::MissingName
    } else {
        SubmitGate::Ready
    }
}

/// Error to show inline for a finished submission. Results of a submission
/// started before the form was last reset are not shown.
fn inline_error<T>(result: &ApiResult<T>, started: u64, current: u64) -> Option<String> {
    match result {
        Err(e) if started == current => Some(e.to_string()),
        _ => None,
    }
}

fn revoke_preview(url: Option<String>) {
    if let Some(url) = url {
        let _ = web_sys::Url::revoke_object_url(&url);
    }
}

/// Modal form: name plus optional image, uploaded then inserted.
///
/// Nothing is rendered while `open` is false. The form state lives with the
/// component, so a submission still in flight when the dialog is closed
/// finishes normally and its result updates the parent.
#[component]
pub(crate) fn CreateRecordDialog(
    kind: CollectionKind,
    open: RwSignal<bool>,
    on_created: Callback<()>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let name: RwSignal<String> = RwSignal::new(String::new());
    let file: RwSignal<Option<web_sys::File>, LocalStorage> = RwSignal::new_local(None);
    let preview: RwSignal<Option<String>> = RwSignal::new(None);
    let form_error: RwSignal<Option<String>> = RwSignal::new(None);
    let submitting: RwSignal<bool> = RwSignal::new(false);
    // Bumped by every reset; a submission only touches the form it started from.
    let generation: StoredValue<u64> = StoredValue::new(0);

    let input_id = format!("{}Name", kind.as_ref());
    let file_input_id = format!("{}ImageFile", kind.as_ref());

    let reset = move || {
        name.set(String::new());
        file.set(None);
        revoke_preview(preview.get_untracked());
        preview.set(None);
        form_error.set(None);
        generation.update_value(|g| *g += 1);
    };

    let close = move || {
        reset();
        open.set(false);
    };

    let esc_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && open.get_untracked() && !submitting.get_untracked() {
            close();
        }
    });
    on_cleanup(move || esc_handle.remove());

    let on_file_change = move |ev: web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let selected = input.files().and_then(|files| files.get(0));

        revoke_preview(preview.get_untracked());
        preview.set(
            selected
                .as_ref()
                .and_then(|f| web_sys::Url::create_object_url_with_blob(f).ok()),
        );
        file.set(selected);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let name_val = name.get_untracked();
        match submit_gate(submitting.get_untracked(), &name_val) {
            SubmitGate::InFlight => return,
            SubmitGate::MissingName => {
                form_error.set(Some(format!(
                    "{} is required",
                    kind.name_label().trim_end_matches(':')
                )));
                return;
            }
            SubmitGate::Ready => {}
        }

        let selected = file.get_untracked();
        let api_client = app_state.0.api_client.get_untracked();

        submitting.set(true);
        form_error.set(None);
        let started = generation.get_value();

        spawn_local(async move {
            let result = async {
                let image = match selected {
                    Some(f) => Some(read_upload(&f).await?),
                    None => None,
                };
                let random_id = uuid::Uuid::new_v4().to_string();
                submit_new_record(&api_client, kind, &name_val, image.as_ref(), &random_id).await
            }
            .await;

            let still_current = generation.try_get_value() == Some(started);
            match &result {
                Ok(image_url) => {
                    log!(
                        "Added {} {:?} (image: {})",
                        kind.as_ref(),
                        name_val.trim(),
                        image_url.as_deref().unwrap_or("none")
                    );
                    on_created.run(());
                    if still_current {
                        close();
                    }
                }
                Err(e) => error!("Error adding {}: {e}", kind.as_ref()),
            }
            let shown = generation
                .try_get_value()
                .and_then(|current| inline_error(&result, started, current));
            if let Some(message) = shown {
                let _ = form_error.try_set(Some(message));
            }
            let _ = submitting.try_set(false);
        });
    };

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div class="fixed inset-0 z-50 h-full w-full overflow-y-auto bg-gray-600/50">
                <div class="relative top-20 mx-auto w-96 rounded-md border bg-white p-5 shadow-lg">
                    <div class="mt-3 text-center">
                        <h3 class="text-lg font-medium leading-6 text-gray-900">
                            {kind.dialog_title()}
                        </h3>

                        <div class="mt-2">
                            <Show when=move || form_error.get().is_some() fallback=|| ().into_view()>
                                {move || form_error.get().map(|e| view! {
                                    <Alert class="mb-2">
                                        <AlertDescription>{e}</AlertDescription>
                                    </Alert>
                                })}
                            </Show>

                            <form class="space-y-4" on:submit=on_submit>
                                <div>
                                    <Label html_for=input_id.clone()>{kind.name_label()}</Label>
                                    <Input
                                        id=input_id.clone()
                                        bind_value=name
                                        required=true
                                        maxlength=NAME_MAX_LEN
                                        disabled=submitting
                                    />
                                </div>

                                <div>
                                    <Label html_for=file_input_id.clone()>"Image (Optional):"</Label>
                                    <input
                                        type="file"
                                        id=file_input_id.clone()
                                        accept="image/*"
                                        disabled=move || submitting.get()
                                        class="w-full appearance-none rounded border px-3 py-2 leading-tight text-gray-700 shadow focus:outline-none"
                                        on:change=on_file_change
                                    />
                                    {move || preview.get().map(|src| view! {
                                        <img
                                            src=src
                                            alt="Preview"
                                            class="mt-2 h-24 w-24 rounded-full object-cover"
                                        />
                                    })}
                                </div>

                                <div class="flex flex-col gap-2 px-4 py-3">
                                    <Button
                                        size=ButtonSize::Block
                                        attr:r#type="submit"
                                        attr:disabled=move || submitting.get()
                                    >
                                        <Show when=move || submitting.get() fallback=|| ().into_view()>
                                            <Spinner />
                                        </Show>
                                        {move || if submitting.get() { "Adding..." } else { kind.submit_label() }}
                                    </Button>
                                    <Button
                                        variant=ButtonVariant::Secondary
                                        size=ButtonSize::Block
                                        attr:r#type="button"
                                        on:click=move |_| close()
                                    >
                                        "Cancel"
                                    </Button>
                                </div>
                            </form>
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}
