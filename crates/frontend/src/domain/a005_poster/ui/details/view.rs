use contracts::domain::a005_poster::aggregate::Poster;
use leptos::prelude::*;
use thaw::*;
use web_sys::{File, HtmlInputElement, Url};

use crate::domain::a005_poster::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::list_view::{ListHandle, MutationLabels};

fn revoke_preview(url: Option<String>) {
    if let Some(url) = url {
        let _ = Url::revoke_object_url(&url);
    }
}

/// Загрузка нового постера с превью выбранного файла
#[component]
pub fn PosterUpload<F>(list: ListHandle<Poster>, on_close: F) -> impl IntoView
where
    F: Fn() + 'static + Copy + Send + Sync,
{
    let ctx = expect_context::<AppGlobalContext>();
    let file: RwSignal<Option<File>, LocalStorage> = RwSignal::new_local(None);
    let preview: RwSignal<Option<String>> = RwSignal::new(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    on_cleanup(move || revoke_preview(preview.get_untracked()));

    let on_file = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let selected = input.files().and_then(|files| files.get(0));
        revoke_preview(preview.get_untracked());
        preview.set(
            selected
                .as_ref()
                .and_then(|f| Url::create_object_url_with_blob(f).ok()),
        );
        file.set(selected);
    };

    let on_submit = move |_| {
        let Some(selected) = file.get_untracked() else {
            return;
        };
        set_submitting.set(true);
        set_error.set(None);
        let client = ctx.client().get_value();
        list.spawn(move |model| async move {
            let labels = MutationLabels::new("Upload failed", "Unable to add poster.");
            let result = model
                .save(&labels, async move { api::create_poster(&client, &selected).await })
                .await;
            match result {
                Ok(()) => on_close(),
                Err(message) => {
                    set_error.set(Some(message));
                    set_submitting.set(false);
                }
            }
        });
    };

    let busy = Signal::derive(move || submitting.get());
    let cannot_submit = Signal::derive(move || submitting.get() || file.with(|f| f.is_none()));

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal posters-modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">"Add New Poster"</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close()>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="form__group">
                        <Label>"Poster Image *"</Label>
                        <input
                            type="file"
                            id="posterImage"
                            accept="image/*"
                            class="form__input"
                            on:change=on_file
                            disabled=move || submitting.get()
                        />
                    </div>
                    {move || preview.get().map(|src| view! {
                        <div class="poster-preview">
                            <img src=src alt="Preview" />
                        </div>
                    })}
                </div>

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close()
                        disabled=busy
                    >
                        "Cancel"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=on_submit disabled=cannot_submit>
                        {move || if submitting.get() { "Adding..." } else { "Add Poster" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}
