use contracts::domain::a001_store::aggregate::Store;
use leptos::prelude::*;
use thaw::*;

use super::model::StoreForm;
use crate::domain::a001_store::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::list_view::{ListHandle, MutationLabels};

/// Модалка создания (`store == None`) и редактирования точки
#[component]
pub fn StoreDetails<F>(store: Option<Store>, list: ListHandle<Store>, on_close: F) -> impl IntoView
where
    F: Fn() + 'static + Copy + Send + Sync,
{
    let ctx = expect_context::<AppGlobalContext>();
    let form = store
        .as_ref()
        .map(StoreForm::from_store)
        .unwrap_or_default();
    let editing_id = store.as_ref().map(|s| s.id.clone());
    let creating = editing_id.is_none();

    let name = RwSignal::new(form.name);
    let email = RwSignal::new(form.email);
    let phone = RwSignal::new(form.phone);
    let address = RwSignal::new(form.address);
    let latitude = RwSignal::new(form.latitude);
    let longitude = RwSignal::new(form.longitude);
    let password = RwSignal::new(form.password);
    let is_active = RwSignal::new(form.is_active);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let editing_id = StoredValue::new(editing_id);

    let on_save = move |_| {
        let form = StoreForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
            address: address.get_untracked(),
            latitude: latitude.get_untracked(),
            longitude: longitude.get_untracked(),
            password: password.get_untracked(),
            is_active: is_active.get_untracked(),
        };
        let payload = match form.validate(creating) {
            Ok(payload) => payload,
            Err(message) => {
                set_error.set(Some(message));
                return;
            }
        };

        set_saving.set(true);
        set_error.set(None);
        let client = ctx.client().get_value();
        let id = editing_id.get_value();
        list.spawn(move |model| async move {
            let result = match id {
                Some(id) => {
                    let labels = MutationLabels::new("Update failed", "Failed to update store")
                        .on_success("Store updated", format!("{} has been updated.", payload.name));
                    model
                        .save(&labels, async move {
                            api::update_store(&client, &id, &payload).await
                        })
                        .await
                }
                None => {
                    let labels = MutationLabels::new("Creation failed", "Failed to create store")
                        .on_success("Store created", format!("{} has been added.", payload.name));
                    model
                        .save(&labels, async move { api::create_store(&client, &payload).await })
                        .await
                }
            };
            match result {
                Ok(()) => on_close(),
                Err(message) => {
                    set_error.set(Some(message));
                    set_saving.set(false);
                }
            }
        });
    };

    let disabled = Signal::derive(move || saving.get());

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal stores-modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">
                        {if creating { "Add New Store" } else { "Edit Store" }}
                    </h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close()>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="form__group">
                        <Label>"Store Name *"</Label>
                        <Input value=name placeholder="Enter store name" disabled=disabled />
                    </div>
                    <div class="form__group">
                        <Label>"Address"</Label>
                        <Input value=address placeholder="Enter store address" disabled=disabled />
                    </div>
                    <div class="form__group">
                        <Label>"Phone"</Label>
                        <Input value=phone placeholder="Enter contact number" disabled=disabled />
                    </div>
                    <div class="form__group">
                        <Label>"Email"</Label>
                        <Input
                            value=email
                            input_type=InputType::Email
                            placeholder="Enter store email"
                            disabled=disabled
                        />
                    </div>
                    <div class="form__group">
                        <Label>"Latitude"</Label>
                        <Input value=latitude placeholder="e.g. 37.774929" disabled=disabled />
                    </div>
                    <div class="form__group">
                        <Label>"Longitude"</Label>
                        <Input value=longitude placeholder="e.g. -122.419418" disabled=disabled />
                    </div>
                    {creating.then(|| view! {
                        <div class="form__group">
                            <Label>"Password *"</Label>
                            <Input
                                value=password
                                input_type=InputType::Password
                                placeholder="Set initial password"
                                disabled=disabled
                            />
                        </div>
                    })}
                    <div class="form__group">
                        <Checkbox checked=is_active label="Active" />
                    </div>
                </div>

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close()
                        disabled=disabled
                    >
                        "Cancel"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=on_save disabled=disabled>
                        {move || match (saving.get(), creating) {
                            (true, _) => "Saving...",
                            (false, true) => "Create Store",
                            (false, false) => "Save Changes",
                        }}
                    </Button>
                </div>
            </div>
        </div>
    }
}
