use chrono::Utc;
use contracts::domain::a003_service::aggregate::Service;
use leptos::prelude::*;
use thaw::*;

use super::model::ServiceForm;
use crate::domain::a003_service::record::next_id;
use crate::shared::icons::icon;
use crate::shared::list_view::ListHandle;

#[component]
pub fn ServiceDetails<F>(list: ListHandle<Service>, on_close: F) -> impl IntoView
where
    F: Fn() + 'static + Copy + Send + Sync,
{
    let form = ServiceForm::new(Utc::now().date_naive());
    let name = RwSignal::new(form.name);
    let price = RwSignal::new(form.price);
    let last_updated = RwSignal::new(form.last_updated);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_save = move |_| {
        let form = ServiceForm {
            name: name.get_untracked(),
            price: price.get_untracked(),
            last_updated: last_updated.get_untracked(),
        };
        let model = list.untracked();
        let id = next_id(&model.records());
        match form.validate(id) {
            Ok(service) => {
                model.upsert_local(service);
                on_close();
            }
            Err(message) => set_error.set(Some(message)),
        }
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal services-modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">"Add New Service"</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close()>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="form__group">
                        <Label>"Service Name *"</Label>
                        <Input value=name placeholder="Enter service name" />
                    </div>
                    <div class="form__group">
                        <Label>"Price ($) *"</Label>
                        <Input value=price placeholder="0.00" />
                    </div>
                    <div class="form__group">
                        <Label>"Last Updated *"</Label>
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || last_updated.get()
                            on:input=move |ev| last_updated.set(event_target_value(&ev))
                        />
                    </div>
                </div>

                <div class="modal-footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close()>
                        "Cancel"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=on_save>
                        "Add Service"
                    </Button>
                </div>
            </div>
        </div>
    }
}
