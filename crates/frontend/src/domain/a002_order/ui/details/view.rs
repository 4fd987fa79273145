use contracts::domain::a002_order::aggregate::Order;
use leptos::prelude::*;
use thaw::*;

use super::model::detail_lines;
use crate::shared::icons::icon;

/// Модалка просмотра заказа, только чтение
#[component]
pub fn OrderDetails<F>(order: Order, on_close: F) -> impl IntoView
where
    F: Fn() + 'static + Copy + Send + Sync,
{
    let title = format!("Order Details #{}", order.id);
    let lines = detail_lines(&order);

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal order-details-modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close()>
                        {icon("x")}
                    </Button>
                </div>
                <div class="modal-body">
                    {lines
                        .into_iter()
                        .map(|(label, value)| view! {
                            <p>
                                <strong>{format!("{}:", label)}</strong>
                                " "
                                {value}
                            </p>
                        })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}
