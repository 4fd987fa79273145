use crate::shared::list_view::PageSummary;
use leptos::prelude::*;

/// PaginationControls component - reusable pagination controls
///
/// Страницы с 1. Кнопки номеров берутся из `summary.numbers`, панель
/// скрыта, когда записей нет.
#[component]
pub fn PaginationControls(
    #[prop(into)] summary: Signal<PageSummary>,

    /// Callback when page changes (1-indexed)
    on_page_change: Callback<usize>,

    /// Существительное для подписи "Showing 1-5 of 12 items"
    #[prop(optional, into)]
    noun: Option<String>,

    /// Callback when page size changes
    #[prop(optional)]
    on_page_size_change: Option<Callback<usize>>,

    #[prop(optional)] page_size_options: Option<Vec<usize>>,

    #[prop(optional, into)] page_size: Option<Signal<usize>>,
) -> impl IntoView {
    let noun = noun.unwrap_or_else(|| "items".to_string());
    let page_size_opts = page_size_options.unwrap_or_else(|| vec![5, 10, 20, 50]);

    let page_size_select = on_page_size_change.map(|on_change| {
        let current = page_size.unwrap_or_else(|| Signal::derive(|| 0));
        view! {
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_change.run(size);
                    }
                }
                prop:value=move || current.get().to_string()
            >
                {page_size_opts.iter().map(|&size| {
                    view! {
                        <option value={size.to_string()} selected=move || current.get() == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        }
    });

    view! {
        <Show when=move || !summary.get().is_hidden()>
            <div class="pagination-controls">
                <span class="pagination-info">
                    {let noun = noun.clone(); move || summary.get().showing_label(&noun)}
                </span>
                <div class="pagination-pages">
                    <button
                        class="pagination-btn"
                        on:click=move |_| {
                            let current = summary.get_untracked();
                            if current.has_previous() {
                                on_page_change.run(current.page - 1);
                            }
                        }
                        disabled=move || !summary.get().has_previous()
                        aria-label="Go to previous page"
                    >
                        "Previous"
                    </button>
                    <For
                        each=move || summary.get().numbers
                        key=|number| *number
                        children=move |number| {
                            view! {
                                <button
                                    class="pagination-btn"
                                    class:pagination-btn--active=move || summary.get().page == number
                                    on:click=move |_| on_page_change.run(number)
                                >
                                    {number}
                                </button>
                            }
                        }
                    />
                    <button
                        class="pagination-btn"
                        on:click=move |_| {
                            let current = summary.get_untracked();
                            if current.has_next() {
                                on_page_change.run(current.page + 1);
                            }
                        }
                        disabled=move || !summary.get().has_next()
                        aria-label="Go to next page"
                    >
                        "Next"
                    </button>
                </div>
            </div>
        </Show>
        {page_size_select}
    }
}
