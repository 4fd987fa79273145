//! Управление списками сущностей на клиенте: коллекция, фильтры, пагинация,
//! загрузка и оптимистичные мутации.
//!
//! Всё, кроме `reactive`, не зависит от Leptos и тестируется нативно.
pub mod collection;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod mutation;
pub mod pagination;
pub mod reactive;
pub mod record;
pub mod view;

#[cfg(test)]
pub mod testing;

pub use collection::{CollectionStore, Snapshot, Upserted};
pub use error::ListError;
pub use fetch::{DisplayState, FetchRequest, FetchStatus, ListPage, Liveness};
pub use filter::{FilterState, ALL};
pub use mutation::{Change, CommitOutcome, RollbackOutcome};
pub use pagination::{PageSummary, PageWindow};
pub use reactive::{use_list_view, ListHandle};
pub use record::{borrowed, borrowed_opt, FieldValue, ListRecord, ListSchema};
pub use view::{
    FetchOutcome, ListOptions, ListView, Loader, MutationLabels, MutationOutcome, PagingMode,
};
