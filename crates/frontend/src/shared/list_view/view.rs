//! Модель представления списка: загрузка → коллекция → фильтр → страница.
//!
//! `ListView` - дешёвый клонируемый хэндл. Внутреннее состояние живёт в
//! `RefCell` и никогда не удерживается через `.await`: каждый шаг берёт
//! заимствование, меняет состояние целиком и отпускает его до уведомления
//! подписчиков.
use std::cell::RefCell;
use std::cmp::Ordering;
use std::future::Future;
use std::rc::Rc;

use contracts::shared::api::PaginationMeta;
use futures::future::LocalBoxFuture;
use log::{debug, error, warn};

use super::collection::CollectionStore;
use super::error::ListError;
use super::fetch::{DisplayState, FetchRequest, FetchStatus, FetchTracker, ListPage, Liveness};
use super::filter::{filter_records, FilterState};
use super::mutation::{Change, CommitOutcome, RollbackOutcome};
use super::pagination::{
    page_numbers, paginate, total_pages, PageState, PageSummary, PageWindow,
    DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_PAGE_SIZE,
};
use super::record::{FieldValue, ListRecord, ListSchema};
use crate::shared::api_utils::ApiError;
use crate::shared::notify::Notifier;

pub type Loader<T> =
    Rc<dyn Fn(FetchRequest) -> LocalBoxFuture<'static, Result<ListPage<T>, ApiError>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingMode {
    /// Вся коллекция загружена, страницы режутся локально
    Client,
    /// Сервер отдаёт по странице, итоги берутся из метаданных
    Server,
}

pub struct ListOptions<T> {
    pub page_size: usize,
    pub max_visible_pages: usize,
    pub paging: PagingMode,
    /// Сортировка только для отображения, порядок в коллекции не меняется
    pub sort: Option<fn(&T, &T) -> Ordering>,
    /// Для логов: "stores", "orders"...
    pub label: &'static str,
    /// Текст ошибки загрузки, если сервер не прислал своего
    pub load_error: &'static str,
}

impl<T> ListOptions<T> {
    pub fn new(label: &'static str, load_error: &'static str) -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            paging: PagingMode::Client,
            sort: None,
            label,
            load_error,
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn max_visible_pages(mut self, max_visible_pages: usize) -> Self {
        self.max_visible_pages = max_visible_pages.max(1);
        self
    }

    pub fn paging(mut self, paging: PagingMode) -> Self {
        self.paging = paging;
        self
    }

    pub fn sort_by(mut self, sort: fn(&T, &T) -> Ordering) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// Тексты уведомлений одной мутации
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationLabels {
    pub confirm: Option<(String, String)>,
    pub success: Option<(String, String)>,
    pub failure_title: String,
    pub failure_fallback: String,
}

impl MutationLabels {
    pub fn new(failure_title: impl Into<String>, failure_fallback: impl Into<String>) -> Self {
        Self {
            failure_title: failure_title.into(),
            failure_fallback: failure_fallback.into(),
            ..Self::default()
        }
    }

    pub fn confirm(mut self, title: impl Into<String>, detail: impl Into<String>) -> Self {
        self.confirm = Some((title.into(), detail.into()));
        self
    }

    pub fn on_success(mut self, title: impl Into<String>, detail: impl Into<String>) -> Self {
        self.success = Some((title.into(), detail.into()));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded { count: usize },
    Failed { message: String },
    /// Вид размонтирован или ответ перекрыт более новым запросом
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Committed(CommitOutcome),
    RolledBack(RollbackOutcome),
    /// Пользователь не подтвердил действие
    Cancelled,
    NotFound,
    Invalid(ListError),
    /// Ответ пришёл после размонтирования вида
    Discarded,
}

struct ListState<T: ListRecord> {
    store: CollectionStore<T>,
    filter: FilterState,
    page: PageState,
    fetch: FetchTracker,
    meta: Option<PaginationMeta>,
}

pub struct ListView<T: ListRecord> {
    state: Rc<RefCell<ListState<T>>>,
    schema: Rc<ListSchema<T>>,
    options: Rc<ListOptions<T>>,
    loader: Loader<T>,
    notifier: Rc<dyn Notifier>,
    liveness: Liveness,
    listeners: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl<T: ListRecord> Clone for ListView<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            schema: Rc::clone(&self.schema),
            options: Rc::clone(&self.options),
            loader: Rc::clone(&self.loader),
            notifier: Rc::clone(&self.notifier),
            liveness: self.liveness.clone(),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<T: ListRecord> ListView<T> {
    pub fn new(
        schema: ListSchema<T>,
        options: ListOptions<T>,
        loader: Loader<T>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let page = PageState::new(options.page_size);
        Self {
            state: Rc::new(RefCell::new(ListState {
                store: CollectionStore::new(),
                filter: FilterState::new(),
                page,
                fetch: FetchTracker::default(),
                meta: None,
            })),
            schema: Rc::new(schema),
            options: Rc::new(options),
            loader,
            notifier,
            liveness: Liveness::new(),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Обёртка для загрузчиков-замыканий, возвращающих future
    pub fn loader<F, Fut>(f: F) -> Loader<T>
    where
        F: Fn(FetchRequest) -> Fut + 'static,
        Fut: Future<Output = Result<ListPage<T>, ApiError>> + 'static,
    {
        Rc::new(move |request| Box::pin(f(request)))
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    /// Вид закрыт: результаты запросов в полёте будут отброшены
    pub fn unmount(&self) {
        debug!("{}: view unmounted", self.options.label);
        self.liveness.revoke();
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn changed(&self) {
        let listeners: Vec<Rc<dyn Fn()>> = self.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }

    pub fn schema(&self) -> &ListSchema<T> {
        &self.schema
    }

    pub fn paging(&self) -> PagingMode {
        self.options.paging
    }

    // ------------------------------------------------------------------
    // Чтение
    // ------------------------------------------------------------------

    pub fn with_store<R>(&self, f: impl FnOnce(&CollectionStore<T>) -> R) -> R {
        f(&self.state.borrow().store)
    }

    pub fn records(&self) -> Vec<T> {
        self.state.borrow().store.records().to_vec()
    }

    pub fn get(&self, id: &T::Id) -> Option<T> {
        self.state.borrow().store.get(id).cloned()
    }

    pub fn filter_state(&self) -> FilterState {
        self.state.borrow().filter.clone()
    }

    pub fn page_state(&self) -> PageState {
        self.state.borrow().page
    }

    pub fn status(&self) -> FetchStatus {
        self.state.borrow().fetch.status().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().fetch.is_loading()
    }

    pub fn error_banner(&self) -> Option<String> {
        self.state.borrow().fetch.error_banner().map(str::to_string)
    }

    /// Ключ строки для keyed-отрисовки: меняется при любом изменении записи
    pub fn row_key(&self, id: &T::Id) -> (u64, u64) {
        let state = self.state.borrow();
        (state.store.generation(), state.store.revision(id))
    }

    /// Идёт ли мутация по записи (для блокировки кнопок строки)
    pub fn is_busy(&self, id: &T::Id) -> bool {
        self.state.borrow().store.is_in_flight(id)
    }

    pub fn facet_options(&self, facet: &str, exclude: &[&str]) -> Vec<String> {
        let state = self.state.borrow();
        self.schema
            .facet_options(state.store.records(), facet, exclude)
    }

    fn visible(&self, state: &ListState<T>) -> Vec<T> {
        let mut rows = filter_records(state.store.records(), &self.schema, &state.filter);
        if let Some(sort) = self.options.sort {
            rows.sort_by(sort);
        }
        rows
    }

    /// Отфильтрованные и отсортированные записи (все страницы)
    pub fn filtered(&self) -> Vec<T> {
        let state = self.state.borrow();
        self.visible(&state)
    }

    fn total_pages_of(&self, state: &ListState<T>) -> usize {
        match self.options.paging {
            PagingMode::Client => total_pages(self.visible(state).len(), state.page.page_size),
            PagingMode::Server => state.meta.map(|m| m.total_pages).unwrap_or(1).max(1),
        }
    }

    /// Текущая страница для отрисовки
    pub fn window(&self) -> PageWindow<T> {
        let state = self.state.borrow();
        let rows = self.visible(&state);
        let page_size = state.page.page_size;
        match self.options.paging {
            PagingMode::Client => {
                let mut page = state.page;
                page.clamp(total_pages(rows.len(), page_size));
                paginate(&rows, page.current_page, page_size)
            }
            PagingMode::Server => {
                let page = state.page.current_page;
                // Поиск работает внутри загруженной страницы: счётчики по найденному
                let (start_index, total_items) = if state.filter.is_active() {
                    (0, rows.len())
                } else {
                    let total = state
                        .meta
                        .map(|m| m.total_items)
                        .unwrap_or_else(|| state.store.len());
                    ((page - 1) * page_size, total)
                };
                let end_index = start_index + rows.len();
                PageWindow {
                    items: rows,
                    page,
                    page_size,
                    total_pages: self.total_pages_of(&state),
                    total_items,
                    start_index,
                    end_index,
                }
            }
        }
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        let window = self.window();
        page_numbers(window.page, window.total_pages, self.options.max_visible_pages)
    }

    pub fn summary(&self) -> PageSummary {
        self.window().summary(self.options.max_visible_pages)
    }

    pub fn display_state(&self) -> DisplayState {
        let state = self.state.borrow();
        let visible = self.visible(&state).len();
        state.fetch.display_state(visible, state.store.len())
    }

    // ------------------------------------------------------------------
    // Фильтры и страницы
    // ------------------------------------------------------------------

    fn clamp_page(&self, state: &mut ListState<T>) {
        if self.options.paging == PagingMode::Client {
            let total = self.total_pages_of(state);
            if state.page.clamp(total) {
                debug!(
                    "{}: page clamped to {}",
                    self.options.label, state.page.current_page
                );
            }
        }
    }

    /// Смена фильтра возвращает на первую страницу. Серверная страница не
    /// меняется без перезагрузки, фильтр применяется к уже загруженной.
    fn restart_paging(&self, state: &mut ListState<T>) {
        if self.options.paging == PagingMode::Client {
            state.page.first();
        }
    }

    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        {
            let mut state = self.state.borrow_mut();
            if state.filter.query == query {
                return;
            }
            state.filter.query = query;
            self.restart_paging(&mut state);
        }
        self.changed();
    }

    pub fn set_facet(&self, facet: &str, value: impl Into<String>) {
        let value = value.into();
        {
            let mut state = self.state.borrow_mut();
            if state.filter.facet(facet) == value {
                return;
            }
            state.filter.set_facet(facet, value);
            self.restart_paging(&mut state);
        }
        self.changed();
    }

    pub fn reset_filters(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.filter.reset();
            self.restart_paging(&mut state);
        }
        self.changed();
    }

    /// Переход на страницу. В серверном режиме перезагружает список.
    pub async fn go_to_page(&self, page: usize) -> bool {
        let moved = {
            let mut state = self.state.borrow_mut();
            let total = self.total_pages_of(&state);
            state.page.go_to(page, total)
        };
        if !moved {
            return false;
        }
        self.changed();
        if self.options.paging == PagingMode::Server {
            self.fetch().await;
        }
        true
    }

    pub async fn set_page_size(&self, page_size: usize) {
        self.state.borrow_mut().page.set_page_size(page_size);
        self.changed();
        if self.options.paging == PagingMode::Server {
            self.fetch().await;
        }
    }

    // ------------------------------------------------------------------
    // Загрузка
    // ------------------------------------------------------------------

    /// Загрузка текущей страницы (или всего списка в клиентском режиме)
    pub async fn fetch(&self) -> FetchOutcome {
        let request = {
            let state = self.state.borrow();
            FetchRequest {
                page: state.page.current_page,
                limit: state.page.page_size,
            }
        };
        self.run_fetch(request).await
    }

    /// Повтор последнего запроса с теми же параметрами
    pub async fn retry(&self) -> FetchOutcome {
        let last = self.state.borrow().fetch.last_request();
        match last {
            Some(request) => self.run_fetch(request).await,
            None => self.fetch().await,
        }
    }

    async fn run_fetch(&self, mut request: FetchRequest) -> FetchOutcome {
        let label = self.options.label;
        let mut clamped_once = false;
        loop {
            let token = self.state.borrow_mut().fetch.begin(request);
            self.changed();
            debug!(
                "{}: fetch #{} dispatched (page {}, limit {})",
                label, token, request.page, request.limit
            );

            let result = (self.loader)(request).await;

            if !self.liveness.is_alive() {
                debug!("{}: fetch #{} dropped, view unmounted", label, token);
                return FetchOutcome::Discarded;
            }

            let outcome = {
                let mut state = self.state.borrow_mut();
                if !state.fetch.is_current(token) {
                    debug!("{}: fetch #{} superseded by a newer request", label, token);
                    return FetchOutcome::Discarded;
                }
                match result {
                    Ok(page) => {
                        if let (PagingMode::Server, Some(meta)) = (self.options.paging, page.meta) {
                            let last = meta.total_pages.max(1);
                            if request.page > last && !clamped_once {
                                debug!(
                                    "{}: page {} is past the last page {}, reloading",
                                    label, request.page, last
                                );
                                clamped_once = true;
                                state.page.current_page = last;
                                request.page = last;
                                continue;
                            }
                            state.page.current_page = meta.page.max(1);
                        }
                        let count = page.records.len();
                        state.store.replace_all(page.records);
                        state.meta = page.meta;
                        state.fetch.succeed();
                        self.clamp_page(&mut state);
                        debug!("{}: fetch #{} loaded {} records", label, token, count);
                        FetchOutcome::Loaded { count }
                    }
                    Err(err) => {
                        let message = err.user_message(self.options.load_error);
                        warn!("{}: fetch #{} failed: {}", label, token, err);
                        state.fetch.fail(message.clone());
                        FetchOutcome::Failed { message }
                    }
                }
            };
            self.changed();
            return outcome;
        }
    }

    // ------------------------------------------------------------------
    // Мутации
    // ------------------------------------------------------------------

    /// Оптимистичный патч поля (переключатели флагов).
    ///
    /// `request` получает запись уже с новым значением; может вернуть
    /// серверную версию записи для сверки.
    pub async fn toggle<F, Fut>(
        &self,
        id: T::Id,
        field: &str,
        value: FieldValue,
        labels: &MutationLabels,
        request: F,
    ) -> MutationOutcome
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<Option<T>, ApiError>>,
    {
        let change = Change::Patch {
            field: field.to_string(),
            value,
        };
        self.mutate(id, change, labels, request).await
    }

    /// Оптимистичное удаление. `request` получает удаляемую запись.
    pub async fn delete<F, Fut>(&self, id: T::Id, labels: &MutationLabels, request: F) -> MutationOutcome
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        self.mutate(id, Change::Remove, labels, move |record| {
            let fut = request(record);
            async move { fut.await.map(|_| None) }
        })
        .await
    }

    async fn mutate<F, Fut>(
        &self,
        id: T::Id,
        change: Change,
        labels: &MutationLabels,
        request: F,
    ) -> MutationOutcome
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<Option<T>, ApiError>>,
    {
        let label = self.options.label;
        if self.get(&id).is_none() {
            return MutationOutcome::NotFound;
        }

        if let Some((title, detail)) = &labels.confirm {
            if !self.notifier.confirm_action(title, detail).await {
                return MutationOutcome::Cancelled;
            }
        }

        let begun = {
            let mut state = self.state.borrow_mut();
            let before = state.store.get(&id).cloned();
            match (state.store.begin_mutation(&id, &change), before) {
                (Ok(Some(ticket)), Some(before)) => {
                    let subject = state.store.get(&id).cloned().unwrap_or(before);
                    self.clamp_page(&mut state);
                    Ok((ticket, subject))
                }
                (Ok(_), _) => Err(MutationOutcome::NotFound),
                (Err(err), _) => Err(MutationOutcome::Invalid(err)),
            }
        };
        let (ticket, subject) = match begun {
            Ok(begun) => begun,
            Err(MutationOutcome::Invalid(err)) => {
                error!("{}: mutation of {} rejected locally: {}", label, id, err);
                self.notifier
                    .notify_error(&labels.failure_title, &err.to_string());
                return MutationOutcome::Invalid(err);
            }
            Err(outcome) => return outcome,
        };
        self.changed();

        let result = request(subject).await;

        match result {
            Ok(authoritative) => {
                if let Some((title, detail)) = &labels.success {
                    self.notifier.notify_success(title, detail);
                }
                if !self.liveness.is_alive() {
                    return MutationOutcome::Discarded;
                }
                let outcome = self.state.borrow_mut().store.commit_mutation(&ticket, authoritative);
                self.changed();
                MutationOutcome::Committed(outcome)
            }
            Err(err) => {
                error!("{}: mutation of {} failed: {}", label, id, err);
                self.notifier.notify_error(
                    &labels.failure_title,
                    &err.user_message(&labels.failure_fallback),
                );
                if !self.liveness.is_alive() {
                    return MutationOutcome::Discarded;
                }
                let outcome = {
                    let mut state = self.state.borrow_mut();
                    let outcome = state.store.rollback_mutation(&ticket);
                    self.clamp_page(&mut state);
                    outcome
                };
                self.changed();
                MutationOutcome::RolledBack(outcome)
            }
        }
    }

    /// Неоптимистичное сохранение (формы создания/редактирования).
    ///
    /// Успех: запись из ответа вставляется в коллекцию, иначе список
    /// перезагружается. Ошибка возвращается текстом для формы.
    pub async fn save<Fut>(&self, labels: &MutationLabels, request: Fut) -> Result<(), String>
    where
        Fut: Future<Output = Result<Option<T>, ApiError>>,
    {
        match request.await {
            Ok(record) => {
                if let Some((title, detail)) = &labels.success {
                    self.notifier.notify_success(title, detail);
                }
                if !self.liveness.is_alive() {
                    return Ok(());
                }
                match record {
                    Some(record) => {
                        self.state.borrow_mut().store.upsert(record);
                        self.changed();
                    }
                    None => {
                        self.fetch().await;
                    }
                }
                Ok(())
            }
            Err(err) => {
                let message = err.user_message(&labels.failure_fallback);
                error!("{}: save failed: {}", self.options.label, err);
                self.notifier.notify_error(&labels.failure_title, &message);
                Err(message)
            }
        }
    }

    /// Локальная вставка без сервера (статические справочники)
    pub fn upsert_local(&self, record: T) {
        self.state.borrow_mut().store.upsert(record);
        self.changed();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::future::ready;
    use futures::task::LocalSpawnExt;

    use super::*;
    use crate::shared::api_utils::NETWORK_ERROR;
    use crate::shared::list_view::testing::{sample, Item, RecordingNotifier};

    type Reply = Result<ListPage<Item>, ApiError>;

    fn items(count: i64) -> Vec<Item> {
        (1..=count).map(|i| sample(i, &format!("Item {}", i), "pending")).collect()
    }

    fn server_error(message: &str) -> ApiError {
        ApiError::Http {
            status: 500,
            message: message.to_string(),
        }
    }

    fn make_view(loader: Loader<Item>, notifier: &Rc<RecordingNotifier>) -> ListView<Item> {
        let notifier: Rc<dyn Notifier> = notifier.clone();
        ListView::new(
            Item::schema(),
            ListOptions::new("items", "Failed to load items"),
            loader,
            notifier,
        )
    }

    /// Загрузчик, отвечающий заранее заданными ответами по очереди
    fn scripted(replies: Vec<Reply>) -> Loader<Item> {
        let replies = Rc::new(RefCell::new(replies));
        ListView::loader(move |_request| {
            let reply = {
                let mut replies = replies.borrow_mut();
                if replies.is_empty() {
                    Err(ApiError::Network(NETWORK_ERROR.to_string()))
                } else {
                    replies.remove(0)
                }
            };
            ready(reply)
        })
    }

    /// Загрузчик, ответ которому отправляет тест
    fn gated() -> (Loader<Item>, Rc<RefCell<Vec<oneshot::Sender<Reply>>>>) {
        let senders = Rc::new(RefCell::new(Vec::new()));
        let pending = Rc::clone(&senders);
        let loader = ListView::loader(move |_request| {
            let (tx, rx) = oneshot::channel();
            pending.borrow_mut().push(tx);
            async move {
                rx.await
                    .unwrap_or_else(|_| Err(ApiError::Network(NETWORK_ERROR.to_string())))
            }
        });
        (loader, senders)
    }

    fn loaded(count: i64, notifier: &Rc<RecordingNotifier>) -> ListView<Item> {
        let view = make_view(scripted(vec![Ok(ListPage::new(items(count)))]), notifier);
        assert_eq!(block_on(view.fetch()), FetchOutcome::Loaded { count: count as usize });
        view
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let notifier = Rc::new(RecordingNotifier::new(true));
        let (loader, senders) = gated();
        let view = make_view(loader, &notifier);
        let mut pool = LocalPool::new();
        let outcomes = Rc::new(RefCell::new(Vec::new()));

        for _ in 0..2 {
            let view = view.clone();
            let outcomes = Rc::clone(&outcomes);
            pool.spawner()
                .spawn_local(async move {
                    let outcome = view.fetch().await;
                    outcomes.borrow_mut().push(outcome);
                })
                .unwrap();
            pool.run_until_stalled();
        }

        let mut senders = senders.borrow_mut().drain(..).collect::<Vec<_>>();
        let first = senders.remove(0);
        let second = senders.remove(0);
        second.send(Ok(ListPage::new(items(2)))).unwrap();
        pool.run_until_stalled();
        first.send(Ok(ListPage::new(items(7)))).unwrap();
        pool.run_until_stalled();

        assert_eq!(
            *outcomes.borrow(),
            vec![FetchOutcome::Loaded { count: 2 }, FetchOutcome::Discarded]
        );
        assert_eq!(view.records().len(), 2);
        assert_eq!(view.status(), FetchStatus::Success);
    }

    #[test]
    fn test_response_after_unmount_is_dropped() {
        let notifier = Rc::new(RecordingNotifier::new(true));
        let (loader, senders) = gated();
        let view = make_view(loader, &notifier);
        let mut pool = LocalPool::new();
        let outcome = Rc::new(RefCell::new(None));

        let task_view = view.clone();
        let slot = Rc::clone(&outcome);
        pool.spawner()
            .spawn_local(async move {
                *slot.borrow_mut() = Some(task_view.fetch().await);
            })
            .unwrap();
        pool.run_until_stalled();

        view.unmount();
        let tx = senders.borrow_mut().remove(0);
        tx.send(Ok(ListPage::new(items(3)))).unwrap();
        pool.run_until_stalled();

        assert_eq!(*outcome.borrow(), Some(FetchOutcome::Discarded));
        assert!(view.records().is_empty());
        assert_eq!(view.display_state(), DisplayState::Loading);
    }

    #[test]
    fn test_first_load_failure_then_refresh_failure() {
        let notifier = Rc::new(RecordingNotifier::new(true));
        let view = make_view(
            scripted(vec![
                Err(server_error("Database unavailable")),
                Ok(ListPage::new(items(3))),
                Err(ApiError::Decode("eof".to_string())),
            ]),
            &notifier,
        );

        block_on(view.fetch());
        assert_eq!(
            view.display_state(),
            DisplayState::Failed {
                message: "Database unavailable".to_string()
            }
        );
        assert_eq!(view.error_banner(), None);

        assert_eq!(block_on(view.retry()), FetchOutcome::Loaded { count: 3 });
        assert_eq!(view.display_state(), DisplayState::Rows);

        block_on(view.fetch());
        assert_eq!(view.display_state(), DisplayState::Rows);
        assert_eq!(view.records().len(), 3);
        assert_eq!(view.error_banner().as_deref(), Some("Failed to load items"));
    }

    #[test]
    fn test_failed_toggle_rolls_back_with_one_error() {
        let notifier = Rc::new(RecordingNotifier::new(true));
        let view = loaded(5, &notifier);
        let labels = MutationLabels::new("Update failed", "Could not update item");

        let seen = Rc::new(Cell::new(false));
        let flag = Rc::clone(&seen);
        let outcome = block_on(view.toggle(5, "vendor", FieldValue::Bool(true), &labels, |record| {
            flag.set(record.vendor);
            ready(Err(server_error("Server down")))
        }));

        assert!(seen.get());
        assert_eq!(outcome, MutationOutcome::RolledBack(RollbackOutcome::Restored));
        assert_eq!(view.get(&5).map(|r| r.vendor), Some(false));
        assert!(!view.is_busy(&5));
        assert_eq!(notifier.errors(), 1);
        assert_eq!(notifier.successes(), 0);
    }

    #[test]
    fn test_toggle_on_unknown_field_is_reported_once() {
        let notifier = Rc::new(RecordingNotifier::new(true));
        let view = loaded(2, &notifier);
        let labels = MutationLabels::new("Update failed", "Could not update item");

        let outcome = block_on(view.toggle(1, "colour", FieldValue::Bool(true), &labels, |_| {
            ready(Ok(None))
        }));

        assert_eq!(
            outcome,
            MutationOutcome::Invalid(ListError::UnknownField("colour".to_string()))
        );
        assert_eq!(notifier.errors(), 1);
        assert!(!view.is_busy(&1));
    }

    #[test]
    fn test_delete_on_last_page_clamps_page() {
        let notifier = Rc::new(RecordingNotifier::new(true));
        let view = loaded(11, &notifier);
        assert!(block_on(view.go_to_page(3)));
        assert_eq!(view.window().items.len(), 1);

        let labels = MutationLabels::new("Delete failed", "Could not delete item")
            .on_success("Deleted", "Item removed");
        let outcome = block_on(view.delete(11, &labels, |_| ready(Ok(()))));

        assert_eq!(outcome, MutationOutcome::Committed(CommitOutcome::Confirmed));
        assert_eq!(view.page_state().current_page, 2);
        let window = view.window();
        assert_eq!(window.range_label(), "6-10 of 10");
        assert_eq!(notifier.successes(), 1);
    }

    #[test]
    fn test_declined_delete_leaves_collection_alone() {
        let notifier = Rc::new(RecordingNotifier::new(false));
        let view = loaded(3, &notifier);
        let labels = MutationLabels::new("Delete failed", "Could not delete item")
            .confirm("Delete item?", "This cannot be undone");

        let called = Rc::new(Cell::new(false));
        let flag = Rc::clone(&called);
        let outcome = block_on(view.delete(1, &labels, |_| {
            flag.set(true);
            ready(Ok(()))
        }));

        assert_eq!(outcome, MutationOutcome::Cancelled);
        assert!(!called.get());
        assert_eq!(view.records().len(), 3);
    }

    #[test]
    fn test_delete_missing_record() {
        let notifier = Rc::new(RecordingNotifier::new(true));
        let view = loaded(3, &notifier);
        let labels = MutationLabels::new("Delete failed", "Could not delete item");
        let outcome = block_on(view.delete(42, &labels, |_| ready(Ok(()))));
        assert_eq!(outcome, MutationOutcome::NotFound);
        assert_eq!(notifier.errors(), 0);
    }

    #[test]
    fn test_overlapping_edits_of_one_record() {
        let notifier = Rc::new(RecordingNotifier::new(true));
        let view = loaded(3, &notifier);
        let mut pool = LocalPool::new();
        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let mut senders = Vec::new();

        for name in ["One", "Two"] {
            let (tx, rx) = oneshot::channel::<Result<Option<Item>, ApiError>>();
            senders.push(tx);
            let view = view.clone();
            let outcomes = Rc::clone(&outcomes);
            pool.spawner()
                .spawn_local(async move {
                    let labels = MutationLabels::new("Rename failed", "Could not rename");
                    let outcome = view
                        .toggle(1, "name", FieldValue::from(name), &labels, |_| async move {
                            rx.await.unwrap_or(Ok(None))
                        })
                        .await;
                    outcomes.borrow_mut().push(outcome);
                })
                .unwrap();
            pool.run_until_stalled();
        }
        assert_eq!(view.get(&1).map(|r| r.name), Some("Two".to_string()));

        let second = senders.remove(1);
        let first = senders.remove(0);
        first.send(Err(server_error("Conflict"))).unwrap();
        pool.run_until_stalled();
        assert_eq!(view.get(&1).map(|r| r.name), Some("Two".to_string()));

        second.send(Err(server_error("Conflict"))).unwrap();
        pool.run_until_stalled();
        assert_eq!(view.get(&1).map(|r| r.name), Some("Item 1".to_string()));

        assert_eq!(
            *outcomes.borrow(),
            vec![
                MutationOutcome::RolledBack(RollbackOutcome::Superseded),
                MutationOutcome::RolledBack(RollbackOutcome::RecordRestored),
            ]
        );
        assert_eq!(notifier.errors(), 2);
    }

    #[test]
    fn test_filter_change_returns_to_first_page() {
        let notifier = Rc::new(RecordingNotifier::new(true));
        let view = loaded(12, &notifier);
        assert!(block_on(view.go_to_page(2)));

        view.set_query("item 1");
        assert_eq!(view.page_state().current_page, 1);
        // "Item 1", "Item 10", "Item 11", "Item 12"
        assert_eq!(view.window().total_items, 4);

        view.set_query("nothing like this");
        assert_eq!(view.display_state(), DisplayState::Empty { filtered: true });
        view.reset_filters();
        assert_eq!(view.display_state(), DisplayState::Rows);
    }

    #[test]
    fn test_listeners_fire_on_changes() {
        let notifier = Rc::new(RecordingNotifier::new(true));
        let view = loaded(3, &notifier);
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        view.subscribe(move || counter.set(counter.get() + 1));

        view.set_facet("status", "pending");
        assert_eq!(hits.get(), 1);
        // то же значение: без уведомления
        view.set_facet("status", "pending");
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_server_paging_refetches_clamped_page_once() {
        let notifier = Rc::new(RecordingNotifier::new(true));
        let requested = Rc::new(RefCell::new(Vec::new()));
        let server_pages = Rc::new(Cell::new(3usize));

        let log = Rc::clone(&requested);
        let pages = Rc::clone(&server_pages);
        let loader = ListView::loader(move |request: FetchRequest| {
            log.borrow_mut().push(request.page);
            let meta = PaginationMeta {
                page: request.page,
                limit: Some(request.limit),
                total_pages: pages.get(),
                total_items: pages.get() * request.limit,
            };
            let records = if request.page <= pages.get() { items(5) } else { Vec::new() };
            ready(Ok(ListPage::with_meta(records, Some(meta))))
        });
        let notifier_dyn: Rc<dyn Notifier> = notifier.clone();
        let view = ListView::new(
            Item::schema(),
            ListOptions::new("users", "Failed to load users").paging(PagingMode::Server),
            loader,
            notifier_dyn,
        );

        block_on(view.fetch());
        assert_eq!(view.window().total_pages, 3);

        server_pages.set(2);
        assert!(block_on(view.go_to_page(3)));

        assert_eq!(*requested.borrow(), vec![1, 3, 2]);
        assert_eq!(view.page_state().current_page, 2);
        let window = view.window();
        assert_eq!(window.total_pages, 2);
        assert_eq!(window.range_label(), "6-10 of 10");
    }

    #[test]
    fn test_server_paging_filters_within_loaded_page() {
        let notifier = Rc::new(RecordingNotifier::new(true));
        let requested = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&requested);
        let loader = ListView::loader(move |request: FetchRequest| {
            log.borrow_mut().push(request.page);
            let first = ((request.page - 1) * request.limit) as i64;
            let records: Vec<Item> = (first + 1..=first + request.limit as i64)
                .map(|i| sample(i, &format!("Item {}", i), "pending"))
                .collect();
            let meta = PaginationMeta {
                page: request.page,
                limit: Some(request.limit),
                total_pages: 3,
                total_items: 3 * request.limit,
            };
            ready(Ok(ListPage::with_meta(records, Some(meta))))
        });
        let notifier_dyn: Rc<dyn Notifier> = notifier.clone();
        let view = ListView::new(
            Item::schema(),
            ListOptions::new("users", "Failed to load users").paging(PagingMode::Server),
            loader,
            notifier_dyn,
        );

        block_on(view.fetch());
        assert!(block_on(view.go_to_page(3)));

        view.set_query("item 12");
        assert_eq!(view.page_state().current_page, 3);
        let window = view.window();
        assert_eq!(window.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![12]);
        assert_eq!(window.page, 3);
        assert_eq!(window.range_label(), "1-1 of 1");

        // первая страница загружается заново, фильтр остаётся
        assert!(block_on(view.go_to_page(1)));
        assert_eq!(*requested.borrow(), vec![1, 3, 1]);
        assert_eq!(view.display_state(), DisplayState::Empty { filtered: true });

        view.reset_filters();
        let window = view.window();
        assert_eq!(window.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(window.range_label(), "1-5 of 15");
    }

    #[test]
    fn test_save_inserts_returned_record() {
        let notifier = Rc::new(RecordingNotifier::new(true));
        let view = loaded(2, &notifier);
        let labels = MutationLabels::new("Save failed", "Could not save item")
            .on_success("Saved", "Item created");

        let result = block_on(view.save(&labels, ready(Ok(Some(sample(9, "New", "pending"))))));
        assert_eq!(result, Ok(()));
        assert_eq!(view.records().len(), 3);

        let result = block_on(view.save(&labels, ready(Err(server_error("Email already in use")))));
        assert_eq!(result, Err("Email already in use".to_string()));
        assert_eq!(notifier.successes(), 1);
        assert_eq!(notifier.errors(), 1);
    }

    #[test]
    fn test_upsert_local_updates_in_place_and_appends() {
        let notifier = Rc::new(RecordingNotifier::new(true));
        let view = loaded(3, &notifier);
        let clock = view.with_store(|store| store.clock());

        view.upsert_local(sample(2, "Renamed", "done"));
        view.upsert_local(sample(4, "Fresh", "pending"));

        let names: Vec<_> = view.records().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Item 1", "Renamed", "Item 3", "Fresh"]);
        assert!(view.with_store(|store| store.clock()) > clock);
        assert_eq!(notifier.successes(), 0);
    }
}
