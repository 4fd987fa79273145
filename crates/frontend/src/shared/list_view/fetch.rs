//! Состояние загрузки списка: Idle → Loading → {Success, Failed}.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use contracts::shared::api::{ApiEnvelope, ListData, PaginationMeta};

/// Флаг "вид ещё смонтирован". Клон разделяет тот же флаг.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Параметры запроса списка. Для клиентской пагинации сервер их игнорирует.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub page: usize,
    pub limit: usize,
}

/// Успешный ответ списка
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub records: Vec<T>,
    pub meta: Option<PaginationMeta>,
}

impl<T> ListPage<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records, meta: None }
    }

    pub fn with_meta(records: Vec<T>, meta: Option<PaginationMeta>) -> Self {
        Self { records, meta }
    }
}

/// Ответ без `data` - пустой список. Метаданные внутри `data` важнее
/// метаданных конверта.
impl<T> From<ApiEnvelope<ListData<T>>> for ListPage<T> {
    fn from(envelope: ApiEnvelope<ListData<T>>) -> Self {
        let (records, inner) = envelope
            .data
            .map(ListData::into_parts)
            .unwrap_or_default();
        Self::with_meta(records, inner.or(envelope.pagination))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Failed { message: String },
}

/// Что показывать вместо/вместе с таблицей
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// Первая загрузка ещё идёт
    Loading,
    /// Первая загрузка упала: баннер с ретраем, таблицы нет
    Failed { message: String },
    /// Данные загружены, показывать нечего. `filtered` - пусто из-за фильтров.
    Empty { filtered: bool },
    Rows,
}

/// Учёт запросов: статус, последний токен, были ли данные
#[derive(Debug, Clone)]
pub struct FetchTracker {
    status: FetchStatus,
    latest_token: u64,
    has_loaded: bool,
    last_request: Option<FetchRequest>,
}

impl Default for FetchTracker {
    fn default() -> Self {
        Self {
            status: FetchStatus::Idle,
            latest_token: 0,
            has_loaded: false,
            last_request: None,
        }
    }
}

impl FetchTracker {
    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn last_request(&self) -> Option<FetchRequest> {
        self.last_request
    }

    /// Новый запрос: статус Loading, выдаётся токен
    pub fn begin(&mut self, request: FetchRequest) -> u64 {
        self.latest_token += 1;
        self.status = FetchStatus::Loading;
        self.last_request = Some(request);
        self.latest_token
    }

    /// Может ли ответ с этим токеном попасть в состояние
    pub fn is_current(&self, token: u64) -> bool {
        token == self.latest_token
    }

    pub fn succeed(&mut self) {
        self.status = FetchStatus::Success;
        self.has_loaded = true;
    }

    pub fn fail(&mut self, message: String) {
        self.status = FetchStatus::Failed { message };
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// `visible` - сколько записей видно после фильтров, `total` - сколько в коллекции
    pub fn display_state(&self, visible: usize, total: usize) -> DisplayState {
        if !self.has_loaded {
            return match &self.status {
                FetchStatus::Failed { message } => DisplayState::Failed {
                    message: message.clone(),
                },
                _ => DisplayState::Loading,
            };
        }
        if visible == 0 {
            DisplayState::Empty {
                filtered: total > 0,
            }
        } else {
            DisplayState::Rows
        }
    }

    /// Сообщение для баннера, когда обновление упало, а старые данные на экране
    pub fn error_banner(&self) -> Option<&str> {
        if self.has_loaded {
            self.error_message()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQ: FetchRequest = FetchRequest { page: 1, limit: 5 };

    #[test]
    fn test_list_page_from_envelope() {
        let envelope: ApiEnvelope<ListData<u32>> = serde_json::from_str(
            r#"{ "success": true, "data": [1, 2],
                 "pagination": { "page": 2, "limit": 2, "totalPages": 3, "totalItems": 6 } }"#,
        )
        .unwrap();
        let page = ListPage::from(envelope);
        assert_eq!(page.records, vec![1, 2]);
        assert_eq!(page.meta.map(|m| m.total_items), Some(6));

        let envelope: ApiEnvelope<ListData<u32>> =
            serde_json::from_str(r#"{ "success": true }"#).unwrap();
        assert!(ListPage::from(envelope).records.is_empty());
    }

    #[test]
    fn test_three_distinct_empty_looking_states() {
        let mut tracker = FetchTracker::default();
        assert_eq!(tracker.display_state(0, 0), DisplayState::Loading);

        tracker.begin(REQ);
        assert_eq!(tracker.display_state(0, 0), DisplayState::Loading);

        tracker.succeed();
        assert_eq!(tracker.display_state(0, 0), DisplayState::Empty { filtered: false });
        assert_eq!(tracker.display_state(0, 4), DisplayState::Empty { filtered: true });
        assert_eq!(tracker.display_state(3, 4), DisplayState::Rows);
    }

    #[test]
    fn test_first_load_failure_vs_refresh_failure() {
        let mut tracker = FetchTracker::default();
        tracker.begin(REQ);
        tracker.fail("Failed to load stores".into());
        assert_eq!(
            tracker.display_state(0, 0),
            DisplayState::Failed {
                message: "Failed to load stores".into()
            }
        );
        assert_eq!(tracker.error_banner(), None);

        tracker.begin(REQ);
        tracker.succeed();
        tracker.begin(REQ);
        tracker.fail("timeout".into());
        assert_eq!(tracker.display_state(2, 2), DisplayState::Rows);
        assert_eq!(tracker.error_banner(), Some("timeout"));
    }

    #[test]
    fn test_only_latest_token_is_current() {
        let mut tracker = FetchTracker::default();
        let first = tracker.begin(REQ);
        let second = tracker.begin(FetchRequest { page: 2, limit: 5 });
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert_eq!(tracker.last_request().map(|r| r.page), Some(2));
    }

    #[test]
    fn test_liveness_shared_between_clones() {
        let liveness = Liveness::new();
        let copy = liveness.clone();
        assert!(copy.is_alive());
        liveness.revoke();
        assert!(!copy.is_alive());
    }
}
