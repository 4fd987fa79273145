//! Тестовые записи и дублёры для модулей списка
use std::borrow::Cow;
use std::cell::RefCell;

use async_trait::async_trait;

use super::collection::CollectionStore;
use super::error::ListError;
use super::record::{borrowed, borrowed_opt, FieldValue, ListRecord, ListSchema};
use crate::shared::notify::Notifier;

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub store: Option<String>,
    pub note: Option<String>,
    pub vendor: bool,
}

impl ListRecord for Item {
    type Id = i64;

    fn record_id(&self) -> i64 {
        self.id
    }

    fn patch_field(&mut self, field: &str, value: &FieldValue) -> Result<(), ListError> {
        match field {
            "vendor" => self.vendor = value.expect_bool(field)?,
            "name" => {
                self.name = value
                    .as_text()
                    .ok_or_else(|| ListError::FieldType {
                        field: field.to_string(),
                        expected: "text",
                    })?
                    .to_string()
            }
            _ => return Err(ListError::UnknownField(field.to_string())),
        }
        Ok(())
    }
}

fn item_name(i: &Item) -> Option<Cow<'_, str>> {
    borrowed(&i.name)
}

fn item_note(i: &Item) -> Option<Cow<'_, str>> {
    borrowed_opt(&i.note)
}

fn item_status(i: &Item) -> Option<Cow<'_, str>> {
    borrowed(&i.status)
}

fn item_store(i: &Item) -> Option<Cow<'_, str>> {
    borrowed_opt(&i.store)
}

fn item_vendor(i: &Item) -> Option<Cow<'_, str>> {
    Some(Cow::Borrowed(if i.vendor { "true" } else { "false" }))
}

impl Item {
    pub fn schema() -> ListSchema<Item> {
        ListSchema::new()
            .search("name", item_name)
            .search("note", item_note)
            .facet("status", item_status)
            .facet("store", item_store)
            .facet("vendor", item_vendor)
    }
}

pub fn sample(id: i64, name: &str, status: &str) -> Item {
    Item {
        id,
        name: name.to_string(),
        status: status.to_string(),
        store: None,
        note: None,
        vendor: false,
    }
}

pub fn vendor_of(store: &CollectionStore<Item>, id: i64) -> bool {
    store.get(&id).map(|r| r.vendor).unwrap_or(false)
}

/// Генератор записей для property-style тестов (детерминированный LCG)
pub fn generated(count: usize, seed: u64) -> Vec<Item> {
    const NAMES: [&str; 6] = ["Alpha", "beta", "GAMMA wash", "delta", "Fold & Iron", ""];
    const STATUSES: [&str; 4] = ["pending", "delivered", "Pending", "cancelled"];
    const STORES: [Option<&str>; 3] = [Some("North"), Some("South"), None];
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };
    (0..count)
        .map(|i| Item {
            id: i as i64 + 1,
            name: NAMES[next() % NAMES.len()].to_string(),
            status: STATUSES[next() % STATUSES.len()].to_string(),
            store: STORES[next() % STORES.len()].map(str::to_string),
            note: if next() % 2 == 0 {
                Some(format!("note {}", next() % 10))
            } else {
                None
            },
            vendor: next() % 2 == 0,
        })
        .collect()
}

/// Событие, записанное `RecordingNotifier`
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String, String),
    Error(String, String),
    Confirm(String, String),
}

/// Дублёр уведомлений: пишет все вызовы, на подтверждение отвечает `confirm`
pub struct RecordingNotifier {
    pub notices: RefCell<Vec<Notice>>,
    pub confirm: bool,
}

impl RecordingNotifier {
    pub fn new(confirm: bool) -> Self {
        Self {
            notices: RefCell::new(Vec::new()),
            confirm,
        }
    }

    pub fn errors(&self) -> usize {
        self.notices
            .borrow()
            .iter()
            .filter(|n| matches!(n, Notice::Error(..)))
            .count()
    }

    pub fn successes(&self) -> usize {
        self.notices
            .borrow()
            .iter()
            .filter(|n| matches!(n, Notice::Success(..)))
            .count()
    }
}

#[async_trait(?Send)]
impl Notifier for RecordingNotifier {
    fn notify_success(&self, title: &str, detail: &str) {
        self.notices
            .borrow_mut()
            .push(Notice::Success(title.to_string(), detail.to_string()));
    }

    fn notify_error(&self, title: &str, detail: &str) {
        self.notices
            .borrow_mut()
            .push(Notice::Error(title.to_string(), detail.to_string()));
    }

    async fn confirm_action(&self, title: &str, detail: &str) -> bool {
        self.notices
            .borrow_mut()
            .push(Notice::Confirm(title.to_string(), detail.to_string()));
        self.confirm
    }
}
