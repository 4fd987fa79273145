//! Хранилище записей одного типа сущности.
//!
//! Порядок вставки сохраняется. Каждое локальное изменение записи штампует её
//! ревизией из монотонного счётчика `clock`; по ревизиям координатор
//! оптимистичных мутаций понимает, трогали ли запись после снапшота.
use std::collections::HashMap;

use super::error::ListError;
use super::mutation::InFlight;
use super::record::{FieldValue, ListRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Inserted,
    Updated,
}

/// Неизменяемая копия коллекции для отката
#[derive(Debug, Clone)]
pub struct Snapshot<T: ListRecord> {
    records: Vec<T>,
    revisions: HashMap<T::Id, u64>,
    clock: u64,
    generation: u64,
}

impl<T: ListRecord> Snapshot<T> {
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(super) fn locate(&self, id: &T::Id) -> Option<(usize, &T)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, r)| &r.record_id() == id)
    }
}

#[derive(Debug, Clone)]
pub struct CollectionStore<T: ListRecord> {
    records: Vec<T>,
    revisions: HashMap<T::Id, u64>,
    clock: u64,
    generation: u64,
    pub(super) in_flight: HashMap<T::Id, Vec<InFlight<T>>>,
    pub(super) next_ticket: u64,
}

impl<T: ListRecord> Default for CollectionStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            revisions: HashMap::new(),
            clock: 0,
            generation: 0,
            in_flight: HashMap::new(),
            next_ticket: 0,
        }
    }
}

impl<T: ListRecord> CollectionStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<T>) -> Self {
        let mut store = Self::new();
        store.replace_all(records);
        store
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|r| &r.record_id() == id)
    }

    pub fn position(&self, id: &T::Id) -> Option<usize> {
        self.records.iter().position(|r| &r.record_id() == id)
    }

    /// Счётчик изменений всей коллекции
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Номер полной замены коллекции (`replace_all`)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ревизия записи; 0 - запись не менялась локально с последней замены
    pub fn revision(&self, id: &T::Id) -> u64 {
        self.revisions.get(id).copied().unwrap_or(0)
    }

    /// Есть ли незавершённые мутации по записи
    pub fn is_in_flight(&self, id: &T::Id) -> bool {
        self.in_flight.get(id).is_some_and(|chain| !chain.is_empty())
    }

    pub(super) fn stamp(&mut self, id: T::Id) -> u64 {
        self.clock += 1;
        self.revisions.insert(id, self.clock);
        self.clock
    }

    /// Полная замена после успешной загрузки. Сбрасывает снапшоты мутаций в полёте.
    pub fn replace_all(&mut self, records: Vec<T>) {
        self.records = records;
        self.revisions.clear();
        self.in_flight.clear();
        self.generation += 1;
        self.clock += 1;
    }

    /// Заменяет запись с тем же id на месте или добавляет в конец
    pub fn upsert(&mut self, record: T) -> Upserted {
        let id = record.record_id();
        let outcome = match self.position(&id) {
            Some(index) => {
                self.records[index] = record;
                Upserted::Updated
            }
            None => {
                self.records.push(record);
                Upserted::Inserted
            }
        };
        self.stamp(id);
        outcome
    }

    /// Удаляет запись; отсутствие записи не ошибка
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let index = self.position(id)?;
        let removed = self.records.remove(index);
        self.stamp(id.clone());
        Some(removed)
    }

    /// Патч одного поля. `Ok(false)` - записи с таким id нет.
    pub fn patch_field(
        &mut self,
        id: &T::Id,
        field: &str,
        value: &FieldValue,
    ) -> Result<bool, ListError> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        self.records[index].patch_field(field, value)?;
        self.stamp(id.clone());
        Ok(true)
    }

    pub fn update_with(&mut self, id: &T::Id, f: impl FnOnce(&mut T)) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        f(&mut self.records[index]);
        self.stamp(id.clone());
        true
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            records: self.records.clone(),
            revisions: self.revisions.clone(),
            clock: self.clock,
            generation: self.generation,
        }
    }

    /// Восстанавливает коллекцию из снапшота как есть
    pub fn restore(&mut self, snapshot: Snapshot<T>) {
        self.records = snapshot.records;
        self.revisions = snapshot.revisions;
        self.clock += 1;
    }

    /// Восстанавливает одну запись (значение и позицию) из снапшота.
    /// Запись, которой в снапшоте не было, удаляется.
    pub fn restore_record(&mut self, snapshot: &Snapshot<T>, id: &T::Id) -> bool {
        let before = snapshot.locate(id).map(|(i, r)| (i, r.clone()));
        self.put_back(id, before)
    }

    pub(super) fn put_back(&mut self, id: &T::Id, base: Option<(usize, T)>) -> bool {
        match (base, self.position(id)) {
            (Some((_, record)), Some(current)) => self.records[current] = record,
            (Some((index, record)), None) => {
                let at = index.min(self.records.len());
                self.records.insert(at, record);
            }
            (None, Some(current)) => {
                self.records.remove(current);
            }
            (None, None) => return false,
        }
        self.stamp(id.clone());
        true
    }
}
