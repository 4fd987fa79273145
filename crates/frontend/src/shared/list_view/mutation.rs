//! Учёт оптимистичных мутаций по записям.
//!
//! На каждую мутацию заводится запись "в полёте" с базовым значением записи и
//! снапшотом коллекции. Откат никогда не затирает более новую мутацию той же
//! записи: если за этой мутацией в цепочке есть следующая, базовое значение
//! передаётся ей, а сам откат пропускается.
use log::{debug, warn};

use super::collection::{CollectionStore, Snapshot};
use super::error::ListError;
use super::record::{FieldValue, ListRecord};

/// Локальное изменение, применяемое до ответа сервера
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Patch { field: String, value: FieldValue },
    Remove,
}

impl Change {
    pub fn patch(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Change::Patch {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Квитанция незавершённой мутации
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationTicket<Id> {
    pub id: Id,
    seq: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct InFlight<T: ListRecord> {
    seq: u64,
    /// Ревизия записи сразу после оптимистичного изменения
    revision: u64,
    /// Часы коллекции сразу после оптимистичного изменения
    clock_after: u64,
    /// Позиция и значение записи, к которым вернёт откат
    base: Option<(usize, T)>,
    /// База унаследована от отклонённой предыдущей мутации, снапшот устарел
    rebased: bool,
    snapshot: Snapshot<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Сервер подтвердил локальное значение
    Confirmed,
    /// Ответ сервера расходился с локальным, запись заменена серверной
    Reconciled,
    /// Коллекцию перезагрузили, пока запрос был в полёте
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// Вся коллекция возвращена к снапшоту
    Restored,
    /// Возвращена только эта запись (другие записи менялись после снапшота)
    RecordRestored,
    /// Запись изменена снова, откат пропущен
    Superseded,
    /// Коллекцию перезагрузили, откатывать нечего
    Stale,
}

impl<T: ListRecord> CollectionStore<T> {
    /// Снимает снапшот и применяет изменение.
    /// `Ok(None)` - записи нет, ничего не изменилось.
    pub fn begin_mutation(
        &mut self,
        id: &T::Id,
        change: &Change,
    ) -> Result<Option<MutationTicket<T::Id>>, ListError> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };
        let snapshot = self.snapshot();
        let base = Some((index, self.records()[index].clone()));

        match change {
            Change::Patch { field, value } => {
                self.patch_field(id, field, value)?;
            }
            Change::Remove => {
                self.remove(id);
            }
        }

        self.next_ticket += 1;
        let seq = self.next_ticket;
        let entry = InFlight {
            seq,
            revision: self.revision(id),
            clock_after: self.clock(),
            base,
            rebased: false,
            snapshot,
        };
        self.in_flight.entry(id.clone()).or_default().push(entry);
        debug!("mutation #{} started for record {}", seq, id);

        Ok(Some(MutationTicket {
            id: id.clone(),
            seq,
        }))
    }

    /// Вынимает мутацию из цепочки записи. Второй элемент - есть ли за ней
    /// следующая мутация той же записи. При `rebase` следующая мутация
    /// наследует базовое значение вынутой.
    fn take_in_flight(
        &mut self,
        ticket: &MutationTicket<T::Id>,
        rebase: bool,
    ) -> Option<(InFlight<T>, bool)> {
        let chain = self.in_flight.get_mut(&ticket.id)?;
        let index = chain.iter().position(|e| e.seq == ticket.seq)?;
        let entry = chain.remove(index);
        let superseded = match chain.get_mut(index) {
            Some(next) => {
                if rebase {
                    next.base = entry.base.clone();
                    next.rebased = true;
                }
                true
            }
            None => false,
        };
        if chain.is_empty() {
            self.in_flight.remove(&ticket.id);
        }
        Some((entry, superseded))
    }

    /// Сервер принял мутацию. `authoritative` - запись из ответа, если есть.
    pub fn commit_mutation(
        &mut self,
        ticket: &MutationTicket<T::Id>,
        authoritative: Option<T>,
    ) -> CommitOutcome {
        let Some((entry, _)) = self.take_in_flight(ticket, false) else {
            debug!("mutation #{} committed after reload", ticket.seq);
            return CommitOutcome::Stale;
        };

        match authoritative {
            Some(record)
                if self.revision(&ticket.id) == entry.revision
                    && self.get(&ticket.id) != Some(&record)
                    && self.position(&ticket.id).is_some() =>
            {
                debug!("mutation #{} reconciled with server record", ticket.seq);
                self.upsert(record);
                CommitOutcome::Reconciled
            }
            _ => CommitOutcome::Confirmed,
        }
    }

    /// Сервер отклонил мутацию: возвращаем состояние до неё
    pub fn rollback_mutation(&mut self, ticket: &MutationTicket<T::Id>) -> RollbackOutcome {
        let Some((entry, superseded)) = self.take_in_flight(ticket, true) else {
            warn!("mutation #{} failed after reload, nothing to roll back", ticket.seq);
            return RollbackOutcome::Stale;
        };

        if superseded || self.revision(&ticket.id) != entry.revision {
            warn!(
                "mutation #{} failed but record {} changed since, keeping newer value",
                ticket.seq, ticket.id
            );
            return RollbackOutcome::Superseded;
        }

        if self.clock() == entry.clock_after && !entry.rebased {
            self.restore(entry.snapshot);
            RollbackOutcome::Restored
        } else {
            self.put_back(&ticket.id, entry.base);
            RollbackOutcome::RecordRestored
        }
    }
}
