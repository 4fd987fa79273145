//! Мост между `ListView` и реактивностью Leptos.
//!
//! Модель живёт в `StoredValue` (она не `Send`), а сигнал-версия
//! увеличивается на каждое изменение модели. Компоненты читают модель через
//! `ListHandle::view`, что подписывает их на версию.
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::record::ListRecord;
use super::view::ListView;

pub struct ListHandle<T: ListRecord> {
    model: StoredValue<ListView<T>, LocalStorage>,
    version: RwSignal<u64>,
}

impl<T: ListRecord> Clone for ListHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ListRecord> Copy for ListHandle<T> {}

/// Создаёт модель списка для текущего компонента и запускает первую загрузку.
/// При размонтировании модель помечается мёртвой: поздние ответы отбрасываются.
pub fn use_list_view<T: ListRecord>(model: ListView<T>) -> ListHandle<T> {
    let version = RwSignal::new(0u64);
    model.subscribe(move || {
        version.try_update(|v| *v += 1);
    });

    let liveness = model.liveness();
    on_cleanup(move || liveness.revoke());

    let handle = ListHandle {
        model: StoredValue::new_local(model),
        version,
    };
    handle.spawn(|model| async move {
        model.fetch().await;
    });
    handle
}

impl<T: ListRecord> ListHandle<T> {
    /// Модель с подпиской на её изменения
    pub fn view(&self) -> ListView<T> {
        self.version.track();
        self.model.get_value()
    }

    /// Модель без подписки (для обработчиков событий)
    pub fn untracked(&self) -> ListView<T> {
        self.model.get_value()
    }

    pub fn version(&self) -> ReadSignal<u64> {
        self.version.read_only()
    }

    /// Запускает асинхронную операцию над моделью
    pub fn spawn<F, Fut>(&self, f: F)
    where
        F: FnOnce(ListView<T>) -> Fut,
        Fut: std::future::Future<Output = ()> + 'static,
    {
        let model = self.untracked();
        spawn_local(f(model));
    }

    pub fn refresh(&self) {
        self.spawn(|model| async move {
            model.retry().await;
        });
    }
}
