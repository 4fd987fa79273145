//! Уведомления пользователя: успех, ошибка, подтверждение опасного действия.
use async_trait::async_trait;
use log::{error, info};

#[async_trait(?Send)]
pub trait Notifier {
    fn notify_success(&self, title: &str, detail: &str);

    fn notify_error(&self, title: &str, detail: &str);

    /// `true`, если пользователь подтвердил действие
    async fn confirm_action(&self, title: &str, detail: &str) -> bool;
}

/// Уведомления через диалоги браузера. Всё дублируется в консоль.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNotifier;

fn dialog_text(title: &str, detail: &str) -> String {
    if detail.is_empty() {
        title.to_string()
    } else {
        format!("{}\n\n{}", title, detail)
    }
}

#[async_trait(?Send)]
impl Notifier for BrowserNotifier {
    fn notify_success(&self, title: &str, detail: &str) {
        info!("{}: {}", title, detail);
        if let Some(win) = web_sys::window() {
            let _ = win.alert_with_message(&dialog_text(title, detail));
        }
    }

    fn notify_error(&self, title: &str, detail: &str) {
        error!("{}: {}", title, detail);
        if let Some(win) = web_sys::window() {
            let _ = win.alert_with_message(&dialog_text(title, detail));
        }
    }

    async fn confirm_action(&self, title: &str, detail: &str) -> bool {
        match web_sys::window() {
            Some(win) => win
                .confirm_with_message(&dialog_text(title, detail))
                .unwrap_or(false),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_text() {
        assert_eq!(dialog_text("Delete Main?", ""), "Delete Main?");
        assert_eq!(
            dialog_text("Delete Main?", "This action cannot be undone."),
            "Delete Main?\n\nThis action cannot be undone."
        );
    }
}
