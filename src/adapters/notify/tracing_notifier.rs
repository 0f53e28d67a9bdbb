//! Notifier that writes notices to the log.

use async_trait::async_trait;

use crate::ports::{Notice, NoticeLevel, Notifier};

/// Emits every notice as a tracing event.
///
/// Used by the operator binary, where the log is the only surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notice: Notice) {
        let description = notice.description.as_deref().unwrap_or("");
        match notice.level {
            NoticeLevel::Error => {
                tracing::warn!(title = %notice.title, description, "notice")
            }
            NoticeLevel::Success | NoticeLevel::Info => {
                tracing::info!(level = %notice.level, title = %notice.title, description, "notice")
            }
        }
    }
}
