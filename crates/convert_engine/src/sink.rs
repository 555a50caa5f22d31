use convert_core::Notification;

/// Presentation side of the workflow: receives every status notification in order.
pub trait StatusSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl StatusSink for DiscardSink {
    fn notify(&self, _notification: Notification) {}
}
