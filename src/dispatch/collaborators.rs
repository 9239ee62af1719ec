//! Collaborator contracts the dispatcher depends on, with default
//! implementations for headless use.

use futures_util::future::{BoxFuture, FutureExt};

/// Supplies the session key attached to authenticated requests.
pub trait SessionSupplier: Send + Sync {
    /// Return the current session, forcing a refresh when asked.
    fn session(&self, force_refresh: bool) -> BoxFuture<'_, Option<String>>;
}

/// Kind of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Shown with an error icon.
    Error,
    /// Text only.
    Plain,
}

/// UI side effects. Calls are fire-and-forget.
pub trait Notifier: Send + Sync {
    fn show_loading(&self, title: &str);
    fn hide_loading(&self);
    fn show_toast(&self, message: &str, kind: ToastKind);
}

/// Invoked once per successful terminal response.
pub trait ActivityHook: Send + Sync {
    fn mark_activity(&self);
}

impl<F> ActivityHook for F
where
    F: Fn() + Send + Sync,
{
    fn mark_activity(&self) {
        self()
    }
}

/// Session supplier returning a fixed key.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    token: Option<String>,
}

impl StaticSession {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl SessionSupplier for StaticSession {
    fn session(&self, force_refresh: bool) -> BoxFuture<'_, Option<String>> {
        if force_refresh {
            tracing::debug!("Static session cannot refresh, reusing configured key");
        }
        let token = self.token.clone();
        async move { token }.boxed()
    }
}

/// Notifier that records UI events as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show_loading(&self, title: &str) {
        tracing::debug!(title = %title, "Loading started");
    }

    fn hide_loading(&self) {
        tracing::debug!("Loading ended");
    }

    fn show_toast(&self, message: &str, kind: ToastKind) {
        match kind {
            ToastKind::Error => tracing::warn!(message = %message, "Toast"),
            ToastKind::Plain => tracing::info!(message = %message, "Toast"),
        }
    }
}

/// Activity hook that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActivity;

impl ActivityHook for NoActivity {
    fn mark_activity(&self) {}
}
