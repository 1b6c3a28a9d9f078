//! User-visible notifications.

/// Surfaces failures to whatever UI is driving the client.
pub trait Notifier: Send + Sync {
    /// Show `message` as an error.
    fn notify_error(&self, message: &str);

    /// The session expired and the user should sign in at `login_url`.
    fn login_required(&self, login_url: &str) {
        let _ = login_url;
    }
}

/// Notifier that writes to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        tracing::error!(target: "railbook::notify", "{message}");
    }

    fn login_required(&self, login_url: &str) {
        tracing::info!(target: "railbook::notify", %login_url, "sign in again to continue");
    }
}
