//! Terminal notifications.

use railbook_client::Notifier;

/// Prints notifications to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify_error(&self, message: &str) {
        eprintln!("error: {message}");
    }

    fn login_required(&self, login_url: &str) {
        eprintln!("sign in again at {login_url}, then run `railbook login <token>`");
    }
}
