//! Console notifier
//!
//! Notifications go to stderr so stdout stays reserved for command
//! output (rewritten file paths, markdown links).

use mdlift_core::Notifier;

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn warning(&self, message: &str) {
        eprintln!("warning: {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("error: {}", message);
    }
}
