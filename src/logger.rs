//! Logging capability handed to the repository client.

use std::sync::Arc;

/// Where operation outcomes get reported. `message` is a fixed description of the event and
/// `detail` the payload or error detail that goes with it.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str, detail: &str);
    fn error(&self, message: &str, detail: &str);
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn info(&self, message: &str, detail: &str) {
        (**self).info(message, detail)
    }

    fn error(&self, message: &str, detail: &str) {
        (**self).error(message, detail)
    }
}

/// Forwards to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn info(&self, message: &str, detail: &str) {
        log::info!("{} {}", message, detail);
    }

    fn error(&self, message: &str, detail: &str) {
        log::error!("{} {}", message, detail);
    }
}
