use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::app::AppEvent;

/// Branding screen that hands over to the main screen once, after a fixed delay.
///
/// The handover is a one-shot timer task. Destroying the splash (explicitly or by
/// dropping it) clears the active flag and aborts the task, so a torn down splash
/// never posts [`AppEvent::SplashElapsed`].
#[derive(Debug)]
pub struct SplashController {
    active: Arc<AtomicBool>,
    timer: Option<JoinHandle<()>>,
}

impl SplashController {
    /// Arms the timer. Must be called from within a tokio runtime.
    pub fn start(delay: Duration, events: UnboundedSender<AppEvent>) -> Self {
        let active = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&active);

        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if flag.swap(false, Ordering::AcqRel) {
                tracing::debug!(?delay, "Splash delay elapsed");
                // Receiver gone means the app is shutting down
                let _ = events.send(AppEvent::SplashElapsed);
            }
        });

        Self { active, timer: Some(timer) }
    }

    #[cfg(test)]
    fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn destroy(&mut self) {
        self.active.store(false, Ordering::Release);
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for SplashController {
    fn drop(&mut self) {
        self.destroy();
    }
}
