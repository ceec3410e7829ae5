//! Screen navigation and event dispatch.
//!
//! Everything runs on one thread: the frontend and the splash timer post [`AppEvent`]s
//! and [`App::handle`] applies them to whichever screen is showing.

use tokio::sync::mpsc::UnboundedSender;

use crate::config::Config;
use crate::controller::MainController;
use crate::encoder::QrEncoder;
use crate::error::EncodeError;
use crate::platform::Platform;
use crate::splash::SplashController;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AppEvent {
    SplashElapsed,
    Generate(String),
    Export,
    Share,
    PermissionResult(bool),
    DismissDialog,
    Quit,
}

pub enum Screen<P: Platform> {
    Splash(SplashController),
    Main(MainController<P>),
}

type Launch<P> = Box<dyn FnOnce() -> MainController<P>>;

pub struct App<P: Platform> {
    screen: Screen<P>,
    launch: Option<Launch<P>>,
    running: bool,
}

impl<P: Platform + 'static> App<P> {
    /// Starts on the splash screen; `launch` builds the main screen when it elapses.
    pub fn new(splash: SplashController, launch: impl FnOnce() -> MainController<P> + 'static) -> Self {
        Self { screen: Screen::Splash(splash), launch: Some(Box::new(launch)), running: true }
    }

    /// Wires an app from `config`. Fails early on an unusable encoder setup rather than
    /// on the first generate.
    pub fn from_config(
        config: &Config,
        platform: P,
        events: UnboundedSender<AppEvent>,
    ) -> Result<Self, EncodeError> {
        let encoder = QrEncoder::from_config(&config.encoder)?;
        tracing::info!("Encoder ready {}", encoder.metadata());

        let filename = config.storage.filename.clone();
        let splash = SplashController::start(config.splash.delay(), events);
        Ok(Self::new(splash, move || MainController::new(encoder, platform, filename)))
    }
}

impl<P: Platform> App<P> {
    pub fn screen(&self) -> &Screen<P> {
        &self.screen
    }

    pub fn main(&self) -> Option<&MainController<P>> {
        match &self.screen {
            Screen::Main(main) => Some(main),
            Screen::Splash(_) => None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handle(&mut self, event: AppEvent) {
        tracing::trace!(?event, "Handling event");
        match event {
            AppEvent::Quit => {
                if let Screen::Splash(splash) = &mut self.screen {
                    splash.destroy();
                }
                self.running = false;
            }
            AppEvent::SplashElapsed => self.show_main(),
            event => match &mut self.screen {
                Screen::Main(main) => Self::dispatch(main, event),
                Screen::Splash(_) => tracing::debug!(?event, "Ignoring input on splash screen"),
            },
        }
    }

    fn show_main(&mut self) {
        let Screen::Splash(splash) = &mut self.screen else {
            return;
        };
        splash.destroy();

        if let Some(launch) = self.launch.take() {
            // Replacing the splash drops it; there is no way back
            self.screen = Screen::Main(launch());
            tracing::info!("Showing main screen");
        }
    }

    fn dispatch(main: &mut MainController<P>, event: AppEvent) {
        // A shown dialog or permission prompt blocks everything else
        match &event {
            AppEvent::DismissDialog | AppEvent::PermissionResult(_) => {}
            _ if main.dialog().is_some() || main.awaiting_permission() => {
                tracing::debug!(?event, "Ignoring input behind modal");
                return;
            }
            _ => {}
        }

        // Failures are already logged and shown as dialogs by the controller
        match event {
            AppEvent::Generate(text) => {
                let _ = main.generate(&text);
            }
            AppEvent::Export => {
                let _ = main.export();
            }
            AppEvent::Share => {
                let _ = main.share();
            }
            AppEvent::PermissionResult(granted) => {
                if main.awaiting_permission() {
                    let _ = main.on_permission_result(granted);
                }
            }
            AppEvent::DismissDialog => main.dismiss_dialog(),
            AppEvent::SplashElapsed | AppEvent::Quit => {}
        }
    }
}

#[cfg(test)]
mod app_tests {
    use std::path::Path;
    use std::time::Duration;

    use tokio::sync::mpsc;

    use super::{App, AppEvent, Screen};
    use crate::config::Config;
    use crate::controller::State;
    use crate::platform::{DesktopPlatform, PermissionStatus};

    fn config(root: &Path, permission: PermissionStatus) -> Config {
        let mut config = Config::default();
        config.storage.downloads_dir = Some(root.join("Downloads"));
        config.storage.pictures_dir = Some(root.join("Pictures"));
        config.storage.permission = permission;
        config
    }

    fn app(config: &Config) -> (App<DesktopPlatform>, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let platform = DesktopPlatform::from_config(&config.storage);
        (App::from_config(config, platform, tx).unwrap(), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_splash_then_main() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut app, mut rx) = app(&config(tmp.path(), PermissionStatus::Granted));
        assert!(matches!(app.screen(), Screen::Splash(_)));

        // Input during the splash is ignored
        app.handle(AppEvent::Generate("early".to_string()));
        assert!(app.main().is_none());

        let event = rx.recv().await.unwrap();
        assert_eq!(event, AppEvent::SplashElapsed);
        app.handle(event);
        assert_eq!(app.main().map(|m| m.state()), Some(State::Idle));

        // A second elapse does not rebuild the main screen
        app.handle(AppEvent::Generate("kept".to_string()));
        app.handle(AppEvent::SplashElapsed);
        assert_eq!(app.main().map(|m| m.state()), Some(State::Ready));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_during_splash() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut app, mut rx) = app(&config(tmp.path(), PermissionStatus::Granted));
        app.handle(AppEvent::Quit);
        assert!(!app.is_running());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dialog_blocks_input() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut app, _rx) = app(&config(tmp.path(), PermissionStatus::Granted));
        app.handle(AppEvent::SplashElapsed);

        app.handle(AppEvent::Generate(String::new()));
        let main = app.main().unwrap();
        assert_eq!(main.dialog().map(|d| d.message.as_str()), Some("Please Enter Any Text or Link"));

        app.handle(AppEvent::Generate("blocked".to_string()));
        assert_eq!(app.main().unwrap().state(), State::Idle);

        app.handle(AppEvent::DismissDialog);
        app.handle(AppEvent::Generate("https://example.com".to_string()));
        assert_eq!(app.main().unwrap().state(), State::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permission_prompt_flow() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut app, _rx) = app(&config(tmp.path(), PermissionStatus::Prompt));
        app.handle(AppEvent::SplashElapsed);
        app.handle(AppEvent::Generate("https://example.com".to_string()));
        app.handle(AppEvent::Export);
        assert!(app.main().unwrap().awaiting_permission());

        // Prompt is modal
        app.handle(AppEvent::Share);
        assert!(app.main().unwrap().platform().shares().is_empty());

        app.handle(AppEvent::PermissionResult(true));
        let main = app.main().unwrap();
        assert!(!main.awaiting_permission());
        assert_eq!(main.dialog().map(|d| d.message.as_str()), Some("Download Successful"));
        assert!(tmp.path().join("Downloads").join("QRCode.png").exists());
    }
}
