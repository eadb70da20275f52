//! Startup sequence of the editor process.
//!
//! Phases run strictly in order:
//!
//! 1. `Bootstrap`: worker pool, render kernel and optional volume engine.
//! 2. `SurfaceConfig`: default surface attributes, before any window exists.
//! 3. `AppConstruct`: application object, working directory, style sheet, main window.
//! 4. `WindowShow`: show the window, then open the initial scene.
//! 5. `EventLoop`: run until quit, behind a fault boundary.
//! 6. `Shutdown`: the exit code is handed back to `main`.
//!
//! A failure before the event loop starts aborts the run with an error. A
//! failure inside the event loop is reported and turned into exit code 1.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use anyhow::Context;

use engines::RenderEngine;
use gui::{EditorWindow, EventLoopFault, GuiApplication, GuiToolkit, ScreenRect};

use crate::anchor::{anchored, AnchorPath};
use crate::config::EditorSettings;
use crate::scene_resolver::resolve_initial_scene;

/// Exit code reported when the event loop fails.
pub const EXIT_FAULT: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Bootstrap,
    SurfaceConfig,
    AppConstruct,
    WindowShow,
    EventLoop,
    Shutdown,
}

/// How the event loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shutdown {
    pub exit_code: i32,
    /// Description of the fault, when the loop failed.
    pub diagnostic: Option<String>,
}

pub struct Orchestrator<G> {
    toolkit: G,
    settings: EditorSettings,
    anchor: Option<AnchorPath>,
}

impl<G: GuiToolkit> Orchestrator<G> {
    pub fn new(toolkit: G, settings: EditorSettings, anchor: Option<AnchorPath>) -> Self {
        Self {
            toolkit,
            settings,
            anchor,
        }
    }

    /// Brings the editor up and runs it to completion.
    ///
    /// `render` is initialized and bound to a fresh worker pool before any
    /// GUI object is created. `launch_scene` is the scene named on the
    /// command line, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the engines, the application object or the main
    /// window cannot be created. Failures after the event loop starts are
    /// reported in the returned [`Shutdown`] instead.
    pub fn run<R: RenderEngine>(mut self, render: R, launch_scene: Option<PathBuf>) -> anyhow::Result<Shutdown> {
        //---- Bootstrap ----
        enter_phase(Phase::Bootstrap);
        let worker_count = self.settings.worker_count();
        log::info!("Starting render engines with {worker_count} worker threads");
        let engines = engines::bootstrap(worker_count, render).context("failed to start the render engines")?;

        //---- Surface defaults ----
        enter_phase(Phase::SurfaceConfig);
        if !self.toolkit.apply_default_surface_config(&self.settings.surface) {
            log::warn!("Default surface config was not applied; windows use the toolkit defaults");
        }

        //---- Application ----
        enter_phase(Phase::AppConstruct);
        let mut app = self
            .toolkit
            .create_application()
            .context("failed to create the GUI application")?;
        match &self.anchor {
            Some(anchor) if self.settings.anchor_working_directory => enter_anchor(anchor),
            Some(_) => {}
            None => log::warn!("Executable directory unknown, resources resolve against the working directory"),
        }
        self.load_style_sheet(&mut app);
        let geometry = self.window_geometry(&app);
        let mut window = app.create_main_window().context("failed to create the main window")?;
        window.set_title(&self.settings.title);
        window.set_geometry(geometry);

        //---- Window ----
        enter_phase(Phase::WindowShow);
        window.show();
        let default_scene = anchored(self.anchor.as_ref(), &self.settings.default_scene);
        match resolve_initial_scene(launch_scene.as_deref(), &default_scene) {
            Some(path) => {
                log::info!("Opening {}", path.display());
                window.open_scene(&path);
            }
            None => log::info!("No scene to open, starting empty"),
        }

        //---- Event loop ----
        enter_phase(Phase::EventLoop);
        let outcome = panic::catch_unwind(AssertUnwindSafe(move || app.exec(window)));

        enter_phase(Phase::Shutdown);
        let shutdown = shutdown_from(outcome);
        log::info!(
            "Exiting with code {}, releasing {} worker threads",
            shutdown.exit_code,
            engines.pool.size()
        );
        Ok(shutdown)
    }

    fn load_style_sheet(&self, app: &mut G::Application) {
        let path = anchored(self.anchor.as_ref(), &self.settings.style_sheet);
        match std::fs::read_to_string(&path) {
            Ok(style_sheet) => app.set_style_sheet(&style_sheet),
            Err(err) => log::warn!("Could not load style sheet {}: {err}", path.display()),
        }
    }

    fn window_geometry(&self, app: &G::Application) -> ScreenRect {
        let screen = app.primary_screen_geometry();
        let window = screen.inset(self.settings.window_margin);
        if window.is_empty() {
            log::warn!(
                "Window margin {} leaves no room on a {}x{} screen, using the full screen",
                self.settings.window_margin,
                screen.width,
                screen.height
            );
            return screen;
        }
        window
    }
}

fn enter_anchor(anchor: &AnchorPath) {
    match anchor.enter() {
        Ok(()) => log::debug!("Working directory set to {}", anchor.dir().display()),
        Err(err) => log::warn!(
            "Could not change working directory to {}: {err}",
            anchor.dir().display()
        ),
    }
}

fn enter_phase(phase: Phase) {
    log::info!("Entering {phase:?} phase");
}

fn shutdown_from(outcome: std::thread::Result<Result<i32, EventLoopFault>>) -> Shutdown {
    let fault = match outcome {
        Ok(Ok(exit_code)) => {
            return Shutdown {
                exit_code,
                diagnostic: None,
            }
        }
        Ok(Err(fault)) => fault,
        Err(payload) => EventLoopFault::Panic(panic_message(payload.as_ref())),
    };
    let diagnostic = fault.to_string();
    log::debug!("Event loop failed: {diagnostic}");
    eprintln!("Event loop failed: {diagnostic}");
    Shutdown {
        exit_code: EXIT_FAULT,
        diagnostic: Some(diagnostic),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::fs;
    use std::path::Path;
    use std::rc::Rc;
    use std::sync::Arc;

    use engines::{EngineError, WorkerPool};
    use wgpu_utils::SurfaceConfig;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        ApplySurface(SurfaceConfig),
        CreateApplication,
        SetStyleSheet(String),
        CreateWindow,
        SetTitle(String),
        SetGeometry(ScreenRect),
        Show,
        OpenScene(PathBuf),
        Exec,
    }

    #[derive(Clone, Copy)]
    enum LoopEnd {
        Exit(i32),
        Fault,
        Panic,
    }

    type Calls = Rc<RefCell<Vec<Call>>>;

    struct FakeToolkit {
        calls: Calls,
        screen: ScreenRect,
        end: LoopEnd,
        fail_application: bool,
        app_created: bool,
    }

    impl FakeToolkit {
        fn new(calls: &Calls) -> Self {
            Self {
                calls: Rc::clone(calls),
                screen: ScreenRect::new(0, 0, 1920, 1080),
                end: LoopEnd::Exit(0),
                fail_application: false,
                app_created: false,
            }
        }
    }

    impl GuiToolkit for FakeToolkit {
        type Application = FakeApplication;

        fn apply_default_surface_config(&mut self, config: &SurfaceConfig) -> bool {
            self.calls.borrow_mut().push(Call::ApplySurface(config.clone()));
            !self.app_created
        }

        fn create_application(&mut self) -> anyhow::Result<FakeApplication> {
            if self.fail_application {
                anyhow::bail!("no display");
            }
            self.app_created = true;
            self.calls.borrow_mut().push(Call::CreateApplication);
            Ok(FakeApplication {
                calls: Rc::clone(&self.calls),
                screen: self.screen,
                end: self.end,
            })
        }
    }

    struct FakeApplication {
        calls: Calls,
        screen: ScreenRect,
        end: LoopEnd,
    }

    impl GuiApplication for FakeApplication {
        type Window = FakeWindow;

        fn set_style_sheet(&mut self, style_sheet: &str) {
            self.calls.borrow_mut().push(Call::SetStyleSheet(style_sheet.to_string()));
        }

        fn primary_screen_geometry(&self) -> ScreenRect {
            self.screen
        }

        fn create_main_window(&mut self) -> anyhow::Result<FakeWindow> {
            self.calls.borrow_mut().push(Call::CreateWindow);
            Ok(FakeWindow {
                calls: Rc::clone(&self.calls),
            })
        }

        fn exec(self, _window: FakeWindow) -> Result<i32, EventLoopFault> {
            self.calls.borrow_mut().push(Call::Exec);
            match self.end {
                LoopEnd::Exit(code) => Ok(code),
                LoopEnd::Fault => Err(EventLoopFault::Runtime("scene graph corrupted".to_string())),
                LoopEnd::Panic => panic!("render thread exploded"),
            }
        }
    }

    struct FakeWindow {
        calls: Calls,
    }

    impl EditorWindow for FakeWindow {
        fn set_title(&mut self, title: &str) {
            self.calls.borrow_mut().push(Call::SetTitle(title.to_string()));
        }

        fn set_geometry(&mut self, rect: ScreenRect) {
            self.calls.borrow_mut().push(Call::SetGeometry(rect));
        }

        fn show(&mut self) {
            self.calls.borrow_mut().push(Call::Show);
        }

        fn open_scene(&mut self, path: &Path) {
            self.calls.borrow_mut().push(Call::OpenScene(path.to_path_buf()));
        }
    }

    #[derive(Default)]
    struct FakeEngine {
        fail_init: bool,
        pool_size: Rc<Cell<usize>>,
    }

    impl RenderEngine for FakeEngine {
        fn init(&mut self) -> Result<(), EngineError> {
            if self.fail_init {
                return Err(EngineError::NotInitialized);
            }
            Ok(())
        }

        fn start_threads(&mut self, pool: &Arc<WorkerPool>) -> Result<(), EngineError> {
            self.pool_size.set(pool.size().get());
            Ok(())
        }
    }

    fn settings() -> EditorSettings {
        EditorSettings {
            anchor_working_directory: false,
            threads: Some(2),
            ..Default::default()
        }
    }

    fn run_with(
        toolkit: FakeToolkit,
        anchor: &tempfile::TempDir,
        launch_scene: Option<&str>,
    ) -> anyhow::Result<Shutdown> {
        Orchestrator::new(toolkit, settings(), Some(AnchorPath::from_dir(anchor.path())))
            .run(FakeEngine::default(), launch_scene.map(PathBuf::from))
    }

    fn position(calls: &[Call], wanted: impl Fn(&Call) -> bool) -> usize {
        calls.iter().position(wanted).unwrap()
    }

    #[test]
    fn test_phases_in_order() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let shutdown = run_with(FakeToolkit::new(&calls), &anchor, Some("cornell.toml")).unwrap();
        assert_eq!(shutdown.exit_code, 0);

        assert_eq!(
            *calls.borrow(),
            vec![
                Call::ApplySurface(SurfaceConfig::default()),
                Call::CreateApplication,
                Call::CreateWindow,
                Call::SetTitle("Scene Editor".to_string()),
                Call::SetGeometry(ScreenRect::new(100, 100, 1720, 880)),
                Call::Show,
                Call::OpenScene(PathBuf::from("cornell.toml")),
                Call::Exec,
            ]
        );
    }

    #[test]
    fn test_surface_config_precedes_application() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let mut orchestrator_settings = settings();
        orchestrator_settings.surface.samples = 8;
        Orchestrator::new(
            FakeToolkit::new(&calls),
            orchestrator_settings,
            Some(AnchorPath::from_dir(anchor.path())),
        )
        .run(FakeEngine::default(), None)
        .unwrap();

        let calls = calls.borrow();
        let surface = position(&calls, |call| matches!(call, Call::ApplySurface(config) if config.samples == 8));
        let app = position(&calls, |call| *call == Call::CreateApplication);
        let window = position(&calls, |call| *call == Call::CreateWindow);
        assert!(surface < app);
        assert!(app < window);
    }

    #[test]
    fn test_scene_opened_after_show() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        run_with(FakeToolkit::new(&calls), &anchor, Some("scene.toml")).unwrap();

        let calls = calls.borrow();
        let show = position(&calls, |call| *call == Call::Show);
        let open = position(&calls, |call| matches!(call, Call::OpenScene(_)));
        let exec = position(&calls, |call| *call == Call::Exec);
        assert!(show < open);
        assert!(open < exec);
    }

    #[test]
    fn test_missing_launch_scene_still_opened() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let missing = anchor.path().join("missing.toml");
        run_with(FakeToolkit::new(&calls), &anchor, missing.to_str()).unwrap();

        assert!(calls.borrow().contains(&Call::OpenScene(missing)));
    }

    #[test]
    fn test_default_scene_from_anchor() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let default_scene = anchor.path().join("data/materialtest/materialtest.toml");
        fs::create_dir_all(default_scene.parent().unwrap()).unwrap();
        fs::write(&default_scene, "").unwrap();

        run_with(FakeToolkit::new(&calls), &anchor, None).unwrap();
        assert!(calls.borrow().contains(&Call::OpenScene(default_scene)));
    }

    #[test]
    fn test_no_scene_starts_empty() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let shutdown = run_with(FakeToolkit::new(&calls), &anchor, None).unwrap();

        assert_eq!(shutdown.exit_code, 0);
        assert!(!calls.borrow().iter().any(|call| matches!(call, Call::OpenScene(_))));
    }

    #[test]
    fn test_unknown_anchor_keeps_working_directory() {
        let calls = Calls::default();
        let before = std::env::current_dir().unwrap();
        let anchored_settings = EditorSettings {
            anchor_working_directory: true,
            threads: Some(1),
            ..Default::default()
        };

        let shutdown = Orchestrator::new(FakeToolkit::new(&calls), anchored_settings, None)
            .run(FakeEngine::default(), None)
            .unwrap();

        assert_eq!(shutdown.exit_code, 0);
        assert_eq!(std::env::current_dir().unwrap(), before);
        assert!(!calls.borrow().iter().any(|call| matches!(call, Call::OpenScene(_))));
        assert!(calls.borrow().contains(&Call::Exec));
    }

    #[test]
    fn test_style_sheet_loaded_from_anchor() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let style = anchor.path().join("data/editor/style/style.toml");
        fs::create_dir_all(style.parent().unwrap()).unwrap();
        fs::write(&style, "dark = false").unwrap();

        run_with(FakeToolkit::new(&calls), &anchor, None).unwrap();

        let calls = calls.borrow();
        let sheet = position(&calls, |call| *call == Call::SetStyleSheet("dark = false".to_string()));
        let window = position(&calls, |call| *call == Call::CreateWindow);
        assert!(sheet < window);
    }

    #[test]
    fn test_missing_style_sheet_is_not_fatal() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let shutdown = run_with(FakeToolkit::new(&calls), &anchor, None).unwrap();

        assert_eq!(shutdown.exit_code, 0);
        assert!(!calls.borrow().iter().any(|call| matches!(call, Call::SetStyleSheet(_))));
    }

    #[test]
    fn test_geometry_follows_screen_offset() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let mut toolkit = FakeToolkit::new(&calls);
        toolkit.screen = ScreenRect::new(1920, 0, 2560, 1440);
        run_with(toolkit, &anchor, None).unwrap();

        assert!(calls
            .borrow()
            .contains(&Call::SetGeometry(ScreenRect::new(2020, 100, 2360, 1240))));
    }

    #[test]
    fn test_tiny_screen_uses_full_screen() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let mut toolkit = FakeToolkit::new(&calls);
        toolkit.screen = ScreenRect::new(0, 0, 160, 120);
        run_with(toolkit, &anchor, None).unwrap();

        assert!(calls.borrow().contains(&Call::SetGeometry(ScreenRect::new(0, 0, 160, 120))));
    }

    #[test]
    fn test_loop_exit_code_is_returned() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let mut toolkit = FakeToolkit::new(&calls);
        toolkit.end = LoopEnd::Exit(3);

        let shutdown = run_with(toolkit, &anchor, None).unwrap();
        assert_eq!(
            shutdown,
            Shutdown {
                exit_code: 3,
                diagnostic: None
            }
        );
    }

    #[test]
    fn test_loop_fault_exits_with_one() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let mut toolkit = FakeToolkit::new(&calls);
        toolkit.end = LoopEnd::Fault;

        let shutdown = run_with(toolkit, &anchor, None).unwrap();
        assert_eq!(shutdown.exit_code, EXIT_FAULT);
        assert!(shutdown.diagnostic.unwrap().contains("scene graph corrupted"));
    }

    #[test]
    fn test_loop_panic_exits_with_one() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let mut toolkit = FakeToolkit::new(&calls);
        toolkit.end = LoopEnd::Panic;

        let shutdown = run_with(toolkit, &anchor, None).unwrap();
        assert_eq!(shutdown.exit_code, EXIT_FAULT);
        assert!(shutdown.diagnostic.unwrap().contains("render thread exploded"));
    }

    #[test]
    fn test_engine_failure_aborts_before_gui() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let engine = FakeEngine {
            fail_init: true,
            ..Default::default()
        };

        let result = Orchestrator::new(FakeToolkit::new(&calls), settings(), Some(AnchorPath::from_dir(anchor.path())))
            .run(engine, None);
        assert!(result.is_err());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_application_failure_is_an_error() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let mut toolkit = FakeToolkit::new(&calls);
        toolkit.fail_application = true;

        let err = run_with(toolkit, &anchor, None).unwrap_err();
        assert!(format!("{err:#}").contains("no display"));
        assert!(!calls.borrow().contains(&Call::Exec));
    }

    #[test]
    fn test_engine_uses_configured_thread_count() {
        let calls = Calls::default();
        let anchor = tempfile::tempdir().unwrap();
        let engine = FakeEngine::default();
        let pool_size = Rc::clone(&engine.pool_size);

        Orchestrator::new(FakeToolkit::new(&calls), settings(), Some(AnchorPath::from_dir(anchor.path())))
            .run(engine, None)
            .unwrap();
        assert_eq!(pool_size.get(), 2);
    }

    #[test]
    fn test_panic_message_variants() {
        assert_eq!(panic_message(&"boom"), "boom");
        assert_eq!(panic_message(&"boom".to_string()), "boom");
        assert_eq!(panic_message(&42_u32), "unknown panic");
    }
}
