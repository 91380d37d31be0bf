//! The compile pipeline.
//!
//! [`CompileOrchestrator::compile`] runs one attempt, start to finish:
//!
//! 1. find the active file (the saved file for save triggers)
//! 2. resolve it to a project root
//! 3. load the project's `.lessconfig`
//! 4. validate it
//! 5. gate on file type and `AUTO_COMPILE`
//! 6. run the compiler and report
//!
//! Every failure is reported through the [`Notifier`] and recorded in the
//! returned [`CompileAttempt`]; nothing propagates to the caller.

use al_core::{
    AbortReason, CompileAttempt, CompileOutcome, Config, ConfigDefaults, ConfigError, ConfigStore,
    CreateOutcome, ErrorReference, Notification, NotificationAction, Notifier, ProjectConfig,
    ProjectPath, SkipReason, Trigger, extract_error_reference, format_field_list, resolve, validate,
};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::compiler::{CommandRunner, CompilerInvoker};
use crate::error::error_stack;
use crate::host::Workspace;

const NO_PROJECT_TITLE: &str = "Unable to determine project!";
const NO_PROJECT_DETAIL: &str = "At least one file must be open to detect the current project.";

/// Coordinates config loading, validation, compilation and reporting.
///
/// # Examples
///
/// ```no_run
/// use al_core::{Config, Trigger};
/// use al_runtime::{CompileOrchestrator, SystemRunner};
/// # use al_core::{Notification, Notifier};
/// # use al_runtime::{RuntimeError, Workspace};
/// # use camino::{Utf8Path, Utf8PathBuf};
/// # struct Host;
/// # impl Workspace for Host {
/// #     fn active_file(&self) -> Option<Utf8PathBuf> { None }
/// #     fn project_roots(&self) -> Vec<Utf8PathBuf> { Vec::new() }
/// #     fn open(&self, _: &Utf8Path, _: Option<(u32, u32)>) -> Result<(), RuntimeError> { Ok(()) }
/// # }
/// # struct Log;
/// # impl Notifier for Log { fn notify(&self, _: Notification) {} }
///
/// let orchestrator = CompileOrchestrator::new(Host, Log, SystemRunner, &Config::default());
/// let attempt = orchestrator.compile(&Trigger::save("/site/less/style.less"));
/// ```
#[derive(Debug)]
pub struct CompileOrchestrator<W, N, R> {
    workspace: W,
    notifier: N,
    invoker: CompilerInvoker<R>,
    store: ConfigStore,
    defaults: ConfigDefaults,
}

impl<W, N, R> CompileOrchestrator<W, N, R>
where
    W: Workspace,
    N: Notifier,
    R: CommandRunner,
{
    /// Creates an orchestrator from host services and settings.
    pub fn new(workspace: W, notifier: N, runner: R, settings: &Config) -> Self {
        Self {
            workspace,
            notifier,
            invoker: CompilerInvoker::new(runner, settings.compiler.clone()),
            store: ConfigStore::new(),
            defaults: settings.defaults.clone(),
        }
    }

    /// Replaces the config store (e.g. to use another file name).
    #[must_use]
    pub fn with_store(mut self, store: ConfigStore) -> Self {
        self.store = store;
        self
    }

    /// Returns the host workspace.
    pub const fn workspace(&self) -> &W {
        &self.workspace
    }

    /// Returns the notifier.
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns the compiler invoker.
    pub const fn invoker(&self) -> &CompilerInvoker<R> {
        &self.invoker
    }

    /// Returns the config store.
    pub const fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Runs one compile attempt.
    pub fn compile(&self, trigger: &Trigger) -> CompileAttempt {
        let project = match self.locate(trigger) {
            Ok(project) => project,
            Err(reason) => return CompileAttempt::aborted(trigger.clone(), reason),
        };

        let attempt = |config: Option<ProjectConfig>, outcome: CompileOutcome| CompileAttempt {
            trigger: trigger.clone(),
            project: Some(project.clone()),
            config,
            outcome,
        };

        let raw = match self.store.load(project.root()) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(root = %project.root, "No config for project, nothing to compile");
                return attempt(None, CompileOutcome::Aborted { reason: AbortReason::NoConfig });
            }
            Err(error) => {
                self.report_failure("Failed to load '.lessconfig'!", &error);
                return attempt(
                    None,
                    CompileOutcome::Aborted {
                        reason: AbortReason::ConfigUnreadable,
                    },
                );
            }
        };

        let config = match ProjectConfig::from_raw(&raw) {
            Ok(config) => config,
            Err(error) => {
                let fields = match error {
                    ConfigError::Invalid { fields } => fields,
                    _ => validate(&raw),
                };
                self.notifier.notify(
                    Notification::warning("Unable to compile, due to invalid '.lessconfig'!").with_detail(
                        format!(
                            "The following properties are invalid:\n{}",
                            format_field_list(&fields)
                        ),
                    ),
                );
                return attempt(None, CompileOutcome::ValidationFailed { fields });
            }
        };

        if !project.is_less() {
            debug!(file = %project.file, "Not a .less file, skipping");
            return attempt(
                Some(config),
                CompileOutcome::Skipped {
                    reason: SkipReason::NotLess,
                },
            );
        }

        if trigger.is_auto() && !config.auto_compile {
            debug!(file = %project.file, "Auto-compile disabled, skipping");
            return attempt(
                Some(config),
                CompileOutcome::Skipped {
                    reason: SkipReason::AutoCompileDisabled,
                },
            );
        }

        let outcome = match self.invoker.compile(project.root(), &config) {
            Ok(success) => {
                self.notifier.notify(Notification::success(format!(
                    "Successfully compiled '{}'",
                    success.source_file
                )));
                CompileOutcome::Success {
                    source_file: success.source_file,
                }
            }
            Err(diagnostic) => {
                let reference = extract_error_reference(project.root(), &diagnostic.message);
                if reference.is_none() {
                    debug!("No error reference found in diagnostic");
                }

                let mut notification = Notification::error(format!(
                    "Failed to compile '{}'!",
                    config.source_file
                ))
                .with_detail(diagnostic.message.clone())
                .with_stack(diagnostic.stack.clone())
                .dismissable();
                if let Some(reference) = &reference {
                    notification = notification.with_action(NotificationAction::JumpTo(reference.clone()));
                }
                self.notifier.notify(notification);

                CompileOutcome::CompileFailed {
                    diagnostic,
                    reference,
                }
            }
        };

        attempt(Some(config), outcome)
    }

    /// Writes a default `.lessconfig` for the active file's project.
    ///
    /// An existing config is never overwritten; it is opened instead.
    /// Returns `None` if there was no project or the write failed.
    pub fn create_config(&self) -> Option<CreateOutcome> {
        let project = self.locate(&Trigger::Manual).ok()?;

        match self.store.create(project.root(), &self.defaults) {
            Ok(CreateOutcome::Created(path)) => {
                info!(path = %path, "Created config");
                self.notifier
                    .notify(Notification::success("Created new '.lessconfig' file"));
                Some(CreateOutcome::Created(path))
            }
            Ok(CreateOutcome::AlreadyExists(path)) => {
                self.notifier.notify(Notification::warning(
                    "A '.lessconfig' already exists for this project!",
                ));
                self.open_path(&path, None);
                Some(CreateOutcome::AlreadyExists(path))
            }
            Err(error) => {
                self.report_failure("Failed to create '.lessconfig' file!", &error);
                None
            }
        }
    }

    /// Opens the active file's project config.
    ///
    /// Returns the config path if it was opened.
    pub fn open_config(&self) -> Option<Utf8PathBuf> {
        let project = self.locate(&Trigger::Manual).ok()?;

        if !self.store.exists(project.root()) {
            self.notifier.notify(Notification::warning(
                "A '.lessconfig' does not exist for this project!",
            ));
            return None;
        }

        let path = self.store.config_path(project.root());
        self.open_path(&path, None).then_some(path)
    }

    /// Opens the referenced file at its line and column.
    ///
    /// Returns `true` if the file was opened.
    pub fn jump_to(&self, reference: &ErrorReference) -> bool {
        self.open_path(&reference.path, Some((reference.line, reference.column)))
    }

    /// Steps 1 and 2: active file, then project.
    fn locate(&self, trigger: &Trigger) -> Result<ProjectPath, AbortReason> {
        let file = match trigger.saved_path() {
            Some(path) => Some(path.to_owned()),
            None => self.workspace.active_file(),
        };

        let Some(file) = file else {
            self.warn_no_project();
            return Err(AbortReason::NoActiveFile);
        };

        let roots = self.workspace.project_roots();
        let Some(project) = resolve(&file, &roots) else {
            debug!(file = %file, roots = roots.len(), "File is outside every project root");
            self.warn_no_project();
            return Err(AbortReason::NoProject);
        };

        Ok(project)
    }

    fn warn_no_project(&self) {
        self.notifier
            .notify(Notification::warning(NO_PROJECT_TITLE).with_detail(NO_PROJECT_DETAIL));
    }

    fn open_path(&self, path: &Utf8Path, position: Option<(u32, u32)>) -> bool {
        match self.workspace.open(path, position) {
            Ok(()) => true,
            Err(error) if error.is_user_actionable() => {
                self.notifier.notify(
                    Notification::warning(format!("Unable to open '{path}'!"))
                        .with_detail(error.to_string()),
                );
                false
            }
            Err(error) => {
                self.report_failure(&format!("Failed to open '{path}'!"), &error);
                false
            }
        }
    }

    fn report_failure(&self, title: &str, error: &(dyn std::error::Error + 'static)) {
        self.notifier.notify(
            Notification::error(title)
                .with_detail(error.to_string())
                .with_stack(error_stack(error))
                .dismissable(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{CompileCommand, CommandOutput};
    use crate::error::RuntimeError;
    use al_core::{CONFIG_FILE_NAME, ConfigField, Level};
    use std::cell::{Cell, RefCell};
    use std::fs;
    use std::io;
    use tempfile::TempDir;

    const VALID: &str =
        "MINIFY=false\nAUTO_COMPILE=true\nSOURCE_FILE=less/style.less\nTARGET_FILE=css/style.css";

    #[derive(Default)]
    struct FakeWorkspace {
        active: Option<Utf8PathBuf>,
        roots: Vec<Utf8PathBuf>,
        opened: RefCell<Vec<(Utf8PathBuf, Option<(u32, u32)>)>>,
        fail_open: bool,
    }

    impl Workspace for FakeWorkspace {
        fn active_file(&self) -> Option<Utf8PathBuf> {
            self.active.clone()
        }

        fn project_roots(&self) -> Vec<Utf8PathBuf> {
            self.roots.clone()
        }

        fn open(&self, path: &Utf8Path, position: Option<(u32, u32)>) -> Result<(), RuntimeError> {
            if self.fail_open {
                return Err(RuntimeError::NoEditor);
            }
            self.opened.borrow_mut().push((path.to_owned(), position));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeNotifier(RefCell<Vec<Notification>>);

    impl FakeNotifier {
        fn titles(&self) -> Vec<String> {
            self.0.borrow().iter().map(|n| n.title.clone()).collect()
        }

        fn last(&self) -> Notification {
            self.0.borrow().last().cloned().expect("a notification")
        }
    }

    impl Notifier for FakeNotifier {
        fn notify(&self, notification: Notification) {
            self.0.borrow_mut().push(notification);
        }
    }

    struct FakeRunner {
        output: CommandOutput,
        calls: Cell<usize>,
    }

    impl FakeRunner {
        fn exiting(code: i32, stderr: &str) -> Self {
            Self {
                output: CommandOutput {
                    code: Some(code),
                    stdout: String::new(),
                    stderr: stderr.to_owned(),
                },
                calls: Cell::new(0),
            }
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, _command: &CompileCommand) -> io::Result<CommandOutput> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.output.clone())
        }
    }

    struct Fixture {
        _dir: TempDir,
        root: Utf8PathBuf,
    }

    impl Fixture {
        fn new(config: Option<&str>) -> Self {
            let dir = TempDir::new().expect("temp dir");
            let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8");
            if let Some(text) = config {
                fs::write(root.join(CONFIG_FILE_NAME), text).expect("write config");
            }
            Self { _dir: dir, root }
        }

        fn file(&self, relative: &str) -> Utf8PathBuf {
            self.root.join(relative)
        }

        fn workspace(&self, active: Option<&str>) -> FakeWorkspace {
            FakeWorkspace {
                active: active.map(|file| self.file(file)),
                roots: vec![self.root.clone()],
                ..FakeWorkspace::default()
            }
        }
    }

    fn orchestrator<'a>(
        workspace: &'a FakeWorkspace,
        notifier: &'a FakeNotifier,
        runner: &'a FakeRunner,
    ) -> CompileOrchestrator<&'a FakeWorkspace, &'a FakeNotifier, &'a FakeRunner> {
        CompileOrchestrator::new(workspace, notifier, runner, &Config::default())
    }

    #[test]
    fn test_manual_compile_success() {
        let fixture = Fixture::new(Some(VALID));
        let workspace = fixture.workspace(Some("less/style.less"));
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");

        let attempt = orchestrator(&workspace, &notifier, &runner).compile(&Trigger::Manual);

        assert_eq!(
            attempt.outcome,
            CompileOutcome::Success {
                source_file: "less/style.less".to_owned()
            }
        );
        assert_eq!(attempt.project.expect("project").file.as_str(), "less/style.less");
        assert_eq!(runner.calls.get(), 1);
        assert_eq!(notifier.titles(), ["Successfully compiled 'less/style.less'"]);
        assert_eq!(notifier.last().level, Level::Success);
    }

    #[test]
    fn test_save_with_auto_compile_disabled_is_silent() {
        let fixture = Fixture::new(Some(
            "MINIFY=false\nAUTO_COMPILE=false\nSOURCE_FILE=less/style.less\nTARGET_FILE=css/style.css",
        ));
        let workspace = fixture.workspace(None);
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");
        let orchestrator = orchestrator(&workspace, &notifier, &runner);

        let attempt = orchestrator.compile(&Trigger::save(fixture.file("less/style.less")));
        assert_eq!(
            attempt.outcome,
            CompileOutcome::Skipped {
                reason: SkipReason::AutoCompileDisabled
            }
        );
        assert_eq!(runner.calls.get(), 0);
        assert!(notifier.titles().is_empty());

        // A manual compile ignores AUTO_COMPILE
        let workspace = fixture.workspace(Some("less/style.less"));
        let orchestrator = CompileOrchestrator::new(&workspace, &notifier, &runner, &Config::default());
        assert!(orchestrator.compile(&Trigger::Manual).outcome.is_success());
        assert_eq!(runner.calls.get(), 1);
    }

    #[test]
    fn test_non_less_file_is_skipped() {
        let fixture = Fixture::new(Some(VALID));
        let workspace = fixture.workspace(Some("css/style.css"));
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");
        let orchestrator = orchestrator(&workspace, &notifier, &runner);

        for trigger in [Trigger::Manual, Trigger::save(fixture.file("index.html"))] {
            let attempt = orchestrator.compile(&trigger);
            assert_eq!(
                attempt.outcome,
                CompileOutcome::Skipped {
                    reason: SkipReason::NotLess
                }
            );
        }
        assert_eq!(runner.calls.get(), 0);
        assert!(notifier.titles().is_empty());
    }

    #[test]
    fn test_no_active_file_warns() {
        let fixture = Fixture::new(Some(VALID));
        let workspace = fixture.workspace(None);
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");

        let attempt = orchestrator(&workspace, &notifier, &runner).compile(&Trigger::Manual);

        assert_eq!(
            attempt.outcome,
            CompileOutcome::Aborted {
                reason: AbortReason::NoActiveFile
            }
        );
        assert!(attempt.project.is_none());
        let note = notifier.last();
        assert_eq!(note.level, Level::Warning);
        assert_eq!(note.title, "Unable to determine project!");
        assert_eq!(
            note.detail.as_deref(),
            Some("At least one file must be open to detect the current project.")
        );
    }

    #[test]
    fn test_file_outside_roots_warns() {
        let fixture = Fixture::new(Some(VALID));
        let workspace = fixture.workspace(None);
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");

        let attempt = orchestrator(&workspace, &notifier, &runner)
            .compile(&Trigger::save("/definitely/elsewhere/a.less"));

        assert_eq!(
            attempt.outcome,
            CompileOutcome::Aborted {
                reason: AbortReason::NoProject
            }
        );
        assert_eq!(notifier.titles(), ["Unable to determine project!"]);
    }

    #[test]
    fn test_missing_config_aborts_silently() {
        let fixture = Fixture::new(None);
        let workspace = fixture.workspace(Some("less/style.less"));
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");

        let attempt = orchestrator(&workspace, &notifier, &runner).compile(&Trigger::Manual);

        assert_eq!(
            attempt.outcome,
            CompileOutcome::Aborted {
                reason: AbortReason::NoConfig
            }
        );
        assert!(attempt.project.is_some());
        assert!(notifier.titles().is_empty());
        assert_eq!(runner.calls.get(), 0);
    }

    #[test]
    fn test_unreadable_config_reports_error() {
        let fixture = Fixture::new(None);
        fs::write(fixture.file(CONFIG_FILE_NAME), [0xff, 0xfe]).expect("write");
        let workspace = fixture.workspace(Some("less/style.less"));
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");

        let attempt = orchestrator(&workspace, &notifier, &runner).compile(&Trigger::Manual);

        assert_eq!(
            attempt.outcome,
            CompileOutcome::Aborted {
                reason: AbortReason::ConfigUnreadable
            }
        );
        let note = notifier.last();
        assert_eq!(note.level, Level::Error);
        assert_eq!(note.title, "Failed to load '.lessconfig'!");
        assert!(note.detail.is_some());
        assert!(note.stack.is_some());
        assert!(note.dismissable);
    }

    #[test]
    fn test_invalid_config_lists_every_field() {
        let fixture = Fixture::new(Some("MINIFY=yes\nAUTO_COMPILE=true\nSOURCE_FILE=1"));
        let workspace = fixture.workspace(Some("less/style.less"));
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");

        let attempt = orchestrator(&workspace, &notifier, &runner).compile(&Trigger::Manual);

        assert_eq!(
            attempt.outcome,
            CompileOutcome::ValidationFailed {
                fields: vec![
                    ConfigField::Minify,
                    ConfigField::SourceFile,
                    ConfigField::TargetFile
                ]
            }
        );
        let note = notifier.last();
        assert_eq!(note.level, Level::Warning);
        assert_eq!(note.title, "Unable to compile, due to invalid '.lessconfig'!");
        assert_eq!(
            note.detail.as_deref(),
            Some("The following properties are invalid:\n   - MINIFY\n   - SOURCE_FILE\n   - TARGET_FILE\n")
        );
        assert_eq!(runner.calls.get(), 0);
    }

    #[test]
    fn test_compile_failure_offers_jump() {
        let fixture = Fixture::new(Some(VALID));
        let stderr = format!(
            "\u{1b}[31mParseError: Unrecognised input\u{1b}[39m in {}/less/style.less on line 5, column 3:\n5 .a {{",
            fixture.root
        );
        let workspace = fixture.workspace(Some("less/style.less"));
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(1, &stderr);
        let orchestrator = orchestrator(&workspace, &notifier, &runner);

        let attempt = orchestrator.compile(&Trigger::Manual);

        let expected = ErrorReference::new(fixture.file("less/style.less"), 4, 2);
        assert!(attempt.outcome.is_failure());
        assert_eq!(attempt.outcome.reference(), Some(&expected));

        let note = notifier.last();
        assert_eq!(note.level, Level::Error);
        assert_eq!(note.title, "Failed to compile 'less/style.less'!");
        assert!(note.dismissable);
        assert!(!note.detail.as_deref().unwrap_or_default().contains('\u{1b}'));
        assert_eq!(note.jump_target(), Some(&expected));

        assert!(orchestrator.jump_to(&expected));
        assert_eq!(
            workspace.opened.borrow().as_slice(),
            [(fixture.file("less/style.less"), Some((4, 2)))]
        );
    }

    #[test]
    fn test_compile_failure_without_reference() {
        let fixture = Fixture::new(Some(VALID));
        let workspace = fixture.workspace(Some("less/style.less"));
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(2, "lessc: something went wrong");

        let attempt = orchestrator(&workspace, &notifier, &runner).compile(&Trigger::Manual);

        assert!(attempt.outcome.is_failure());
        assert!(attempt.outcome.reference().is_none());
        assert!(notifier.last().action.is_none());
    }

    #[test]
    fn test_create_config_writes_defaults() {
        let fixture = Fixture::new(None);
        let workspace = fixture.workspace(Some("index.html"));
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");

        let outcome = orchestrator(&workspace, &notifier, &runner).create_config();

        assert_eq!(
            outcome,
            Some(CreateOutcome::Created(fixture.file(CONFIG_FILE_NAME)))
        );
        assert_eq!(
            fs::read_to_string(fixture.file(CONFIG_FILE_NAME)).expect("read"),
            VALID
        );
        assert_eq!(notifier.titles(), ["Created new '.lessconfig' file"]);
        assert!(workspace.opened.borrow().is_empty());
    }

    #[test]
    fn test_create_config_never_overwrites() {
        let existing = "MINIFY=true\nCUSTOM=1";
        let fixture = Fixture::new(Some(existing));
        let workspace = fixture.workspace(Some("less/style.less"));
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");

        let outcome = orchestrator(&workspace, &notifier, &runner).create_config();

        assert_eq!(
            outcome,
            Some(CreateOutcome::AlreadyExists(fixture.file(CONFIG_FILE_NAME)))
        );
        assert_eq!(
            fs::read_to_string(fixture.file(CONFIG_FILE_NAME)).expect("read"),
            existing
        );
        assert_eq!(
            notifier.titles(),
            ["A '.lessconfig' already exists for this project!"]
        );
        assert_eq!(
            workspace.opened.borrow().as_slice(),
            [(fixture.file(CONFIG_FILE_NAME), None)]
        );
    }

    #[test]
    fn test_create_config_without_project() {
        let workspace = FakeWorkspace::default();
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");

        assert!(orchestrator(&workspace, &notifier, &runner).create_config().is_none());
        assert_eq!(notifier.titles(), ["Unable to determine project!"]);
    }

    #[test]
    fn test_open_config() {
        let fixture = Fixture::new(None);
        let workspace = fixture.workspace(Some("less/style.less"));
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");
        let orchestrator = orchestrator(&workspace, &notifier, &runner);

        assert!(orchestrator.open_config().is_none());
        assert_eq!(
            notifier.titles(),
            ["A '.lessconfig' does not exist for this project!"]
        );

        fs::write(fixture.file(CONFIG_FILE_NAME), VALID).expect("write");
        assert_eq!(orchestrator.open_config(), Some(fixture.file(CONFIG_FILE_NAME)));
        assert_eq!(workspace.opened.borrow().len(), 1);
    }

    #[test]
    fn test_open_failure_is_reported() {
        let fixture = Fixture::new(Some(VALID));
        let workspace = FakeWorkspace {
            fail_open: true,
            ..fixture.workspace(Some("less/style.less"))
        };
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");

        assert!(orchestrator(&workspace, &notifier, &runner).open_config().is_none());
        let note = notifier.last();
        assert_eq!(note.level, Level::Warning);
        assert!(note.title.starts_with("Unable to open"));
        assert!(note.detail.as_deref().unwrap_or_default().contains("no editor"));
    }

    #[test]
    fn test_nested_roots_use_outer_project() {
        let fixture = Fixture::new(Some(VALID));
        fs::create_dir_all(fixture.file("sub")).expect("mkdir");
        let workspace = FakeWorkspace {
            roots: vec![fixture.file("sub"), fixture.root.clone()],
            ..FakeWorkspace::default()
        };
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");

        let attempt = orchestrator(&workspace, &notifier, &runner)
            .compile(&Trigger::save(fixture.file("sub/style.less")));

        let project = attempt.project.expect("project");
        assert_eq!(project.root, fixture.root);
        assert_eq!(project.file.as_str(), "sub/style.less");
        assert!(attempt.outcome.is_success());
    }

    #[test]
    fn test_custom_store_file_name() {
        let fixture = Fixture::new(None);
        fs::write(fixture.file("autoless.conf"), VALID).expect("write config");
        let workspace = fixture.workspace(Some("less/style.less"));
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");

        let orchestrator = orchestrator(&workspace, &notifier, &runner)
            .with_store(ConfigStore::with_file_name("autoless.conf"));

        assert_eq!(orchestrator.store().file_name(), "autoless.conf");
        assert!(orchestrator.compile(&Trigger::Manual).outcome.is_success());
        assert_eq!(orchestrator.open_config(), Some(fixture.file("autoless.conf")));
    }

    #[test]
    fn test_accessors_expose_host_services() {
        let fixture = Fixture::new(Some(VALID));
        let workspace = fixture.workspace(Some("less/style.less"));
        let notifier = FakeNotifier::default();
        let runner = FakeRunner::exiting(0, "");
        let orchestrator = orchestrator(&workspace, &notifier, &runner);

        assert_eq!(orchestrator.store().file_name(), CONFIG_FILE_NAME);
        assert_eq!(orchestrator.invoker().settings().program, "lessc");
        assert_eq!(orchestrator.workspace().project_roots(), [fixture.root.clone()]);

        assert!(orchestrator.compile(&Trigger::Manual).outcome.is_success());
        assert_eq!(orchestrator.invoker().runner().calls.get(), 1);
        assert_eq!(orchestrator.notifier().titles().len(), 1);
    }
}
