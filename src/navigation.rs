use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{AppError, Result};
use crate::fs::classify::EntryKind;
use crate::fs::listing::{self, ExplorerEntry};
use crate::fs::opener::FileOpener;
use crate::fs::recursive::{self, RecursiveLine};
use crate::hit::{FixedControl, Target};

/// Name of the desktop folder under the home directory.
pub const DESKTOP_DIR: &str = "Desktop";

/// Which listing is on screen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Flat,
    Recursive,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Flat => "flat",
            ViewMode::Recursive => "recursive",
        }
    }
}

/// What a handled click ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Navigated(PathBuf),
    RecursiveShown(usize),
    RecursiveHidden,
    Opened(PathBuf),
    Ignored,
}

/// Owns the current directory, both listings and the view mode, and applies
/// hit-test results to them.
pub struct NavigationController {
    home: PathBuf,
    current_dir: PathBuf,
    mode: ViewMode,
    entries: Vec<ExplorerEntry>,
    recursive_lines: Vec<RecursiveLine>,
    opener: Box<dyn FileOpener>,
}

impl NavigationController {
    /// Create a controller showing `start` in the flat view.
    pub fn new(home: PathBuf, start: PathBuf, opener: Box<dyn FileOpener>) -> Result<Self> {
        let current_dir = resolve_dir(&start)?;
        let entries = listing::list_directory(&current_dir)?;
        Ok(Self {
            home,
            current_dir,
            mode: ViewMode::Flat,
            entries,
            recursive_lines: Vec::new(),
            opener,
        })
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn entries(&self) -> &[ExplorerEntry] {
        &self.entries
    }

    /// Mutable access for the renderer to record entry regions.
    pub fn entries_mut(&mut self) -> &mut [ExplorerEntry] {
        &mut self.entries
    }

    pub fn recursive_lines(&self) -> &[RecursiveLine] {
        &self.recursive_lines
    }

    /// Entries that can currently be clicked; none while the recursive view
    /// covers the listing.
    pub fn clickable_entries(&self) -> &[ExplorerEntry] {
        match self.mode {
            ViewMode::Flat => &self.entries,
            ViewMode::Recursive => &[],
        }
    }

    /// Apply a hit-test result.
    ///
    /// On error nothing changes: the current directory, listing and view
    /// mode stay as they were.
    pub fn handle(&mut self, target: Target) -> Result<Outcome> {
        match target {
            Target::Control(FixedControl::Home) => {
                let home = self.home.clone();
                self.navigate(&home)
            }
            Target::Control(FixedControl::Desktop) => {
                let desktop = self.home.join(DESKTOP_DIR);
                self.navigate(&desktop)
            }
            Target::Control(FixedControl::RecursiveToggle) => Ok(self.toggle_recursive()),
            Target::Entry {
                path,
                kind: EntryKind::Directory,
            } => self.navigate(&path),
            Target::Entry { path, kind } => {
                log::info!("opening {:?} file {}", kind, path.display());
                self.opener.open(&path)?;
                Ok(Outcome::Opened(path))
            }
            Target::None => Ok(Outcome::Ignored),
        }
    }

    /// Replace the flat listing with the contents of `dir` and leave the
    /// recursive view.
    pub fn navigate(&mut self, dir: &Path) -> Result<Outcome> {
        let dir = resolve_dir(dir)?;
        let entries = listing::list_directory(&dir)?;

        log::info!("navigated to {}", dir.display());
        self.entries = entries;
        self.current_dir = dir.clone();
        self.mode = ViewMode::Flat;
        self.recursive_lines.clear();
        Ok(Outcome::Navigated(dir))
    }

    /// Flip between the flat and recursive views. Turning the recursive view
    /// on rebuilds it from the current directory; turning it off drops it.
    pub fn toggle_recursive(&mut self) -> Outcome {
        match self.mode {
            ViewMode::Flat => {
                self.recursive_lines = recursive::build_tree(&self.current_dir, 0);
                self.mode = ViewMode::Recursive;
                Outcome::RecursiveShown(self.recursive_lines.len())
            }
            ViewMode::Recursive => {
                self.recursive_lines.clear();
                self.mode = ViewMode::Flat;
                Outcome::RecursiveHidden
            }
        }
    }
}

/// The directory a navigation target names.
///
/// Paths containing `..` are resolved on disk, so `link/..` lands on the
/// parent of the link's target, the same directory the `..` row described.
/// Other paths are kept as given, without `.` segments or a trailing slash.
pub fn resolve_dir(path: &Path) -> Result<PathBuf> {
    if path.components().any(|c| c == Component::ParentDir) {
        return fs::canonicalize(path).map_err(|_| AppError::DirectoryNotFound(path.to_path_buf()));
    }
    Ok(path.components().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs::{self, File};
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Records opened paths instead of launching anything.
    #[derive(Clone, Default)]
    struct RecordingOpener {
        opened: Rc<RefCell<Vec<PathBuf>>>,
    }

    impl FileOpener for RecordingOpener {
        fn open(&self, path: &Path) -> Result<()> {
            self.opened.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    struct FailingOpener;

    impl FileOpener for FailingOpener {
        fn open(&self, path: &Path) -> Result<()> {
            Err(AppError::Open {
                path: path.to_path_buf(),
                reason: "no handler".into(),
            })
        }
    }

    fn setup_home() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Desktop")).unwrap();
        File::create(dir.path().join("Desktop").join("todo.txt")).unwrap();
        fs::create_dir(dir.path().join("projects")).unwrap();
        File::create(dir.path().join("projects").join("main.c")).unwrap();
        File::create(dir.path().join("photo.png")).unwrap();
        dir
    }

    fn controller(home: &Path) -> (NavigationController, RecordingOpener) {
        let opener = RecordingOpener::default();
        let nav = NavigationController::new(
            home.to_path_buf(),
            home.to_path_buf(),
            Box::new(opener.clone()),
        )
        .unwrap();
        (nav, opener)
    }

    fn names(nav: &NavigationController) -> Vec<&str> {
        nav.entries().iter().map(|e| e.name.as_str()).collect()
    }

    fn dir_target(path: PathBuf) -> Target {
        Target::Entry {
            path,
            kind: EntryKind::Directory,
        }
    }

    #[test]
    fn starts_flat_in_start_dir() {
        let home = setup_home();
        let (nav, _) = controller(home.path());
        assert_eq!(nav.mode(), ViewMode::Flat);
        assert_eq!(nav.current_dir(), home.path());
        assert_eq!(names(&nav), vec!["..", "Desktop", "photo.png", "projects"]);
    }

    #[test]
    fn missing_start_dir_fails() {
        let home = setup_home();
        let result = NavigationController::new(
            home.path().to_path_buf(),
            home.path().join("missing"),
            Box::new(RecordingOpener::default()),
        );
        assert!(matches!(result, Err(AppError::DirectoryNotFound(_))));
    }

    #[test]
    fn clicking_a_directory_replaces_the_listing() {
        let home = setup_home();
        let (mut nav, _) = controller(home.path());
        let projects = home.path().join("projects");

        let outcome = nav.handle(dir_target(projects.clone())).unwrap();
        assert_eq!(outcome, Outcome::Navigated(projects.clone()));
        assert_eq!(nav.current_dir(), projects);
        assert_eq!(names(&nav), vec!["..", "main.c"]);
    }

    #[test]
    fn parent_entry_navigates_up_without_dotdot_segments() {
        let home = setup_home();
        let (mut nav, _) = controller(home.path());
        nav.handle(dir_target(home.path().join("projects"))).unwrap();

        let parent = nav.entries()[0].path.clone();
        assert!(parent.ends_with(".."));
        nav.handle(dir_target(parent)).unwrap();
        assert_eq!(nav.current_dir(), fs::canonicalize(home.path()).unwrap());
        assert!(!nav.current_dir().ends_with(".."));
    }

    #[test]
    fn home_and_desktop_controls() {
        let home = setup_home();
        let (mut nav, _) = controller(home.path());
        nav.handle(Target::Control(FixedControl::Desktop)).unwrap();
        assert_eq!(nav.current_dir(), home.path().join("Desktop"));
        assert_eq!(names(&nav), vec!["..", "todo.txt"]);

        nav.handle(Target::Control(FixedControl::Home)).unwrap();
        assert_eq!(nav.current_dir(), home.path());
    }

    #[test]
    fn failed_navigation_keeps_state() {
        let home = setup_home();
        let (mut nav, _) = controller(home.path());
        let before = nav.entries().to_vec();

        let err = nav
            .handle(dir_target(home.path().join("vanished")))
            .unwrap_err();
        assert!(matches!(err, AppError::DirectoryNotFound(_)));
        assert_eq!(nav.current_dir(), home.path());
        assert_eq!(nav.entries(), before.as_slice());
    }

    #[test]
    fn missing_desktop_keeps_state() {
        let home = setup_home();
        fs::remove_dir_all(home.path().join("Desktop")).unwrap();
        let (mut nav, _) = controller(home.path());
        nav.handle(dir_target(home.path().join("projects"))).unwrap();

        assert!(nav.handle(Target::Control(FixedControl::Desktop)).is_err());
        assert_eq!(nav.current_dir(), home.path().join("projects"));
    }

    #[test]
    fn files_are_dispatched_to_the_opener() {
        let home = setup_home();
        let (mut nav, opener) = controller(home.path());
        let photo = home.path().join("photo.png");
        let before = nav.entries().to_vec();

        let outcome = nav
            .handle(Target::Entry {
                path: photo.clone(),
                kind: EntryKind::Image,
            })
            .unwrap();
        assert_eq!(outcome, Outcome::Opened(photo.clone()));
        assert_eq!(*opener.opened.borrow(), vec![photo]);
        assert_eq!(nav.current_dir(), home.path());
        assert_eq!(nav.entries(), before.as_slice());
    }

    #[test]
    fn open_failure_is_surfaced() {
        let home = setup_home();
        let mut nav = NavigationController::new(
            home.path().to_path_buf(),
            home.path().to_path_buf(),
            Box::new(FailingOpener),
        )
        .unwrap();
        let result = nav.handle(Target::Entry {
            path: home.path().join("photo.png"),
            kind: EntryKind::Image,
        });
        assert!(matches!(result, Err(AppError::Open { .. })));
    }

    #[test]
    fn none_target_is_ignored() {
        let home = setup_home();
        let (mut nav, opener) = controller(home.path());
        assert_eq!(nav.handle(Target::None).unwrap(), Outcome::Ignored);
        assert!(opener.opened.borrow().is_empty());
    }

    #[test]
    fn recursive_toggle_builds_and_clears() {
        let home = setup_home();
        let (mut nav, _) = controller(home.path());

        let outcome = nav.handle(Target::Control(FixedControl::RecursiveToggle)).unwrap();
        assert_eq!(outcome, Outcome::RecursiveShown(5));
        assert_eq!(nav.mode(), ViewMode::Recursive);
        assert!(nav.clickable_entries().is_empty());
        let labels: Vec<String> = nav.recursive_lines().iter().map(|l| l.label()).collect();
        assert_eq!(
            labels,
            vec!["Desktop", "    todo.txt", "photo.png", "projects", "    main.c"]
        );

        let outcome = nav.handle(Target::Control(FixedControl::RecursiveToggle)).unwrap();
        assert_eq!(outcome, Outcome::RecursiveHidden);
        assert_eq!(nav.mode(), ViewMode::Flat);
        assert!(nav.recursive_lines().is_empty());
        assert_eq!(nav.clickable_entries().len(), nav.entries().len());
    }

    #[test]
    fn double_toggle_round_trip_keeps_flat_listing() {
        let home = setup_home();
        let (mut nav, _) = controller(home.path());
        let before = nav.entries().to_vec();

        for _ in 0..2 {
            nav.toggle_recursive();
            nav.toggle_recursive();
        }
        assert_eq!(nav.mode(), ViewMode::Flat);
        assert_eq!(nav.entries(), before.as_slice());
    }

    #[test]
    fn navigation_leaves_recursive_view() {
        let home = setup_home();
        let (mut nav, _) = controller(home.path());
        nav.toggle_recursive();
        nav.handle(Target::Control(FixedControl::Home)).unwrap();
        assert_eq!(nav.mode(), ViewMode::Flat);
        assert!(nav.recursive_lines().is_empty());
    }

    #[test]
    fn failed_navigation_keeps_recursive_view() {
        let home = setup_home();
        let (mut nav, _) = controller(home.path());
        nav.toggle_recursive();
        let lines = nav.recursive_lines().len();
        assert!(nav.navigate(&home.path().join("nope")).is_err());
        assert_eq!(nav.mode(), ViewMode::Recursive);
        assert_eq!(nav.recursive_lines().len(), lines);
    }

    #[test]
    fn parent_of_a_symlinked_directory_is_the_real_parent() {
        let root = TempDir::new().unwrap();
        let home = root.path().join("home");
        let data = root.path().join("data");
        fs::create_dir_all(data.join("x")).unwrap();
        File::create(data.join("only_in_data.txt")).unwrap();
        fs::create_dir(&home).unwrap();
        std::os::unix::fs::symlink(data.join("x"), home.join("link")).unwrap();

        let (mut nav, _) = controller(&home);
        nav.handle(dir_target(home.join("link"))).unwrap();
        assert_eq!(nav.current_dir(), home.join("link"));

        let parent = nav.entries()[0].path.clone();
        nav.handle(dir_target(parent)).unwrap();
        assert_eq!(nav.current_dir(), fs::canonicalize(&data).unwrap());
        assert_eq!(names(&nav), vec!["..", "only_in_data.txt", "x"]);
    }

    #[test]
    fn resolve_dir_cleans_plain_paths() {
        assert_eq!(
            resolve_dir(Path::new("/home/u/./Desktop/")).unwrap(),
            PathBuf::from("/home/u/Desktop")
        );
    }

    #[test]
    fn resolve_dir_follows_parent_segments_on_disk() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("a")).unwrap();
        let resolved = resolve_dir(&root.path().join("a").join("..")).unwrap();
        assert_eq!(resolved, fs::canonicalize(root.path()).unwrap());

        let missing = root.path().join("gone").join("..");
        assert!(matches!(
            resolve_dir(&missing),
            Err(AppError::DirectoryNotFound(p)) if p == missing
        ));
    }
}
