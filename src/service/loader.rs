// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loader.
//!
//! This module reads the candidate configuration files of a session in precedence
//! order, merges them into one [`ConfigStore`] and expands include directives
//! depth-first, failing on the first file that would be read twice through an include.

use crate::adapters::{IniFileAdapter, IniParser};
use crate::domain::paths::{absolutize, normalize};
use crate::domain::section::INCLUDE_PATHS_OPTION;
use crate::domain::{ConfigError, ConfigStore, Result, SectionKind};
use crate::ports::ConfigParser;
use directories::BaseDirs;
use std::env;
use std::path::{Path, PathBuf};

/// Basename of the per-user and per-directory configuration file.
pub const RC_FILE_BASENAME: &str = ".counterc";

/// Returns the invoking user's home directory.
///
/// `HOME` wins when it is set and non-empty; otherwise the platform's notion of the home
/// directory is used.
pub fn default_home_dir() -> Result<PathBuf> {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(|| BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()))
        .ok_or(ConfigError::HomeDirNotFound)
}

/// The inputs of one loading session.
///
/// Built with [`LoaderOptions::builder`]. Every path held here is absolute and
/// normalized.
///
/// # Examples
///
/// ```rust
/// use counterparts::service::LoaderOptions;
///
/// # fn main() -> counterparts::domain::Result<()> {
/// let options = LoaderOptions::builder()
///     .with_home_dir("/home/u")
///     .with_working_dir("/home/u/work")
///     .with_config_file("conf/map.ini")
///     .skip_home(true)
///     .build()?;
///
/// assert_eq!(options.home_rc_file_path().to_str(), Some("/home/u/.counterc"));
/// assert_eq!(options.config_file().and_then(|p| p.to_str()), Some("/home/u/work/conf/map.ini"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LoaderOptions {
    config_file: Option<PathBuf>,
    additional_files: Vec<PathBuf>,
    skip_files: Vec<PathBuf>,
    home_dir: PathBuf,
    working_dir: PathBuf,
    rc_file_basename: String,
}

/// A file the loader is about to read.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Candidate {
    path: PathBuf,
    required: bool,
    included_from: Option<PathBuf>,
}

impl LoaderOptions {
    /// Creates a new options builder.
    pub fn builder() -> LoaderOptionsBuilder {
        LoaderOptionsBuilder::new()
    }

    /// Returns the explicit configuration file, if one was given.
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Returns the home directory used for the home default file and `%(home)s`.
    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    /// Returns the directory relative paths are resolved against.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Returns the path of the optional per-user configuration file.
    pub fn home_rc_file_path(&self) -> PathBuf {
        self.home_dir.join(&self.rc_file_basename)
    }

    /// Returns the path of the optional per-directory configuration file, read when no
    /// explicit file is given.
    pub fn local_rc_file_path(&self) -> PathBuf {
        self.working_dir.join(&self.rc_file_basename)
    }

    /// Lists the top-level files to read, in order, with skipped paths removed.
    fn candidates(&self) -> Vec<Candidate> {
        let local = match &self.config_file {
            Some(path) => Candidate {
                path: path.clone(),
                required: true,
                included_from: None,
            },
            None => Candidate {
                path: self.local_rc_file_path(),
                required: false,
                included_from: None,
            },
        };

        let mut candidates = vec![
            Candidate {
                path: self.home_rc_file_path(),
                required: false,
                included_from: None,
            },
            local,
        ];
        candidates.extend(self.additional_files.iter().map(|path| Candidate {
            path: path.clone(),
            required: true,
            included_from: None,
        }));

        candidates.retain(|candidate| {
            let skipped = self.skip_files.contains(&candidate.path);
            if skipped {
                tracing::debug!("Skipping {} (in skip list)", candidate.path.display());
            }
            !skipped
        });
        candidates
    }
}

/// Builder for constructing [`LoaderOptions`].
///
/// The home directory defaults to [`default_home_dir`] and the working directory to
/// the process's current directory; both can be injected for deterministic sessions.
#[derive(Clone, Debug, Default)]
pub struct LoaderOptionsBuilder {
    config_file: Option<PathBuf>,
    additional_files: Vec<PathBuf>,
    skip_files: Vec<PathBuf>,
    skip_home: bool,
    home_dir: Option<PathBuf>,
    working_dir: Option<PathBuf>,
    rc_file_basename: Option<String>,
}

impl LoaderOptionsBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit (required) configuration file. It replaces `./.counterc` but
    /// not `~/.counterc`.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Sets or clears the explicit configuration file.
    pub fn with_optional_config_file(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.config_file = path.map(Into::into);
        self
    }

    /// Appends a required file, read after the explicit one.
    pub fn with_additional_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.additional_files.push(path.into());
        self
    }

    /// Excludes a path from the candidate files.
    pub fn skip_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.skip_files.push(path.into());
        self
    }

    /// Excludes the home default file when `skip` is true.
    pub fn skip_home(mut self, skip: bool) -> Self {
        self.skip_home = skip;
        self
    }

    /// Injects the home directory instead of reading it from the environment.
    pub fn with_home_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(path.into());
        self
    }

    /// Injects the working directory instead of using the process's current directory.
    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }

    /// Overrides the default file basename (`.counterc`).
    pub fn with_rc_file_basename(mut self, basename: impl Into<String>) -> Self {
        self.rc_file_basename = Some(basename.into());
        self
    }

    /// Builds the options, absolutizing every path.
    ///
    /// # Errors
    ///
    /// Fails if the home directory or current directory cannot be determined.
    pub fn build(self) -> Result<LoaderOptions> {
        let working_dir = match self.working_dir {
            Some(dir) => dir,
            None => env::current_dir()?,
        };
        let working_dir = normalize(&working_dir);
        let home_dir = match self.home_dir {
            Some(dir) => dir,
            None => default_home_dir()?,
        };
        let home_dir = absolutize(&home_dir, &working_dir);
        let resolve = |path: PathBuf| absolutize(&path, &working_dir);

        let mut options = LoaderOptions {
            config_file: self.config_file.map(resolve),
            additional_files: self.additional_files.into_iter().map(resolve).collect(),
            skip_files: self.skip_files.into_iter().map(resolve).collect(),
            home_dir,
            working_dir: working_dir.clone(),
            rc_file_basename: self
                .rc_file_basename
                .unwrap_or_else(|| RC_FILE_BASENAME.to_string()),
        };
        if self.skip_home {
            let home_rc = options.home_rc_file_path();
            options.skip_files.push(home_rc);
        }
        Ok(options)
    }
}

/// The set of files already read in a session, in read order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadedFileSet {
    paths: Vec<PathBuf>,
}

impl LoadedFileSet {
    /// Returns `true` if the path has been read.
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Records a path, returning `false` if it was already present.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        if self.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    /// Returns the recorded paths in read order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

/// Loads and merges the configuration files of one session.
///
/// # Examples
///
/// ```rust,no_run
/// use counterparts::service::{LayeredLoader, LoaderOptions};
/// use counterparts::domain::SectionKind;
///
/// # fn main() -> counterparts::domain::Result<()> {
/// let options = LoaderOptions::builder().with_config_file("map.ini").build()?;
/// let store = LayeredLoader::new().load(&options)?;
/// println!("{:?}", store.options(&SectionKind::Mapping));
/// # Ok(())
/// # }
/// ```
pub struct LayeredLoader {
    parser: Box<dyn ConfigParser>,
}

impl LayeredLoader {
    /// Creates a loader reading the INI format.
    pub fn new() -> Self {
        Self::with_parser(Box::new(IniParser::new()))
    }

    /// Creates a loader using a custom parser.
    pub fn with_parser(parser: Box<dyn ConfigParser>) -> Self {
        Self { parser }
    }

    /// Reads every candidate file of the session into a fresh store.
    pub fn load(&self, options: &LoaderOptions) -> Result<ConfigStore> {
        self.load_with_files(options).map(|(store, _)| store)
    }

    /// Like [`LayeredLoader::load`], also returning the files that were read.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::FileNotFound`] - a required or included file is missing
    /// * [`ConfigError::RecursionInConfigFile`] - an include names a file already read
    /// * a parse or I/O error - a file is malformed or unreadable
    pub fn load_with_files(&self, options: &LoaderOptions) -> Result<(ConfigStore, LoadedFileSet)> {
        tracing::debug!(
            "Loading configuration: config_file = {:?}, home = {}",
            options.config_file(),
            options.home_dir().display()
        );

        let mut store = ConfigStore::with_home(options.home_dir().to_string_lossy());
        let mut loaded = LoadedFileSet::default();

        for candidate in options.candidates() {
            if loaded.contains(&candidate.path) {
                tracing::debug!("{} already read; not reading it again", candidate.path.display());
                continue;
            }
            self.load_tree(&mut store, &mut loaded, candidate)?;
        }

        tracing::debug!("Loaded {} configuration file(s)", loaded.paths().len());
        Ok((store, loaded))
    }

    /// Reads one top-level file and, depth-first, everything it includes.
    fn load_tree(
        &self,
        store: &mut ConfigStore,
        loaded: &mut LoadedFileSet,
        root: Candidate,
    ) -> Result<()> {
        let mut stack = vec![root];

        while let Some(file) = stack.pop() {
            if loaded.contains(&file.path) {
                if let Some(included_from) = file.included_from {
                    return Err(ConfigError::RecursionInConfigFile {
                        path: file.path,
                        included_from,
                    });
                }
                continue;
            }

            if !self.read_into(store, &file)? {
                continue;
            }
            loaded.insert(file.path.clone());

            let includes = take_includes(store, &file.path)?;
            // Reversed so the first listed include is popped first.
            for path in includes.into_iter().rev() {
                stack.push(Candidate {
                    path,
                    required: true,
                    included_from: Some(file.path.clone()),
                });
            }
        }
        Ok(())
    }

    /// Merges one file into the store. Returns `false` if an optional file was absent.
    fn read_into(&self, store: &mut ConfigStore, file: &Candidate) -> Result<bool> {
        tracing::debug!(
            "Reading {} (required = {})",
            file.path.display(),
            file.required
        );

        let adapter = if file.required {
            IniFileAdapter::read_with(self.parser.as_ref(), &file.path)?
        } else {
            match IniFileAdapter::read_optional_with(self.parser.as_ref(), &file.path)? {
                Some(adapter) => adapter,
                None => {
                    tracing::debug!("Optional {} not found", file.path.display());
                    return Ok(false);
                }
            }
        };

        store.merge(adapter.into_sections());
        Ok(true)
    }
}

impl Default for LayeredLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Consumes `INCLUDE.paths`, returning the listed files resolved against the directory
/// of the file that declared them.
fn take_includes(store: &mut ConfigStore, declared_in: &Path) -> Result<Vec<PathBuf>> {
    let Some(paths) = store.get_local(&SectionKind::Include, INCLUDE_PATHS_OPTION)? else {
        return Ok(Vec::new());
    };
    store.remove_option(&SectionKind::Include, INCLUDE_PATHS_OPTION);

    let base = declared_in.parent().unwrap_or_else(|| Path::new("/"));
    let includes: Vec<PathBuf> = paths
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| absolutize(Path::new(line), base))
        .collect();

    tracing::debug!(
        "{} includes {:?}",
        declared_in.display(),
        includes
    );
    Ok(includes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn options_in(dir: &Path) -> LoaderOptionsBuilder {
        LoaderOptions::builder()
            .with_home_dir(dir.join("home"))
            .with_working_dir(dir.join("work"))
    }

    #[test]
    fn test_builder_absolutizes_paths() {
        let options = LoaderOptions::builder()
            .with_home_dir("/home/u")
            .with_working_dir("/srv/./work")
            .with_config_file("../conf/a.ini")
            .with_additional_file("/etc/b.ini")
            .build()
            .unwrap();

        assert_eq!(options.working_dir(), Path::new("/srv/work"));
        assert_eq!(options.config_file(), Some(Path::new("/srv/conf/a.ini")));
        assert_eq!(options.additional_files, vec![PathBuf::from("/etc/b.ini")]);
    }

    #[test]
    fn test_candidates_order_without_config_file() {
        let options = LoaderOptions::builder()
            .with_home_dir("/home/u")
            .with_working_dir("/w")
            .with_additional_file("extra.ini")
            .build()
            .unwrap();

        let candidates = options.candidates();
        let summary: Vec<(&Path, bool)> = candidates
            .iter()
            .map(|c| (c.path.as_path(), c.required))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Path::new("/home/u/.counterc"), false),
                (Path::new("/w/.counterc"), false),
                (Path::new("/w/extra.ini"), true),
            ]
        );
    }

    #[test]
    fn test_candidates_skip_home() {
        let options = LoaderOptions::builder()
            .with_home_dir("/home/u")
            .with_working_dir("/w")
            .with_config_file("map.ini")
            .skip_home(true)
            .build()
            .unwrap();

        let candidates = options.candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].path, PathBuf::from("/w/map.ini"));
        assert!(candidates[0].required);
    }

    #[test]
    fn test_skip_file_matches_after_normalizing() {
        let options = LoaderOptions::builder()
            .with_home_dir("/home/u")
            .with_working_dir("/w")
            .skip_file("/home/u/./sub/../.counterc")
            .build()
            .unwrap();

        assert!(options
            .candidates()
            .iter()
            .all(|c| c.path != Path::new("/home/u/.counterc")));
    }

    #[test]
    fn test_custom_basename() {
        let options = LoaderOptions::builder()
            .with_home_dir("/home/u")
            .with_working_dir("/w")
            .with_rc_file_basename(".counterc_unittest")
            .build()
            .unwrap();
        assert_eq!(
            options.home_rc_file_path(),
            PathBuf::from("/home/u/.counterc_unittest")
        );
    }

    #[test]
    fn test_loaded_file_set() {
        let mut set = LoadedFileSet::default();
        assert!(set.insert(PathBuf::from("/a")));
        assert!(!set.insert(PathBuf::from("/a")));
        assert!(set.contains(Path::new("/a")));
        assert_eq!(set.paths(), &[PathBuf::from("/a")]);
    }

    #[test]
    fn test_load_nothing_present() {
        let dir = TempDir::new().unwrap();
        let options = options_in(dir.path()).build().unwrap();

        let (store, loaded) = LayeredLoader::new().load_with_files(&options).unwrap();
        assert!(store.sections().is_empty());
        assert!(loaded.paths().is_empty());
    }

    #[test]
    fn test_include_consumed_and_relative_to_declaring_file() {
        let dir = TempDir::new().unwrap();
        let conf = dir.path().join("conf");
        fs::create_dir_all(conf.join("more")).unwrap();
        fs::write(
            conf.join("main.ini"),
            "[INCLUDE]\npaths = more/extra.ini\n[COUNTERPART_MAP]\na = 1\n",
        )
        .unwrap();
        fs::write(conf.join("more/extra.ini"), "[COUNTERPART_MAP]\nb = 2\n").unwrap();

        let options = options_in(dir.path())
            .with_config_file(conf.join("main.ini"))
            .skip_home(true)
            .build()
            .unwrap();
        let (store, loaded) = LayeredLoader::new().load_with_files(&options).unwrap();

        assert_eq!(store.options(&SectionKind::Mapping), vec!["a", "b"]);
        assert!(store.options(&SectionKind::Include).is_empty());
        assert_eq!(loaded.paths()[1], conf.join("more/extra.ini"));
    }

    #[test]
    fn test_self_include_is_recursion() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("self.ini");
        fs::write(&path, "[INCLUDE]\npaths = self.ini\n").unwrap();

        let options = options_in(dir.path())
            .with_config_file(&path)
            .skip_home(true)
            .build()
            .unwrap();
        let err = LayeredLoader::new().load(&options).unwrap_err();
        match err {
            ConfigError::RecursionInConfigFile {
                path: repeated,
                included_from,
            } => {
                assert_eq!(repeated, path);
                assert_eq!(included_from, path);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_include_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.ini");
        fs::write(&path, "[INCLUDE]\npaths = absent.ini\n").unwrap();

        let options = options_in(dir.path())
            .with_config_file(&path)
            .skip_home(true)
            .build()
            .unwrap();
        assert!(matches!(
            LayeredLoader::new().load(&options),
            Err(ConfigError::FileNotFound { .. })
        ));
    }
}
