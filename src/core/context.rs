use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use anyhow::Result;
use colored::Colorize;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        file_scanner::{SWIFT_EXTENSION, ScanResult, scan_files},
        resources::table::STRINGS_EXTENSION,
        synthesis::SynthesisOptions,
    },
    error::HexiconError,
};

/// Everything a command needs to know about the project it runs against.
///
/// Built once at the entry point and handed to each command explicitly.
///
/// # Configuration Priority
///
/// 1. CLI arguments (applied by each command after construction)
/// 2. `.hexiconrc.json` config file
/// 3. Built-in defaults
pub struct ProjectContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root; relative paths in the configuration resolve against it.
    pub root_dir: PathBuf,

    /// Whether to print diagnostic notes to stderr.
    pub verbose: bool,
}

impl ProjectContext {
    /// Load the configuration for the project named by `--project-dir`
    /// (or `PROJECT_DIR`), defaulting to the current directory.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let root_dir = common_args
            .project_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let loaded = load_config(&root_dir)?;
        let ctx = Self {
            config: loaded.config,
            root_dir,
            verbose: common_args.verbose,
        };

        match &loaded.file {
            Some(file) => ctx.note(format!("Using configuration from {}", file.display())),
            None => ctx.note(format!(
                "No {} found, using default configuration",
                CONFIG_FILE_NAME
            )),
        }

        Ok(ctx)
    }

    /// Resolve a configured path against the project root. An empty path is
    /// the root itself.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            self.root_dir.clone()
        } else if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_dir.join(path)
        }
    }

    /// `path` relative to the project root, for display and diff origins.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root_dir).unwrap_or(path)
    }

    pub fn definitions_dir(&self) -> PathBuf {
        self.resolve(&self.config.definitions_path)
    }

    pub fn scan_dir(&self) -> PathBuf {
        self.resolve(self.config.scan_path.as_deref().unwrap_or_default())
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.resolve(&self.config.resources_path)
    }

    pub fn synthesis_options(&self) -> SynthesisOptions {
        SynthesisOptions {
            use_custom_bundle: self.config.use_custom_bundle,
            use_table_name: self.config.use_table_name,
        }
    }

    pub fn swift_files(&self, dir: &Path) -> Result<Vec<PathBuf>, HexiconError> {
        self.scan(dir, SWIFT_EXTENSION)
    }

    pub fn strings_files(&self, dir: &Path) -> Result<Vec<PathBuf>, HexiconError> {
        self.scan(dir, STRINGS_EXTENSION)
    }

    fn scan(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>, HexiconError> {
        let ScanResult {
            files,
            skipped_count,
        } = scan_files(
            dir,
            extension,
            &self.root_dir,
            &self.config.ignores,
            self.verbose,
        )?;

        if skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                skipped_count,
                if self.verbose { "" } else { " (use -v for details)" }
            );
        }
        self.note(format!(
            "Found {} .{} file(s) in {}",
            files.len(),
            extension,
            dir.display()
        ));
        Ok(files)
    }

    /// Print a diagnostic note to stderr in verbose mode.
    pub fn note(&self, message: impl Display) {
        if self.verbose {
            eprintln!("{} {}", "note:".bold(), message);
        }
    }
}
