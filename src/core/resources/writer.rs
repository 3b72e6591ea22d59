//! Stage-then-swap writes for resource tables.
//!
//! The new contents are staged next to the target, the current file is moved
//! aside, and the staged file is renamed into place. If installing fails the
//! aside copy is moved back, so the target is never left missing.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::error::HexiconError;

pub fn write_atomically(target: &Path, contents: &str) -> Result<(), HexiconError> {
    write_with_installer(target, contents, |staged, target| fs::rename(staged, target))
}

/// Like [`write_atomically`] with a custom final step moving the staged file
/// onto the target.
pub fn write_with_installer<F>(target: &Path, contents: &str, install: F) -> Result<(), HexiconError>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)
        .map_err(|source| HexiconError::io(format!("creating {}", dir.display()), source))?;

    let staging_error =
        |source| HexiconError::io(format!("staging new contents for {}", target.display()), source);
    let mut staged = tempfile::Builder::new()
        .prefix(".hexicon-")
        .tempfile_in(&dir)
        .map_err(staging_error)?;
    staged
        .write_all(contents.as_bytes())
        .and_then(|()| staged.flush())
        .map_err(staging_error)?;
    let staged = staged.into_temp_path();

    let aside = if target.exists() {
        let aside = aside_path(target);
        fs::rename(target, &aside).map_err(|source| {
            HexiconError::io(format!("moving {} aside", target.display()), source)
        })?;
        Some(aside)
    } else {
        None
    };

    if let Err(source) = install(&staged, target) {
        if let Some(aside) = &aside {
            fs::rename(aside, target).map_err(|source| {
                HexiconError::io(
                    format!(
                        "restoring {} from {}",
                        target.display(),
                        aside.display()
                    ),
                    source,
                )
            })?;
        }
        return Err(HexiconError::io(
            format!("installing {}", target.display()),
            source,
        ));
    }

    if let Some(aside) = aside {
        fs::remove_file(&aside).map_err(|source| {
            HexiconError::io(format!("removing {}", aside.display()), source)
        })?;
    }
    Ok(())
}

/// `dir/.Name.strings.orig` for `dir/Name.strings`.
fn aside_path(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.orig", file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_creates_new_file_and_directories() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("en.lproj").join("Foo.strings");
        write_atomically(&target, "\"a\" = \"b\";\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "\"a\" = \"b\";\n");
        assert_eq!(entries(target.parent().unwrap()), vec!["Foo.strings"]);
    }

    #[test]
    fn test_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("Foo.strings");
        fs::write(&target, "old").unwrap();
        write_atomically(&target, "new").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert_eq!(entries(dir.path()), vec!["Foo.strings"]);
    }

    #[test]
    fn test_failed_install_restores_original() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("Foo.strings");
        fs::write(&target, "old").unwrap();

        let result = write_with_installer(&target, "new", |_, _| {
            Err(io::Error::other("disk full"))
        });

        assert!(matches!(result, Err(HexiconError::Io { .. })));
        assert_eq!(fs::read_to_string(&target).unwrap(), "old");
        assert_eq!(entries(dir.path()), vec!["Foo.strings"]);
    }

    #[test]
    fn test_failed_install_without_original() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("Foo.strings");
        let result = write_with_installer(&target, "new", |_, _| {
            Err(io::Error::other("disk full"))
        });
        assert!(result.is_err());
        assert!(entries(dir.path()).is_empty());
    }

    #[test]
    fn test_aside_path() {
        assert_eq!(
            aside_path(Path::new("res/Foo.strings")),
            PathBuf::from("res/.Foo.strings.orig")
        );
    }
}
