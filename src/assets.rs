// src/assets.rs
//! Copies static assets into the output directory.
//!
//! Three sources feed the output, in order: the assets compiled into the
//! built-in template, a `static/` directory inside a user template directory,
//! and the `staticFiles` paths from the configuration. Later sources may
//! overwrite earlier ones.

use crate::error::PublishError;
use docsmith_templates::BUILTIN_STATICS;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Writes the assets shipped with the built-in template.
pub fn write_builtin_statics(destination: &Path) -> Result<usize, PublishError> {
    for asset in BUILTIN_STATICS {
        let target = destination.join(asset.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, asset.contents)?;
    }
    Ok(BUILTIN_STATICS.len())
}

/// Copies the `static/` directory of a template directory, preserving its
/// layout. A template without one is fine.
pub fn copy_template_statics(template_dir: &Path, destination: &Path) -> Result<usize, PublishError> {
    let static_dir = template_dir.join("static");
    if !static_dir.is_dir() {
        return Ok(0);
    }
    copy_tree(&static_dir, destination)
}

/// Copies the user-configured static files. A directory entry keeps its
/// internal layout under the destination; a file entry lands at the top.
pub fn copy_user_statics(paths: &[impl AsRef<Path>], destination: &Path) -> Result<usize, PublishError> {
    let mut copied = 0;
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            copied += copy_tree(path, destination)?;
        } else {
            let name = path.file_name().ok_or_else(|| {
                PublishError::Config(format!("static file path '{}' has no file name", path.display()))
            })?;
            fs::copy(path, destination.join(name))?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn copy_tree(source: &Path, destination: &Path) -> Result<usize, PublishError> {
    let mut copied = 0;
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| PublishError::Config(e.to_string()))?;
        let target = destination.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), target)?;
        copied += 1;
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_builtin_statics_land_in_their_subdirectories() -> TestResult {
        let out = tempfile::tempdir()?;
        let count = write_builtin_statics(out.path())?;
        assert_eq!(count, BUILTIN_STATICS.len());
        assert!(out.path().join("styles/default.css").is_file());
        assert!(out.path().join("scripts/linenumber.js").is_file());
        Ok(())
    }

    #[test]
    fn test_template_without_static_dir_copies_nothing() -> TestResult {
        let template = tempfile::tempdir()?;
        let out = tempfile::tempdir()?;
        assert_eq!(copy_template_statics(template.path(), out.path())?, 0);
        Ok(())
    }

    #[test]
    fn test_template_static_dir_keeps_its_layout() -> TestResult {
        let template = tempfile::tempdir()?;
        let out = tempfile::tempdir()?;
        fs::create_dir_all(template.path().join("static/fonts"))?;
        fs::write(template.path().join("static/fonts/site.woff2"), b"f")?;
        fs::write(template.path().join("static/extra.css"), b"body{}")?;

        assert_eq!(copy_template_statics(template.path(), out.path())?, 2);
        assert!(out.path().join("fonts/site.woff2").is_file());
        assert!(out.path().join("extra.css").is_file());
        Ok(())
    }

    #[test]
    fn test_user_statics_mix_files_and_directories() -> TestResult {
        let source = tempfile::tempdir()?;
        let out = tempfile::tempdir()?;
        fs::write(source.path().join("logo.png"), b"png")?;
        fs::create_dir_all(source.path().join("media/icons"))?;
        fs::write(source.path().join("media/icons/a.svg"), b"svg")?;

        let paths = vec![source.path().join("logo.png"), source.path().join("media")];
        assert_eq!(copy_user_statics(&paths, out.path())?, 2);
        assert!(out.path().join("logo.png").is_file());
        assert!(out.path().join("icons/a.svg").is_file());
        Ok(())
    }

    #[test]
    fn test_missing_user_static_propagates() -> TestResult {
        let out = tempfile::tempdir()?;
        let paths = vec![out.path().join("does-not-exist.css")];
        assert!(copy_user_statics(&paths, out.path()).is_err());
        Ok(())
    }
}
