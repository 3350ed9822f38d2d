//! Package loader
//!
//! Collects the `.go` files of one directory that belong to a package and
//! parses their declarations into a `SourceUnit`.

use crate::ast::SourceUnit;
use crate::Frontend;
use irgen_common::GenError;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Load every file of `package` found directly inside `dir`.
///
/// Files are read in file name order. Files declaring another package
/// (external `_test` packages, build-tagged leftovers) are skipped.
pub fn load_package(dir: &Path, package: &str) -> Result<SourceUnit, GenError> {
    let load_error = |reason: String| GenError::Load {
        package: package.to_string(),
        dir: dir.display().to_string(),
        reason,
    };

    let entries = fs::read_dir(dir).map_err(|err| load_error(err.to_string()))?;
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| load_error(err.to_string()))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "go") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut files = Vec::new();
    for path in paths {
        let source = fs::read_to_string(&path).map_err(|err| load_error(format!("{}: {err}", path.display())))?;
        let file = Frontend::parse_source(&source, &path.display().to_string())?;

        if file.package != package {
            debug!("skipping {} (package {})", path.display(), file.package);
            continue;
        }
        debug!(
            "loaded {}: {} imports, {} type declarations",
            path.display(),
            file.imports.len(),
            file.declarations.len()
        );
        files.push(file);
    }

    if files.is_empty() {
        return Err(load_error("no Go files for this package".to_string()));
    }

    Ok(SourceUnit {
        package: package.to_string(),
        files,
    })
}
