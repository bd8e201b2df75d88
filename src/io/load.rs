//! Locating and parsing Go packages on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{SourceError, SourceResult};
use crate::parsing::GoParser;
use crate::syntax::SourceFile;

/// What a command-line argument points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    Dir(PathBuf),
}

impl Target {
    pub fn path(&self) -> &Path {
        match self {
            Target::File(path) | Target::Dir(path) => path,
        }
    }
}

/// Resolve an argument as a file or directory, falling back to a standard
/// library package under `<goroot>/src`.
pub fn resolve(arg: &str, goroot: Option<&Path>) -> SourceResult<Target> {
    let candidates = std::iter::once(PathBuf::from(arg))
        .chain(goroot.map(|root| root.join("src").join(arg)));

    for candidate in candidates {
        if candidate.is_dir() {
            return Ok(Target::Dir(candidate));
        }
        if candidate.is_file() {
            return Ok(Target::File(candidate));
        }
    }
    Err(SourceError::NotFound {
        path: arg.to_string(),
    })
}

/// `.go` files directly inside `dir`, sorted by name.
pub fn go_files(dir: &Path, include_tests: bool) -> SourceResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| SourceError::ReadDir {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(".go") || (!include_tests && name.ends_with("_test.go")) {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}

/// Parse every Go file of `dir` and group the trees by package clause.
pub fn load_dir(
    parser: &mut GoParser,
    dir: &Path,
    include_tests: bool,
) -> SourceResult<BTreeMap<String, Vec<SourceFile>>> {
    let mut packages: BTreeMap<String, Vec<SourceFile>> = BTreeMap::new();
    for path in go_files(dir, include_tests)? {
        let file = parser.parse_file(&path)?;
        tracing::debug!("parsed {} (package {})", file.path, file.package.name);
        packages
            .entry(file.package.name.clone())
            .or_default()
            .push(file);
    }
    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, code: &str) {
        fs::write(dir.join(name), code).unwrap();
    }

    #[test]
    fn test_go_files_skips_tests_and_subdirectories() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b.go", "package p\n");
        write(temp.path(), "a.go", "package p\n");
        write(temp.path(), "a_test.go", "package p\n");
        write(temp.path(), "notes.txt", "");
        fs::create_dir(temp.path().join("sub")).unwrap();
        write(&temp.path().join("sub"), "c.go", "package sub\n");

        let names: Vec<_> = go_files(temp.path(), false)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.go", "b.go"]);

        let with_tests = go_files(temp.path(), true).unwrap();
        assert_eq!(with_tests.len(), 3);
    }

    #[test]
    fn test_load_dir_groups_by_package_clause() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.go", "package p\n\ntype A int\n");
        write(temp.path(), "main.go", "package main\n\nfunc main() {}\n");
        write(temp.path(), "z.go", "package p\n\ntype Z int\n");

        let mut parser = GoParser::new().unwrap();
        let packages = load_dir(&mut parser, temp.path(), false).unwrap();

        assert_eq!(packages.keys().collect::<Vec<_>>(), vec!["main", "p"]);
        assert_eq!(packages["p"].len(), 2);
    }

    #[test]
    fn test_resolve_falls_back_to_goroot() {
        let goroot = TempDir::new().unwrap();
        let pkg = goroot.path().join("src").join("fakepkg");
        fs::create_dir_all(&pkg).unwrap();

        let target = resolve("fakepkg", Some(goroot.path())).unwrap();
        assert_eq!(target, Target::Dir(pkg));

        let err = resolve("definitely/not/here", None).unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
    }
}
