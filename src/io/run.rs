//! Per-argument extraction driver used by the CLI.

use std::io::Write;
use std::path::Path;

use crate::config::Settings;
use crate::error::{SourceError, SourceResult};
use crate::extract;
use crate::parsing::GoParser;

use super::load::{self, Target};
use super::output::write_json;

/// Resolves arguments, extracts their packages and writes one JSON
/// document per package to `out`.
pub struct Runner<W: Write> {
    parser: GoParser,
    settings: Settings,
    out: W,
}

impl<W: Write> Runner<W> {
    pub fn new(settings: Settings, out: W) -> SourceResult<Self> {
        Ok(Self {
            parser: GoParser::new()?,
            settings,
            out,
        })
    }

    /// Handle one argument: a file, a directory or a standard library path.
    ///
    /// Returns the number of packages written.
    pub fn run(&mut self, arg: &str) -> SourceResult<usize> {
        let goroot = self.settings.goroot();
        let target = load::resolve(arg, goroot.as_deref())?;
        tracing::debug!("{arg} resolved to {}", target.path().display());
        match target {
            Target::File(path) => self.run_file(&path).map(|()| 1),
            Target::Dir(path) => self.run_dir(&path),
        }
    }

    fn run_file(&mut self, path: &Path) -> SourceResult<()> {
        let source = self.parser.parse_file(path)?;
        let extraction = extract::file(&source, &self.settings.collect)?;
        write_json(&mut self.out, &extraction.package, &self.settings.output.indent)
    }

    fn run_dir(&mut self, dir: &Path) -> SourceResult<usize> {
        let packages = load::load_dir(
            &mut self.parser,
            dir,
            self.settings.discovery.include_tests,
        )?;
        if packages.is_empty() {
            tracing::warn!("no Go files in {}", dir.display());
        }

        for (name, files) in &packages {
            tracing::debug!("extracting package {name} ({} files)", files.len());
            let extraction = extract::package(files, &self.settings.collect)
                .map_err(|incomplete| SourceError::Collect(incomplete.source))?;
            write_json(&mut self.out, &extraction.package, &self.settings.output.indent)?;
        }
        Ok(packages.len())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
