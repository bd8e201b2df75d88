//! One-call extraction entry points.
//!
//! Both functions collect, then build with the method merge and visibility
//! filter configured in [`CollectConfig`].

use thiserror::Error;

use crate::collect::{Collector, Diagnostics, File, Package, PackageBuilder};
use crate::config::CollectConfig;
use crate::error::{CollectError, CollectResult};
use crate::syntax::SourceFile;

/// Built package plus the findings reported while collecting it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub package: Package,
    pub diagnostics: Diagnostics,
}

/// A package whose collection stopped at a failing file.
///
/// `partial` holds every file collected before the failure, built like a
/// complete package.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct Incomplete {
    pub partial: Extraction,
    pub source: CollectError,
}

/// Collect all files of one package.
pub fn package(
    files: &[SourceFile],
    config: &CollectConfig,
) -> Result<Extraction, Box<Incomplete>> {
    let mut collector = Collector::new(config);
    let mut collected = Package::new();
    let outcome = collector.collect_from_package(&mut collected, files);

    let extraction = Extraction {
        package: PackageBuilder::with_package(collected, config).build(),
        diagnostics: collector.into_diagnostics(),
    };
    match outcome {
        Ok(()) => Ok(extraction),
        Err(source) => Err(Box::new(Incomplete {
            partial: extraction,
            source,
        })),
    }
}

/// Collect a single file as a package of one file.
pub fn file(source: &SourceFile, config: &CollectConfig) -> CollectResult<Extraction> {
    let mut collector = Collector::new(config);
    let mut file = File::new();
    collector
        .collect_from_file(&mut file, source)
        .map_err(|e| e.in_file(source.path.as_str()))?;

    let mut builder = PackageBuilder::new(config);
    builder.add_file(file, source.path.as_str());
    Ok(Extraction {
        package: builder.build(),
        diagnostics: collector.into_diagnostics(),
    })
}

impl From<Box<Incomplete>> for CollectError {
    fn from(incomplete: Box<Incomplete>) -> Self {
        incomplete.source
    }
}
