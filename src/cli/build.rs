//! The `build` subcommand.
//!
//! A single file compiles to a single destination. A directory is walked and
//! mirrored into the output directory: stylesheets compile to `.css` and every
//! other file is copied as-is. Files are independent, so they compile in
//! parallel and every failure is collected rather than stopping the walk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{engine::Compiler, errors::TaillessError};

/// Resolved `build` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Stylesheet extension, without the dot.
    pub extension: String,
    pub copy_assets: bool,
}

impl BuildConfig {
    /// Validates the arguments and fills in the default output path.
    pub fn resolve(
        input: PathBuf,
        output: Option<PathBuf>,
        extension: &str,
        copy_assets: bool,
    ) -> Result<Self, String> {
        if !input.exists() {
            return Err(format!("Input '{}' does not exist", input.display()));
        }

        let output = match output {
            Some(output) => output,
            None if input.is_dir() => {
                return Err("Building a directory requires --output".to_string());
            }
            None => input.with_extension("css"),
        };
        if input.is_dir() && output.is_file() {
            return Err(format!("Output '{}' must be a directory", output.display()));
        }

        Ok(Self {
            input,
            output,
            extension: extension.trim_start_matches('.').to_string(),
            copy_assets,
        })
    }

    fn is_stylesheet(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
    }
}

/// One unit of work found by the directory walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    Compile { src: PathBuf, dest: PathBuf },
    Copy { src: PathBuf, dest: PathBuf },
}

impl Job {
    pub fn source(&self) -> &Path {
        match self {
            Job::Compile { src, .. } | Job::Copy { src, .. } => src,
        }
    }

    fn run(&self, compiler: &Compiler<'_>) -> Result<(), TaillessError> {
        match self {
            Job::Compile { src, dest } => compiler.compile_file(src, dest),
            Job::Copy { src, dest } => copy_file(src, dest),
        }
    }
}

/// Outcome of a build: the jobs that succeeded and the failures, in walk order.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub compiled: usize,
    pub copied: usize,
    pub failures: Vec<(PathBuf, TaillessError)>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Lists the jobs for `config`, in walk order.
pub fn plan(config: &BuildConfig) -> Result<Vec<Job>, TaillessError> {
    if config.input.is_file() {
        return Ok(vec![Job::Compile {
            src: config.input.clone(),
            dest: config.output.clone(),
        }]);
    }

    let mut jobs = Vec::new();
    for entry in WalkDir::new(&config.input).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(&config.input).to_path_buf();
            TaillessError::read_failed(&path, &e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let src = entry.path().to_path_buf();
        let relative = src.strip_prefix(&config.input).unwrap_or(&src);
        let dest = config.output.join(relative);

        if config.is_stylesheet(&src) {
            jobs.push(Job::Compile {
                src,
                dest: dest.with_extension("css"),
            });
        } else if config.copy_assets {
            jobs.push(Job::Copy { src, dest });
        }
    }
    Ok(jobs)
}

pub fn build(config: &BuildConfig, compiler: &Compiler<'_>) -> Result<BuildReport, TaillessError> {
    let jobs = plan(config)?;
    info!(jobs = jobs.len(), input = %config.input.display(), "starting build");

    let results: Vec<(&Job, Result<(), TaillessError>)> =
        jobs.par_iter().map(|job| (job, job.run(compiler))).collect();

    let mut report = BuildReport::default();
    for (job, result) in results {
        match (job, result) {
            (Job::Compile { .. }, Ok(())) => report.compiled += 1,
            (Job::Copy { .. }, Ok(())) => report.copied += 1,
            (job, Err(error)) => report.failures.push((job.source().to_path_buf(), error)),
        }
    }
    debug!(
        compiled = report.compiled,
        copied = report.copied,
        failed = report.failures.len(),
        "finished build"
    );
    Ok(report)
}

fn copy_file(src: &Path, dest: &Path) -> Result<(), TaillessError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| TaillessError::write_failed(dest, &e))?;
    }
    fs::copy(src, dest).map_err(|e| TaillessError::write_failed(dest, &e))?;
    Ok(())
}
