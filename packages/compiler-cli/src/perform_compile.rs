//! Perform Compile
//!
//! Input discovery and batch compilation. Every workspace file gets its own
//! generation session; files are compiled in parallel.

use anyhow::Context;
use block_compiler::{CodeGenerator, Workspace};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::ProjectConfig;

/// A file that could not be compiled.
#[derive(Debug)]
pub struct CompileFailure {
    pub input: PathBuf,
    pub error: anyhow::Error,
}

/// Compilation result.
#[derive(Debug, Default)]
pub struct CompilationResult {
    /// Generated files, in input order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<CompileFailure>,
}

impl CompilationResult {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Discover files matching include patterns and excluding exclude patterns.
/// Results are sorted and free of duplicates.
pub fn discover_files(base_dir: &Path, include: &[String], exclude: &[String]) -> Vec<PathBuf> {
    let excluded: Vec<glob::Pattern> = exclude
        .iter()
        .filter_map(|excl| {
            let pattern = base_dir.join(excl);
            match glob::Pattern::new(&pattern.to_string_lossy()) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!("invalid exclude pattern '{}': {}", excl, e);
                    None
                }
            }
        })
        .collect();

    let mut files = Vec::new();
    for pattern in include {
        let full_pattern = base_dir.join(pattern);
        let paths = match glob::glob(&full_pattern.to_string_lossy()) {
            Ok(paths) => paths,
            Err(e) => {
                tracing::warn!("invalid glob pattern '{}': {}", pattern, e);
                continue;
            }
        };
        for path in paths.flatten() {
            if path.is_file() && !excluded.iter().any(|p| p.matches_path(&path)) {
                files.push(path);
            }
        }
    }
    files.sort();
    files.dedup();
    files
}

/// Output path of `input`: its location relative to `base_dir` under
/// `out_dir`, with every extension replaced by `.rs`.
pub fn output_path(input: &Path, base_dir: &Path, out_dir: &Path) -> PathBuf {
    let relative = input
        .strip_prefix(base_dir)
        .ok()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.file_name().map(PathBuf::from).unwrap_or_default());
    let stem = relative
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .unwrap_or("main")
        .to_string();
    out_dir.join(relative.with_file_name(format!("{}.rs", stem)))
}

/// Compile one workspace file and write the result to `output`.
pub fn compile_file(generator: &CodeGenerator, input: &Path, output: &Path) -> anyhow::Result<()> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let workspace = Workspace::from_json(&json)
        .with_context(|| format!("failed to load workspace {}", input.display()))?;
    let code = generator
        .workspace_to_code(&workspace)
        .with_context(|| format!("failed to generate code for {}", input.display()))?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(output, code).with_context(|| format!("failed to write {}", output.display()))?;
    tracing::debug!(input = %input.display(), output = %output.display(), "compiled");
    Ok(())
}

/// Compile `files` in parallel into `out_dir`.
pub fn perform_compilation(
    files: &[PathBuf],
    base_dir: &Path,
    out_dir: &Path,
    generator: &CodeGenerator,
) -> CompilationResult {
    let start = Instant::now();
    tracing::info!("compiling {} workspace file(s)", files.len());

    let outcomes: Vec<(PathBuf, anyhow::Result<PathBuf>)> = files
        .par_iter()
        .map(|input| {
            let output = output_path(input, base_dir, out_dir);
            let outcome = compile_file(generator, input, &output).map(|()| output);
            (input.clone(), outcome)
        })
        .collect();

    let mut result = CompilationResult::default();
    for (input, outcome) in outcomes {
        match outcome {
            Ok(output) => result.written.push(output),
            Err(error) => result.failures.push(CompileFailure { input, error }),
        }
    }

    tracing::info!(
        written = result.written.len(),
        failed = result.failures.len(),
        "compilation finished in {:?}",
        start.elapsed()
    );
    result
}

/// Compile every input of the project at `project`. Explicit `inputs` replace
/// the project's patterns; `out_dir` replaces its output directory.
pub fn perform_project_compilation(
    project: &Path,
    inputs: &[PathBuf],
    out_dir: Option<&Path>,
    overrides: impl FnOnce(&mut ProjectConfig),
) -> anyhow::Result<CompilationResult> {
    let (mut config, base_dir) = ProjectConfig::resolve(project)?;
    overrides(&mut config);

    let files = if inputs.is_empty() {
        discover_files(&base_dir, &config.inputs, &config.exclude)
    } else {
        inputs.to_vec()
    };
    if files.is_empty() {
        tracing::warn!("no workspace files found under {}", base_dir.display());
    }

    let out_dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => config.out_dir(&base_dir),
    };
    let generator = CodeGenerator::new(config.generator);
    Ok(perform_compilation(&files, &base_dir, &out_dir, &generator))
}
