//! Demo dataset generation and discovery
//!
//! Produces a small directory of text files for line counting demos. Files are
//! named `data{i}.txt` and every line reads `Line {j} of file {i}`, so the
//! expected line count of each file is known up front.

use crate::config::LinesConfig;
use crate::Result;
use anyhow::Context;
use rayon::prelude::*;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name prefix for generated files
pub const FILE_PREFIX: &str = "data";

/// File name extension for generated files
pub const FILE_EXTENSION: &str = "txt";

/// Path of generated file `index` inside `dir`
pub fn dummy_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{}{}.{}", FILE_PREFIX, index, FILE_EXTENSION))
}

/// Create `files` text files of `lines_per_file` lines each under `dir`
///
/// Creates `dir` (and parents) if needed and overwrites existing files with
/// the same names. Files are written in parallel. Returns the generated paths
/// sorted by name.
pub fn generate_dummy(dir: &Path, files: usize, lines_per_file: usize) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create dataset directory: {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = (0..files)
        .into_par_iter()
        .map(|i| -> Result<PathBuf> {
            let path = dummy_path(dir, i);
            write_dummy_file(&path, i, lines_per_file)?;
            debug!(path = %path.display(), lines = lines_per_file, "wrote dummy file");
            Ok(path)
        })
        .collect::<Result<Vec<_>>>()?;

    paths.sort();
    info!(dir = %dir.display(), files, lines_per_file, "generated dummy dataset");
    Ok(paths)
}

fn write_dummy_file(path: &Path, index: usize, lines: usize) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for j in 0..lines {
        writeln!(writer, "Line {} of file {}", j, index)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush file: {}", path.display()))?;
    Ok(())
}

/// List generated-style files (`data*.txt`) in `dir`, sorted by name
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read dataset directory: {}", dir.display()))?;

    let suffix = format!(".{}", FILE_EXTENSION);
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list: {}", dir.display()))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(FILE_PREFIX) && name.ends_with(&suffix) && entry.path().is_file() {
            paths.push(entry.path());
        }
    }

    paths.sort();
    Ok(paths)
}

/// Paths for the line counting round, in order
///
/// Explicit files win. Otherwise a requested demo dataset is generated and
/// exactly the generated files are used, so leftovers from a larger earlier
/// run in the same directory are not counted. Otherwise `data_dir` is
/// scanned with [`discover`]. With none of these the list is empty.
pub fn resolve_inputs(lines: &LinesConfig) -> Result<Vec<String>> {
    if !lines.files.is_empty() {
        return Ok(lines.files.clone());
    }

    let paths = if lines.make_dummy {
        let dummy = &lines.dummy;
        generate_dummy(&dummy.dir, dummy.files, dummy.lines_per_file)
            .context("Failed to generate dummy dataset")?
    } else if let Some(ref dir) = lines.data_dir {
        discover(dir)?
    } else {
        return Ok(Vec::new());
    };

    Ok(paths
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect())
}
