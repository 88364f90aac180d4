// logtrim - app/pipeline.rs
//
// File and directory processing. Owns all file-content I/O: the core layer
// sees only in-memory strings.
//
// Single-file mode reads the input (invalid UTF-8 replaced, never
// rejected), runs the deduplicator, creates the output's parent
// directories, and writes the result. Directory mode discovers log files
// under the input root and processes each one onto the mirrored relative
// path under the output root; files are independent, so they run on a
// rayon parallel iterator. Per-file failures in a batch are non-fatal.

use crate::core::dedup::DedupConfig;
use crate::core::discovery::{self, DiscoveryConfig};
use crate::util::error::{LogTrimError, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

// =============================================================================
// Reports
// =============================================================================

/// Outcome of one deduplicated file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub lines_in: usize,
    pub lines_out: usize,
    pub bytes_in: usize,
    pub bytes_out: usize,
}

impl FileReport {
    /// Percentage of input lines removed by deduplication.
    pub fn reduction_pct(&self) -> f64 {
        if self.lines_in == 0 {
            return 0.0;
        }
        (self.lines_in - self.lines_out) as f64 / self.lines_in as f64 * 100.0
    }
}

/// Outcome of a directory run.
#[derive(Debug)]
pub struct BatchReport {
    /// Successfully processed files.
    pub files: Vec<FileReport>,
    /// Non-fatal discovery warnings (inaccessible entries, truncation).
    pub warnings: Vec<String>,
    /// Per-file failures; the batch keeps going past them.
    pub failures: Vec<String>,
}

impl BatchReport {
    pub fn lines_in(&self) -> usize {
        self.files.iter().map(|f| f.lines_in).sum()
    }

    pub fn lines_out(&self) -> usize {
        self.files.iter().map(|f| f.lines_out).sum()
    }
}

// =============================================================================
// Single file
// =============================================================================

/// Deduplicate one file onto `output`.
///
/// The input is decoded with invalid UTF-8 bytes replaced rather than
/// rejected -- crashed services write torn lines, and a replacement
/// character still deduplicates correctly. Parent directories of `output`
/// are created as needed. Nothing is written when reading or deduplication
/// fails.
pub fn process_file(input: &Path, output: &Path, dedup: &DedupConfig) -> Result<FileReport> {
    let bytes = std::fs::read(input).map_err(|e| LogTrimError::Io {
        path: input.to_path_buf(),
        operation: "read",
        source: e,
    })?;
    let text = String::from_utf8_lossy(&bytes).into_owned();

    let deduped = dedup.apply(&text)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| LogTrimError::Io {
                path: parent.to_path_buf(),
                operation: "create parent directories",
                source: e,
            })?;
        }
    }

    std::fs::write(output, &deduped).map_err(|e| LogTrimError::Io {
        path: output.to_path_buf(),
        operation: "write",
        source: e,
    })?;

    let report = FileReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        lines_in: text.lines().count(),
        lines_out: deduped.lines().count(),
        bytes_in: text.len(),
        bytes_out: deduped.len(),
    };

    tracing::info!(
        input = %report.input.display(),
        output = %report.output.display(),
        lines_in = report.lines_in,
        lines_out = report.lines_out,
        bytes_in = report.bytes_in,
        bytes_out = report.bytes_out,
        reduction_pct = format!("{:.1}", report.reduction_pct()),
        "File deduplicated"
    );

    Ok(report)
}

// =============================================================================
// Directory mode
// =============================================================================

/// Deduplicate every discovered log file under `input_root`, writing each
/// result to the mirrored relative path under `output_root`.
///
/// Files are processed in parallel; each file's pass sequence remains
/// sequential. A file that fails to read or write is recorded in
/// `failures` and does not abort the batch. Returns `Err` only when the
/// input root itself is invalid.
pub fn process_tree(
    input_root: &Path,
    output_root: &Path,
    dedup: &DedupConfig,
    discovery_config: &DiscoveryConfig,
) -> Result<BatchReport> {
    let (discovered, warnings) = discovery::discover_files(input_root, discovery_config)?;

    tracing::info!(
        root = %input_root.display(),
        files = discovered.len(),
        "Directory run starting"
    );

    let outcomes: Vec<std::result::Result<FileReport, String>> = discovered
        .par_iter()
        .map(|file| {
            let relative = file.path.strip_prefix(input_root).map_err(|_| {
                format!(
                    "Discovered file '{}' is outside the input root",
                    file.path.display()
                )
            })?;
            let output = output_root.join(relative);
            process_file(&file.path, &output, dedup)
                .map_err(|e| format!("'{}': {e}", file.path.display()))
        })
        .collect();

    let mut files = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(report) => files.push(report),
            Err(msg) => {
                tracing::warn!(failure = %msg, "File skipped");
                failures.push(msg);
            }
        }
    }

    let report = BatchReport {
        files,
        warnings,
        failures,
    };

    tracing::info!(
        processed = report.files.len(),
        failed = report.failures.len(),
        lines_in = report.lines_in(),
        lines_out = report.lines_out(),
        "Directory run complete"
    );

    Ok(report)
}
