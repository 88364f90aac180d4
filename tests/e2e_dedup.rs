// logtrim - tests/e2e_dedup.rs
//
// End-to-end tests for the deduplication pipeline.
//
// These tests exercise real files on disk, real config resolution, and the
// full path from raw log text to the deduplicated output file -- no mocks,
// no stubs. Fixtures under tests/fixtures/ are captured from the kinds of
// Kubernetes and service logs the tool is pointed at in practice.

use logtrim::app::{pipeline, settings};
use logtrim::core::dedup::DedupConfig;
use logtrim::core::discovery::DiscoveryConfig;
use logtrim::core::matcher::TimestampMatcher;
use logtrim::util::error::LogTrimError;
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn config_with_window(window: Option<usize>) -> DedupConfig {
    DedupConfig::new(TimestampMatcher::default(), window)
}

// =============================================================================
// Single-file E2E
// =============================================================================

/// The Kubernetes events fixture collapses each timestamp-only repeat run
/// to its newest line while distinct lines survive in order.
#[test]
fn e2e_k8s_events_dedup() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.log");

    let report =
        pipeline::process_file(&fixture("k8s_events.log"), &output, &config_with_window(Some(3)))
            .unwrap();

    let result = fs::read_to_string(&output).unwrap();

    assert_eq!(result.matches("TLS disabled").count(), 1);
    assert_eq!(result.matches("Tune: setGCPercent to 100").count(), 1);
    assert!(result.contains("Your service/namespace does not exist"));
    assert!(result.contains("Serving on port 8083"));

    // Keep-latest: the survivors carry the newest timestamps of their runs.
    assert!(result.contains("04:36:34"), "newest TLS line survives");
    assert!(result.contains("04:36:36"), "newest Tune line survives");
    assert!(!result.contains("04:36:33"), "older TLS lines are gone");

    assert_eq!(report.lines_in, 7);
    assert_eq!(report.lines_out, 4);
}

/// A two-line unit repeating with only timestamps changed needs window 2:
/// pass 1 cannot merge it (the span structures of adjacent single lines
/// differ), pass 2 collapses the pairs.
#[test]
fn e2e_ticker_two_line_groups_collapse_at_window_two() {
    let dir = tempfile::tempdir().unwrap();

    let out_w1 = dir.path().join("w1.log");
    pipeline::process_file(&fixture("ticker.log"), &out_w1, &config_with_window(Some(1))).unwrap();
    assert_eq!(
        fs::read_to_string(&out_w1).unwrap().lines().count(),
        6,
        "window 1 leaves the interleaved pairs alone"
    );

    let out_w2 = dir.path().join("w2.log");
    pipeline::process_file(&fixture("ticker.log"), &out_w2, &config_with_window(Some(2))).unwrap();
    let result = fs::read_to_string(&out_w2).unwrap();
    assert_eq!(result.lines().count(), 2, "window 2 collapses the pairs");
    assert!(result.contains("18:41:29"), "newest pair survives");
    assert!(result.contains("18:41:30"));
    assert!(!result.contains("18:41:09"), "oldest pair is gone");
}

/// With no window from any source the tool is a byte-for-byte copy.
#[test]
fn e2e_disabled_passthrough_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.log");

    pipeline::process_file(&fixture("k8s_events.log"), &output, &config_with_window(None)).unwrap();

    assert_eq!(
        fs::read(&output).unwrap(),
        fs::read(fixture("k8s_events.log")).unwrap(),
        "disabled run must copy the input exactly"
    );
}

/// Re-running on the output with the same config yields the output
/// unchanged: the passes have already exhausted the window.
#[test]
fn e2e_idempotent_at_fixed_config() {
    let dir = tempfile::tempdir().unwrap();
    let once = dir.path().join("once.log");
    let twice = dir.path().join("twice.log");
    let config = config_with_window(Some(3));

    pipeline::process_file(&fixture("k8s_events.log"), &once, &config).unwrap();
    pipeline::process_file(&once, &twice, &config).unwrap();

    assert_eq!(
        fs::read_to_string(&once).unwrap(),
        fs::read_to_string(&twice).unwrap()
    );
}

/// Missing input is a boundary error and no output file appears.
#[test]
fn e2e_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.log");

    let result = pipeline::process_file(
        &dir.path().join("absent.log"),
        &output,
        &config_with_window(Some(2)),
    );

    assert!(matches!(result, Err(LogTrimError::Io { .. })));
    assert!(!output.exists(), "no partial output may be written");
}

/// Output parent directories are created on demand.
#[test]
fn e2e_output_parents_created() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("a/b/c/out.log");

    pipeline::process_file(&fixture("ticker.log"), &output, &config_with_window(Some(1))).unwrap();
    assert!(output.exists());
}

/// A caller-supplied pattern replaces the built-in one wholesale.
#[test]
fn e2e_custom_timestamp_regex() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.log");
    let output = dir.path().join("out.log");
    fs::write(&input, "ts=100 cache miss\nts=101 cache miss\n").unwrap();

    let matcher = TimestampMatcher::new(r"ts=\d+").unwrap();
    let config = DedupConfig::new(matcher, Some(1));
    pipeline::process_file(&input, &output, &config).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "ts=101 cache miss");
}

/// An invalid pattern fails before any input is touched.
#[test]
fn e2e_invalid_pattern_fails_fast() {
    assert!(TimestampMatcher::new("[unclosed").is_err());
}

// =============================================================================
// Directory-mode E2E
// =============================================================================

/// Directory mode mirrors the input tree under the output root, applies the
/// same config to every file, and skips excluded artefacts.
#[test]
fn e2e_directory_mode_mirrors_tree() {
    let dir = tempfile::tempdir().unwrap();
    let input_root = dir.path().join("in");
    let output_root = dir.path().join("out");

    fs::create_dir_all(input_root.join("pods")).unwrap();
    fs::copy(fixture("k8s_events.log"), input_root.join("events.log")).unwrap();
    fs::copy(fixture("ticker.log"), input_root.join("pods/ticker.log")).unwrap();
    fs::write(input_root.join("archive.log.gz"), "binary blob").unwrap();

    let report = pipeline::process_tree(
        &input_root,
        &output_root,
        &config_with_window(Some(2)),
        &DiscoveryConfig::default(),
    )
    .unwrap();

    assert_eq!(report.files.len(), 2);
    assert!(report.failures.is_empty());
    assert!(output_root.join("events.log").exists());
    assert!(output_root.join("pods/ticker.log").exists());
    assert!(
        !output_root.join("archive.log.gz").exists(),
        "excluded files are not processed"
    );

    let ticker = fs::read_to_string(output_root.join("pods/ticker.log")).unwrap();
    assert_eq!(ticker.lines().count(), 2, "dedup applied inside the tree");
}

/// A nonexistent directory root is fatal, unlike per-file failures.
#[test]
fn e2e_directory_mode_invalid_root() {
    let dir = tempfile::tempdir().unwrap();
    let result = pipeline::process_tree(
        &dir.path().join("absent"),
        &dir.path().join("out"),
        &config_with_window(Some(1)),
        &DiscoveryConfig::default(),
    );
    assert!(matches!(result, Err(LogTrimError::Discovery(_))));
}

// =============================================================================
// Window-size precedence E2E
// =============================================================================

/// The documented precedence chain end-to-end: flag beats environment beats
/// config file; an explicit zero at a higher level switches dedup off.
#[test]
fn e2e_window_size_precedence() {
    assert_eq!(
        settings::resolve_window_size(Some(1), Some("2"), Some(3)),
        Some(1)
    );
    assert_eq!(settings::resolve_window_size(None, Some("2"), Some(3)), Some(2));
    assert_eq!(settings::resolve_window_size(None, None, Some(3)), Some(3));
    assert_eq!(settings::resolve_window_size(None, None, None), None);
    assert_eq!(settings::resolve_window_size(Some(0), Some("2"), Some(3)), None);

    // The resolved value drives the pipeline: None means passthrough.
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.log");
    let output = dir.path().join("out.log");
    fs::write(&input, "18:41:09 poll\n18:41:10 poll\n").unwrap();

    let window = settings::resolve_window_size(None, Some("not-a-number"), None);
    let config = config_with_window(window);
    pipeline::process_file(&input, &output, &config).unwrap();
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "18:41:09 poll\n18:41:10 poll\n",
        "unparseable env with no other source leaves the text untouched"
    );
}
