// logtrim - app/settings.rs
//
// Effective-setting resolution at the CLI boundary.
//
// The window size can arrive from three places. Precedence, highest first:
//   1. The explicit --window-size flag.
//   2. The LOGTRIM_WINDOW environment variable.
//   3. [dedup] window_size in config.toml.
// With none of them set, deduplication is disabled and the pipeline is an
// identity transform.
//
// Resolution is a pure function over the already-read source values so the
// precedence order is unit-testable without touching process state. The
// core library never reads the environment; the single env read happens in
// main() and its value is passed in here.

use crate::util::constants;

/// Resolve the effective window size from its three sources.
///
/// At each level: a parseable non-positive value is an explicit "off" and
/// stops the search; an unparseable or out-of-range value is skipped with a
/// warning and the next level is consulted.
pub fn resolve_window_size(
    flag: Option<usize>,
    env_value: Option<&str>,
    config_value: Option<usize>,
) -> Option<usize> {
    if let Some(window) = flag {
        match validate_window(window, "--window-size") {
            WindowValue::Active(w) => return Some(w),
            WindowValue::Off => return None,
            WindowValue::Skip => {}
        }
    }

    if let Some(raw) = env_value {
        match raw.trim().parse::<i64>() {
            Ok(parsed) if parsed <= 0 => {
                tracing::debug!(
                    var = constants::WINDOW_ENV_VAR,
                    value = parsed,
                    "Non-positive window from environment; deduplication off"
                );
                return None;
            }
            Ok(parsed) => match validate_window(parsed as usize, constants::WINDOW_ENV_VAR) {
                WindowValue::Active(w) => return Some(w),
                WindowValue::Off => return None,
                WindowValue::Skip => {}
            },
            Err(_) => {
                tracing::warn!(
                    var = constants::WINDOW_ENV_VAR,
                    value = raw,
                    "Unparseable window size in environment, ignoring"
                );
            }
        }
    }

    // Config-file values were already range-checked at load time.
    config_value
}

enum WindowValue {
    /// Positive, in-range window.
    Active(usize),
    /// Explicit zero: deduplication off, stop the search.
    Off,
    /// Out of range: warn and fall through to the next source.
    Skip,
}

fn validate_window(window: usize, source: &str) -> WindowValue {
    if window == 0 {
        tracing::debug!(source, "Window size 0; deduplication off");
        return WindowValue::Off;
    }
    if window > constants::ABSOLUTE_MAX_WINDOW_SIZE {
        tracing::warn!(
            source,
            window,
            max = constants::ABSOLUTE_MAX_WINDOW_SIZE,
            "Window size exceeds the maximum, ignoring this source"
        );
        return WindowValue::Skip;
    }
    WindowValue::Active(window)
}
