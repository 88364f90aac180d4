// logtrim - core/dedup.rs
//
// Multi-pass, window-growing greedy deduplication of log text.
//
// A single pass partitions the input lines into fixed-size blocks and drops
// each block that repeats the immediately preceding kept block except for
// its timestamp spans (keeping the newer occurrence). The driver runs one
// pass per block size from 1 up to the window size, feeding each pass's
// output into the next, so progressively larger repeating units collapse:
// pass 1 removes single-line repeats, pass 2 removes repeating pairs of
// already-deduplicated units, pass k removes k-unit groups.
//
// Greedy, not optimal: only adjacent blocks are compared, and the result is
// order-preserving. Core layer: pure functions, no I/O, no environment.

use crate::core::matcher::{Span, TimestampMatcher};
use crate::util::error::DedupError;

// =============================================================================
// Configuration
// =============================================================================

/// Effective deduplication configuration, constructed once at the boundary
/// and passed by reference into the driver. There is no hidden global or
/// environment state in this layer.
#[derive(Debug, Clone)]
pub struct DedupConfig {
    /// Compiled timestamp pattern shared by every pass.
    pub matcher: TimestampMatcher,

    /// Maximum block size attempted; passes run for every size from 1 up
    /// to it. `None` disables deduplication entirely.
    pub window_size: Option<usize>,

    /// Master switch. When false the pipeline is an identity transform
    /// regardless of `window_size`.
    pub enabled: bool,
}

impl DedupConfig {
    pub fn new(matcher: TimestampMatcher, window_size: Option<usize>) -> Self {
        Self {
            matcher,
            window_size,
            enabled: true,
        }
    }

    /// A configuration that passes text through unchanged.
    pub fn disabled(matcher: TimestampMatcher) -> Self {
        Self {
            matcher,
            window_size: None,
            enabled: false,
        }
    }

    /// True when applying this config can change the text at all.
    pub fn is_active(&self) -> bool {
        self.enabled && self.window_size.is_some_and(|w| w > 0)
    }

    /// Run the multi-pass driver with this configuration.
    pub fn apply(&self, text: &str) -> Result<String, DedupError> {
        if !self.enabled {
            return Ok(text.to_string());
        }
        compress_multi_pass(text, &self.matcher, self.window_size)
    }
}

// =============================================================================
// Blocker
// =============================================================================

/// Partition `lines` into consecutive groups of `block_size` lines, each
/// rendered as a single `\n`-joined string. The final group may be shorter
/// when the line count is not an exact multiple.
///
/// A `block_size` of zero is a validation error, never clamped.
/// Empty input yields an empty list.
pub fn make_blocks(lines: &[String], block_size: usize) -> Result<Vec<String>, DedupError> {
    if block_size == 0 {
        return Err(DedupError::InvalidBlockSize { block_size });
    }
    Ok(lines
        .chunks(block_size)
        .map(|chunk| chunk.join("\n"))
        .collect())
}

// =============================================================================
// Masking
// =============================================================================

/// Replace every byte inside each span with a space, leaving all other
/// bytes unchanged. Length-preserving for the single-byte characters the
/// timestamp patterns match. The result is used only for equality
/// comparison and is never emitted.
fn mask_spans(text: &str, spans: &[Span]) -> String {
    let mut masked = String::with_capacity(text.len());
    let mut last_end = 0;
    for span in spans {
        masked.push_str(&text[last_end..span.start]);
        for _ in 0..span.len() {
            masked.push(' ');
        }
        last_end = span.end;
    }
    masked.push_str(&text[last_end..]);
    masked
}

// =============================================================================
// PassCompressor
// =============================================================================

/// One greedy left-to-right merge sweep at a fixed block size.
///
/// The first block is always kept. Each subsequent block is compared with
/// the immediately preceding kept block; when both have the same span count
/// and the same span start offsets, and their masked texts are equal, the
/// block is a timestamp-only repeat and *overwrites* the previous entry so
/// the output always shows the most recent occurrence. Any structural
/// difference appends the block instead.
///
/// Span start offsets are compared but span *lengths* are not: this
/// tolerates timestamps whose rendered length varies run to run (e.g.
/// differing fractional-second precision). The flip side is that leftover
/// characters of a longer span can fall outside the shorter block's mask
/// and force a "different" verdict. Known limitation, kept as-is.
pub fn compress_pass(blocks: Vec<String>, matcher: &TimestampMatcher) -> Vec<String> {
    let mut blocks_iter = blocks.into_iter();
    let first = match blocks_iter.next() {
        Some(b) => b,
        None => return Vec::new(),
    };

    let mut prev_spans = matcher.find_spans(&first);
    let mut result = vec![first];

    for block in blocks_iter {
        let spans = matcher.find_spans(&block);

        // No spans on either side: cannot be a timestamp-only repeat.
        if prev_spans.is_empty() || spans.is_empty() {
            result.push(block);
            prev_spans = spans;
            continue;
        }

        if spans.len() != prev_spans.len() {
            result.push(block);
            prev_spans = spans;
            continue;
        }

        // Structural pre-check on start offsets only (lengths ignored).
        if spans
            .iter()
            .zip(prev_spans.iter())
            .any(|(s, p)| s.start != p.start)
        {
            result.push(block);
            prev_spans = spans;
            continue;
        }

        // Every block so far either appended to `result` or replaced its
        // last entry, so `result.last()` is the previous block in sequence
        // and `prev_spans` is exactly its span list.
        let prev_masked = mask_spans(result.last().expect("result is non-empty"), &prev_spans);
        let curr_masked = mask_spans(&block, &spans);

        if prev_masked == curr_masked {
            // Timestamp-only repeat: keep the newer occurrence.
            *result.last_mut().expect("result is non-empty") = block;
        } else {
            result.push(block);
        }
        prev_spans = spans;
    }

    result
}

// =============================================================================
// MultiPassDriver
// =============================================================================

/// Run greedy deduplication with passes from block size 1 up to
/// `window_size`, feeding each pass's kept block texts into the next pass
/// as opaque lines (a kept block may itself contain embedded newlines from
/// an earlier merge).
///
/// A `window_size` of `None` or 0 disables the transform and returns the
/// input unchanged, byte for byte.
pub fn compress_multi_pass(
    text: &str,
    matcher: &TimestampMatcher,
    window_size: Option<usize>,
) -> Result<String, DedupError> {
    let window_size = match window_size {
        Some(w) if w > 0 => w,
        _ => return Ok(text.to_string()),
    };

    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    for size in 1..=window_size {
        lines = compress_pass(make_blocks(&lines, size)?, matcher);
    }
    Ok(lines.join("\n"))
}
