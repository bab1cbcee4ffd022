//! Text metrics engine – approximates rendered text width without a font
//! shaping call.
//!
//! Every character falls into one of three width buckets (narrow, normal,
//! wide) with a fixed per-bucket coefficient, and the summed width is
//! inflated by a small safety factor so estimates err toward under-fitting
//! rather than overflowing. Both drawing targets route every truncation and
//! wrapping decision through these functions with the same constants, which
//! is what keeps the preview and the PDF breaking lines in the same places.
//!
//! The exact coefficients are part of the cross-target contract; do not tune
//! them independently of the tests below.

/// Characters measurably narrower than the average glyph.
const NARROW_CHARS: &str = "ijl.,:;'()[]{}";
/// Characters measurably wider than the average glyph.
const WIDE_CHARS: &str = "mwWQAMNO%#@&";

const NARROW_COEF: f32 = 0.30;
const NORMAL_COEF: f32 = 0.52;
const WIDE_COEF: f32 = 0.72;

/// Inflation applied to every measurement.
const SAFETY_FACTOR: f32 = 1.05;

/// The ellipsis appended by [`truncate_with_ellipsis`].
pub const ELLIPSIS: char = '\u{2026}';

fn char_coefficient(c: char) -> f32 {
    if NARROW_CHARS.contains(c) {
        NARROW_COEF
    } else if WIDE_CHARS.contains(c) {
        WIDE_COEF
    } else {
        NORMAL_COEF
    }
}

/// Approximate rendered width of `text` at `font_size`, in points.
pub fn measure(text: &str, font_size: f32) -> f32 {
    let raw: f32 = text.chars().map(char_coefficient).sum();
    raw * font_size * SAFETY_FACTOR
}

/// Longest prefix of `text` that fits in `max_width` with an ellipsis
/// appended. If even one character plus the ellipsis does not fit, the first
/// character plus the ellipsis is returned anyway, so non-empty input never
/// yields an empty result.
pub fn truncate_with_ellipsis(text: &str, max_width: f32, font_size: f32) -> String {
    if text.is_empty() || measure(text, font_size) <= max_width {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let ellipsis_w = measure(&ELLIPSIS.to_string(), font_size);

    let fits = |len: usize| -> bool {
        let prefix: String = chars[..len].iter().collect();
        measure(&prefix, font_size) + ellipsis_w <= max_width
    };

    // Binary search for the longest fitting prefix length.
    let mut lo = 0usize;
    let mut hi = chars.len();
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    let keep = lo.max(1);
    let mut out: String = chars[..keep].iter().collect();
    out.push(ELLIPSIS);
    out
}

/// Greedy word-wrap of `text` into lines no wider than `max_width`.
///
/// Existing newlines always start a new line. A single word that alone
/// exceeds `max_width` is hard-split character by character, with a hyphen
/// appended to every fragment but the last. Always returns at least one
/// line; the empty string wraps to `vec![""]`.
pub fn wrap_lines(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in &words {
            let candidate = if current.is_empty() {
                (*word).to_string()
            } else {
                format!("{current} {word}")
            };

            if measure(&candidate, font_size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if measure(word, font_size) > max_width {
                let mut fragments = hard_split(word, max_width, font_size);
                // The last fragment stays open so following words can join it.
                current = fragments.pop().unwrap_or_default();
                lines.append(&mut fragments);
            } else {
                current = (*word).to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Split an unbreakable word into fragments that each fit `max_width`,
/// appending a hyphen to every fragment but the last. Each fragment keeps at
/// least one character so the split always makes progress.
fn hard_split(word: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();

    for c in word.chars() {
        let mut candidate = current.clone();
        candidate.push(c);
        candidate.push('-');
        if !current.is_empty() && measure(&candidate, font_size) > max_width {
            current.push('-');
            fragments.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        fragments.push(current);
    }
    fragments
}
