//! Fitting text into a wrap box
//!
//! Text is word-wrapped to the box width. If the wrapped block is still too
//! tall, the size is reduced step by step down to a floor, and as a last
//! resort the block is cut and ellipsized. Fitting never fails: a slightly
//! crowded card is better than a missing one.

/// Measures text for a font at a pixel size.
pub trait TextMeasure {
    /// Advance width of a single line in pixels.
    fn advance(&self, text: &str, px: f32) -> f32;

    /// Distance between consecutive baselines in pixels.
    fn line_height(&self, px: f32) -> f32;
}

/// Fixed-advance measure: every character is `advance_ratio × px` wide.
///
/// Stands in for real font metrics where no font file is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonoMeasure {
    pub advance_ratio: f32,
    pub line_ratio: f32,
}

impl Default for MonoMeasure {
    fn default() -> Self {
        Self { advance_ratio: 0.5, line_ratio: 1.2 }
    }
}

impl TextMeasure for MonoMeasure {
    fn advance(&self, text: &str, px: f32) -> f32 {
        text.chars().count() as f32 * self.advance_ratio * px
    }

    fn line_height(&self, px: f32) -> f32 {
        self.line_ratio * px
    }
}

/// How far fitting may shrink text before truncating it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitPolicy {
    /// Smallest size as a fraction of the requested size, in `(0, 1]`
    pub min_scale: f32,
}

impl Default for FitPolicy {
    fn default() -> Self {
        Self { min_scale: 0.6 }
    }
}

/// Text broken into lines that fit a box.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub lines: Vec<String>,
    /// Pixel size the lines were fitted at
    pub px: f32,
    /// Whether lines were dropped to fit the box height
    pub truncated: bool,
}

const ELLIPSIS: &str = "...";

/// Wrap `text` into lines no wider than `max_width`.
///
/// Explicit newlines start a new line. A word wider than the box is broken
/// between characters.
pub fn wrap_lines<M: TextMeasure + ?Sized>(measure: &M, text: &str, px: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() { word.to_string() } else { format!("{current} {word}") };
            if measure.advance(&candidate, px) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measure.advance(word, px) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(measure, word, px, max_width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(current);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Split a single word into pieces no wider than `max_width`, one char minimum.
fn break_word<M: TextMeasure + ?Sized>(measure: &M, word: &str, px: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        if measure.advance(&piece, px) > max_width && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    pieces.push(piece);
    pieces
}

/// Height of a block of `lines` lines.
pub fn block_height<M: TextMeasure + ?Sized>(measure: &M, lines: usize, px: f32) -> f32 {
    lines as f32 * measure.line_height(px)
}

/// Fit `text` into a `width × height` pixel box starting from size `px`.
pub fn fit_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    px: f32,
    width: f32,
    height: f32,
    policy: FitPolicy,
) -> FittedText {
    let floor = (px * policy.min_scale.clamp(f32::EPSILON, 1.0)).max(1.0);
    let mut size = px;

    loop {
        let lines = wrap_lines(measure, text, size, width);
        if block_height(measure, lines.len(), size) <= height {
            return FittedText { lines, px: size, truncated: false };
        }
        if size - 1.0 < floor {
            break;
        }
        size -= 1.0;
    }

    let mut lines = wrap_lines(measure, text, size, width);
    let keep = ((height / measure.line_height(size)).floor() as usize).clamp(1, lines.len().max(1));
    lines.truncate(keep);
    if let Some(last) = lines.last_mut() {
        *last = ellipsize(measure, last, size, width);
    }

    FittedText { lines, px: size, truncated: true }
}

/// Shorten `line` until it fits `width` with a trailing ellipsis.
fn ellipsize<M: TextMeasure + ?Sized>(measure: &M, line: &str, px: f32, width: f32) -> String {
    let mut kept = line.trim_end().to_string();
    while !kept.is_empty() && measure.advance(&format!("{kept}{ELLIPSIS}"), px) > width {
        match kept.rsplit_once(' ') {
            Some((head, _)) => kept = head.trim_end().to_string(),
            None => {
                kept.pop();
            }
        }
    }
    format!("{kept}{ELLIPSIS}")
}
