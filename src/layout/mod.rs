//! Card text layout
//!
//! Turns a card's stats into an ordered list of [`DrawInstruction`]s. A fixed
//! header step (name, tags, numeric stats, card number) always runs first;
//! the ability/mode block after it is a generic pass over the template of the
//! card's [`CardFormat`].
//!
//! Coordinates are layout units on a 16×23 card grid. Point sizes are
//! authored for a 64px unit and scale with the configured unit size.

mod templates;

use serde::Serialize;

pub use crate::format::LayoutError;
use crate::format::{classify, CardFormat};
use crate::stats::{CardStats, Field};
pub use templates::{template, Slot};

/// Card width in layout units.
pub const CARD_WIDTH_UNITS: f32 = 16.0;
/// Card height in layout units.
pub const CARD_HEIGHT_UNITS: f32 = 23.0;
/// Pixel size of a layout unit that point sizes are authored against.
pub const REFERENCE_UNIT_PX: u32 = 64;

/// A position in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a wrap box in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxSize {
    pub width: f32,
    pub height: f32,
}

impl BoxSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Font role; the compositor maps each role to a font asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRole {
    /// Bold face for names and headers
    Title,
    /// Plain face for descriptive text
    Body,
}

/// Alignment of each line within a wrapped block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Horizontal anchor of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAnchor {
    Left,
    Middle,
    Right,
}

/// Vertical anchor of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAnchor {
    /// Top of the first line's ascender
    Ascender,
    /// Vertical centre of the block
    Middle,
    /// Baseline of the last line
    Baseline,
}

/// Which point of a text block sits on the instruction's position.
///
/// Written as two-letter codes: `l`/`m`/`r` then `a`/`m`/`s`, e.g. `"mm"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub horizontal: HAnchor,
    pub vertical: VAnchor,
}

impl Anchor {
    pub const MIDDLE: Anchor = Anchor::new(HAnchor::Middle, VAnchor::Middle);
    pub const MIDDLE_TOP: Anchor = Anchor::new(HAnchor::Middle, VAnchor::Ascender);
    pub const LEFT_MIDDLE: Anchor = Anchor::new(HAnchor::Left, VAnchor::Middle);
    pub const LEFT_BASELINE: Anchor = Anchor::new(HAnchor::Left, VAnchor::Baseline);

    pub const fn new(horizontal: HAnchor, vertical: VAnchor) -> Self {
        Self { horizontal, vertical }
    }

    /// Parse a two-letter anchor code such as `"mm"` or `"ls"`.
    pub fn parse(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let horizontal = match chars.next()? {
            'l' => HAnchor::Left,
            'm' => HAnchor::Middle,
            'r' => HAnchor::Right,
            _ => return None,
        };
        let vertical = match chars.next()? {
            'a' => VAnchor::Ascender,
            'm' => VAnchor::Middle,
            's' => VAnchor::Baseline,
            _ => return None,
        };
        if chars.next().is_some() {
            return None;
        }
        Some(Self { horizontal, vertical })
    }

    pub fn code(&self) -> &'static str {
        match (self.horizontal, self.vertical) {
            (HAnchor::Left, VAnchor::Ascender) => "la",
            (HAnchor::Left, VAnchor::Middle) => "lm",
            (HAnchor::Left, VAnchor::Baseline) => "ls",
            (HAnchor::Middle, VAnchor::Ascender) => "ma",
            (HAnchor::Middle, VAnchor::Middle) => "mm",
            (HAnchor::Middle, VAnchor::Baseline) => "ms",
            (HAnchor::Right, VAnchor::Ascender) => "ra",
            (HAnchor::Right, VAnchor::Middle) => "rm",
            (HAnchor::Right, VAnchor::Baseline) => "rs",
        }
    }
}

impl Serialize for Anchor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// One piece of text to stamp onto the card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawInstruction {
    /// Field the text was taken from
    pub field: Field,
    pub text: String,
    pub role: FontRole,
    /// Point size at the reference unit size
    pub size: f32,
    pub position: Point,
    pub wrap: BoxSize,
    pub align: Align,
    pub anchor: Anchor,
}

/// The resolved format of a card and everything to draw for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardLayout {
    pub format: CardFormat,
    pub instructions: Vec<DrawInstruction>,
}

/// Classify a card and lay out all of its text.
pub fn layout_card(stats: &CardStats) -> CardLayout {
    let format = classify(stats);
    CardLayout { format, instructions: render(format, stats) }
}

/// Header instructions followed by the format's ability/mode block.
pub fn render(format: CardFormat, stats: &CardStats) -> Vec<DrawInstruction> {
    let mut instructions = header(stats);
    instructions.extend(ability_block(format, stats));
    instructions
}

/// Integer-keyed entry point for [`render`].
///
/// An id outside `0..=10` means the caller's format ids are out of sync with
/// the template table and is rejected.
pub fn render_format(id: u8, stats: &CardStats) -> Result<Vec<DrawInstruction>, LayoutError> {
    let format = CardFormat::try_from(id)?;
    Ok(render(format, stats))
}

/// Ability and mode instructions of one format.
///
/// Each template slot is emitted only if its own field is present.
pub fn ability_block(format: CardFormat, stats: &CardStats) -> Vec<DrawInstruction> {
    template(format).iter().filter_map(|slot| slot.emit(stats)).collect()
}

const NAME_SIZE: f32 = 44.0;
const NAME_WITH_TAGS_SIZE: f32 = 36.0;
const TAGS_SIZE: f32 = 20.0;
const STAT_SIZE: f32 = 40.0;
const NUMBER_SIZE: f32 = 20.0;

/// Numeric stat centred on its badge.
const fn stat(field: Field, x: f32, y: f32) -> Slot {
    Slot::new(
        field,
        FontRole::Title,
        STAT_SIZE,
        Point::new(x, y),
        BoxSize::new(4.0, 4.0),
        Align::Center,
        Anchor::MIDDLE,
    )
}

/// Centred header line spanning the width left of the cost badge.
const fn header_line(field: Field, size: f32, y: f32, height: f32) -> Slot {
    Slot::new(
        field,
        FontRole::Body,
        size,
        Point::new(6.5, y),
        BoxSize::new(12.0, height),
        Align::Center,
        Anchor::MIDDLE,
    )
}

const HEADER_STATS: [Slot; 3] = [
    stat(Field::Cost, 14.8, 1.2),
    stat(Field::Attack, 14.9, 22.0),
    stat(Field::Health, 12.9, 22.0),
];

const CARD_NUMBER: Slot = Slot::new(
    Field::PokedexNumber,
    FontRole::Body,
    NUMBER_SIZE,
    Point::new(0.3, 22.7),
    BoxSize::new(2.0, 1.0),
    Align::Left,
    Anchor::LEFT_BASELINE,
);

/// Format-independent instructions: name, tags, numeric stats, card number.
///
/// The name moves up and shrinks when a tag line is present.
pub fn header(stats: &CardStats) -> Vec<DrawInstruction> {
    let tagged = stats.has(Field::Tags);
    let name = if tagged {
        header_line(Field::Name, NAME_WITH_TAGS_SIZE, 1.0, 1.0)
    } else {
        header_line(Field::Name, NAME_SIZE, 1.5, 1.5)
    };
    let tags = header_line(Field::Tags, TAGS_SIZE, 2.0, 0.5);

    [name, tags]
        .iter()
        .chain(HEADER_STATS.iter())
        .chain(std::iter::once(&CARD_NUMBER))
        .filter_map(|slot| slot.emit(stats))
        .collect()
}
