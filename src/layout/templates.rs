//! Per-format template table for the ability/mode block

use super::{Align, Anchor, BoxSize, DrawInstruction, FontRole, Point};
use crate::format::CardFormat;
use crate::stats::{CardStats, Field, ModeSlot};

/// Where and how one field is drawn within a template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub field: Field,
    pub role: FontRole,
    pub size: f32,
    pub position: Point,
    pub wrap: BoxSize,
    pub align: Align,
    pub anchor: Anchor,
}

impl Slot {
    pub const fn new(
        field: Field,
        role: FontRole,
        size: f32,
        position: Point,
        wrap: BoxSize,
        align: Align,
        anchor: Anchor,
    ) -> Self {
        Self { field, role, size, position, wrap, align, anchor }
    }

    /// Instruction for this slot, or `None` when its field is absent.
    pub fn emit(&self, stats: &CardStats) -> Option<DrawInstruction> {
        let text = stats.text(self.field)?;
        Some(DrawInstruction {
            field: self.field,
            text: text.into_owned(),
            role: self.role,
            size: self.size,
            position: self.position,
            wrap: self.wrap,
            align: self.align,
            anchor: self.anchor,
        })
    }
}

const ABILITY_NAME_SIZE: f32 = 32.0;
const ABILITY_SIZE: f32 = 30.0;
const MODE_NAME_SIZE: f32 = 27.0;
const MODE_SIZE: f32 = 25.0;

const ONE: ModeSlot = ModeSlot::One;
const TWO: ModeSlot = ModeSlot::Two;
const THREE: ModeSlot = ModeSlot::Three;

/// Centred ability name hanging from `y`.
const fn ability_name(y: f32, height: f32) -> Slot {
    Slot::new(
        Field::AbilityName,
        FontRole::Title,
        ABILITY_NAME_SIZE,
        Point::new(8.0, y),
        BoxSize::new(14.0, height),
        Align::Center,
        Anchor::MIDDLE_TOP,
    )
}

/// Centred ability description hanging from `y`.
const fn ability(y: f32, height: f32) -> Slot {
    Slot::new(
        Field::Ability,
        FontRole::Body,
        ABILITY_SIZE,
        Point::new(8.0, y),
        BoxSize::new(14.0, height),
        Align::Center,
        Anchor::MIDDLE_TOP,
    )
}

/// Full-width unnamed mode centred on `y`.
const fn mode(slot: ModeSlot, y: f32, height: f32) -> Slot {
    Slot::new(
        Field::ModeAbility(slot),
        FontRole::Body,
        MODE_SIZE,
        Point::new(8.0, y),
        BoxSize::new(14.0, height),
        Align::Center,
        Anchor::MIDDLE,
    )
}

/// Mode name in the left column.
const fn mode_name(slot: ModeSlot, y: f32, height: f32) -> Slot {
    Slot::new(
        Field::ModeName(slot),
        FontRole::Title,
        MODE_NAME_SIZE,
        Point::new(1.0, y),
        BoxSize::new(5.0, height),
        Align::Left,
        Anchor::LEFT_MIDDLE,
    )
}

/// Mode description in the right column, beside its name.
const fn named_mode(slot: ModeSlot, y: f32, height: f32) -> Slot {
    Slot::new(
        Field::ModeAbility(slot),
        FontRole::Body,
        MODE_SIZE,
        Point::new(6.0, y),
        BoxSize::new(9.0, height),
        Align::Left,
        Anchor::LEFT_MIDDLE,
    )
}

const DESCRIPTION: [Slot; 1] = [Slot::new(
    Field::Ability,
    FontRole::Body,
    ABILITY_SIZE,
    Point::new(8.0, 17.5),
    BoxSize::new(14.0, 8.0),
    Align::Center,
    Anchor::MIDDLE,
)];

const NAMED: [Slot; 2] = [ability_name(13.0, 2.0), ability(15.0, 6.0)];

const NAMED_TWO_MODES: [Slot; 4] = [
    ability_name(13.0, 2.0),
    ability(15.5, 2.0),
    mode(ONE, 18.5, 2.0),
    mode(TWO, 20.5, 2.0),
];

const NAMED_TWO_NAMED_MODES: [Slot; 6] = [
    ability_name(13.0, 2.0),
    ability(15.125, 2.0),
    mode_name(ONE, 18.5, 2.0),
    named_mode(ONE, 18.5, 2.0),
    mode_name(TWO, 20.5, 2.0),
    named_mode(TWO, 20.5, 2.0),
];

const NAMED_THREE_MODES: [Slot; 5] = [
    ability_name(13.0, 1.5),
    ability(14.5, 1.5),
    mode(ONE, 17.25, 1.5),
    mode(TWO, 19.0, 1.5),
    mode(THREE, 20.75, 1.5),
];

const NAMED_THREE_NAMED_MODES: [Slot; 8] = [
    ability_name(13.0, 1.5),
    ability(14.25, 1.1875),
    mode_name(ONE, 16.5, 2.0),
    named_mode(ONE, 16.5, 2.0),
    mode_name(TWO, 18.5, 2.0),
    named_mode(TWO, 18.5, 2.0),
    mode_name(THREE, 20.5, 2.0),
    named_mode(THREE, 20.5, 2.0),
];

const TWO_MODES: [Slot; 3] = [ability(13.0, 2.0), mode(ONE, 16.5, 3.0), mode(TWO, 19.5, 3.0)];

const TWO_NAMED_MODES: [Slot; 5] = [
    ability(14.0, 2.5),
    mode_name(ONE, 17.0, 2.5),
    named_mode(ONE, 17.0, 2.5),
    mode_name(TWO, 20.0, 2.5),
    named_mode(TWO, 20.0, 2.5),
];

const THREE_MODES: [Slot; 4] = [
    ability(12.5, 2.0),
    mode(ONE, 15.75, 2.0),
    mode(TWO, 18.0, 2.0),
    mode(THREE, 20.25, 2.0),
];

const THREE_NAMED_MODES: [Slot; 7] = [
    ability(12.5, 2.0),
    mode_name(ONE, 15.75, 2.0),
    named_mode(ONE, 15.75, 2.0),
    mode_name(TWO, 18.0, 2.0),
    named_mode(TWO, 18.0, 2.0),
    mode_name(THREE, 20.5, 2.0),
    named_mode(THREE, 20.5, 2.0),
];

const NAME_ONLY: [Slot; 1] = [Slot::new(
    Field::AbilityName,
    FontRole::Title,
    ABILITY_NAME_SIZE,
    Point::new(8.0, 17.5),
    BoxSize::new(14.0, 8.0),
    Align::Center,
    Anchor::MIDDLE,
)];

/// Template slots of a format, in drawing order.
pub fn template(format: CardFormat) -> &'static [Slot] {
    match format {
        CardFormat::Description => &DESCRIPTION,
        CardFormat::Named => &NAMED,
        CardFormat::NamedTwoModes => &NAMED_TWO_MODES,
        CardFormat::NamedTwoNamedModes => &NAMED_TWO_NAMED_MODES,
        CardFormat::NamedThreeModes => &NAMED_THREE_MODES,
        CardFormat::NamedThreeNamedModes => &NAMED_THREE_NAMED_MODES,
        CardFormat::TwoModes => &TWO_MODES,
        CardFormat::TwoNamedModes => &TWO_NAMED_MODES,
        CardFormat::ThreeModes => &THREE_MODES,
        CardFormat::ThreeNamedModes => &THREE_NAMED_MODES,
        CardFormat::NameOnly => &NAME_ONLY,
    }
}
