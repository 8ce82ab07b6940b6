//! Layout format classification
//!
//! Maps the sparse set of ability and mode fields of a card onto one of the
//! eleven text-layout templates. Resolution walks an ordered rule table and
//! the LAST satisfied rule wins; the order of [`RULES`] is therefore part of
//! the contract and must not be rearranged.

use std::fmt;

use serde::Serialize;

use crate::stats::{CardStats, Field, ModeSlot};

/// Error raised when an integer does not name a layout format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Format id outside `0..=10`; classifier and template table disagree.
    #[error("unknown layout format {0}, expected 0..=10")]
    UnknownFormat(u8),
}

/// The eleven text-layout templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum CardFormat {
    /// Ability description only
    Description,
    /// Ability name and description
    Named,
    /// Named ability with two unnamed modes
    NamedTwoModes,
    /// Named ability with two named modes
    NamedTwoNamedModes,
    /// Named ability with three unnamed modes
    NamedThreeModes,
    /// Named ability with three named modes
    NamedThreeNamedModes,
    /// Unnamed ability with two unnamed modes
    TwoModes,
    /// Unnamed ability with two named modes
    TwoNamedModes,
    /// Unnamed ability with three unnamed modes
    ThreeModes,
    /// Unnamed ability with three named modes
    ThreeNamedModes,
    /// Ability name without a description
    NameOnly,
}

impl CardFormat {
    /// Every format, ordered by id.
    pub const ALL: [CardFormat; 11] = [
        CardFormat::Description,
        CardFormat::Named,
        CardFormat::NamedTwoModes,
        CardFormat::NamedTwoNamedModes,
        CardFormat::NamedThreeModes,
        CardFormat::NamedThreeNamedModes,
        CardFormat::TwoModes,
        CardFormat::TwoNamedModes,
        CardFormat::ThreeModes,
        CardFormat::ThreeNamedModes,
        CardFormat::NameOnly,
    ];

    /// Integer id in `0..=10`.
    pub fn id(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CardFormat {
    type Error = LayoutError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        CardFormat::ALL.get(id as usize).copied().ok_or(LayoutError::UnknownFormat(id))
    }
}

impl From<CardFormat> for u8 {
    fn from(format: CardFormat) -> u8 {
        format.id()
    }
}

impl fmt::Display for CardFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Presence of one mode slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModePresence {
    pub ability: bool,
    pub name: bool,
}

/// Presence flags a card's format is decided from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presence {
    pub ability: bool,
    pub ability_name: bool,
    pub modes: [ModePresence; 3],
}

impl Presence {
    pub fn of(stats: &CardStats) -> Self {
        let mode = |slot| ModePresence {
            ability: stats.has(Field::ModeAbility(slot)),
            name: stats.has(Field::ModeName(slot)),
        };
        Self {
            ability: stats.has(Field::Ability),
            ability_name: stats.has(Field::AbilityName),
            modes: [mode(ModeSlot::One), mode(ModeSlot::Two), mode(ModeSlot::Three)],
        }
    }

    /// Build a presence vector from its eight bits.
    ///
    /// Bit order: ability, ability_name, then (ability, name) for modes 1-3.
    pub fn from_bits(bits: u8) -> Self {
        let bit = |i: u8| bits & (1 << i) != 0;
        let mode = |i: u8| ModePresence { ability: bit(2 + 2 * i), name: bit(3 + 2 * i) };
        Self { ability: bit(0), ability_name: bit(1), modes: [mode(0), mode(1), mode(2)] }
    }

    pub fn has_no_modes(&self) -> bool {
        self.modes.iter().all(|m| !m.ability)
    }

    pub fn has_two_unnamed_modes(&self) -> bool {
        let [one, two, three] = self.modes;
        one.ability && !one.name && two.ability && !two.name && !three.ability
    }

    pub fn has_two_named_modes(&self) -> bool {
        let [one, two, three] = self.modes;
        one.ability && one.name && two.ability && two.name && !three.ability
    }

    pub fn has_three_unnamed_modes(&self) -> bool {
        let [one, two, three] = self.modes;
        one.ability && !one.name && two.ability && !two.name && three.ability && !three.name
    }

    pub fn has_three_named_modes(&self) -> bool {
        self.modes.iter().all(|m| m.ability && m.name)
    }

    fn named(&self) -> bool {
        self.ability_name && self.ability
    }

    fn unnamed(&self) -> bool {
        !self.ability_name && self.ability
    }
}

type Predicate = fn(&Presence) -> bool;

/// Ordered rule table; later matches overwrite earlier ones.
const RULES: &[(Predicate, CardFormat)] = &[
    (|p: &Presence| p.ability, CardFormat::Description),
    (|p: &Presence| p.named(), CardFormat::Named),
    (|p: &Presence| p.named() && p.has_two_unnamed_modes(), CardFormat::NamedTwoModes),
    (|p: &Presence| p.named() && p.has_two_named_modes(), CardFormat::NamedTwoNamedModes),
    (|p: &Presence| p.named() && p.has_three_unnamed_modes(), CardFormat::NamedThreeModes),
    (|p: &Presence| p.named() && p.has_three_named_modes(), CardFormat::NamedThreeNamedModes),
    (|p: &Presence| p.unnamed() && p.has_two_unnamed_modes(), CardFormat::TwoModes),
    (|p: &Presence| p.unnamed() && p.has_two_named_modes(), CardFormat::TwoNamedModes),
    (|p: &Presence| p.unnamed() && p.has_three_unnamed_modes(), CardFormat::ThreeModes),
    (|p: &Presence| p.unnamed() && p.has_three_named_modes(), CardFormat::ThreeNamedModes),
    (|p: &Presence| p.ability_name && !p.ability, CardFormat::NameOnly),
];

/// Resolve a presence vector to its format.
pub fn resolve(presence: &Presence) -> CardFormat {
    RULES
        .iter()
        .filter(|(matches, _)| matches(presence))
        .map(|&(_, format)| format)
        .last()
        .unwrap_or(CardFormat::Description)
}

/// Resolve the layout format of a card.
///
/// Total and pure: every card maps to exactly one format, decided only by
/// which ability and mode fields are present.
pub fn classify(stats: &CardStats) -> CardFormat {
    resolve(&Presence::of(stats))
}

/// Mode field combinations the rule table does not describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModeIssue {
    /// A later slot has a description while this earlier slot does not.
    Gap {
        #[serde(serialize_with = "serialize_slot")]
        missing: ModeSlot,
    },
    /// A mode name without its description; not counted as a mode.
    OrphanName {
        #[serde(serialize_with = "serialize_slot")]
        mode: ModeSlot,
    },
}

fn serialize_slot<S: serde::Serializer>(slot: &ModeSlot, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u8(slot.number())
}

impl fmt::Display for ModeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeIssue::Gap { missing } => {
                write!(f, "{missing} has no description but a later mode does")
            }
            ModeIssue::OrphanName { mode } => {
                write!(f, "{mode} has a name but no description; the name is ignored")
            }
        }
    }
}

/// Report mode fields that fall outside the defined formats.
///
/// Classification still succeeds for such cards; this lets callers warn about
/// them or refuse them in strict mode.
pub fn mode_issues(stats: &CardStats) -> Vec<ModeIssue> {
    let presence = Presence::of(stats);
    let mut issues = Vec::new();

    for (i, slot) in ModeSlot::ALL.into_iter().enumerate() {
        let mode = presence.modes[i];
        if !mode.ability && presence.modes[i + 1..].iter().any(|later| later.ability) {
            issues.push(ModeIssue::Gap { missing: slot });
        }
        if mode.name && !mode.ability {
            issues.push(ModeIssue::OrphanName { mode: slot });
        }
    }

    issues
}
