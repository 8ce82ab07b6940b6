//! Per-card statistics record and field selectors
//!
//! A [`CardStats`] is one row of the deck table. Every field is optional and
//! presence is significant: the layout format of a card is decided purely by
//! which ability and mode fields are present.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// One of the three mode slots a card may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModeSlot {
    One,
    Two,
    Three,
}

impl ModeSlot {
    /// All slots in fill order.
    pub const ALL: [ModeSlot; 3] = [ModeSlot::One, ModeSlot::Two, ModeSlot::Three];

    /// 1-based slot number as used in column names.
    pub fn number(self) -> u8 {
        match self {
            ModeSlot::One => 1,
            ModeSlot::Two => 2,
            ModeSlot::Three => 3,
        }
    }
}

impl fmt::Display for ModeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mode {}", self.number())
    }
}

/// Selector for a drawable field of a card.
///
/// Every draw instruction records the field it was produced from, so callers
/// can trace any piece of text on the card back to its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PokedexNumber,
    Name,
    Tags,
    Cost,
    Attack,
    Health,
    AbilityName,
    Ability,
    ModeName(ModeSlot),
    ModeAbility(ModeSlot),
}

impl Field {
    /// Column name of the field in the deck table.
    pub fn column(self) -> &'static str {
        match self {
            Field::PokedexNumber => "pokedex_number",
            Field::Name => "pokedex_name",
            Field::Tags => "tags",
            Field::Cost => "cost",
            Field::Attack => "attack",
            Field::Health => "health",
            Field::AbilityName => "ability_name",
            Field::Ability => "ability",
            Field::ModeName(ModeSlot::One) => "mode_1_name",
            Field::ModeName(ModeSlot::Two) => "mode_2_name",
            Field::ModeName(ModeSlot::Three) => "mode_3_name",
            Field::ModeAbility(ModeSlot::One) => "mode_1_ability",
            Field::ModeAbility(ModeSlot::Two) => "mode_2_ability",
            Field::ModeAbility(ModeSlot::Three) => "mode_3_ability",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.column())
    }
}

/// Statistics for a single card, read-only once loaded.
///
/// Absence is always `None`; the deck loader never stores an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStats {
    pub pokedex_number: Option<String>,
    pub pokedex_name: Option<String>,
    pub cost: Option<f64>,
    pub attack: Option<f64>,
    pub health: Option<f64>,
    pub biome: Option<String>,
    pub color: Option<String>,
    pub type_1: Option<String>,
    pub type_2: Option<String>,
    pub tags: Option<String>,
    pub ability: Option<String>,
    pub ability_name: Option<String>,
    pub mode_1_ability: Option<String>,
    pub mode_1_name: Option<String>,
    pub mode_2_ability: Option<String>,
    pub mode_2_name: Option<String>,
    pub mode_3_ability: Option<String>,
    pub mode_3_name: Option<String>,
}

impl CardStats {
    /// Display text of a field, or `None` when the field is absent.
    ///
    /// Numeric stats are shown truncated to an integer (`3.0` -> `"3"`).
    pub fn text(&self, field: Field) -> Option<Cow<'_, str>> {
        match field {
            Field::Cost => self.cost.map(stat_text),
            Field::Attack => self.attack.map(stat_text),
            Field::Health => self.health.map(stat_text),
            _ => self.text_field(field).map(Cow::Borrowed),
        }
    }

    /// Whether a field is present.
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::Cost => self.cost.is_some(),
            Field::Attack => self.attack.is_some(),
            Field::Health => self.health.is_some(),
            _ => self.text_field(field).is_some(),
        }
    }

    fn text_field(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::PokedexNumber => &self.pokedex_number,
            Field::Name => &self.pokedex_name,
            Field::Tags => &self.tags,
            Field::AbilityName => &self.ability_name,
            Field::Ability => &self.ability,
            Field::ModeName(ModeSlot::One) => &self.mode_1_name,
            Field::ModeName(ModeSlot::Two) => &self.mode_2_name,
            Field::ModeName(ModeSlot::Three) => &self.mode_3_name,
            Field::ModeAbility(ModeSlot::One) => &self.mode_1_ability,
            Field::ModeAbility(ModeSlot::Two) => &self.mode_2_ability,
            Field::ModeAbility(ModeSlot::Three) => &self.mode_3_ability,
            Field::Cost | Field::Attack | Field::Health => return None,
        };
        value.as_deref()
    }

    /// Type fields that are present, in column order.
    pub fn types(&self) -> Vec<&str> {
        [&self.type_1, &self.type_2].into_iter().filter_map(|t| t.as_deref()).collect()
    }

    /// Display name used in logs and output file names.
    pub fn display_name(&self) -> &str {
        self.pokedex_name.as_deref().unwrap_or("card")
    }

    /// Set a column by name from a raw table cell.
    ///
    /// Blank cells are stored as absent. Unknown columns are ignored and
    /// reported back as `Ok(false)`.
    pub fn set_column(&mut self, column: &str, raw: &str) -> Result<bool, StatParseError> {
        let trimmed = raw.trim();
        let text = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };

        let slot = match column {
            "cost" => {
                self.cost = parse_stat(column, text)?;
                return Ok(true);
            }
            "attack" => {
                self.attack = parse_stat(column, text)?;
                return Ok(true);
            }
            "health" => {
                self.health = parse_stat(column, text)?;
                return Ok(true);
            }
            "pokedex_number" => &mut self.pokedex_number,
            "pokedex_name" => &mut self.pokedex_name,
            "biome" => &mut self.biome,
            "color" => &mut self.color,
            "type_1" => &mut self.type_1,
            "type_2" => &mut self.type_2,
            "tags" => &mut self.tags,
            "ability" => &mut self.ability,
            "ability_name" => &mut self.ability_name,
            "mode_1_ability" => &mut self.mode_1_ability,
            "mode_1_name" => &mut self.mode_1_name,
            "mode_2_ability" => &mut self.mode_2_ability,
            "mode_2_name" => &mut self.mode_2_name,
            "mode_3_ability" => &mut self.mode_3_ability,
            "mode_3_name" => &mut self.mode_3_name,
            _ => return Ok(false),
        };
        *slot = text;
        Ok(true)
    }
}

/// A numeric stat cell that is not a number.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("column '{column}' expects a number, got '{value}'")]
pub struct StatParseError {
    pub column: String,
    pub value: String,
}

fn parse_stat(column: &str, text: Option<String>) -> Result<Option<f64>, StatParseError> {
    match text {
        None => Ok(None),
        Some(value) => match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(StatParseError { column: column.to_string(), value }),
        },
    }
}

fn stat_text(value: f64) -> Cow<'static, str> {
    Cow::Owned(format!("{}", value.trunc() as i64))
}
