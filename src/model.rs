use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// The three once-per-team transformation mechanics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mechanic {
    Mega,
    #[serde(alias = "gmax")]
    Gigantamax,
    #[serde(alias = "tera")]
    Terastallize,
}

impl Mechanic {
    pub fn parse(raw: &str) -> Option<Mechanic> {
        match raw.to_ascii_lowercase().as_str() {
            "mega" => Some(Mechanic::Mega),
            "gmax" | "gigantamax" => Some(Mechanic::Gigantamax),
            "tera" | "terastallize" => Some(Mechanic::Terastallize),
            _ => None,
        }
    }
}

fn default_accuracy() -> u32 {
    100
}

fn default_pp() -> u8 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub category: MoveCategory,
    #[serde(default)]
    pub power: u32,
    #[serde(default = "default_accuracy")]
    pub accuracy: u32,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_pp")]
    pub pp: u8,
}

impl Move {
    /// Neutral stand-in used when a move name cannot be resolved.
    pub fn fallback(name: &str) -> Move {
        Move {
            name: name.to_string(),
            move_type: "normal".to_string(),
            category: MoveCategory::Physical,
            power: 40,
            accuracy: 100,
            priority: 0,
            pp: 35,
        }
    }

    pub fn is_status(&self) -> bool {
        matches!(self.category, MoveCategory::Status) || self.power == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub hp: u32,
    #[serde(alias = "atk")]
    pub attack: u32,
    #[serde(alias = "def")]
    pub defense: u32,
    #[serde(alias = "spa")]
    pub sp_atk: u32,
    #[serde(alias = "spd")]
    pub sp_def: u32,
    #[serde(alias = "spe")]
    pub speed: u32,
}

/// One roster member as handed over by the roster source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    pub stats: Stats,
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub tera_type: Option<String>,
    #[serde(default)]
    pub sprite: Option<String>,
}

/// Catalog override for a Mega or Gigantamax form. Absent fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sprite: Option<String>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub stats: Option<Stats>,
    #[serde(default)]
    pub moves: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantEntry {
    #[serde(default)]
    pub mega: Option<FormData>,
    #[serde(default, alias = "gigantamax")]
    pub gmax: Option<FormData>,
}

impl VariantEntry {
    pub fn form(&self, mechanic: Mechanic) -> Option<&FormData> {
        match mechanic {
            Mechanic::Mega => self.mega.as_ref(),
            Mechanic::Gigantamax => self.gmax.as_ref(),
            Mechanic::Terastallize => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamsFile {
    pub player: Vec<RosterEntry>,
    pub enemy: Vec<RosterEntry>,
    #[serde(default)]
    pub ace_mechanic: Option<Mechanic>,
    #[serde(default)]
    pub moves: Vec<Move>,
    #[serde(default)]
    pub variants: HashMap<String, VariantEntry>,
}

/// Lowercase alphanumeric key used for every dex lookup.
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_id_strips_punctuation_and_case() {
        assert_eq!(to_id("Self-Destruct"), "selfdestruct");
        assert_eq!(to_id("G-Max Wildfire"), "gmaxwildfire");
        assert_eq!(to_id("U-turn"), "uturn");
    }

    #[test]
    fn mechanic_parse_accepts_short_names() {
        assert_eq!(Mechanic::parse("GMAX"), Some(Mechanic::Gigantamax));
        assert_eq!(Mechanic::parse("tera"), Some(Mechanic::Terastallize));
        assert_eq!(Mechanic::parse("mega"), Some(Mechanic::Mega));
        assert_eq!(Mechanic::parse("z-move"), None);
    }

    #[test]
    fn teams_file_parses_with_defaults() {
        let raw = r#"{
            "player": [{"name": "Pikachu", "types": ["electric"],
                "stats": {"hp": 95, "atk": 75, "def": 60, "spa": 70, "spd": 70, "spe": 110},
                "moves": ["Thunderbolt"], "teraType": "water"}],
            "enemy": [{"name": "Onix", "types": ["rock", "ground"],
                "stats": {"hp": 95, "attack": 65, "defense": 180, "spAtk": 50, "spDef": 65, "speed": 90},
                "moves": ["Rock Slide"]}],
            "aceMechanic": "gmax",
            "moves": [{"name": "Zap", "type": "electric", "category": "special", "power": 30}]
        }"#;
        let parsed: TeamsFile = serde_json::from_str(raw).expect("valid teams file");
        assert_eq!(parsed.player[0].stats.speed, 110);
        assert_eq!(parsed.enemy[0].stats.defense, 180);
        assert_eq!(parsed.player[0].tera_type.as_deref(), Some("water"));
        assert_eq!(parsed.ace_mechanic, Some(Mechanic::Gigantamax));
        assert_eq!(parsed.moves[0].accuracy, 100);
        assert_eq!(parsed.moves[0].pp, 10);
        assert!(parsed.variants.is_empty());
    }
}
