//! Super-effective type chart.
//!
//! Only the ×2 relationships are listed, for all eighteen attacking types.
//! Resistances (×0.5) and immunities (×0) are not modeled: every pairing that is
//! not listed here is neutral.

use phf::phf_map;

static STRONG_AGAINST: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "normal" => &[],
    "fire" => &["grass", "ice", "bug", "steel"],
    "water" => &["fire", "ground", "rock"],
    "electric" => &["water", "flying"],
    "grass" => &["water", "ground", "rock"],
    "ice" => &["grass", "ground", "flying", "dragon"],
    "fighting" => &["normal", "ice", "rock", "dark", "steel"],
    "poison" => &["grass", "fairy"],
    "ground" => &["fire", "electric", "poison", "rock", "steel"],
    "flying" => &["grass", "fighting", "bug"],
    "psychic" => &["fighting", "poison"],
    "bug" => &["grass", "psychic", "dark"],
    "rock" => &["fire", "ice", "flying", "bug"],
    "ghost" => &["ghost", "psychic"],
    "dragon" => &["dragon"],
    "dark" => &["psychic", "ghost"],
    "steel" => &["rock", "ice", "fairy"],
    "fairy" => &["fighting", "dragon", "dark"],
};

/// Defending types that take double damage from `attacking`.
pub fn strong_against(attacking: &str) -> &'static [&'static str] {
    STRONG_AGAINST
        .get(attacking.to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or(&[])
}

/// Number of doublings the move type earns against the defender's types.
fn effectiveness_steps(move_type: &str, target_types: &[String]) -> u32 {
    let strong = strong_against(move_type);
    target_types
        .iter()
        .filter(|t| strong.iter().any(|s| s.eq_ignore_ascii_case(t)))
        .count() as u32
}

pub fn type_effectiveness(move_type: &str, target_types: &[String]) -> u32 {
    1u32.checked_shl(effectiveness_steps(move_type, target_types))
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn dual_weakness_stacks() {
        assert_eq!(type_effectiveness("ice", &types(&["dragon", "flying"])), 4);
        assert_eq!(type_effectiveness("Rock", &types(&["Fire", "Flying"])), 4);
    }

    #[test]
    fn unlisted_pairs_are_neutral() {
        assert_eq!(type_effectiveness("normal", &types(&["ghost"])), 1);
        assert_eq!(type_effectiveness("electric", &types(&["ground"])), 1);
        assert_eq!(type_effectiveness("fire", &types(&["water"])), 1);
        assert_eq!(type_effectiveness("shadow", &types(&["grass"])), 1);
    }

    #[test]
    fn single_weakness_doubles() {
        assert_eq!(type_effectiveness("water", &types(&["fire"])), 2);
        assert_eq!(effectiveness_steps("fighting", &types(&["normal", "psychic"])), 1);
    }

    #[test]
    fn long_type_lists_saturate() {
        assert_eq!(type_effectiveness("fire", &vec!["grass".to_string(); 31]), 1 << 31);
        assert_eq!(type_effectiveness("fire", &vec!["grass".to_string(); 32]), u32::MAX);
        assert_eq!(type_effectiveness("fire", &vec!["grass".to_string(); 40]), u32::MAX);
    }

    #[test]
    fn every_type_has_an_entry() {
        assert_eq!(STRONG_AGAINST.len(), 18);
    }
}
