use serde::Serialize;

/// Append-only narration of a battle. Lines are never edited or removed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BattleLog {
    lines: Vec<String>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn log_turn(&mut self, turn: u32) {
        self.push(format!("Turn {turn}"));
    }

    pub fn log_send_out(&mut self, trainer: &str, pokemon: &str) {
        self.push(format!("{trainer} sent out {pokemon}!"));
    }

    pub fn log_move(&mut self, user: &str, move_name: &str) {
        self.push(format!("{user} used {move_name}!"));
    }

    pub fn log_miss(&mut self, user: &str) {
        self.push(format!("{user}'s attack missed!"));
    }

    pub fn log_damage(&mut self, target: &str, damage: u32, hp: u32, max_hp: u32) {
        self.push(format!("{target} took {damage} damage ({hp}/{max_hp} HP)."));
    }

    pub fn log_hits(&mut self, hits: u32) {
        self.push(format!("Hit {hits} time(s)!"));
    }

    pub fn log_critical(&mut self) {
        self.push("A critical hit!");
    }

    pub fn log_effectiveness(&mut self, multiplier: u32) {
        if multiplier > 1 {
            self.push("It's super effective!");
        }
    }

    pub fn log_heal(&mut self, target: &str, amount: u32) {
        self.push(format!("{target} had its energy drained and restored {amount} HP!"));
    }

    pub fn log_recoil(&mut self, target: &str, amount: u32) {
        self.push(format!("{target} was damaged by the recoil ({amount} HP)!"));
    }

    pub fn log_faint(&mut self, pokemon: &str) {
        self.push(format!("{pokemon} fainted!"));
    }

    pub fn log_win(&mut self, winner: &str) {
        self.push(format!("{winner} won the battle!"));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}
