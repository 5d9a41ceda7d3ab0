use serde::{Deserialize, Serialize};

/// Key characters handed out to players in order: player `p` with `n` columns owns
/// `chars[p * n .. (p + 1) * n]`.
pub const DEFAULT_KEY_CHARS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890`-=[];',.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct InputConfig {
    pub key_chars: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            key_chars: DEFAULT_KEY_CHARS.to_string(),
        }
    }
}

impl InputConfig {
    /// Drops repeated characters (first occurrence wins) and restores the default
    /// string when nothing is left.
    pub fn validate(&mut self) {
        let mut seen = Vec::new();
        self.key_chars.retain(|c| {
            if seen.contains(&c) {
                false
            } else {
                seen.push(c);
                true
            }
        });
        if self.key_chars.is_empty() {
            self.key_chars = DEFAULT_KEY_CHARS.to_string();
        }
    }

    /// Keys for `player` when every player has `columns` columns, or `None` if
    /// the key string is too short.
    pub fn player_keys(&self, player: usize, columns: usize) -> Option<Vec<char>> {
        let keys: Vec<char> = self
            .key_chars
            .chars()
            .skip(player * columns)
            .take(columns)
            .collect();
        (keys.len() == columns).then_some(keys)
    }

    /// Player owning `key`, given `columns` columns per player.
    pub fn player_for_key(&self, key: char, columns: usize) -> Option<usize> {
        if columns == 0 {
            return None;
        }
        self.key_chars
            .chars()
            .position(|c| c == key)
            .map(|i| i / columns)
    }

    pub fn max_players(&self, columns: usize) -> usize {
        if columns == 0 {
            return 0;
        }
        self.key_chars.chars().count() / columns
    }
}
