//! Keyboard bindings for the player.

use crate::error::{FlowError, FlowResult};

/// Player action triggered by a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Previous,
    Next,
    TogglePlay,
}

/// Key to action table. Keys use DOM `KeyboardEvent.key` names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: Vec<(String, PlayerAction)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                ("ArrowUp".to_string(), PlayerAction::Previous),
                ("k".to_string(), PlayerAction::Previous),
                ("ArrowDown".to_string(), PlayerAction::Next),
                ("j".to_string(), PlayerAction::Next),
                (" ".to_string(), PlayerAction::TogglePlay),
            ],
        }
    }
}

impl KeyBindings {
    /// Build a table, rejecting keys bound to more than one action.
    pub fn new<K: Into<String>>(bindings: impl IntoIterator<Item = (K, PlayerAction)>) -> FlowResult<Self> {
        let table = Self {
            bindings: bindings.into_iter().map(|(k, a)| (k.into(), a)).collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Add or replace the binding for `key`.
    pub fn bind(&mut self, key: impl Into<String>, action: PlayerAction) {
        let key = key.into();
        self.bindings.retain(|(k, _)| *k != key);
        self.bindings.push((key, action));
    }

    pub fn validate(&self) -> FlowResult<()> {
        for (i, (key, first)) in self.bindings.iter().enumerate() {
            let clash = self.bindings[i + 1..]
                .iter()
                .find(|(other, action)| other == key && action != first);
            if let Some((_, second)) = clash {
                return Err(FlowError::ConflictingBinding {
                    key: key.clone(),
                    first: *first,
                    second: *second,
                });
            }
        }
        Ok(())
    }

    pub fn action_for(&self, key: &str) -> Option<PlayerAction> {
        self.bindings
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, action)| *action)
    }

    /// Keys bound to `action`, in table order.
    pub fn keys_for(&self, action: PlayerAction) -> Vec<&str> {
        self.bindings
            .iter()
            .filter(|(_, a)| *a == action)
            .map(|(k, _)| k.as_str())
            .collect()
    }
}
