//! Compiler configuration.
//!
//! Read from JSON:
//!
//! ```json
//! {
//!   "defaultModifier": "|escape",
//!   "debug": false,
//!   "sharedModifiers": { "escape": ["htmlspecialchars(", ", ENT_QUOTES)"] },
//!   "modifiers": { "intval": "intval" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::modifiers::ModifierTable;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    /// Substituted into empty pipes; ignored unless it is `|name` or `name`.
    pub default_modifier: Option<String>,
    /// Append the source directive as a comment after each echo statement.
    pub debug: bool,
    /// Entries for the shared layer.
    pub shared_modifiers: Map<String, Value>,
    /// Entries for the compiler's own layer.
    pub modifiers: Map<String, Value>,
}

impl CompilerOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build a shared-layer table from `sharedModifiers`, dropping malformed
    /// entries.
    pub fn shared_table(&self) -> ModifierTable {
        let mut table = ModifierTable::new();
        table.extend_from_json(&self.shared_modifiers);
        table
    }
}
