//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use serde_json::Value;

use crate::resource::{Resource, RELATIONSHIP_URLS_FIELD};
use crate::traits::Entity;

/// Trait for human-readable key-value output.
///
/// Implemented by resources and entities to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Resource {
    fn pretty_print(&self) -> String {
        let header = format!("{} {}", capitalize(self.kind().name), display_value(self.id()));
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![header, divider];

        for (key, value) in self.attributes() {
            if key == RELATIONSHIP_URLS_FIELD {
                continue;
            }
            lines.push(format!("{:<22}{}", format!("{key}:"), display_value(value)));
        }

        let mut relationships: Vec<&str> = self
            .kind()
            .relationships
            .iter()
            .map(|r| r.name())
            .filter(|name| self.has_relationship(name))
            .collect();
        relationships.sort_unstable();
        if !relationships.is_empty() {
            lines.push(format!("{:<22}{}", "Relationships:", relationships.join(", ")));
        }

        if self.can_download() {
            lines.push(format!("{:<22}available", "Download:"));
        }

        lines.join("\n")
    }
}

impl<T: Entity> PrettyPrint for T {
    fn pretty_print(&self) -> String {
        self.resource().pretty_print()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strings print without quotes; everything else as JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
