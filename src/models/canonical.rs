use serde::{Deserialize, Serialize};

use super::enums::FieldVariant;
use super::lenient::{de_lenient_vec, de_opt_i64, de_opt_text, de_text, de_text_vec};

/// One `label: value` pair attached to a list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    #[serde(default, deserialize_with = "de_text")]
    pub label: String,
    #[serde(default, deserialize_with = "de_text")]
    pub value: String,
}

impl MetadataEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Case-insensitive substring match on the label.
    pub fn label_contains(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle)
    }
}

/// Canonical list entry every list-shaped card normalizes into.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default, deserialize_with = "de_opt_text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub primary: String,
    #[serde(default, deserialize_with = "de_opt_text", skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_vec")]
    pub metadata: Vec<MetadataEntry>,
    #[serde(default, deserialize_with = "de_text_vec")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "de_opt_text", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ListItem {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            ..Self::default()
        }
    }

    pub fn with_secondary(mut self, secondary: Option<String>) -> Self {
        self.secondary = secondary;
        self
    }

    /// Push a metadata pair only when a value is present.
    pub fn with_meta(mut self, label: &str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.metadata.push(MetadataEntry::new(label, value));
        }
        self
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        if let Some(tag) = tag {
            self.tags.push(tag);
        }
        self
    }

    pub fn with_status(mut self, status: Option<String>) -> Self {
        self.status = status;
        self
    }

    /// First metadata value whose label contains any of `needles` (lowercase).
    pub fn meta_value(&self, needles: &[&str]) -> Option<&str> {
        self.metadata
            .iter()
            .find(|m| needles.iter().any(|n| m.label_contains(n)))
            .map(|m| m.value.as_str())
    }
}

/// Canonical key/value entry for field-shaped cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, deserialize_with = "de_text")]
    pub label: String,
    #[serde(default, deserialize_with = "de_text")]
    pub value: String,
    #[serde(default, deserialize_with = "de_variant", skip_serializing_if = "Option::is_none")]
    pub variant: Option<FieldVariant>,
    #[serde(default, deserialize_with = "de_opt_i64", skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            variant: None,
            priority: None,
        }
    }

    pub fn with_variant(mut self, variant: FieldVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn label_contains_any(&self, needles: &[&str]) -> bool {
        let label = self.label.to_lowercase();
        needles.iter().any(|n| label.contains(n))
    }
}

/// Unknown variant tokens are dropped rather than rejecting the field.
fn de_variant<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Option<FieldVariant>, D::Error> {
    let raw = de_opt_text(d)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}
