//! Format normalizer: one anti-corruption layer between the two wire shapes
//! a card may carry (generic `items[]`/`fields[]` vs per-type legacy keys)
//! and everything downstream.
//!
//! The interactive renderer, the layout classifier and the document exporter
//! all read cards through this module, so the same `(type, data)` always
//! produces the same visible text everywhere.

pub mod legacy;

use serde_json::Value;

use crate::models::legacy::record_at;
use crate::models::legacy::LegacyDiagnosis;
use crate::models::lenient::{array_at, parse_array_lenient};
use crate::models::{CardShape, CardType, Field, ListItem};

pub use legacy::{legacy_fields, legacy_items, legacy_key};

/// Canonical form of one card's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Items(Vec<ListItem>),
    Fields(Vec<Field>),
    /// Record-shaped family; read through `models::records` instead.
    Passthrough,
}

impl Normalized {
    pub fn len(&self) -> usize {
        match self {
            Self::Items(items) => items.len(),
            Self::Fields(fields) => fields.len(),
            Self::Passthrough => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn items(&self) -> &[ListItem] {
        match self {
            Self::Items(items) => items,
            _ => &[],
        }
    }

    pub fn fields(&self) -> &[Field] {
        match self {
            Self::Fields(fields) => fields,
            _ => &[],
        }
    }
}

/// Normalize a card's data according to its type's shape. Pure and total.
pub fn normalize(kind: CardType, data: &Value) -> Normalized {
    match kind.shape() {
        CardShape::List => Normalized::Items(normalize_items(kind, data)),
        CardShape::Fields => Normalized::Fields(normalize_fields(kind, data)),
        CardShape::Record => Normalized::Passthrough,
    }
}

/// Generic `items[]` wins whenever at least one entry is readable, even if a
/// legacy array is also present.
pub fn normalize_items(kind: CardType, data: &Value) -> Vec<ListItem> {
    generic_items(data).unwrap_or_else(|| legacy_items(kind, data))
}

/// Generic `fields[]` (priority-sorted) wins whenever one entry is readable.
pub fn normalize_fields(kind: CardType, data: &Value) -> Vec<Field> {
    generic_fields(data).unwrap_or_else(|| legacy_fields(kind, data))
}

/// `Some` when `data.items` holds at least one readable list item. Entries
/// that cannot be read are skipped; an array of nothing but unreadable
/// entries counts as absent.
pub fn generic_items(data: &Value) -> Option<Vec<ListItem>> {
    let items: Vec<ListItem> = parse_array_lenient(array_at(data, "items"));
    (!items.is_empty()).then_some(items)
}

/// `Some` when `data.fields` holds at least one readable field, stably
/// sorted by ascending `priority` (missing priority counts as 0).
pub fn generic_fields(data: &Value) -> Option<Vec<Field>> {
    let mut fields: Vec<Field> = parse_array_lenient(array_at(data, "fields"));
    if fields.is_empty() {
        return None;
    }
    fields.sort_by_key(|f| f.priority.unwrap_or(0));
    Some(fields)
}

/// Free-text justification of a main-diagnosis card: `content`, falling back
/// to the legacy `justification` key.
pub fn diagnosis_justification(data: &Value) -> Option<String> {
    crate::models::records::content(data).or_else(|| {
        let legacy: LegacyDiagnosis = record_at(data, None);
        legacy.justification
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetadataEntry;
    use serde_json::json;

    #[test]
    fn generic_items_take_precedence_over_legacy() {
        let data = json!({
            "items": [{"primary": "Dipirona"}],
            "medications": [{"name": "Ibuprofeno"}]
        });
        let normalized = normalize(CardType::Medications, &data);
        assert_eq!(normalized.items().len(), 1);
        assert_eq!(normalized.items()[0].primary, "Dipirona");
    }

    #[test]
    fn empty_generic_items_fall_back_to_legacy() {
        let data = json!({"items": [], "medications": [{"name": "Ibuprofeno", "frequency": "8/8h"}]});
        let items = normalize_items(CardType::Medications, &data);
        assert_eq!(items[0].primary, "Ibuprofeno");
    }

    #[test]
    fn unreadable_generic_items_fall_back_to_legacy() {
        let data = json!({"items": ["junk", 3], "allergies": [{"name": "Penicilina"}]});
        assert_eq!(generic_items(&data), None);
        let items = normalize_items(CardType::Allergies, &data);
        assert_eq!(items[0].primary, "Penicilina");
        assert_eq!(generic_fields(&json!({"fields": [null]})), None);
    }

    #[test]
    fn fields_sorted_by_priority_with_missing_as_zero() {
        let data = json!({"fields": [
            {"label": "C", "value": "3", "priority": 3},
            {"label": "A", "value": "1"},
            {"label": "B", "value": "2", "priority": 1},
            {"label": "N", "value": "-1", "priority": -1}
        ]});
        let fields = normalize_fields(CardType::Biometrics, &data);
        let labels: Vec<&str> = fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["N", "A", "B", "C"]);
    }

    #[test]
    fn normalize_is_idempotent() {
        let data = json!({"symptoms": [{"name": "Cefaleia", "severity": "Moderada"}]});
        let first = normalize(CardType::Symptoms, &data);
        let second = normalize(CardType::Symptoms, &data);
        assert_eq!(first, second);
    }

    #[test]
    fn legacy_and_generic_describe_the_same_allergy() {
        let legacy = json!({"allergies": [{"name": "Penicilina", "severity": "Alta"}]});
        let generic = json!({"items": [{
            "primary": "Penicilina",
            "metadata": [{"label": "Severidade", "value": "Alta"}]
        }]});
        let a = normalize_items(CardType::Allergies, &legacy);
        let b = normalize_items(CardType::Allergies, &generic);
        assert_eq!(a, b);
        assert_eq!(a[0].metadata, vec![MetadataEntry::new("Severidade", "Alta")]);
    }

    #[test]
    fn missing_data_normalizes_to_empty() {
        assert!(normalize(CardType::Allergies, &Value::Null).is_empty());
        assert!(normalize(CardType::SocialHistory, &json!({})).is_empty());
        assert_eq!(normalize(CardType::Orientations, &json!({"orientations": ["x"]})), Normalized::Passthrough);
    }

    #[test]
    fn justification_prefers_content() {
        assert_eq!(
            diagnosis_justification(&json!({"content": "Novo", "justification": "Antigo"})).as_deref(),
            Some("Novo")
        );
        assert_eq!(
            diagnosis_justification(&json!({"justification": "Antigo"})).as_deref(),
            Some("Antigo")
        );
        assert_eq!(diagnosis_justification(&json!([])), None);
    }
}
