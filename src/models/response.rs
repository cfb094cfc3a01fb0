//! Response / Section / Card — the immutable summary tree.
//!
//! Cards and sections sit behind `Arc` so an edit can rebuild only the
//! touched path and share every other node with the original.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::CardType;
use super::lenient::{array_at, text_at};
use super::ResponseError;

/// Title given to the section synthesized from a flat `components[]` response.
pub const UPGRADED_SECTION_FALLBACK_TITLE: &str = "Resumo";

/// One card of a section. `card_type` is kept as the raw wire tag so an
/// unknown tag survives ingress and can be reported at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    card_type: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Card {
    pub fn new(card_type: impl Into<String>, title: impl Into<String>, data: Value) -> Self {
        Self {
            card_type: card_type.into(),
            title: title.into(),
            variant: None,
            data,
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn card_type(&self) -> &str {
        &self.card_type
    }

    /// Resolved tag, or `None` when the tag is outside the taxonomy.
    pub fn kind(&self) -> Option<CardType> {
        self.card_type.parse().ok()
    }

    fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Some(Self {
            card_type: text_at(value, "type").unwrap_or_default(),
            title: text_at(value, "title").unwrap_or_default(),
            variant: text_at(value, "variant"),
            data: value.get("data").cloned().unwrap_or(Value::Null),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub components: Vec<Arc<Card>>,
}

impl Section {
    pub fn new(title: impl Into<String>, components: Vec<Card>) -> Self {
        Self {
            title: title.into(),
            description: None,
            components: components.into_iter().map(Arc::new).collect(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Some(Self {
            title: text_at(value, "title").unwrap_or_default(),
            description: text_at(value, "description"),
            components: parse_cards(array_at(value, "components")),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default)]
    pub page_title: String,
    #[serde(default)]
    pub sections: Vec<Arc<Section>>,
}

impl Response {
    pub fn new(page_title: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            page_title: page_title.into(),
            sections: sections.into_iter().map(Arc::new).collect(),
        }
    }

    /// Parse a response from JSON text. See [`Response::from_value`].
    pub fn from_json(json: &str) -> Result<Self, ResponseError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| ResponseError::JsonParsing(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Lenient ingress. Malformed sections and cards are skipped; a response
    /// carrying a flat `components[]` instead of `sections[]` is upgraded
    /// into a single section. Only a non-object root is an error.
    pub fn from_value(value: &Value) -> Result<Self, ResponseError> {
        if !value.is_object() {
            return Err(ResponseError::NotAnObject);
        }
        let page_title = text_at(value, "pageTitle").unwrap_or_default();

        let sections: Vec<Arc<Section>> = array_at(value, "sections")
            .iter()
            .filter_map(Section::from_value)
            .map(Arc::new)
            .collect();

        let flat = array_at(value, "components");
        if sections.is_empty() && !flat.is_empty() {
            tracing::debug!(
                components = flat.len(),
                "Upgrading flat components response into a single section"
            );
            let title = if page_title.is_empty() {
                UPGRADED_SECTION_FALLBACK_TITLE.to_string()
            } else {
                page_title.clone()
            };
            let section = Section {
                title,
                description: None,
                components: parse_cards(flat),
            };
            return Ok(Self {
                page_title,
                sections: vec![Arc::new(section)],
            });
        }

        Ok(Self {
            page_title,
            sections,
        })
    }

    pub fn component_count(&self) -> usize {
        self.sections.iter().map(|s| s.components.len()).sum()
    }

    /// Produce a new response where only the card at
    /// `(section_index, component_index)` differs. Every other section and
    /// card is shared (`Arc::ptr_eq`) with `self`. A replacement may not
    /// change the card's type.
    pub fn replace_component(
        &self,
        section_index: usize,
        component_index: usize,
        card: Card,
    ) -> Result<Self, ResponseError> {
        let section = self
            .sections
            .get(section_index)
            .ok_or(ResponseError::SectionOutOfRange {
                index: section_index,
                len: self.sections.len(),
            })?;
        let existing =
            section
                .components
                .get(component_index)
                .ok_or(ResponseError::ComponentOutOfRange {
                    section: section_index,
                    index: component_index,
                    len: section.components.len(),
                })?;
        if existing.card_type != card.card_type {
            return Err(ResponseError::TypeChanged {
                from: existing.card_type.clone(),
                to: card.card_type,
            });
        }

        let mut components = section.components.clone();
        components[component_index] = Arc::new(card);
        let mut sections = self.sections.clone();
        sections[section_index] = Arc::new(Section {
            title: section.title.clone(),
            description: section.description.clone(),
            components,
        });

        Ok(Self {
            page_title: self.page_title.clone(),
            sections,
        })
    }
}

fn parse_cards(values: &[Value]) -> Vec<Arc<Card>> {
    values
        .iter()
        .filter_map(Card::from_value)
        .map(Arc::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(kind: &str, title: &str) -> Card {
        Card::new(kind, title, json!({}))
    }

    fn sized_response() -> Response {
        Response::new(
            "Consulta",
            vec![
                Section::new("A", vec![card("symptoms_card", "a0"), card("allergies_card", "a1")]),
                Section::new(
                    "B",
                    vec![
                        card("exams_card", "b0"),
                        card("medications_card", "b1"),
                        card("prescriptions_card", "b2"),
                        card("referrals_card", "b3"),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn edit_shares_every_untouched_card() {
        let original = sized_response();
        let replacement = Card::new("prescriptions_card", "b2 editado", json!({"items": []}));
        let edited = original.replace_component(1, 2, replacement).unwrap();

        let mut differing = 0;
        let mut shared = 0;
        for (s_old, s_new) in original.sections.iter().zip(&edited.sections) {
            for (c_old, c_new) in s_old.components.iter().zip(&s_new.components) {
                if Arc::ptr_eq(c_old, c_new) {
                    shared += 1;
                } else {
                    differing += 1;
                }
            }
        }
        assert_eq!((differing, shared), (1, 5));
        assert!(Arc::ptr_eq(&original.sections[0], &edited.sections[0]));
        assert_eq!(edited.sections[1].components[2].title, "b2 editado");
        assert_eq!(original.sections[1].components[2].title, "b2");
    }

    #[test]
    fn edit_rejects_bad_coordinates_and_type_changes() {
        let original = sized_response();
        assert!(matches!(
            original.replace_component(2, 0, card("exams_card", "x")),
            Err(ResponseError::SectionOutOfRange { index: 2, len: 2 })
        ));
        assert!(matches!(
            original.replace_component(0, 5, card("symptoms_card", "x")),
            Err(ResponseError::ComponentOutOfRange { .. })
        ));
        assert!(matches!(
            original.replace_component(0, 0, card("exams_card", "x")),
            Err(ResponseError::TypeChanged { .. })
        ));
    }

    #[test]
    fn flat_components_upgrade_into_one_section() {
        let value = json!({
            "pageTitle": "Resumo da consulta",
            "components": [
                {"type": "symptoms_card", "title": "Sintomas", "data": {"symptoms": []}},
                "junk"
            ]
        });
        let response = Response::from_value(&value).unwrap();
        assert_eq!(response.sections.len(), 1);
        assert_eq!(response.sections[0].title, "Resumo da consulta");
        assert_eq!(response.sections[0].components.len(), 1);
    }

    #[test]
    fn flat_components_without_title_use_fallback() {
        let value = json!({"components": [{"type": "exams_card", "title": "Exames"}]});
        let response = Response::from_value(&value).unwrap();
        assert_eq!(response.sections[0].title, UPGRADED_SECTION_FALLBACK_TITLE);
        assert_eq!(response.sections[0].components[0].data, Value::Null);
    }

    #[test]
    fn ingress_keeps_unknown_types_and_order() {
        let json = r#"{
            "pageTitle": "Prontuário",
            "sections": [
                {"title": "S1", "components": [
                    {"type": "mystery_card", "title": "?"},
                    {"type": "allergies_card", "title": "Alergias", "variant": "rose", "data": {}}
                ]},
                42,
                {"title": "S2"}
            ]
        }"#;
        let response = Response::from_json(json).unwrap();
        assert_eq!(response.sections.len(), 2);
        let cards = &response.sections[0].components;
        assert_eq!(cards[0].card_type(), "mystery_card");
        assert_eq!(cards[0].kind(), None);
        assert_eq!(cards[1].kind(), Some(CardType::Allergies));
        assert_eq!(cards[1].variant.as_deref(), Some("rose"));
        assert!(response.sections[1].components.is_empty());
        assert_eq!(response.component_count(), 2);
    }

    #[test]
    fn non_object_root_is_rejected() {
        assert!(matches!(Response::from_json("[1,2]"), Err(ResponseError::NotAnObject)));
        assert!(matches!(Response::from_json("{oops"), Err(ResponseError::JsonParsing(_))));
    }

    #[test]
    fn serializes_with_wire_names() {
        let response = Response::new("T", vec![Section::new("S", vec![card("exams_card", "E")])]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["pageTitle"], "T");
        assert_eq!(value["sections"][0]["components"][0]["type"], "exams_card");
    }
}
