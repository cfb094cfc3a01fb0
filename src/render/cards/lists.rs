use crate::models::{CardType, ListItem};
use crate::render::types::CardBody;

use super::{empty, list_row};

/// Plain list families: medications, symptoms, chronic conditions,
/// suggested exams and prescriptions.
pub fn body(kind: CardType, items: &[ListItem]) -> CardBody {
    if items.is_empty() {
        return empty(kind);
    }
    CardBody::List {
        rows: items.iter().map(list_row).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_item_order_and_details() {
        let items = vec![
            ListItem::new("Amoxicilina")
                .with_secondary(Some("Simples".into()))
                .with_meta("Dosagem", Some("500mg".into()))
                .with_tag(Some("10/03/2025".into())),
            ListItem::new("Dipirona"),
        ];
        let CardBody::List { rows } = body(CardType::Prescriptions, &items) else {
            panic!("expected list");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].secondary.as_deref(), Some("Simples"));
        assert_eq!(rows[0].details[0].value, "500mg");
        assert_eq!(rows[0].tags, vec!["10/03/2025".to_string()]);
        assert_eq!(rows[1].primary, "Dipirona");
    }

    #[test]
    fn empty_uses_family_message() {
        assert_eq!(
            body(CardType::Medications, &[]),
            CardBody::Empty { message: "Nenhum medicamento em uso".into() }
        );
    }
}
