use crate::models::{CardType, ListItem};
use crate::render::types::{AlertRow, CardBody};

use super::{contains_any, empty, list_row};

const HIGH_SEVERITY_MARKERS: &[&str] = &["alta", "high"];

/// Allergy alerts. Severity comes from the severity metadata, falling back
/// to the item status; free-text match, not an enumeration.
pub fn body(items: &[ListItem]) -> CardBody {
    if items.is_empty() {
        return empty(CardType::Allergies);
    }
    CardBody::Alerts {
        rows: items
            .iter()
            .map(|item| AlertRow {
                row: list_row(item),
                high_severity: is_high_severity(item),
            })
            .collect(),
    }
}

pub fn is_high_severity(item: &ListItem) -> bool {
    item.meta_value(&["severidade", "severity", "gravidade"])
        .or(item.status.as_deref())
        .is_some_and(|s| contains_any(s, HIGH_SEVERITY_MARKERS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alta_in_any_case_is_high() {
        let item = ListItem::new("Penicilina").with_meta("Severidade", Some("ALTA".into()));
        assert!(is_high_severity(&item));
    }

    #[test]
    fn status_is_used_when_no_severity_metadata() {
        let item = ListItem::new("Látex").with_status(Some("High risk".into()));
        assert!(is_high_severity(&item));
        let item = ListItem::new("Poeira").with_meta("Severidade", Some("Leve".into()));
        assert!(!is_high_severity(&item));
    }

    #[test]
    fn empty_list_shows_no_alerts_message() {
        match body(&[]) {
            CardBody::Empty { message } => assert_eq!(message, "Nenhum alerta identificado"),
            other => panic!("unexpected body {other:?}"),
        }
    }
}
