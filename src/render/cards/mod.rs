//! One rendering rule per card family. Every rule reads canonical items,
//! fields or family records, never the raw `data`.

pub mod allergies;
pub mod appointments;
pub mod diagnosis;
pub mod exams;
pub mod fields;
pub mod lists;
pub mod records;

use crate::models::{CardType, ListItem};

use super::style::empty_message;
use super::types::{CardBody, ListRow};

pub(crate) fn empty(kind: CardType) -> CardBody {
    CardBody::Empty {
        message: empty_message(kind).to_string(),
    }
}

pub(crate) fn list_row(item: &ListItem) -> ListRow {
    ListRow {
        primary: item.primary.clone(),
        secondary: item.secondary.clone(),
        details: item.metadata.clone(),
        tags: item.tags.clone(),
        status: item.status.clone(),
    }
}

/// Case-insensitive "does `text` contain any of `needles`" (needles lowercase).
pub(crate) fn contains_any(text: &str, needles: &[&str]) -> bool {
    let lower = text.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_any_ignores_case_and_accents_stay_exact() {
        assert!(contains_any("ALTA", &["alta"]));
        assert!(contains_any("Severity: High", &["alta", "high"]));
        assert!(contains_any("EXCLUÍDO", &["excluído"]));
        assert!(!contains_any("Baixa", &["alta"]));
    }
}
