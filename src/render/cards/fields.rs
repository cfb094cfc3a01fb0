use crate::models::{CardType, Field, FieldVariant};
use crate::render::types::{CardBody, FieldCell};

use super::empty;

/// Biometrics and social history: a labeled field grid.
pub fn body(kind: CardType, fields: &[Field]) -> CardBody {
    if fields.is_empty() {
        return empty(kind);
    }
    CardBody::Fields {
        cells: fields
            .iter()
            .map(|f| FieldCell {
                label: f.label.clone(),
                value: f.value.clone(),
                variant: f.variant.unwrap_or(FieldVariant::Text),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_defaults_to_text() {
        let fields = vec![
            Field::new("Tipo Sanguíneo", "O+").with_variant(FieldVariant::Badge),
            Field::new("IMC", "23"),
        ];
        let CardBody::Fields { cells } = body(CardType::Biometrics, &fields) else {
            panic!("expected fields");
        };
        assert_eq!(cells[0].variant, FieldVariant::Badge);
        assert_eq!(cells[1].variant, FieldVariant::Text);
    }

    #[test]
    fn empty_social_history_message() {
        let CardBody::Empty { message } = body(CardType::SocialHistory, &[]) else {
            panic!("expected empty state");
        };
        assert_eq!(message, "Histórico social não informado");
    }
}
