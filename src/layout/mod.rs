//! Layout classifier: splits a section into a full-width stack and an
//! adaptive grid, deciding each grid card's column span from content
//! density *and* the number of sibling grid cards.

pub mod family;
pub mod grid;

use std::sync::Arc;

use crate::models::{Card, Section};

pub use family::{density, family_of, Density, LayoutFamily};
pub use grid::{arrange, GridMode, GridOptions, Placement};

/// A grid card with its computed span.
#[derive(Debug, Clone)]
pub struct GridCard {
    pub card: Arc<Card>,
    pub family: LayoutFamily,
    pub span: usize,
}

/// Result of classifying one section. Order within each list follows the
/// section's component order.
#[derive(Debug, Clone, Default)]
pub struct SectionLayout {
    pub full_width: Vec<Arc<Card>>,
    pub grid: Vec<GridCard>,
}

/// Classify a whole section. Span depends on the section context, so this
/// never runs per card in isolation.
pub fn classify(section: &Section) -> SectionLayout {
    let (full_width, rest): (Vec<Arc<Card>>, Vec<Arc<Card>>) = section
        .components
        .iter()
        .cloned()
        .partition(|card| family_of(card.kind()) == LayoutFamily::FullWidth);

    let remaining = rest.len();
    let grid = rest
        .into_iter()
        .map(|card| {
            let family = family_of(card.kind());
            let span = span_for(family, density(card.kind(), &card.data), remaining);
            GridCard { card, family, span }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        section = %section.title,
        full_width = full_width.len(),
        grid = grid.len(),
        wide_spans = grid.iter().filter(|g| g.span > 1).count(),
        "Classified section layout"
    );

    SectionLayout { full_width, grid }
}

/// Span rule. A lone grid card never stretches; wide cards always take one
/// track; compact cards widen with density.
pub fn span_for(family: LayoutFamily, density: Density, remaining_cards: usize) -> usize {
    if remaining_cards == 1 {
        return 1;
    }
    match family {
        LayoutFamily::FullWidth | LayoutFamily::Wide => 1,
        LayoutFamily::Compact => match density.item_count {
            0..=2 => 1,
            3 if density.has_rich_item => 2,
            3 => 1,
            _ => 2,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn symptoms(n: usize) -> Card {
        let items: Vec<_> = (0..n).map(|i| json!({"primary": format!("S{i}")})).collect();
        Card::new("symptoms_card", "Sintomas", json!({ "items": items }))
    }

    #[test]
    fn lone_grid_card_spans_one_regardless_of_items() {
        let section = Section::new("S", vec![symptoms(9)]);
        let layout = classify(&section);
        assert_eq!(layout.grid.len(), 1);
        assert_eq!(layout.grid[0].span, 1);
    }

    #[test]
    fn dense_compact_card_spans_two_among_siblings() {
        let section = Section::new(
            "S",
            vec![
                symptoms(4),
                Card::new("allergies_card", "Alergias", json!({})),
            ],
        );
        let layout = classify(&section);
        assert_eq!(layout.grid[0].span, 2);
        assert_eq!(layout.grid[1].span, 1);
    }

    #[test]
    fn full_width_cards_do_not_count_as_grid_siblings() {
        let section = Section::new(
            "S",
            vec![
                Card::new("main_diagnosis_card", "Diagnóstico", json!({})),
                symptoms(5),
                Card::new("clinical_notes_card", "Notas", json!({})),
            ],
        );
        let layout = classify(&section);
        assert_eq!(layout.full_width.len(), 2);
        assert_eq!(layout.full_width[1].title, "Notas");
        assert_eq!(layout.grid[0].span, 1);
    }

    #[test]
    fn wide_family_is_always_one() {
        let exams: Vec<_> = (0..8).map(|i| json!({"primary": format!("E{i}")})).collect();
        let section = Section::new(
            "S",
            vec![
                Card::new("exams_card", "Exames", json!({ "items": exams })),
                symptoms(1),
            ],
        );
        let layout = classify(&section);
        assert_eq!(layout.grid[0].family, LayoutFamily::Wide);
        assert_eq!(layout.grid[0].span, 1);
    }

    #[test]
    fn three_items_widen_only_when_rich() {
        let plain = Density { item_count: 3, has_rich_item: false };
        let rich = Density { item_count: 3, has_rich_item: true };
        assert_eq!(span_for(LayoutFamily::Compact, plain, 2), 1);
        assert_eq!(span_for(LayoutFamily::Compact, rich, 2), 2);
        assert_eq!(span_for(LayoutFamily::Compact, rich, 1), 1);
        assert_eq!(span_for(LayoutFamily::Compact, Density::default(), 3), 1);
    }

    #[test]
    fn unknown_types_are_gridded() {
        let section = Section::new(
            "S",
            vec![Card::new("mystery_card", "?", json!({})), symptoms(2)],
        );
        let layout = classify(&section);
        assert_eq!(layout.grid.len(), 2);
        assert!(layout.full_width.is_empty());
    }
}
