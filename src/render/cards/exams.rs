use crate::models::{CardType, ListItem};
use crate::render::types::{CardBody, ExamGroup, ExamRow, PriorityDot};

use super::{contains_any, empty};

pub const DEFAULT_EXAM_GROUP: &str = "Geral";

/// Requested exams grouped by category (`secondary`), in first-seen order.
pub fn body(items: &[ListItem]) -> CardBody {
    if items.is_empty() {
        return empty(CardType::Exams);
    }

    let mut groups: Vec<ExamGroup> = Vec::new();
    for item in items {
        let category = item
            .secondary
            .clone()
            .unwrap_or_else(|| DEFAULT_EXAM_GROUP.to_string());
        let priority = item.meta_value(&["prioridade", "priority"]).map(str::to_string);
        let row = ExamRow {
            name: item.primary.clone(),
            dot: priority_dot(priority.as_deref()),
            priority,
            tags: item.tags.clone(),
        };
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.exams.push(row),
            None => groups.push(ExamGroup {
                category,
                count: 0,
                exams: vec![row],
            }),
        }
    }
    for group in &mut groups {
        group.count = group.exams.len();
    }
    CardBody::ExamGroups { groups }
}

pub fn priority_dot(priority: Option<&str>) -> PriorityDot {
    match priority {
        Some(p) if contains_any(p, &["alta"]) => PriorityDot::Red,
        Some(p) if contains_any(p, &["média", "media"]) => PriorityDot::Yellow,
        _ => PriorityDot::Blue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_secondary_with_default() {
        let items = vec![
            ListItem::new("Hemograma")
                .with_secondary(Some("Laboratorial".into()))
                .with_meta("Prioridade", Some("Alta".into())),
            ListItem::new("RX Tórax"),
            ListItem::new("Glicemia").with_secondary(Some("Laboratorial".into())),
        ];
        let CardBody::ExamGroups { groups } = body(&items) else {
            panic!("expected exam groups");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Laboratorial");
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].exams[0].dot, PriorityDot::Red);
        assert_eq!(groups[1].category, "Geral");
    }

    #[test]
    fn dot_colors_follow_priority_text() {
        assert_eq!(priority_dot(Some("Média")), PriorityDot::Yellow);
        assert_eq!(priority_dot(Some("media")), PriorityDot::Yellow);
        assert_eq!(priority_dot(Some("ALTA")), PriorityDot::Red);
        assert_eq!(priority_dot(Some("Baixa")), PriorityDot::Blue);
        assert_eq!(priority_dot(None), PriorityDot::Blue);
    }
}
