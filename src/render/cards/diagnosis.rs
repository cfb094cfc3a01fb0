use crate::models::{CardType, Field, ListItem};
use crate::render::types::{CardBody, DiagnosisBadge, DiagnosisPanel, DifferentialRow, Icon};

use super::{contains_any, empty};
use crate::normalize::legacy::{STATUS_EXCLUDED, STATUS_POSSIBLE};

const CONDITION_LABELS: &[&str] = &["condição", "condicao", "condition"];
const CID_LABELS: &[&str] = &["cid"];
const EXCLUDED_MARKERS: &[&str] = &["excluído", "excluido", "excluded"];

/// Main diagnosis panel. Condition and CID are located by label substring;
/// every other field becomes a badge.
pub fn main_body(fields: &[Field], justification: Option<String>) -> CardBody {
    if fields.is_empty() && justification.is_none() {
        return empty(CardType::MainDiagnosis);
    }

    let condition_idx = fields
        .iter()
        .position(|f| f.label_contains_any(CONDITION_LABELS));
    let cid_idx = fields
        .iter()
        .enumerate()
        .find(|(i, f)| Some(*i) != condition_idx && f.label_contains_any(CID_LABELS))
        .map(|(i, _)| i);

    let badges = fields
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != condition_idx && Some(*i) != cid_idx)
        .map(|(_, f)| DiagnosisBadge {
            label: f.label.clone(),
            value: f.value.clone(),
            icon: badge_icon(&f.label),
        })
        .collect();

    CardBody::Diagnosis {
        panel: DiagnosisPanel {
            condition: condition_idx.map(|i| fields[i].value.clone()),
            cid: cid_idx.map(|i| fields[i].value.clone()),
            badges,
            justification,
        },
    }
}

fn badge_icon(label: &str) -> Icon {
    if contains_any(label, &["confiança", "confianca", "confidence"]) {
        Icon::Target
    } else if contains_any(label, &["severidade", "severity"]) {
        Icon::Gauge
    } else if contains_any(label, &["evolução", "evolucao", "evolution"]) {
        Icon::TrendingUp
    } else {
        Icon::Activity
    }
}

/// Differential diagnoses: excluded hypotheses are struck through and
/// dimmed, the rest are marked possible.
pub fn differential_body(items: &[ListItem]) -> CardBody {
    if items.is_empty() {
        return empty(CardType::DifferentialDiagnosis);
    }
    CardBody::Differentials {
        rows: items
            .iter()
            .map(|item| {
                let excluded = is_excluded(item);
                DifferentialRow {
                    name: item.primary.clone(),
                    probability: item.meta_value(&["probabilidade"]).map(str::to_string),
                    excluded,
                    badge: if excluded { STATUS_EXCLUDED } else { STATUS_POSSIBLE }.to_string(),
                }
            })
            .collect(),
    }
}

pub fn is_excluded(item: &ListItem) -> bool {
    item.status
        .as_deref()
        .is_some_and(|s| contains_any(s, EXCLUDED_MARKERS))
}
