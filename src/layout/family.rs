use serde::Serialize;
use serde_json::Value;

use crate::models::{records, CardType};
use crate::normalize::{self, Normalized};

/// Static layout family of a card type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutFamily {
    /// Always a row of its own, stacked above the grid.
    FullWidth,
    Wide,
    Compact,
}

/// Fixed, type-indexed family lookup. Unknown tags are gridded as compact
/// so their warning block still takes a cell.
pub fn family_of(kind: Option<CardType>) -> LayoutFamily {
    let Some(kind) = kind else {
        return LayoutFamily::Compact;
    };
    match kind {
        CardType::MainDiagnosis
        | CardType::ClinicalNotes
        | CardType::Observations
        | CardType::TreatmentPlan
        | CardType::MedicalHistory => LayoutFamily::FullWidth,
        CardType::Prescriptions
        | CardType::Exams
        | CardType::DifferentialDiagnosis
        | CardType::Certificates
        | CardType::Referrals
        | CardType::NextAppointments => LayoutFamily::Wide,
        CardType::Allergies
        | CardType::Medications
        | CardType::Symptoms
        | CardType::ChronicConditions
        | CardType::Biometrics
        | CardType::SocialHistory
        | CardType::FamilyHistory
        | CardType::RiskFactors
        | CardType::SuggestedExams
        | CardType::Orientations => LayoutFamily::Compact,
    }
}

/// Content density of one card, used by the span rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Density {
    pub item_count: usize,
    /// Some item carries more than two metadata entries or tags.
    pub has_rich_item: bool,
}

/// Count whichever array the card actually carries.
pub fn density(kind: Option<CardType>, data: &Value) -> Density {
    let Some(kind) = kind else {
        return Density::default();
    };
    match normalize::normalize(kind, data) {
        Normalized::Items(items) => Density {
            item_count: items.len(),
            has_rich_item: items
                .iter()
                .any(|i| i.metadata.len() > 2 || i.tags.len() > 2),
        },
        Normalized::Fields(fields) => Density {
            item_count: fields.len(),
            has_rich_item: false,
        },
        Normalized::Passthrough => Density {
            item_count: record_count(kind, data),
            has_rich_item: false,
        },
    }
}

fn record_count(kind: CardType, data: &Value) -> usize {
    match kind {
        CardType::Certificates => records::certificates(data).len(),
        CardType::Orientations => records::orientations(data).len(),
        CardType::RiskFactors => records::risk_factors(data).len(),
        CardType::FamilyHistory => records::family_history(data).len(),
        CardType::Referrals => records::referrals(data).len(),
        CardType::MedicalHistory => records::history_events(data).len(),
        CardType::TreatmentPlan => {
            let plan = records::treatment_plan(data);
            plan.medications.len() + plan.lifestyle.len()
        }
        CardType::ClinicalNotes => {
            records::note_sections(data).len() + usize::from(records::content(data).is_some())
        }
        CardType::Observations => usize::from(
            records::observations(data).is_some() || records::content(data).is_some(),
        ),
        _ => 0,
    }
}
