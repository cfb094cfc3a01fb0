//! Record-shaped card families. These keep their own arrays instead of
//! converging on list items / fields; each reader is total over `data`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient::{array_at, de_opt_text, de_text, text, text_at};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(default, rename = "type", deserialize_with = "de_opt_text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub period: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FamilyMember {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub relation: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub age: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Referral {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub specialty: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub priority: Option<String>,
}

/// One entry of the medical-history timeline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryEvent {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub date: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "de_opt_text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub doctor: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub specialty: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub note: Option<String>,
}

impl HistoryEvent {
    /// `date — type — doctor (specialty)` with absent parts skipped.
    pub fn header_line(&self) -> String {
        let doctor = match (&self.doctor, &self.specialty) {
            (Some(d), Some(s)) => Some(format!("{d} ({s})")),
            (Some(d), None) => Some(d.clone()),
            (None, Some(s)) => Some(s.clone()),
            (None, None) => None,
        };
        [self.date.clone(), self.kind.clone(), doctor]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" — ")
    }
}

/// A titled paragraph inside a clinical-notes card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteSection {
    #[serde(default, deserialize_with = "de_text")]
    pub title: String,
    #[serde(default, deserialize_with = "de_text")]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TreatmentPlan {
    pub medications: Vec<String>,
    pub lifestyle: Vec<String>,
}

impl TreatmentPlan {
    pub fn is_empty(&self) -> bool {
        self.medications.is_empty() && self.lifestyle.is_empty()
    }
}

pub fn certificates(data: &Value) -> Vec<Certificate> {
    super::legacy::records_at(data, "certificates")
}

pub fn family_history(data: &Value) -> Vec<FamilyMember> {
    super::legacy::records_at(data, "familyHistory")
}

pub fn referrals(data: &Value) -> Vec<Referral> {
    super::legacy::records_at(data, "referrals")
}

pub fn history_events(data: &Value) -> Vec<HistoryEvent> {
    super::legacy::records_at(data, "events")
}

/// Orientation lines: plain strings or `{text}` objects.
pub fn orientations(data: &Value) -> Vec<String> {
    text_entries(array_at(data, "orientations"), &["text", "description"])
}

/// Risk factor lines: plain strings or `{name}` / `{factor}` objects.
pub fn risk_factors(data: &Value) -> Vec<String> {
    text_entries(array_at(data, "riskFactors"), &["name", "factor"])
}

pub fn note_sections(data: &Value) -> Vec<NoteSection> {
    super::legacy::records_at::<NoteSection>(data, "sections")
        .into_iter()
        .filter(|s| !s.title.is_empty() || !s.content.is_empty())
        .collect()
}

/// Free text from `content`.
pub fn content(data: &Value) -> Option<String> {
    text_at(data, "content")
}

/// Free text from `observations`.
pub fn observations(data: &Value) -> Option<String> {
    text_at(data, "observations")
}

pub fn treatment_plan(data: &Value) -> TreatmentPlan {
    let medications = array_at(data, "medications")
        .iter()
        .filter_map(|entry| match entry {
            Value::Object(_) => {
                let name = text_at(entry, "name")?;
                let details: Vec<String> = ["dosage", "frequency", "duration"]
                    .iter()
                    .filter_map(|k| text_at(entry, k))
                    .collect();
                Some(if details.is_empty() {
                    name
                } else {
                    format!("{name} — {}", details.join(", "))
                })
            }
            other => text(other),
        })
        .collect();
    TreatmentPlan {
        medications,
        lifestyle: text_entries(array_at(data, "lifestyle"), &["text", "description"]),
    }
}

fn text_entries(items: &[Value], keys: &[&str]) -> Vec<String> {
    items
        .iter()
        .filter_map(|entry| match entry {
            Value::Object(_) => keys.iter().find_map(|k| text_at(entry, k)),
            other => text(other),
        })
        .collect()
}
