//! Older, card-specific data shapes still emitted by some summaries.
//!
//! Every field is optional. These records are only read by the normalizer
//! and the document exporter's legacy tables.

use serde::Deserialize;
use serde_json::Value;

use super::lenient::{array_at, de_flag, de_lenient_vec, de_opt_text, parse_array_lenient};

/// A named entry with free-form extras (allergies, medications, symptoms,
/// chronic conditions, differentials, suggested exams).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyNamed {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub reaction: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub frequency: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "de_opt_text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub since: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub probability: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "de_flag")]
    pub excluded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyPrescriptionItem {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub dosage: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub duration: Option<String>,
}

/// A prescription sheet grouping several medications.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyPrescription {
    #[serde(default, rename = "type", deserialize_with = "de_opt_text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_vec")]
    pub items: Vec<LegacyPrescriptionItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyExamItem {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub priority: Option<String>,
}

/// An exam request grouping several exams under one category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyExamRequest {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_vec")]
    pub items: Vec<LegacyExamItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyAppointment {
    #[serde(default, rename = "type", deserialize_with = "de_opt_text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub doctor: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub notes: Option<String>,
}

/// `personal{}` block of a biometrics card.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPersonal {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub blood_type: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub bmi: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub age: Option<String>,
}

/// `socialHistory{}` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacySocialHistory {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub smoking: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub alcohol: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub activity: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub diet: Option<String>,
}

/// Flat fields of a legacy main-diagnosis card.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDiagnosis {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub main_condition: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub cid: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub confidence: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub evolution: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub justification: Option<String>,
}

/// Parse `data[key]` as an array of legacy records, skipping bad entries.
pub fn records_at<T: for<'de> Deserialize<'de>>(data: &Value, key: &str) -> Vec<T> {
    parse_array_lenient(array_at(data, key))
}

/// Parse `data[key]` (or the whole `data` when `key` is `None`) as one
/// legacy record. Non-object input yields the default record.
pub fn record_at<T: for<'de> Deserialize<'de> + Default>(data: &Value, key: Option<&str>) -> T {
    let source = match key {
        Some(key) => data.get(key),
        None => Some(data),
    };
    source
        .filter(|v| v.is_object())
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prescriptions_parse_nested_items() {
        let data = json!({"prescriptions": [
            {"type": "Simples", "date": "10/03/2025", "items": [
                {"name": "Amoxicilina", "dosage": "500mg", "frequency": "8/8h", "duration": "7 dias"},
                "bogus"
            ]},
            17
        ]});
        let parsed: Vec<LegacyPrescription> = records_at(&data, "prescriptions");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].items.len(), 1);
        assert_eq!(parsed[0].items[0].duration.as_deref(), Some("7 dias"));
    }

    #[test]
    fn personal_accepts_numbers() {
        let data = json!({"personal": {"bloodType": "O+", "weight": 70, "height": "1,75m", "age": 42}});
        let personal: LegacyPersonal = record_at(&data, Some("personal"));
        assert_eq!(personal.blood_type.as_deref(), Some("O+"));
        assert_eq!(personal.weight.as_deref(), Some("70"));
        assert_eq!(personal.age.as_deref(), Some("42"));
    }

    #[test]
    fn record_at_defaults_on_wrong_type() {
        let data = json!({"socialHistory": ["not", "an", "object"]});
        let social: LegacySocialHistory = record_at(&data, Some("socialHistory"));
        assert!(social.smoking.is_none());
        let diag: LegacyDiagnosis = record_at(&json!(null), None);
        assert!(diag.main_condition.is_none() && diag.justification.is_none());
    }

    #[test]
    fn differential_excluded_flag() {
        let data = json!({"differentials": [
            {"name": "Dengue", "excluded": true},
            {"name": "Gripe"},
            {"name": "Covid", "excluded": "sim"}
        ]});
        let parsed: Vec<LegacyNamed> = records_at(&data, "differentials");
        assert!(parsed[0].excluded);
        assert!(!parsed[1].excluded);
        assert!(parsed[2].excluded);
    }
}
