//! Legacy shape → canonical model mappings, one per card family.

use serde_json::Value;

use crate::models::legacy::{
    record_at, records_at, LegacyAppointment, LegacyDiagnosis, LegacyExamRequest, LegacyNamed,
    LegacyPersonal, LegacyPrescription, LegacySocialHistory,
};
use crate::models::{CardType, Field, FieldVariant, ListItem};

pub const LABEL_REACTION: &str = "Reação";
pub const LABEL_SEVERITY: &str = "Severidade";
pub const LABEL_FREQUENCY: &str = "Frequência";
pub const LABEL_TYPE: &str = "Tipo";
pub const LABEL_SINCE: &str = "Desde";
pub const LABEL_STATUS: &str = "Status";
pub const LABEL_PROBABILITY: &str = "Probabilidade";
pub const LABEL_PRIORITY: &str = "Prioridade";
pub const LABEL_DOSAGE: &str = "Dosagem";
pub const LABEL_DURATION: &str = "Duração";
pub const LABEL_DATE: &str = "Data";
pub const LABEL_TIME: &str = "Horário";

pub const STATUS_EXCLUDED: &str = "Excluído";
pub const STATUS_POSSIBLE: &str = "Possível";
pub const DEFAULT_APPOINTMENT_TITLE: &str = "Agendamento";

/// Legacy array key for list-shaped families, `None` for the rest.
pub fn legacy_key(kind: CardType) -> Option<&'static str> {
    match kind {
        CardType::Allergies => Some("allergies"),
        CardType::Medications => Some("medications"),
        CardType::Symptoms => Some("symptoms"),
        CardType::ChronicConditions => Some("chronicConditions"),
        CardType::DifferentialDiagnosis => Some("differentials"),
        CardType::SuggestedExams => Some("suggestedExams"),
        CardType::Prescriptions => Some("prescriptions"),
        CardType::Exams => Some("exams"),
        CardType::NextAppointments => Some("appointments"),
        _ => None,
    }
}

/// Map the legacy array of a list-shaped card into canonical list items.
/// Records without a name are dropped.
pub fn legacy_items(kind: CardType, data: &Value) -> Vec<ListItem> {
    let Some(key) = legacy_key(kind) else {
        return Vec::new();
    };
    match kind {
        CardType::Prescriptions => prescription_items(data, key),
        CardType::Exams => exam_items(data, key),
        CardType::NextAppointments => appointment_items(data, key),
        _ => records_at::<LegacyNamed>(data, key)
            .into_iter()
            .filter_map(|record| named_item(kind, record))
            .collect(),
    }
}

fn named_item(kind: CardType, record: LegacyNamed) -> Option<ListItem> {
    let item = ListItem::new(record.name?);
    Some(match kind {
        CardType::Allergies => item
            .with_meta(LABEL_REACTION, record.reaction)
            .with_meta(LABEL_SEVERITY, record.severity),
        CardType::Medications => item
            .with_meta(LABEL_FREQUENCY, record.frequency)
            .with_meta(LABEL_TYPE, record.kind),
        CardType::Symptoms => item
            .with_meta(LABEL_FREQUENCY, record.frequency)
            .with_meta(LABEL_SEVERITY, record.severity),
        CardType::ChronicConditions => item
            .with_meta(LABEL_SINCE, record.since)
            .with_meta(LABEL_STATUS, record.status),
        CardType::DifferentialDiagnosis => {
            let status = if record.excluded {
                STATUS_EXCLUDED
            } else {
                STATUS_POSSIBLE
            };
            item.with_meta(LABEL_PROBABILITY, record.probability)
                .with_status(Some(status.to_string()))
        }
        CardType::SuggestedExams => item.with_meta(LABEL_PRIORITY, record.priority),
        _ => item,
    })
}

fn prescription_items(data: &Value, key: &str) -> Vec<ListItem> {
    records_at::<LegacyPrescription>(data, key)
        .into_iter()
        .flat_map(|parent| {
            let kind = parent.kind;
            let date = parent.date;
            parent.items.into_iter().filter_map(move |item| {
                Some(
                    ListItem::new(item.name?)
                        .with_secondary(kind.clone())
                        .with_meta(LABEL_DOSAGE, item.dosage)
                        .with_meta(LABEL_FREQUENCY, item.frequency)
                        .with_meta(LABEL_DURATION, item.duration)
                        .with_tag(date.clone()),
                )
            })
        })
        .collect()
}

fn exam_items(data: &Value, key: &str) -> Vec<ListItem> {
    records_at::<LegacyExamRequest>(data, key)
        .into_iter()
        .flat_map(|parent| {
            let category = parent.category;
            let date = parent.date;
            parent.items.into_iter().filter_map(move |item| {
                Some(
                    ListItem::new(item.name?)
                        .with_secondary(category.clone())
                        .with_meta(LABEL_PRIORITY, item.priority)
                        .with_tag(date.clone()),
                )
            })
        })
        .collect()
}

fn appointment_items(data: &Value, key: &str) -> Vec<ListItem> {
    records_at::<LegacyAppointment>(data, key)
        .into_iter()
        .map(|appt| {
            ListItem::new(
                appt.kind
                    .unwrap_or_else(|| DEFAULT_APPOINTMENT_TITLE.to_string()),
            )
            .with_secondary(appt.doctor)
            .with_meta(LABEL_DATE, appt.date)
            .with_meta(LABEL_TIME, appt.time)
            .with_tag(appt.notes)
        })
        .collect()
}

/// Map the legacy record of a field-shaped card into ordered fields.
pub fn legacy_fields(kind: CardType, data: &Value) -> Vec<Field> {
    let mut fields = Vec::new();
    let mut push = |label: &str, value: Option<String>, variant: Option<FieldVariant>| {
        if let Some(value) = value {
            let field = Field::new(label, value);
            fields.push(match variant {
                Some(v) => field.with_variant(v),
                None => field,
            });
        }
    };

    match kind {
        CardType::Biometrics => {
            let personal: LegacyPersonal = record_at(data, Some("personal"));
            push("Tipo Sanguíneo", personal.blood_type, Some(FieldVariant::Badge));
            push("IMC", personal.bmi, None);
            let weight_height = match (personal.weight, personal.height) {
                (Some(w), Some(h)) => Some(format!("{w} / {h}")),
                (w, h) => w.or(h),
            };
            push("Peso / Altura", weight_height, None);
            push("Idade", personal.age, None);
        }
        CardType::SocialHistory => {
            let social: LegacySocialHistory = record_at(data, Some("socialHistory"));
            push("Tabagismo", social.smoking, None);
            push("Etilismo", social.alcohol, None);
            push("Atividade Física", social.activity, None);
            push("Dieta", social.diet, None);
        }
        CardType::MainDiagnosis => {
            let diagnosis: LegacyDiagnosis = record_at(data, None);
            push(
                "Condição Principal",
                diagnosis.main_condition,
                Some(FieldVariant::Highlight),
            );
            push("CID", diagnosis.cid, None);
            push("Confiança", diagnosis.confidence, None);
            push("Severidade", diagnosis.severity, None);
            push("Evolução", diagnosis.evolution, None);
        }
        _ => {}
    }
    fields
}
