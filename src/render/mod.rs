//! Card Rendering Strategy.
//!
//! `render_card` dispatches on the card's resolved type over an exhaustive
//! match. Every rule reads the normalizer's output (or its own record array
//! for record-shaped families). Each card is rendered inside its own failure
//! boundary: an `Err` or a panic turns into a red error placeholder and never
//! reaches the section.

pub mod cards;
pub mod style;
pub mod types;

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde_json::Value;
use thiserror::Error;

use crate::models::{Card, CardType, ColorVariant};
use crate::normalize::{diagnosis_justification, normalize_fields, normalize_items};

pub use types::*;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Malformed data for {card_type}: expected an object, found {found}")]
    MalformedData { card_type: String, found: &'static str },

    #[error("Render failed: {0}")]
    Panicked(String),
}

// ─── Entry points ───────────────────────────────────────────

/// Render one card. Total: never panics, never returns an error.
pub fn render_card(card: &Card) -> VisualCard {
    let Some(kind) = card.kind() else {
        tracing::warn!(card_type = %card.card_type(), title = %card.title, "Unknown card type");
        return unknown_type(card);
    };
    isolate(card, || render_known(card, kind))
}

/// Run `rule` behind a failure boundary. Errors and panics become the
/// card's error placeholder.
pub fn isolate<F>(card: &Card, rule: F) -> VisualCard
where
    F: FnOnce() -> Result<VisualCard, RenderError>,
{
    let outcome = match catch_unwind(AssertUnwindSafe(rule)) {
        Ok(result) => result,
        Err(payload) => Err(RenderError::Panicked(panic_message(payload.as_ref()))),
    };
    match outcome {
        Ok(visual) => visual,
        Err(e) => {
            tracing::error!(card_type = %card.card_type(), title = %card.title, error = %e, "Card render failed");
            error_placeholder(card, &e)
        }
    }
}

// ─── Dispatch ───────────────────────────────────────────────

fn render_known(card: &Card, kind: CardType) -> Result<VisualCard, RenderError> {
    let data = checked_data(card)?;
    let (icon, default_color) = style::defaults(kind);
    Ok(VisualCard {
        card_type: card.card_type().to_string(),
        title: card.title.clone(),
        icon,
        color: style::resolve_color(card.variant.as_deref(), default_color),
        body: body_for(kind, data),
    })
}

fn body_for(kind: CardType, data: &Value) -> CardBody {
    use cards::*;
    match kind {
        CardType::Allergies => allergies::body(&normalize_items(kind, data)),
        CardType::Exams => exams::body(&normalize_items(kind, data)),
        CardType::NextAppointments => appointments::body(&normalize_items(kind, data)),
        CardType::DifferentialDiagnosis => {
            diagnosis::differential_body(&normalize_items(kind, data))
        }
        CardType::Medications
        | CardType::Symptoms
        | CardType::ChronicConditions
        | CardType::SuggestedExams
        | CardType::Prescriptions => lists::body(kind, &normalize_items(kind, data)),
        CardType::MainDiagnosis => {
            diagnosis::main_body(&normalize_fields(kind, data), diagnosis_justification(data))
        }
        CardType::Biometrics | CardType::SocialHistory => {
            fields::body(kind, &normalize_fields(kind, data))
        }
        CardType::Certificates => records::certificates(data),
        CardType::FamilyHistory => records::family_history(data),
        CardType::Referrals => records::referrals(data),
        CardType::Orientations => records::orientations(data),
        CardType::RiskFactors => records::risk_factors(data),
        CardType::MedicalHistory => records::medical_history(data),
        CardType::TreatmentPlan => records::treatment_plan(data),
        CardType::ClinicalNotes => records::clinical_notes(data),
        CardType::Observations => records::observations(data),
    }
}

/// Object or null (treated as empty); anything else is malformed.
fn checked_data(card: &Card) -> Result<&Value, RenderError> {
    match &card.data {
        Value::Object(_) | Value::Null => Ok(&card.data),
        other => Err(RenderError::MalformedData {
            card_type: card.card_type().to_string(),
            found: json_kind(other),
        }),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ─── Placeholders ───────────────────────────────────────────

fn unknown_type(card: &Card) -> VisualCard {
    VisualCard {
        card_type: card.card_type().to_string(),
        title: card.title.clone(),
        icon: Icon::AlertCircle,
        color: ColorVariant::Amber,
        body: CardBody::Warning {
            message: format!("Tipo de card desconhecido: {}", card.card_type()),
        },
    }
}

fn error_placeholder(card: &Card, error: &RenderError) -> VisualCard {
    VisualCard {
        card_type: card.card_type().to_string(),
        title: card.title.clone(),
        icon: Icon::XCircle,
        color: ColorVariant::Red,
        body: CardBody::Error {
            message: error.to_string(),
        },
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
