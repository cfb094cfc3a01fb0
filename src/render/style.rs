//! Per-family presentation defaults: icon, color and empty-state text.

use crate::models::{CardType, ColorVariant};

use super::types::Icon;

/// Default icon and color for a card type.
pub fn defaults(kind: CardType) -> (Icon, ColorVariant) {
    use ColorVariant::*;
    match kind {
        CardType::MainDiagnosis => (Icon::Stethoscope, Emerald),
        CardType::DifferentialDiagnosis => (Icon::GitCompare, Violet),
        CardType::Symptoms => (Icon::Activity, Amber),
        CardType::Allergies => (Icon::AlertTriangle, Red),
        CardType::Medications => (Icon::Pill, Blue),
        CardType::ChronicConditions => (Icon::HeartPulse, Rose),
        CardType::Biometrics => (Icon::Ruler, Teal),
        CardType::SocialHistory => (Icon::Users, Indigo),
        CardType::FamilyHistory => (Icon::UsersRound, Purple),
        CardType::RiskFactors => (Icon::ShieldAlert, Orange),
        CardType::MedicalHistory => (Icon::History, Gray),
        CardType::Prescriptions => (Icon::ClipboardList, Blue),
        CardType::Exams => (Icon::FlaskConical, Indigo),
        CardType::SuggestedExams => (Icon::Microscope, Teal),
        CardType::TreatmentPlan => (Icon::ClipboardCheck, Emerald),
        CardType::Orientations => (Icon::Lightbulb, Amber),
        CardType::Certificates => (Icon::FileBadge, Neutral),
        CardType::Referrals => (Icon::Send, Violet),
        CardType::NextAppointments => (Icon::Calendar, Blue),
        CardType::ClinicalNotes => (Icon::NotebookPen, Gray),
        CardType::Observations => (Icon::Eye, Neutral),
    }
}

/// `card.variant` when it names one of the 12 tokens, else the family default.
pub fn resolve_color(variant: Option<&str>, default: ColorVariant) -> ColorVariant {
    match variant.map(str::parse::<ColorVariant>) {
        Some(Ok(color)) => color,
        Some(Err(_)) => {
            tracing::debug!(variant = ?variant, "Unrecognized color variant, using card default");
            default
        }
        None => default,
    }
}

/// Literal empty-state message shown when a card has nothing to display.
pub fn empty_message(kind: CardType) -> &'static str {
    match kind {
        CardType::MainDiagnosis => "Diagnóstico não definido",
        CardType::DifferentialDiagnosis => "Nenhum diagnóstico diferencial",
        CardType::Symptoms => "Nenhum sintoma relatado",
        CardType::Allergies => "Nenhum alerta identificado",
        CardType::Medications => "Nenhum medicamento em uso",
        CardType::ChronicConditions => "Nenhuma condição crônica registrada",
        CardType::Biometrics => "Dados biométricos não informados",
        CardType::SocialHistory => "Histórico social não informado",
        CardType::FamilyHistory => "Histórico familiar não informado",
        CardType::RiskFactors => "Nenhum fator de risco identificado",
        CardType::MedicalHistory => "Nenhum evento no histórico",
        CardType::Prescriptions => "Nenhuma prescrição emitida",
        CardType::Exams => "Nenhum exame solicitado",
        CardType::SuggestedExams => "Nenhum exame sugerido",
        CardType::TreatmentPlan => "Plano terapêutico não definido",
        CardType::Orientations => "Nenhuma orientação registrada",
        CardType::Certificates => "Nenhum atestado emitido",
        CardType::Referrals => "Nenhum encaminhamento",
        CardType::NextAppointments => "Nenhum agendamento",
        CardType::ClinicalNotes => "Nenhuma nota clínica",
        CardType::Observations => "Nenhuma observação",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_defaults_and_empty_text() {
        for kind in CardType::ALL {
            let _ = defaults(*kind);
            assert!(!empty_message(*kind).is_empty());
        }
    }

    #[test]
    fn unrecognized_variant_falls_back() {
        assert_eq!(resolve_color(Some("violet"), ColorVariant::Red), ColorVariant::Violet);
        assert_eq!(resolve_color(Some("chartreuse"), ColorVariant::Red), ColorVariant::Red);
        assert_eq!(resolve_color(None, ColorVariant::Teal), ColorVariant::Teal);
    }
}
