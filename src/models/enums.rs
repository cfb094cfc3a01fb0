use serde::{Deserialize, Serialize};

use super::ResponseError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ResponseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ResponseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(CardType {
    MainDiagnosis => "main_diagnosis_card",
    DifferentialDiagnosis => "differential_diagnosis_card",
    Symptoms => "symptoms_card",
    Allergies => "allergies_card",
    Medications => "medications_card",
    ChronicConditions => "chronic_conditions_card",
    Biometrics => "biometrics_card",
    SocialHistory => "social_history_card",
    FamilyHistory => "family_history_card",
    RiskFactors => "risk_factors_card",
    MedicalHistory => "medical_history_card",
    Prescriptions => "prescriptions_card",
    Exams => "exams_card",
    SuggestedExams => "suggested_exams_card",
    TreatmentPlan => "treatment_plan_card",
    Orientations => "orientations_card",
    Certificates => "certificates_card",
    Referrals => "referrals_card",
    NextAppointments => "next_appointments_card",
    ClinicalNotes => "clinical_notes_card",
    Observations => "observations_card",
});

str_enum!(ColorVariant {
    Emerald => "emerald",
    Blue => "blue",
    Violet => "violet",
    Amber => "amber",
    Teal => "teal",
    Gray => "gray",
    Rose => "rose",
    Red => "red",
    Indigo => "indigo",
    Orange => "orange",
    Purple => "purple",
    Neutral => "neutral",
});

str_enum!(FieldVariant {
    Badge => "badge",
    Text => "text",
    Highlight => "highlight",
});

/// Which canonical model a card type normalizes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardShape {
    /// `items[]` or a legacy array mapped into list items.
    List,
    /// `fields[]` or a legacy record mapped into labeled fields.
    Fields,
    /// Keeps its own array/record; the normalizer does not touch it.
    Record,
}

impl CardType {
    pub fn shape(&self) -> CardShape {
        match self {
            Self::Allergies
            | Self::Medications
            | Self::Symptoms
            | Self::ChronicConditions
            | Self::DifferentialDiagnosis
            | Self::SuggestedExams
            | Self::Prescriptions
            | Self::Exams
            | Self::NextAppointments => CardShape::List,
            Self::Biometrics | Self::SocialHistory | Self::MainDiagnosis => CardShape::Fields,
            Self::Certificates
            | Self::Orientations
            | Self::ClinicalNotes
            | Self::Referrals
            | Self::RiskFactors
            | Self::FamilyHistory
            | Self::MedicalHistory
            | Self::TreatmentPlan
            | Self::Observations => CardShape::Record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn card_type_round_trips_every_tag() {
        for kind in CardType::ALL {
            assert_eq!(CardType::from_str(kind.as_str()).unwrap(), *kind);
        }
        assert_eq!(CardType::ALL.len(), 21);
    }

    #[test]
    fn unknown_card_tag_is_an_error() {
        let err = CardType::from_str("vitals_card").unwrap_err();
        assert!(matches!(err, ResponseError::InvalidEnum { .. }));
    }

    #[test]
    fn color_variant_has_twelve_tokens() {
        assert_eq!(ColorVariant::ALL.len(), 12);
        assert_eq!(ColorVariant::from_str("teal").unwrap(), ColorVariant::Teal);
        assert!(ColorVariant::from_str("magenta").is_err());
    }

    #[test]
    fn shapes_partition_the_taxonomy() {
        let list = CardType::ALL.iter().filter(|k| k.shape() == CardShape::List).count();
        let fields = CardType::ALL.iter().filter(|k| k.shape() == CardShape::Fields).count();
        let record = CardType::ALL.iter().filter(|k| k.shape() == CardShape::Record).count();
        assert_eq!((list, fields, record), (9, 3, 9));
    }

    #[test]
    fn serde_uses_wire_tags() {
        let json = serde_json::to_string(&CardType::NextAppointments).unwrap();
        assert_eq!(json, "\"next_appointments_card\"");
        let parsed: ColorVariant = serde_json::from_str("\"rose\"").unwrap();
        assert_eq!(parsed, ColorVariant::Rose);
    }
}
