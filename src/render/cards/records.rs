//! Record-shaped families, each reading its own array through `models::records`.

use serde_json::Value;

use crate::models::{records, CardType};
use crate::render::types::{CardBody, Paragraph, TimelineEntry};

use super::empty;

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "—".to_string())
}

fn table(kind: CardType, headers: &[&str], rows: Vec<Vec<String>>) -> CardBody {
    if rows.is_empty() {
        return empty(kind);
    }
    CardBody::Table {
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

fn bullets(kind: CardType, lines: Vec<String>) -> CardBody {
    if lines.is_empty() {
        return empty(kind);
    }
    CardBody::Bullets { lines }
}

pub fn certificates(data: &Value) -> CardBody {
    let rows = records::certificates(data)
        .iter()
        .map(|c| vec![cell(&c.kind), cell(&c.date), cell(&c.period), cell(&c.description)])
        .collect();
    table(
        CardType::Certificates,
        &["Tipo", "Data", "Período", "Descrição"],
        rows,
    )
}

pub fn family_history(data: &Value) -> CardBody {
    let rows = records::family_history(data)
        .iter()
        .map(|m| vec![cell(&m.relation), cell(&m.condition), cell(&m.age)])
        .collect();
    table(
        CardType::FamilyHistory,
        &["Parentesco", "Condição", "Idade"],
        rows,
    )
}

pub fn referrals(data: &Value) -> CardBody {
    let rows = records::referrals(data)
        .iter()
        .map(|r| vec![cell(&r.specialty), cell(&r.reason), cell(&r.priority)])
        .collect();
    table(
        CardType::Referrals,
        &["Especialidade", "Motivo", "Prioridade"],
        rows,
    )
}

pub fn orientations(data: &Value) -> CardBody {
    bullets(CardType::Orientations, records::orientations(data))
}

pub fn risk_factors(data: &Value) -> CardBody {
    bullets(CardType::RiskFactors, records::risk_factors(data))
}

pub fn medical_history(data: &Value) -> CardBody {
    let entries: Vec<TimelineEntry> = records::history_events(data)
        .into_iter()
        .filter_map(|event| {
            let header = event.header_line();
            if header.is_empty() && event.note.is_none() {
                return None;
            }
            Some(TimelineEntry {
                header,
                note: event.note,
            })
        })
        .collect();
    if entries.is_empty() {
        return empty(CardType::MedicalHistory);
    }
    CardBody::Timeline { entries }
}

pub fn treatment_plan(data: &Value) -> CardBody {
    let plan = records::treatment_plan(data);
    if plan.is_empty() {
        return empty(CardType::TreatmentPlan);
    }
    CardBody::TreatmentPlan {
        medications: plan.medications,
        lifestyle: plan.lifestyle,
    }
}

pub fn clinical_notes(data: &Value) -> CardBody {
    let mut paragraphs: Vec<Paragraph> = records::note_sections(data)
        .into_iter()
        .map(|s| Paragraph {
            title: (!s.title.is_empty()).then_some(s.title),
            text: s.content,
        })
        .collect();
    if let Some(text) = records::content(data) {
        paragraphs.push(Paragraph { title: None, text });
    }
    narrative(CardType::ClinicalNotes, paragraphs)
}

pub fn observations(data: &Value) -> CardBody {
    let paragraphs = records::observations(data)
        .into_iter()
        .chain(records::content(data))
        .map(|text| Paragraph { title: None, text })
        .collect();
    narrative(CardType::Observations, paragraphs)
}

fn narrative(kind: CardType, paragraphs: Vec<Paragraph>) -> CardBody {
    if paragraphs.is_empty() {
        return empty(kind);
    }
    CardBody::Narrative { paragraphs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn certificates_fill_missing_cells() {
        let data = json!({"certificates": [{"type": "Atestado", "period": "3 dias"}]});
        let CardBody::Table { headers, rows } = certificates(&data) else {
            panic!("expected table");
        };
        assert_eq!(headers.len(), 4);
        assert_eq!(rows[0], vec!["Atestado", "—", "3 dias", "—"]);
    }

    #[test]
    fn empty_records_show_family_message() {
        assert_eq!(
            risk_factors(&json!({})),
            CardBody::Empty { message: "Nenhum fator de risco identificado".into() }
        );
        assert!(matches!(medical_history(&json!({"events": [{}]})), CardBody::Empty { .. }));
        assert!(matches!(observations(&Value::Null), CardBody::Empty { .. }));
    }

    #[test]
    fn timeline_entries_keep_header_and_note() {
        let data = json!({"events": [
            {"date": "2019", "type": "Cirurgia", "note": "Apendicectomia"}
        ]});
        let CardBody::Timeline { entries } = medical_history(&data) else {
            panic!("expected timeline");
        };
        assert_eq!(entries[0].header, "2019 — Cirurgia");
        assert_eq!(entries[0].note.as_deref(), Some("Apendicectomia"));
    }

    #[test]
    fn clinical_notes_combine_sections_and_content() {
        let data = json!({
            "sections": [{"title": "HDA", "content": "Tosse seca"}],
            "content": "Paciente estável"
        });
        let CardBody::Narrative { paragraphs } = clinical_notes(&data) else {
            panic!("expected narrative");
        };
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].title.as_deref(), Some("HDA"));
        assert_eq!(paragraphs[1].title, None);
    }
}
