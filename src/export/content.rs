//! Per-component content selection for the document. Each card becomes one
//! [`DocBlock`], chosen by trying a fixed sequence of extractors until one
//! produces something.

use serde::Serialize;
use serde_json::Value;

use crate::models::legacy::{records_at, LegacyNamed, LegacyPrescription};
use crate::models::{records, Card, CardType, ListItem};
use crate::normalize::{
    diagnosis_justification, generic_fields, generic_items, legacy_fields, legacy_items,
    legacy_key,
};

pub const NO_CONTENT: &str = "Sem conteúdo.";
pub const DETAIL_SEPARATOR: &str = " — ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocBlock {
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Lines {
        lines: Vec<String>,
    },
    /// Printed as [`NO_CONTENT`].
    Empty,
}

impl DocBlock {
    fn table(headers: &[&str], rows: Vec<Vec<String>>) -> Option<Self> {
        (!rows.is_empty()).then(|| Self::Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        })
    }

    fn lines(lines: Vec<String>) -> Option<Self> {
        (!lines.is_empty()).then_some(Self::Lines { lines })
    }
}

/// Select the document content for one card.
pub fn block_for(card: &Card) -> DocBlock {
    let data = &card.data;
    if !data.is_object() {
        return DocBlock::Empty;
    }
    let kind = card.kind();

    generic_field_table(data)
        .or_else(|| generic_item_table(data))
        .or_else(|| legacy_table(kind, data))
        .or_else(|| free_text(kind, data))
        .unwrap_or(DocBlock::Empty)
}

// ─── Generic shapes ─────────────────────────────────────────

fn generic_field_table(data: &Value) -> Option<DocBlock> {
    let rows = generic_fields(data)?
        .into_iter()
        .map(|f| vec![f.label, f.value])
        .collect();
    DocBlock::table(&["Campo", "Valor"], rows)
}

fn generic_item_table(data: &Value) -> Option<DocBlock> {
    let rows = generic_items(data)?
        .iter()
        .map(|item| vec![item.primary.clone(), item_details(item, false)])
        .collect();
    DocBlock::table(&["Item", "Detalhes"], rows)
}

/// `secondary` then each `label: value` pair, joined with " — ".
pub fn item_details(item: &ListItem, with_status: bool) -> String {
    item.secondary
        .iter()
        .cloned()
        .chain(item.metadata.iter().map(|m| format!("{}: {}", m.label, m.value)))
        .chain(item.status.iter().filter(|_| with_status).cloned())
        .collect::<Vec<_>>()
        .join(DETAIL_SEPARATOR)
}

// ─── Legacy tables ──────────────────────────────────────────

fn or_blank(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn legacy_table(kind: Option<CardType>, data: &Value) -> Option<DocBlock> {
    DocBlock::table(
        &["Orientação"],
        records::orientations(data).into_iter().map(|l| vec![l]).collect(),
    )
    .or_else(|| {
        DocBlock::table(
            &["Fator de Risco"],
            records::risk_factors(data).into_iter().map(|l| vec![l]).collect(),
        )
    })
    .or_else(|| {
        let rows = records::family_history(data)
            .into_iter()
            .map(|m| vec![or_blank(m.relation), or_blank(m.condition), or_blank(m.age)])
            .collect();
        DocBlock::table(&["Parentesco", "Condição", "Idade"], rows)
    })
    .or_else(|| {
        let rows = records_at::<LegacyNamed>(data, "chronicConditions")
            .into_iter()
            .filter_map(|c| Some(vec![c.name?, or_blank(c.since), or_blank(c.status)]))
            .collect();
        DocBlock::table(&["Condição", "Desde", "Status"], rows)
    })
    .or_else(|| {
        let rows = records::certificates(data)
            .into_iter()
            .map(|c| {
                vec![
                    or_blank(c.kind),
                    or_blank(c.date),
                    or_blank(c.period),
                    or_blank(c.description),
                ]
            })
            .collect();
        DocBlock::table(&["Tipo", "Data", "Período", "Descrição"], rows)
    })
    .or_else(|| {
        let rows = records::referrals(data)
            .into_iter()
            .map(|r| vec![or_blank(r.specialty), or_blank(r.reason), or_blank(r.priority)])
            .collect();
        DocBlock::table(&["Especialidade", "Motivo", "Prioridade"], rows)
    })
    .or_else(|| kind.and_then(|kind| named_table(kind, data)))
    .or_else(|| appointment_table(data))
}

/// Symptoms, allergies, medications, differentials, suggested exams and
/// exam requests: `Nome | Detalhes`, built from the normalizer so the text
/// matches the interactive card.
fn named_table(kind: CardType, data: &Value) -> Option<DocBlock> {
    match kind {
        CardType::Symptoms
        | CardType::Allergies
        | CardType::Medications
        | CardType::DifferentialDiagnosis
        | CardType::SuggestedExams
        | CardType::Exams => {}
        _ => return None,
    }
    legacy_key(kind)?;
    let rows = legacy_items(kind, data)
        .iter()
        .map(|item| vec![item.primary.clone(), item_details(item, true)])
        .collect();
    DocBlock::table(&["Nome", "Detalhes"], rows)
}

fn appointment_table(data: &Value) -> Option<DocBlock> {
    let rows = records_at::<crate::models::legacy::LegacyAppointment>(data, "appointments")
        .into_iter()
        .map(|a| {
            vec![
                or_blank(a.date),
                or_blank(a.time),
                or_blank(a.kind),
                or_blank(a.doctor),
                or_blank(a.notes),
            ]
        })
        .collect();
    DocBlock::table(&["Data", "Horário", "Tipo", "Médico", "Observações"], rows)
}

// ─── Free text ──────────────────────────────────────────────

/// A main-diagnosis card reads its own extractor first so the condition and
/// CID are not shadowed by `content`, which it prints as the justification.
fn free_text(kind: Option<CardType>, data: &Value) -> Option<DocBlock> {
    if kind == Some(CardType::MainDiagnosis) {
        if let Some(block) = DocBlock::lines(diagnosis_lines(data)) {
            return Some(block);
        }
    }
    DocBlock::lines(narrative_lines(data))
        .or_else(|| DocBlock::lines(diagnosis_lines(data)))
        .or_else(|| DocBlock::lines(treatment_lines(data)))
        .or_else(|| DocBlock::lines(timeline_lines(data)))
        .or_else(|| DocBlock::lines(prescription_lines(data)))
        .or_else(|| DocBlock::lines(field_lines(CardType::Biometrics, data)))
        .or_else(|| DocBlock::lines(field_lines(CardType::SocialHistory, data)))
}

/// `observations`, `content` and `sections[]`, in that order.
fn narrative_lines(data: &Value) -> Vec<String> {
    let mut lines: Vec<String> = records::observations(data)
        .into_iter()
        .chain(records::content(data))
        .collect();
    for section in records::note_sections(data) {
        match (section.title.is_empty(), section.content.is_empty()) {
            (false, false) => lines.push(format!("{}: {}", section.title, section.content)),
            (false, true) => lines.push(section.title),
            (true, _) => lines.push(section.content),
        }
    }
    lines
}

fn diagnosis_lines(data: &Value) -> Vec<String> {
    let mut lines: Vec<String> = legacy_fields(CardType::MainDiagnosis, data)
        .into_iter()
        .map(|f| format!("{}: {}", f.label, f.value))
        .collect();
    if let Some(text) = diagnosis_justification(data) {
        lines.push(format!("Justificativa: {text}"));
    }
    lines
}

fn treatment_lines(data: &Value) -> Vec<String> {
    let plan = records::treatment_plan(data);
    let mut lines = Vec::new();
    if !plan.medications.is_empty() {
        lines.push("Medicamentos:".to_string());
        lines.extend(plan.medications.iter().map(|m| format!("• {m}")));
    }
    if !plan.lifestyle.is_empty() {
        lines.push("Estilo de vida:".to_string());
        lines.extend(plan.lifestyle.iter().map(|l| format!("• {l}")));
    }
    lines
}

fn timeline_lines(data: &Value) -> Vec<String> {
    let mut lines = Vec::new();
    for event in records::history_events(data) {
        let header = event.header_line();
        if !header.is_empty() {
            lines.push(header);
        }
        if let Some(note) = event.note {
            lines.push(format!("  {note}"));
        }
    }
    lines
}

fn prescription_lines(data: &Value) -> Vec<String> {
    let mut lines = Vec::new();
    for rx in records_at::<LegacyPrescription>(data, "prescriptions") {
        let header: Vec<String> = rx.kind.into_iter().chain(rx.date).collect();
        if !header.is_empty() {
            lines.push(header.join(DETAIL_SEPARATOR));
        }
        for item in rx.items {
            let Some(name) = item.name else { continue };
            let dosage: Vec<String> = [item.dosage, item.frequency, item.duration]
                .into_iter()
                .flatten()
                .collect();
            lines.push(if dosage.is_empty() {
                format!("• {name}")
            } else {
                format!("• {name}{DETAIL_SEPARATOR}{}", dosage.join(", "))
            });
        }
    }
    lines
}

fn field_lines(kind: CardType, data: &Value) -> Vec<String> {
    legacy_fields(kind, data)
        .into_iter()
        .map(|f| format!("{}: {}", f.label, f.value))
        .collect()
}
