use serde::Serialize;

use crate::models::{ColorVariant, FieldVariant, MetadataEntry};

/// Icon names understood by the host UI shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Stethoscope,
    GitCompare,
    Activity,
    AlertTriangle,
    Pill,
    HeartPulse,
    Ruler,
    Users,
    UsersRound,
    ShieldAlert,
    History,
    ClipboardList,
    FlaskConical,
    Microscope,
    ClipboardCheck,
    Lightbulb,
    FileBadge,
    Send,
    Calendar,
    NotebookPen,
    Eye,
    Gauge,
    TrendingUp,
    Target,
    AlertCircle,
    XCircle,
}

/// Fully resolved, host-renderable card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualCard {
    pub card_type: String,
    pub title: String,
    pub icon: Icon,
    pub color: ColorVariant,
    pub body: CardBody,
}

impl VisualCard {
    pub fn is_error(&self) -> bool {
        matches!(self.body, CardBody::Error { .. })
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.body, CardBody::Warning { .. })
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self.body, CardBody::Empty { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardBody {
    Empty { message: String },
    List { rows: Vec<ListRow> },
    Alerts { rows: Vec<AlertRow> },
    ExamGroups { groups: Vec<ExamGroup> },
    Diagnosis { panel: DiagnosisPanel },
    Differentials { rows: Vec<DifferentialRow> },
    Appointments { rows: Vec<AppointmentRow> },
    Fields { cells: Vec<FieldCell> },
    Table { headers: Vec<String>, rows: Vec<Vec<String>> },
    Bullets { lines: Vec<String> },
    Timeline { entries: Vec<TimelineEntry> },
    TreatmentPlan { medications: Vec<String>, lifestyle: Vec<String> },
    Narrative { paragraphs: Vec<Paragraph> },
    /// Unknown card type.
    Warning { message: String },
    /// The card's rule failed; siblings are unaffected.
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub primary: String,
    pub secondary: Option<String>,
    pub details: Vec<MetadataEntry>,
    pub tags: Vec<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRow {
    pub row: ListRow,
    /// Drives the pulsing indicator.
    pub high_severity: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityDot {
    Red,
    Yellow,
    Blue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamRow {
    pub name: String,
    pub priority: Option<String>,
    pub dot: PriorityDot,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamGroup {
    pub category: String,
    pub count: usize,
    pub exams: Vec<ExamRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosisBadge {
    pub label: String,
    pub value: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DiagnosisPanel {
    pub condition: Option<String>,
    pub cid: Option<String>,
    pub badges: Vec<DiagnosisBadge>,
    pub justification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifferentialRow {
    pub name: String,
    pub probability: Option<String>,
    /// Rendered struck-through and dimmed.
    pub excluded: bool,
    pub badge: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBadge {
    pub day: String,
    pub month: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentRow {
    pub title: String,
    pub doctor: Option<String>,
    pub date: Option<DateBadge>,
    pub time: Option<String>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCell {
    pub label: String,
    pub value: String,
    pub variant: FieldVariant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub header: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub title: Option<String>,
    pub text: String,
}
