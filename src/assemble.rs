//! Section/Response assembler: full-width stack above the adaptive grid, per
//! section, in component order.

use serde::Serialize;

use crate::layout::{self, arrange, GridMode, GridOptions, Placement};
use crate::models::{Response, Section};
use crate::render::{render_card, VisualCard};

pub const EMPTY_SECTION_MESSAGE: &str = "Nenhum conteúdo nesta seção";
pub const EMPTY_RESPONSE_MESSAGE: &str = "Nenhuma seção disponível";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub placement: Placement,
    pub card: VisualCard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridView {
    pub mode: GridMode,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub full_width: Vec<VisualCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridView>,
    /// Set when the section has no components; the title still shows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl SectionView {
    pub fn cards(&self) -> impl Iterator<Item = &VisualCard> {
        self.full_width
            .iter()
            .chain(self.grid.iter().flat_map(|g| g.cells.iter().map(|c| &c.card)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseView {
    pub page_title: String,
    pub sections: Vec<SectionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

pub fn render_section(section: &Section, options: GridOptions) -> SectionView {
    if section.components.is_empty() {
        return SectionView {
            title: section.title.clone(),
            description: section.description.clone(),
            full_width: Vec::new(),
            grid: None,
            empty_message: Some(EMPTY_SECTION_MESSAGE.to_string()),
        };
    }

    let classified = layout::classify(section);
    let full_width = classified
        .full_width
        .iter()
        .map(|card| render_card(card))
        .collect();

    let grid = if classified.grid.is_empty() {
        None
    } else {
        let spans: Vec<usize> = classified.grid.iter().map(|g| g.span).collect();
        let (mode, placements) = arrange(&spans, options);
        let cells = classified
            .grid
            .iter()
            .zip(placements)
            .map(|(g, placement)| GridCell {
                placement,
                card: render_card(&g.card),
            })
            .collect();
        Some(GridView { mode, cells })
    };

    SectionView {
        title: section.title.clone(),
        description: section.description.clone(),
        full_width,
        grid,
        empty_message: None,
    }
}

pub fn render_response(response: &Response, options: GridOptions) -> ResponseView {
    let sections: Vec<SectionView> = response
        .sections
        .iter()
        .map(|s| render_section(s, options))
        .collect();
    let empty_message = sections
        .is_empty()
        .then(|| EMPTY_RESPONSE_MESSAGE.to_string());
    ResponseView {
        page_title: response.page_title.clone(),
        sections,
        empty_message,
    }
}
