use serde::Serialize;

/// Grid configuration for the adaptive section layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridOptions {
    /// Number of column tracks in the multi-card grid.
    pub tracks: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self { tracks: 3 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum GridMode {
    /// Single card: one column sized to the card itself, no stretching.
    Intrinsic,
    AutoFlow { tracks: usize },
}

/// Cell position of one grid card (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub span: usize,
}

/// Row-major auto-flow placement. A card whose span does not fit in the
/// rest of the current row starts the next row; spans wider than the grid
/// are clamped to the track count.
pub fn arrange(spans: &[usize], options: GridOptions) -> (GridMode, Vec<Placement>) {
    if spans.len() == 1 {
        let placement = Placement {
            row: 0,
            column: 0,
            span: 1,
        };
        return (GridMode::Intrinsic, vec![placement]);
    }

    let tracks = options.tracks.max(1);
    let mut placements = Vec::with_capacity(spans.len());
    let mut row = 0;
    let mut column = 0;
    for &span in spans {
        let span = span.clamp(1, tracks);
        if column + span > tracks {
            row += 1;
            column = 0;
        }
        placements.push(Placement { row, column, span });
        column += span;
    }
    (GridMode::AutoFlow { tracks }, placements)
}
