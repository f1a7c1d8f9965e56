use serde::{Deserialize, Serialize};

/// What lies under a cell, fixed when the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    AdjacentCount(u8),
}

impl CellContent {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

/// One board position with its content and player-visible status.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub content: CellContent,
    pub revealed: bool,
    pub flagged: bool,
}

impl Cell {
    pub(crate) const fn hidden(content: CellContent) -> Self {
        Self {
            content,
            revealed: false,
            flagged: false,
        }
    }

    pub const fn is_mine(&self) -> bool {
        self.content.is_mine()
    }

    /// How a presentation layer should draw this cell.
    pub const fn view(&self) -> CellView {
        use CellContent::*;
        match (self.revealed, self.content, self.flagged) {
            (_, _, true) => CellView::Flag,
            (true, Mine, _) => CellView::Mine,
            (true, AdjacentCount(count), _) if count > 0 => CellView::Count(count),
            _ => CellView::Blank,
        }
    }
}

/// Glyph to draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Blank,
    Flag,
    Mine,
    Count(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_cells_are_blank_regardless_of_content() {
        assert_eq!(Cell::hidden(CellContent::Mine).view(), CellView::Blank);
        assert_eq!(
            Cell::hidden(CellContent::AdjacentCount(3)).view(),
            CellView::Blank
        );
    }

    #[test]
    fn revealed_zero_is_blank_and_revealed_count_is_number() {
        let mut cell = Cell::hidden(CellContent::AdjacentCount(0));
        cell.revealed = true;
        assert_eq!(cell.view(), CellView::Blank);

        cell.content = CellContent::AdjacentCount(2);
        assert_eq!(cell.view(), CellView::Count(2));
    }

    #[test]
    fn flag_stays_on_mine_uncovered_by_loss() {
        let mut cell = Cell::hidden(CellContent::Mine);
        cell.flagged = true;
        assert_eq!(cell.view(), CellView::Flag);

        cell.revealed = true;
        assert_eq!(cell.view(), CellView::Flag);

        cell.flagged = false;
        assert_eq!(cell.view(), CellView::Mine);
    }
}
