use super::grid::{Cell, GridView, Position};
use smallvec::SmallVec;

/// Every position where a search predicate held, in row-then-column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelMatch {
    positions: SmallVec<[Position; 2]>,
}

impl LabelMatch {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn first(&self) -> Option<Position> {
        self.positions.first().copied()
    }

    /// The position if the label occurred exactly once.
    pub fn unique(&self) -> Option<Position> {
        match self.positions.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Distinct columns holding a match, ascending.
    pub fn columns(&self) -> Vec<usize> {
        let mut cols: Vec<usize> = self.positions.iter().map(|p| p.col).collect();
        cols.sort_unstable();
        cols.dedup();
        cols
    }
}

impl FromIterator<Position> for LabelMatch {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Cells equal to `target`. Text never equals a number and vice versa.
pub fn find_exact(view: &GridView<'_>, target: &Cell) -> LabelMatch {
    if target.is_empty() {
        return LabelMatch::default();
    }
    view.cells()
        .filter(|(_, cell)| *cell == target)
        .map(|(pos, _)| pos)
        .collect()
}

/// Text cells containing `needle`, case-sensitive. Numbers and blanks are
/// never tested.
pub fn find_containing(view: &GridView<'_>, needle: &str) -> LabelMatch {
    view.cells()
        .filter(|(_, cell)| cell.as_text().is_some_and(|text| text.contains(needle)))
        .map(|(pos, _)| pos)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::litesizer::grid::Grid;

    fn sample_grid() -> Grid {
        Grid::new(vec![
            vec![Cell::text("Comment"), Cell::text("first run"), Cell::Empty],
            vec![Cell::Number(5.0), Cell::text("5"), Cell::text("Comment")],
            vec![Cell::text("Fit error"), Cell::Number(0.01), Cell::text("Comments")],
        ])
    }

    #[test]
    fn exact_is_type_sensitive() {
        let grid = sample_grid();

        let numeric = find_exact(&grid.view(), &Cell::Number(5.0));
        assert_eq!(numeric.positions(), &[Position::new(1, 0)]);

        let textual = find_exact(&grid.view(), &Cell::text("5"));
        assert_eq!(textual.positions(), &[Position::new(1, 1)]);
    }

    #[test]
    fn exact_reports_every_match_in_row_order() {
        let grid = sample_grid();
        let found = find_exact(&grid.view(), &Cell::text("Comment"));

        assert_eq!(found.len(), 2);
        assert_eq!(found.first(), Some(Position::new(0, 0)));
        assert_eq!(found.unique(), None);
        assert_eq!(found.columns(), vec![0, 2]);
    }

    #[test]
    fn view_restriction_hides_other_columns() {
        let grid = sample_grid();
        let found = find_exact(&grid.select(&[0, 1]), &Cell::text("Comment"));

        assert_eq!(found.unique(), Some(Position::new(0, 0)));
    }

    #[test]
    fn absent_label_is_an_empty_match() {
        let grid = sample_grid();
        assert!(find_exact(&grid.view(), &Cell::text("Baseline")).is_empty());
        assert!(find_exact(&grid.view(), &Cell::Empty).is_empty());
    }

    #[test]
    fn containing_skips_numbers_and_blanks() {
        let grid = sample_grid();

        let found = find_containing(&grid.view(), "Comment");
        assert_eq!(
            found.positions(),
            &[Position::new(0, 0), Position::new(1, 2), Position::new(2, 2)]
        );

        // "5" only appears as text in (1, 1); the number 5.0 is skipped.
        let found = find_containing(&grid.view(), "5");
        assert_eq!(found.positions(), &[Position::new(1, 1)]);

        assert!(find_containing(&grid.view(), "comment").is_empty());
    }
}
