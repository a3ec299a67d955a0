use calamine::{Data, Range};
use smallvec::SmallVec;
use std::fmt;

/// A single worksheet value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

static EMPTY: Cell = Cell::Empty;

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading of the cell: numbers as-is, text only if it parses.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            Cell::Empty => None,
        }
    }

    /// Turns numeric text into a number; anything else is returned untouched.
    pub fn coerce_numeric(self) -> Cell {
        match self {
            Cell::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) => Cell::Number(n),
                Err(_) => Cell::Text(s),
            },
            other => other,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::DateTime(d) => Cell::Number(d.as_f64()),
            Data::String(s) if s.is_empty() => Cell::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}

/// Zero-based (row, column) coordinate into a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Read-only cell matrix of one worksheet. Rows may be ragged; missing
/// trailing cells read as [`Cell::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Builds a grid in absolute sheet coordinates: a range whose first used
    /// cell is not A1 is padded with empty rows and columns.
    pub fn from_range(range: &Range<Data>) -> Self {
        let (start_row, start_col) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row];
        for row in range.rows() {
            let mut cells = Vec::with_capacity(start_col + row.len());
            cells.resize(start_col, Cell::Empty);
            cells.extend(row.iter().map(Cell::from));
            rows.push(cells);
        }

        Self::new(rows)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn at(&self, pos: Position) -> &Cell {
        self.cell(pos.row, pos.col)
    }

    /// View over every column.
    pub fn view(&self) -> GridView<'_> {
        GridView {
            grid: self,
            columns: (0..self.width).collect(),
        }
    }

    /// View restricted to `columns`; order and duplicates are normalised.
    pub fn select(&self, columns: &[usize]) -> GridView<'_> {
        let mut columns: SmallVec<[usize; 4]> = columns.iter().copied().collect();
        columns.sort_unstable();
        columns.dedup();
        GridView { grid: self, columns }
    }
}

/// Column-restricted window over a [`Grid`]. Positions it yields are still
/// in grid coordinates.
#[derive(Debug, Clone)]
pub struct GridView<'a> {
    grid: &'a Grid,
    columns: SmallVec<[usize; 4]>,
}

impl<'a> GridView<'a> {
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn last_column(&self) -> Option<usize> {
        self.columns.last().copied()
    }

    /// Cells in row-then-column order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &'a Cell)> + '_ {
        let grid = self.grid;
        (0..grid.height()).flat_map(move |row| {
            self.columns
                .iter()
                .map(move |&col| (Position::new(row, col), grid.cell(row, col)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_read_as_empty() {
        let grid = Grid::new(vec![
            vec![Cell::text("a"), Cell::Number(1.0), Cell::text("c")],
            vec![Cell::text("b")],
        ]);

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.cell(1, 2), &Cell::Empty);
        assert_eq!(grid.cell(9, 9), &Cell::Empty);
        assert_eq!(grid.cell(0, 1), &Cell::Number(1.0));
    }

    #[test]
    fn range_offset_is_padded_to_absolute_coordinates() {
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("Workbook name".to_string()));
        range.set_value((2, 2), Data::String("Sample_001".to_string()));
        range.set_value((3, 1), Data::Int(7));
        range.set_value((3, 2), Data::Bool(true));

        let grid = Grid::from_range(&range);

        assert_eq!(grid.height(), 4);
        assert_eq!(grid.cell(0, 0), &Cell::Empty);
        assert_eq!(grid.cell(2, 1), &Cell::text("Workbook name"));
        assert_eq!(grid.cell(2, 2), &Cell::text("Sample_001"));
        assert_eq!(grid.cell(3, 1), &Cell::Number(7.0));
        assert_eq!(grid.cell(3, 2), &Cell::text("TRUE"));
    }

    #[test]
    fn empty_range_gives_empty_grid() {
        let range: Range<Data> = Range::empty();
        let grid = Grid::from_range(&range);
        assert_eq!(grid.height(), 0);
        assert_eq!(grid.width(), 0);
    }

    #[test]
    fn coercion_only_touches_numeric_text() {
        assert_eq!(Cell::text(" 12.5 ").coerce_numeric(), Cell::Number(12.5));
        assert_eq!(Cell::text("nm").coerce_numeric(), Cell::text("nm"));
        assert_eq!(Cell::Empty.coerce_numeric(), Cell::Empty);
        assert_eq!(Cell::text("1e3").to_number(), Some(1000.0));
        assert_eq!(Cell::Empty.to_number(), None);
    }

    #[test]
    fn view_normalises_columns_and_iterates_row_major() {
        let grid = Grid::new(vec![
            vec![Cell::text("a"), Cell::text("b"), Cell::text("c")],
            vec![Cell::text("d"), Cell::text("e"), Cell::text("f")],
        ]);
        let view = grid.select(&[2, 0, 2]);

        assert_eq!(view.columns(), &[0, 2]);
        assert_eq!(view.last_column(), Some(2));

        let seen: Vec<String> = view.cells().map(|(_, c)| c.to_string()).collect();
        assert_eq!(seen, vec!["a", "c", "d", "f"]);
    }
}
