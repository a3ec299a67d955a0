use super::grid::{Cell, GridView, Position};
use super::locator::{find_containing, find_exact, LabelMatch};

/// Outcome of a "find label, read next to it" lookup.
///
/// `Absent` and `Ambiguous` both mean "no value" for output purposes; they
/// are kept apart so callers can report which one happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved { label: Cell, value: Cell },
    Absent,
    Ambiguous(usize),
}

impl Resolution {
    pub fn value(&self) -> Option<&Cell> {
        match self {
            Resolution::Resolved { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<Cell> {
        match self {
            Resolution::Resolved { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }
}

fn resolve_with<F>(view: &GridView<'_>, found: LabelMatch, read: F) -> Resolution
where
    F: FnOnce(Position) -> Cell,
{
    match found.unique() {
        Some(pos) => Resolution::Resolved {
            label: view.grid().at(pos).clone(),
            value: read(pos),
        },
        None if found.is_empty() => Resolution::Absent,
        None => Resolution::Ambiguous(found.len()),
    }
}

/// Exact match in `view`, value taken from the cell immediately right of
/// the label in the full grid. A label in the last grid column reads Empty.
pub fn resolve_adjacent(view: &GridView<'_>, target: &Cell) -> Resolution {
    let grid = view.grid();
    resolve_with(view, find_exact(view, target), |pos| {
        grid.cell(pos.row, pos.col + 1).clone()
    })
}

/// Like [`resolve_adjacent`] but matching text cells that contain `needle`.
pub fn resolve_adjacent_containing(view: &GridView<'_>, needle: &str) -> Resolution {
    let grid = view.grid();
    resolve_with(view, find_containing(view, needle), |pos| {
        grid.cell(pos.row, pos.col + 1).clone()
    })
}

/// Exact match in `view`, value taken from the first non-empty cell right of
/// the label, scanning no further than the view's last column.
pub fn resolve_nearby(view: &GridView<'_>, target: &Cell) -> Resolution {
    let grid = view.grid();
    let last = view.last_column().unwrap_or(0);
    resolve_with(view, find_exact(view, target), |pos| {
        (pos.col + 1..=last)
            .map(|col| grid.cell(pos.row, col))
            .find(|cell| !cell.is_empty())
            .cloned()
            .unwrap_or(Cell::Empty)
    })
}
