//! Axis-aligned rectangles in virtual pixels, and their projection onto
//! terminal cells.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A rectangle of terminal cells: top-left column/row plus extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub cols: u16,
    pub rows: u16,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Project onto a `cols × rows` grid of `cell_w × cell_h` pixel cells.
    ///
    /// Any cell the rectangle touches is covered, so even a rectangle
    /// narrower than a cell stays visible.  Returns `None` when nothing is
    /// left after clipping to the grid.
    pub fn to_cells(&self, cell_w: f32, cell_h: f32, cols: u16, rows: u16) -> Option<CellRect> {
        let (col, cols) = cell_span(self.x, self.right(), cell_w, cols)?;
        let (row, rows) = cell_span(self.y, self.bottom(), cell_h, rows)?;
        Some(CellRect { col, row, cols, rows })
    }
}

/// Clip the pixel interval `[start, end)` to `0..limit` cells of size `cell`.
fn cell_span(start: f32, end: f32, cell: f32, limit: u16) -> Option<(u16, u16)> {
    if cell <= 0.0 || end <= start {
        return None;
    }
    let first = (start / cell).floor().max(0.0);
    let last = (end / cell).ceil().min(limit as f32);
    if last <= first {
        return None;
    }
    Some((first as u16, (last - first) as u16))
}

/// True iff the two rectangles overlap with positive area.
///
/// All four half-plane tests are strict, so rectangles that only share an
/// edge do not collide.
pub fn detect_collision(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}
