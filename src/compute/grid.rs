//! Grid state and the double buffer used for synchronous generation updates.

/// Fixed-size 2D grid of small integer cell states.
///
/// Data is stored as a flat row-major array: `row * cols + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<u8>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Create an all-zero grid. Dimensions are validated by the callers.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Build a grid from row vectors. Returns `None` for ragged or empty input.
    pub fn from_rows(rows: &[Vec<u8>]) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Self {
            cells: rows.iter().flatten().copied().collect(),
            rows: rows.len(),
            cols,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Get the cell at (row, col). Panics when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[self.idx(row, col)]
    }

    /// Get the cell at signed coordinates, or `None` outside the grid.
    #[inline]
    pub fn checked_get(&self, row: isize, col: isize) -> Option<u8> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        (row < self.rows && col < self.cols).then(|| self.get(row, col))
    }

    /// Get the cell at signed coordinates, substituting `default` outside the grid.
    #[inline]
    pub fn get_or(&self, row: isize, col: isize, default: u8) -> u8 {
        self.checked_get(row, col).unwrap_or(default)
    }

    /// Set the cell at (row, col). Panics when out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        let i = self.idx(row, col);
        self.cells[i] = value;
    }

    /// Borrow a single row.
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Mutably borrow a single row.
    pub fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let start = row * self.cols;
        &mut self.cells[start..start + self.cols]
    }

    /// Iterate over rows, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.cols.max(1))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Overwrite every cell with `f(row, col)`.
    pub fn fill_with(&mut self, mut f: impl FnMut(usize, usize) -> u8) {
        let cols = self.cols;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = f(i / cols, i % cols);
        }
    }

    /// Largest cell value, or 0 for an empty grid.
    pub fn max_value(&self) -> u8 {
        self.cells.iter().copied().max().unwrap_or(0)
    }
}

/// Current grid plus a scratch grid of identical dimensions.
///
/// A generation is computed entirely into the scratch grid from the current
/// one, then the two are swapped. Nothing reads the buffer being written.
#[derive(Debug, Clone)]
pub struct DoubleBuffer {
    current: Grid,
    next: Grid,
}

impl DoubleBuffer {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            current: Grid::new(rows, cols),
            next: Grid::new(rows, cols),
        }
    }

    #[inline]
    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// Mutable access for initialization passes, never used mid-generation.
    #[inline]
    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.current
    }

    /// Replace the current grid. Caller guarantees matching dimensions.
    pub fn replace(&mut self, grid: Grid) {
        debug_assert_eq!(grid.dimensions(), self.current.dimensions());
        self.current = grid;
    }

    /// Compute every cell of the next generation with `rule(current, row, col)`,
    /// then commit it.
    pub fn step(&mut self, mut rule: impl FnMut(&Grid, usize, usize) -> u8) {
        let current = &self.current;
        self.next.fill_with(|row, col| rule(current, row, col));
        self.commit();
    }

    /// Write the next generation through `build(current, next)`, then commit it.
    pub fn step_with(&mut self, build: impl FnOnce(&Grid, &mut Grid)) {
        build(&self.current, &mut self.next);
        self.commit();
    }

    fn commit(&mut self) {
        // Swap buffers (no allocation, just pointer swap)
        std::mem::swap(&mut self.current, &mut self.next);
    }
}
