//! Neighborhood extraction with fixed out-of-bounds policies.
//!
//! Cells outside the grid are never wrapped. Depending on the extractor they
//! are either absent (skipped) or substituted with the empty state `0`.

use super::Grid;

/// Value substituted for neighbors outside the grid.
pub const PADDING: u8 = 0;

/// Relative offsets of the 8-cell Moore neighborhood.
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Ordered (left, self, right) triple for cell `index` of a row.
///
/// Neighbors outside `[0, row.len())` read as [`PADDING`].
#[inline]
pub fn elementary_triple(row: &[u8], index: usize) -> [u8; 3] {
    let left = index
        .checked_sub(1)
        .and_then(|i| row.get(i))
        .copied()
        .unwrap_or(PADDING);
    let right = row.get(index + 1).copied().unwrap_or(PADDING);
    [left, row[index], right]
}

/// Values of the in-grid Moore neighbors of (row, col). Out-of-grid neighbors
/// are absent, so edge cells yield fewer than 8 values.
pub fn moore(grid: &Grid, row: usize, col: usize) -> impl Iterator<Item = u8> + '_ {
    MOORE_OFFSETS
        .iter()
        .filter_map(move |&(dr, dc)| grid.checked_get(row as isize + dr, col as isize + dc))
}

/// Number of Moore neighbors equal to `state`.
#[inline]
pub fn count_moore(grid: &Grid, row: usize, col: usize, state: u8) -> usize {
    moore(grid, row, col).filter(|&v| v == state).count()
}

/// Offsets `(before, after)` of a window of `size` cells around its center.
///
/// Odd sizes are symmetric. Even sizes take `size / 2` cells before the
/// center and one fewer after it, so the window always holds exactly `size`
/// cells per axis.
#[inline]
pub fn window_offsets(size: usize) -> (isize, isize) {
    let before = (size / 2) as isize;
    let after = size as isize - 1 - before;
    (before, after)
}

/// Square window of side `size` around (row, col), row-major, including the
/// cell itself. Out-of-grid cells read as [`PADDING`].
pub fn window(grid: &Grid, row: usize, col: usize, size: usize) -> impl Iterator<Item = u8> + '_ {
    let (before, after) = window_offsets(size);
    let (row, col) = (row as isize, col as isize);
    (row - before..=row + after).flat_map(move |r| {
        (col - before..=col + after).map(move |c| grid.get_or(r, c, PADDING))
    })
}

/// Sum of the window around (row, col).
#[inline]
pub fn window_sum(grid: &Grid, row: usize, col: usize, size: usize) -> usize {
    window(grid, row, col, size).map(usize::from).sum()
}
