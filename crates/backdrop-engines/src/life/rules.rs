//! Conway's rule table and toroidal neighbor counting.

/// Next state of a cell given its state and live neighbor count.
///
/// A live cell survives with 2 or 3 live neighbors, a dead cell is born
/// with exactly 3, and everything else is dead.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Live neighbors of `(row, col)` among its 8 neighbors, wrapping around
/// both axes.
///
/// `cells` is row-major with `rows * cols` entries.
pub fn live_neighbors(cells: &[bool], rows: usize, cols: usize, row: usize, col: usize) -> u8 {
    let (rows_i, cols_i) = (rows as isize, cols as isize);
    let mut count = 0;
    for dy in -1..=1isize {
        for dx in -1..=1isize {
            if dy == 0 && dx == 0 {
                continue;
            }
            let ny = ((row as isize + dy + rows_i) % rows_i) as usize;
            let nx = ((col as isize + dx + cols_i) % cols_i) as usize;
            if cells[ny * cols + nx] {
                count += 1;
            }
        }
    }
    count
}
