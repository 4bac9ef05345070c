use pipemaze_core::{Board, Direction, Point};

/// Quarter turns each cell of `path` needs for the path to flow through it.
///
/// The first and last cells cost nothing. Every other cell costs the
/// fewest turns that open both the side towards its predecessor and the
/// side towards its successor. Returns `None` if two consecutive cells are
/// not orthogonally adjacent, a cell is off the board, or no rotation of a
/// tile can carry the path.
pub fn path_rotations(board: &Board, path: &[Point]) -> Option<Vec<u32>> {
    let mut out = Vec::with_capacity(path.len());
    for (i, &p) in path.iter().enumerate() {
        let tile = board.at(p)?;
        if i == 0 || i + 1 == path.len() {
            if tile.is_brick() {
                return None;
            }
            if i > 0 {
                Direction::between(path[i - 1], p)?;
            }
            out.push(0);
            continue;
        }
        let entry = Direction::between(p, path[i - 1])?;
        let exit = Direction::between(p, path[i + 1])?;
        out.push(tile.rotation_cost(entry.bit() | exit.bit())?);
    }
    Some(out)
}
