//! Pure cell-set construction for the targeting shapes.
//! This module exists to keep footprint math stateless and deterministic.
//! It does not own arena clipping, marker lifecycle, or occupancy lookup.

use crate::types::{Cell, Direction};

/// The `range` cells strictly ahead of `origin` along `direction`, nearest
/// first. The origin cell itself is never part of the line.
pub fn line_cells(origin: Cell, direction: Direction, range: u32) -> Vec<Cell> {
    (1..=range as i32).map(|step| origin.offset(direction, step)).collect()
}

/// All cells within Chebyshev distance `radius` of `center`, including the
/// center itself. The square footprint matches the arena marker visuals.
pub fn aoe_cells(center: Cell, radius: u32) -> Vec<Cell> {
    let r = radius as i32;
    let mut cells = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
    for dy in -r..=r {
        for dx in -r..=r {
            cells.push(Cell { y: center.y + dy, x: center.x + dx });
        }
    }
    cells
}

/// A rectangle `thickness` cells across, perpendicular to `direction`,
/// spanning `range` cells ahead of `origin`. Thickness is centered on the
/// origin's lane; an even thickness takes the extra cell on the positive side.
pub fn wall_cells(origin: Cell, direction: Direction, range: u32, thickness: u32) -> Vec<Cell> {
    let across = direction.perpendicular();
    let t = thickness as i32;
    let mut cells = Vec::with_capacity((range * thickness) as usize);
    for step in 1..=range as i32 {
        let spine = origin.offset(direction, step);
        for lateral in -(t - 1) / 2..=t / 2 {
            cells.push(spine.offset(across, lateral));
        }
    }
    cells
}
