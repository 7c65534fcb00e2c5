//! Ground tile layer collision grid.
//!
//! Built once from a tile layer of the map; `solid[i]` is true for cells
//! whose tile carries the collision flag. The ground is not made of
//! entities for collision purposes, the collision system reads this grid.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GroundLayer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub tile_width: f32,
    pub tile_height: f32,
    pub solid: Vec<bool>,
}

impl GroundLayer {
    pub fn is_solid(&self, col: i64, row: i64) -> bool {
        if col < 0 || row < 0 || col >= self.width as i64 || row >= self.height as i64 {
            return false;
        }
        self.solid[(row as usize) * (self.width as usize) + col as usize]
    }

    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|s| **s).count()
    }

    /// World-space (min, max) of a cell.
    pub fn cell_rect(&self, col: i64, row: i64) -> (Vector2, Vector2) {
        let min = Vector2::new(col as f32 * self.tile_width, row as f32 * self.tile_height);
        (min, min + Vector2::new(self.tile_width, self.tile_height))
    }

    /// Solid cells touched by the world rectangle `(min, max)`.
    pub fn solid_cells_in(&self, min: Vector2, max: Vector2) -> Vec<(i64, i64)> {
        let c0 = (min.x / self.tile_width).floor() as i64;
        let c1 = (max.x / self.tile_width).floor() as i64;
        let r0 = (min.y / self.tile_height).floor() as i64;
        let r1 = (max.y / self.tile_height).floor() as i64;
        let mut cells = Vec::new();
        for row in r0..=r1 {
            for col in c0..=c1 {
                if self.is_solid(col, row) {
                    cells.push((col, row));
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> GroundLayer {
        GroundLayer {
            name: "Ground".into(),
            width: 3,
            height: 2,
            tile_width: 32.0,
            tile_height: 32.0,
            solid: vec![true, false, false, false, false, true],
        }
    }

    #[test]
    fn is_solid_bounds() {
        let g = layer();
        assert!(g.is_solid(0, 0));
        assert!(g.is_solid(2, 1));
        assert!(!g.is_solid(1, 0));
        assert!(!g.is_solid(-1, 0));
        assert!(!g.is_solid(3, 0));
        assert_eq!(g.solid_count(), 2);
    }

    #[test]
    fn solid_cells_in_rect() {
        let g = layer();
        let cells = g.solid_cells_in(Vector2::new(10.0, 10.0), Vector2::new(70.0, 40.0));
        assert_eq!(cells, vec![(0, 0), (2, 1)]);
        let (min, max) = g.cell_rect(2, 1);
        assert_eq!((min.x, min.y, max.x, max.y), (64.0, 32.0, 96.0, 64.0));
    }
}
