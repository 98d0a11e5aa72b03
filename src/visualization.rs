use std::path::Path;

use glam::UVec2;
use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::field::PotentialField;
use crate::grid::OccupancyGrid;
use crate::types::{CellValue, PlannerError};

pub const OBSTACLE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
pub const PATH_COLOR: Rgb<u8> = Rgb([220, 30, 30]);
pub const START_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const GOAL_COLOR: Rgb<u8> = Rgb([255, 0, 255]);

/// Viridis control points, low to high.
const HEATMAP: [[u8; 3]; 5] = [
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [253, 231, 37],
];

/// Render the configuration-space grid as a grayscale preview.
///
/// - Obstacles of the original map are black.
/// - Cells blocked only by inflation are mid-gray.
/// - Free cells, start and goal are white.
///
/// Row 0 of the grid is the top row of the image.
pub fn render_grid(grid: &OccupancyGrid) -> GrayImage {
    let mut img = GrayImage::new(grid.cols(), grid.rows());
    for (pos, value) in grid.working().iter_cells() {
        let original = grid.original()[pos];
        let px = match (original, *value) {
            (CellValue::Obstacle, _) => 0,
            (_, CellValue::Obstacle) => 128,
            _ => 254,
        };
        img.put_pixel(pos.x, pos.y, Luma([px]));
    }
    img
}

/// Render a planning result over its potential field.
///
/// Every cell becomes a `cell_px x cell_px` block. Free cells are shaded by
/// potential (infinite values clamped to the top of the finite range),
/// obstacles are black, the path is red and the start and goal markers are
/// drawn last.
pub fn render_plan(
    grid: &OccupancyGrid,
    field: &PotentialField,
    path: &[UVec2],
    cell_px: u32,
) -> RgbImage {
    let cell_px = cell_px.max(1);
    let mut img = RgbImage::new(grid.cols() * cell_px, grid.rows() * cell_px);
    let (lo, hi) = field.finite_range().unwrap_or((0.0, 1.0));

    for (pos, value) in field.values().iter_cells() {
        let color = if grid.cell(pos).is_obstacle() {
            OBSTACLE_COLOR
        } else {
            let v = if value.is_finite() { *value } else { hi };
            heatmap(normalize(v, lo, hi))
        };
        fill_cell(&mut img, pos, cell_px, color);
    }

    for &pos in path {
        fill_cell(&mut img, pos, cell_px, PATH_COLOR);
    }
    fill_cell(&mut img, grid.start(), cell_px, START_COLOR);
    fill_cell(&mut img, grid.goal(), cell_px, GOAL_COLOR);

    img
}

/// Render and write a PNG.
pub fn save_plan_png(
    output: impl AsRef<Path>,
    grid: &OccupancyGrid,
    field: &PotentialField,
    path: &[UVec2],
    cell_px: u32,
) -> Result<(), PlannerError> {
    let output = output.as_ref();
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    render_plan(grid, field, path, cell_px).save(output)?;
    Ok(())
}

fn normalize(value: f32, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn heatmap(t: f32) -> Rgb<u8> {
    let scaled = t.clamp(0.0, 1.0) * (HEATMAP.len() - 1) as f32;
    let i = (scaled.floor() as usize).min(HEATMAP.len() - 2);
    let frac = scaled - i as f32;
    let (a, b) = (HEATMAP[i], HEATMAP[i + 1]);
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * frac).round() as u8;
    Rgb([lerp(a[0], b[0]), lerp(a[1], b[1]), lerp(a[2], b[2])])
}

fn fill_cell(img: &mut RgbImage, pos: UVec2, cell_px: u32, color: Rgb<u8>) {
    for dy in 0..cell_px {
        for dx in 0..cell_px {
            img.put_pixel(pos.x * cell_px + dx, pos.y * cell_px + dy, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldParams, compute_field};
    use crate::types::Footprint;

    const MAP: &str = "\
2 0 0 0 0
0 0 0 0 0
0 0 1 0 0
0 0 0 0 3
";

    #[test]
    fn render_grid_distinguishes_inflated_cells() {
        let grid = OccupancyGrid::parse(MAP, Footprint::new(3, 1).unwrap()).unwrap();
        let img = render_grid(&grid);
        assert_eq!(img.dimensions(), (5, 4));
        assert_eq!(img.get_pixel(2, 2).0[0], 0);
        assert_eq!(img.get_pixel(1, 2).0[0], 128);
        assert_eq!(img.get_pixel(3, 2).0[0], 128);
        assert_eq!(img.get_pixel(0, 0).0[0], 254);
    }

    #[test]
    fn render_plan_draws_layers_in_order() {
        let grid = OccupancyGrid::parse(MAP, Footprint::POINT).unwrap();
        let field = compute_field(&grid, &FieldParams::default()).unwrap();
        let path = vec![UVec2::new(0, 0), UVec2::new(1, 1), UVec2::new(2, 1)];
        let img = render_plan(&grid, &field, &path, 3);

        assert_eq!(img.dimensions(), (15, 12));
        // Obstacle (2, 2) covers pixels 6..9 in both axes.
        assert_eq!(*img.get_pixel(7, 7), OBSTACLE_COLOR);
        assert_eq!(*img.get_pixel(4, 4), PATH_COLOR);
        assert_eq!(*img.get_pixel(0, 0), START_COLOR);
        assert_eq!(*img.get_pixel(14, 11), GOAL_COLOR);
        // Far corner is neither path nor marker, so it is shaded.
        let corner = *img.get_pixel(12, 0);
        assert_ne!(corner, PATH_COLOR);
        assert_ne!(corner, OBSTACLE_COLOR);
    }

    #[test]
    fn heatmap_endpoints() {
        assert_eq!(heatmap(0.0), Rgb(HEATMAP[0]));
        assert_eq!(heatmap(1.0), Rgb(HEATMAP[4]));
        assert_eq!(normalize(5.0, 5.0, 5.0), 0.0);
        assert_eq!(normalize(10.0, 0.0, 5.0), 1.0);
    }

    #[test]
    fn save_plan_png_creates_parent_dirs() {
        let grid = OccupancyGrid::parse(MAP, Footprint::POINT).unwrap();
        let field = compute_field(&grid, &FieldParams::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/plan.png");
        save_plan_png(&out, &grid, &field, &[grid.start()], 2).unwrap();
        let img = image::open(&out).unwrap();
        assert_eq!((img.width(), img.height()), (10, 8));
    }
}
