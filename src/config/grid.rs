/// Grid configuration constants.
///
/// This module defines the battlefield dimensions, the world-space size of a
/// single cell and the default deployment area.
pub const GRID_COLS: i32 = 8; // Number of columns in the battlefield grid.

/// Number of rows in the battlefield grid.
pub const GRID_ROWS: i32 = 6;

/// Edge length (in world units) of one grid cell before scaling.
pub const GRID_UNIT_SIZE: f32 = 100.0;

/// Uniform scale applied to the cell mesh.
pub const GRID_UNIT_SCALE: f32 = 1.0;

/// Bottom-left corner (world units) of the default deployment zone.
/// Covers the two leftmost columns of the default grid.
pub const DEPLOYMENT_ZONE_BOTTOM_LEFT: (f32, f32) = (0.0, 0.0);

/// Top-right corner (world units) of the default deployment zone.
pub const DEPLOYMENT_ZONE_TOP_RIGHT: (f32, f32) = (200.0, 600.0);
