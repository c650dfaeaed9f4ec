//! Battle system constants - fixed board geometry and army limits

// Battle board (pathfinding)
pub const BOARD_WIDTH: i32 = 27;
pub const BOARD_HEIGHT: i32 = 21;
pub const BOARD_CELLS: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

// Deployment zone, one per side: 3 columns deep, full board height
pub const DEPLOYMENT_COLUMNS: i32 = 3;
pub const DEPLOYMENT_ROWS: i32 = BOARD_HEIGHT;
pub const DEPLOYMENT_CELLS: usize = (DEPLOYMENT_COLUMNS * DEPLOYMENT_ROWS) as usize;

/// First column of the right-hand deployment zone
pub const RIGHT_ZONE_ORIGIN: i32 = BOARD_WIDTH - DEPLOYMENT_COLUMNS;

// Army planner
pub const MAX_UNITS_PER_TYPE: usize = 11;
pub const PRESET_TEMPLATE_COUNT: usize = 4;
pub const DEFAULT_PRESET_COMPOSITION: [usize; PRESET_TEMPLATE_COUNT] = [11, 11, 11, 9];
