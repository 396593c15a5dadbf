//! Shared types and constants for the bitris engine.
//!
//! Everything in here is plain data with no dependencies, so the core,
//! the terminal layer and the input mapping can all agree on it.
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn origin**: (3, -2), the 4x4 piece window starts above the field
//!
//! # Timing
//!
//! Gravity is expressed as a timeout in milliseconds between two ticks,
//! derived from the level by [`speed_ms`]:
//!
//! | Level | Timeout |
//! |-------|---------|
//! | 0 | 848ms |
//! | 1 | 446ms |
//! | 2 | 310ms |
//! | 5 | 171ms |
//! | 9 | 110ms |
//! | 20 | 46ms |
//!
//! # Examples
//!
//! ```
//! use tui_bitris_types::{Intent, Rotation, ShapeKind, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let shape = ShapeKind::from_str("t").unwrap();
//! assert_eq!(shape, ShapeKind::T);
//! assert_eq!(shape.index(), 0);
//!
//! assert_eq!(Rotation::R0.rotate_cw(), Rotation::R1);
//! assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 20);
//! ```

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: i8 = 10;

/// Field height in cells (20 rows)
pub const FIELD_HEIGHT: i8 = 20;

/// Number of distinct tetromino shapes
pub const SHAPE_COUNT: usize = 7;

/// Number of rotation states per shape
pub const ROTATION_COUNT: usize = 4;

/// Spawn column of the piece window (centered on the field)
pub const SPAWN_X: i8 = FIELD_WIDTH / 2 - 2;

/// Spawn row of the piece window (above the visible field)
pub const SPAWN_Y: i8 = -2;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear score multipliers, indexed by simultaneous clears (0-4).
///
/// Points are multiplied by (level + 1).
pub const SCORE_TABLE: [u32; 5] = [0, 40, 100, 300, 1200];

/// Lowest gravity timeout handed to the runner (one 60 Hz frame).
pub const SPEED_FLOOR_MS: u32 = 16;

/// Gravity timeout in milliseconds for a level.
///
/// Hyperbolic approximation of the NES drop table:
/// `50 - (level + 1) * 2 + 800 / (level + 1)`, floored at [`SPEED_FLOOR_MS`].
///
/// The floor applies from level 30 on, where the formula still yields small
/// positive values (13 ms at level 30) before reaching zero at level 35.
/// The result is non-increasing in the level.
///
/// ```
/// use tui_bitris_types::speed_ms;
///
/// assert_eq!(speed_ms(0), 848);
/// assert_eq!(speed_ms(9), 110);
/// assert_eq!(speed_ms(29), 16);
/// assert_eq!(speed_ms(30), 16);
/// assert_eq!(speed_ms(200), 16);
/// ```
pub fn speed_ms(level: u32) -> u32 {
    let step = i64::from(level) + 1;
    let ms = 50 - step * 2 + 800 / step;
    ms.max(i64::from(SPEED_FLOOR_MS)) as u32
}

/// The seven tetromino shapes, in catalog order.
///
/// The discriminant is the shape id used by the catalog tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    T,
    J,
    Z,
    O,
    S,
    L,
    I,
}

impl ShapeKind {
    /// All shapes in catalog order
    pub const ALL: [ShapeKind; SHAPE_COUNT] = [
        ShapeKind::T,
        ShapeKind::J,
        ShapeKind::Z,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::L,
        ShapeKind::I,
    ];

    /// Shape id in `[0, 7)`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Shape for a shape id, `None` outside `[0, 7)`
    ///
    /// ```
    /// use tui_bitris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_index(6), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse shape from its letter (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(ShapeKind::T),
            "j" => Some(ShapeKind::J),
            "z" => Some(ShapeKind::Z),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "l" => Some(ShapeKind::L),
            "i" => Some(ShapeKind::I),
            _ => None,
        }
    }

    /// Uppercase letter of the shape
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::T => "T",
            ShapeKind::J => "J",
            ShapeKind::Z => "Z",
            ShapeKind::O => "O",
            ShapeKind::S => "S",
            ShapeKind::L => "L",
            ShapeKind::I => "I",
        }
    }
}

/// Rotation index of a piece.
///
/// Rotations are table entries, not angles: `R0` is the spawn orientation
/// and clockwise rotation increments the index modulo 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    R0,
    R1,
    R2,
    R3,
}

impl Rotation {
    /// Rotation index in `[0, 4)`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rotation for an index, wrapping modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % ROTATION_COUNT {
            0 => Rotation::R0,
            1 => Rotation::R1,
            2 => Rotation::R2,
            _ => Rotation::R3,
        }
    }

    /// Next rotation index (clockwise)
    ///
    /// ```
    /// use tui_bitris_types::Rotation;
    ///
    /// assert_eq!(Rotation::R3.rotate_cw(), Rotation::R0);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Previous rotation index (counter-clockwise)
    ///
    /// ```
    /// use tui_bitris_types::Rotation;
    ///
    /// assert_eq!(Rotation::R0.rotate_ccw(), Rotation::R3);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + ROTATION_COUNT - 1)
    }
}

/// Player intents accepted between gravity ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Advance the rotation index
    RotateCw,
    /// Step the rotation index back
    RotateCcw,
    /// End the game loop
    Quit,
}

impl Intent {
    /// Parse intent from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "rotatecw" => Some(Intent::RotateCw),
            "rotateccw" => Some(Intent::RotateCcw),
            "quit" => Some(Intent::Quit),
            _ => None,
        }
    }

    /// camelCase name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::RotateCw => "rotateCw",
            Intent::RotateCcw => "rotateCcw",
            Intent::Quit => "quit",
        }
    }
}

/// Default tracing filter when `BITRIS_LOG_FILTER` is unset
pub const DEFAULT_LOG_FILTER: &str = "tui_bitris_core=debug,tui_bitris=info";

/// Runtime configuration for the terminal runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// RNG seed; `None` lets the runner pick one
    pub seed: Option<u32>,
    /// Log file; logging is off when `None`
    pub log_path: Option<String>,
    /// Tracing filter directive
    pub log_filter: String,
    /// Show the debug status line under the field
    pub debug: bool,
    /// Terminal columns per field cell
    pub cell_width: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            debug: false,
            cell_width: 2,
        }
    }
}

impl GameConfig {
    /// Build from `BITRIS_*` environment variables, ignoring invalid values
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (used by `from_env`)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("BITRIS_SEED").and_then(|s| s.trim().parse().ok());

        let log_path = lookup("BITRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let log_filter = lookup("BITRIS_LOG_FILTER")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.log_filter);

        let debug = lookup("BITRIS_DEBUG")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(defaults.debug);

        let cell_width = lookup("BITRIS_CELL_WIDTH")
            .and_then(|s| s.trim().parse().ok())
            .filter(|w| (1..=4).contains(w))
            .unwrap_or(defaults.cell_width);

        Self {
            seed,
            log_path,
            log_filter,
            debug,
            cell_width,
        }
    }
}
