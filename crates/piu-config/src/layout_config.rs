use serde::{Deserialize, Serialize};

pub const COLUMN_WIDTH_MIN: i32 = 1;
pub const COLUMN_WIDTH_MAX: i32 = 1000;
pub const COLUMN_PADDING_MAX: i32 = 1000;
pub const WINDOW_SIZE_MIN: i32 = 1;
pub const WINDOW_SIZE_MAX: i32 = 16384;

/// Screen geometry for the lanes. Purely visual; none of it affects judgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of one column (also the arrow glyph size), px.
    pub column_width: i32,
    /// Horizontal gap between adjacent columns, px.
    pub column_padding: i32,
    pub window_width: i32,
    pub window_height: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_width: 100,
            column_padding: 20,
            window_width: 1500,
            window_height: 1000,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&mut self) {
        self.column_width = self.column_width.clamp(COLUMN_WIDTH_MIN, COLUMN_WIDTH_MAX);
        self.column_padding = self.column_padding.clamp(0, COLUMN_PADDING_MAX);
        self.window_width = self.window_width.clamp(WINDOW_SIZE_MIN, WINDOW_SIZE_MAX);
        self.window_height = self.window_height.clamp(WINDOW_SIZE_MIN, WINDOW_SIZE_MAX);
    }

    /// Horizontal distance between the origins of adjacent columns.
    pub fn column_stride(&self) -> i32 {
        self.column_width + self.column_padding
    }

    /// Width taken by `columns` columns including the gaps between them.
    pub fn block_width(&self, columns: usize) -> i32 {
        if columns == 0 {
            return 0;
        }
        columns as i32 * self.column_width + (columns as i32 - 1) * self.column_padding
    }
}
