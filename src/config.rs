//! Pagination configuration.
//!
//! Loaded from JSON with camelCase keys:
//!
//! ```json
//! { "maxPageHeight": 720, "pageOffset": { "x": 40, "y": 96 }, "rowEpsilon": 1, "rowOrder": "encounter" }
//! ```
//!
//! Only `maxPageHeight` is required.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paginate::DEFAULT_ROW_EPSILON;
use crate::types::Point;

/// How siblings are ordered before row grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowOrder {
    /// Trust the order the oracle emitted (row-major wrap flow).
    #[default]
    Encounter,
    /// Stable-sort by `(y, x)` first.
    Sorted,
}

fn default_row_epsilon() -> f32 {
    DEFAULT_ROW_EPSILON
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationConfig {
    /// Height budget of one page.
    pub max_page_height: f32,

    /// Where each page's content origin lands (e.g. below a slide title).
    #[serde(default)]
    pub page_offset: Point,

    /// Vertical tolerance for row membership.
    #[serde(default = "default_row_epsilon")]
    pub row_epsilon: f32,

    #[serde(default)]
    pub row_order: RowOrder,
}

impl PaginationConfig {
    /// Config with the given page height and defaults elsewhere.
    pub fn new(max_page_height: f32) -> Self {
        Self {
            max_page_height,
            page_offset: Point::ZERO,
            row_epsilon: DEFAULT_ROW_EPSILON,
            row_order: RowOrder::Encounter,
        }
    }

    pub fn with_page_offset(mut self, page_offset: Point) -> Self {
        self.page_offset = page_offset;
        self
    }

    pub fn with_row_order(mut self, row_order: RowOrder) -> Self {
        self.row_order = row_order;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_height.is_nan() || self.max_page_height <= 0.0 {
            return Err(ConfigError::InvalidPageHeight(self.max_page_height));
        }
        if self.row_epsilon.is_nan() || self.row_epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.row_epsilon));
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
