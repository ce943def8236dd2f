// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Deterministic grid geometry for avatar tiles.
//!
//! Tiles are placed left-to-right, top-to-bottom inside a bounded-width
//! canvas. The geometry is pure arithmetic over the configuration: no state,
//! no failure modes once a configuration has been validated. A configuration
//! whose column count would be zero is rejected by [`LayoutConfig::validate`]
//! rather than surfacing as a division panic at render time.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 740;
/// Default avatar edge length in pixels.
pub const DEFAULT_AVATAR_SIZE: u32 = 24;
/// Default margin around each avatar in pixels.
pub const DEFAULT_AVATAR_MARGIN: u32 = 5;

/// Geometry configuration for the tile grid.
///
/// # Examples
///
/// ```
/// use contributor_wall::LayoutConfig;
///
/// let layout = LayoutConfig::default();
/// assert_eq!(layout.column_count(), 21);
/// assert_eq!(layout.canvas_height(3), 34);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Overall drawing surface width.
    pub canvas_width:    u32,
    /// Avatar tile edge length; tiles are square.
    pub avatar_size:     u32,
    /// Margin applied on every side of a tile.
    pub avatar_margin:   u32,
    /// Extra vertical space reserved below each tile for a name caption.
    pub name_row_height: u32
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width:    DEFAULT_CANVAS_WIDTH,
            avatar_size:     DEFAULT_AVATAR_SIZE,
            avatar_margin:   DEFAULT_AVATAR_MARGIN,
            name_row_height: 0
        }
    }
}

/// Rectangle at which one actor's avatar tile is drawn.
///
/// `width` and `height` always equal the configured avatar size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x:      u32,
    pub y:      u32,
    pub width:  u32,
    pub height: u32
}

impl LayoutConfig {
    /// Number of tile columns that fit into the canvas width.
    ///
    /// Computed as `canvas_width / (avatar_size + 2 * avatar_margin)` with
    /// integer division. The result is only meaningful for validated
    /// configurations; see [`validate`](Self::validate).
    pub fn column_count(&self) -> u32 {
        self.canvas_width / self.item_width()
    }

    /// Bounding box of the tile at `index`, counted in bucket order.
    ///
    /// Defined for any index; index `0` is the top-left tile.
    pub fn bounding_box(&self, index: usize) -> BoundingBox {
        let columns = self.column_count() as usize;
        let column = (index % columns) as u32;
        let row = (index / columns) as u32;

        BoundingBox {
            x:      self.avatar_margin + column * (self.avatar_size + self.avatar_margin),
            y:      self.avatar_margin
                + row * (self.avatar_size + self.avatar_margin + self.name_row_height),
            width:  self.avatar_size,
            height: self.avatar_size
        }
    }

    /// Total canvas height required for `total` tiles.
    ///
    /// Returns `0` when `total` is zero; otherwise the row count is rounded
    /// up so a partially filled last row still gets full height.
    pub fn canvas_height(&self, total: usize) -> u32 {
        let columns = self.column_count() as usize;
        let rows = total.div_ceil(columns) as u32;
        self.item_height() * rows
    }

    /// Checks that the configuration can place at least one column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the canvas width or avatar size is
    /// zero, or when no tile fits into the canvas width.
    pub fn validate(&self) -> Result<(), Error> {
        if self.canvas_width == 0 {
            return Err(Error::validation("canvas_width must be greater than zero"));
        }
        if self.avatar_size == 0 {
            return Err(Error::validation("avatar_size must be greater than zero"));
        }
        if self.column_count() == 0 {
            return Err(Error::validation(format!(
                "canvas width {} cannot fit a single {}px tile with {}px margins",
                self.canvas_width,
                self.avatar_size,
                self.avatar_margin
            )));
        }
        Ok(())
    }

    fn item_width(&self) -> u32 {
        self.avatar_size + 2 * self.avatar_margin
    }

    fn item_height(&self) -> u32 {
        self.avatar_size + 2 * self.avatar_margin + self.name_row_height
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::LayoutConfig;

    fn default_layout() -> LayoutConfig {
        LayoutConfig::default()
    }

    #[test]
    fn default_layout_has_twenty_one_columns() {
        assert_eq!(default_layout().column_count(), 21);
    }

    #[test]
    fn three_tiles_fit_on_the_first_row() {
        let layout = default_layout();
        assert_eq!(layout.canvas_height(3), 34);

        let boxes: Vec<_> = (0..3).map(|index| layout.bounding_box(index)).collect();
        for bounding_box in &boxes {
            assert_eq!(bounding_box.y, 5);
            assert_eq!(bounding_box.width, 24);
            assert_eq!(bounding_box.height, 24);
        }
        assert_eq!(boxes[0].x, 5);
        assert_eq!(boxes[1].x, 34);
        assert_eq!(boxes[2].x, 63);
    }

    #[test]
    fn empty_bucket_needs_no_height() {
        assert_eq!(default_layout().canvas_height(0), 0);
    }

    #[test]
    fn second_row_accounts_for_name_row_height() {
        let layout = LayoutConfig {
            canvas_width:    100,
            avatar_size:     24,
            avatar_margin:   5,
            name_row_height: 16
        };
        assert_eq!(layout.column_count(), 2);

        let below = layout.bounding_box(2);
        assert_eq!(below.x, 5);
        assert_eq!(below.y, 5 + 24 + 5 + 16);
        assert_eq!(layout.canvas_height(3), 2 * (24 + 10 + 16));
    }

    #[test]
    fn validate_rejects_zero_column_configuration() {
        let layout = LayoutConfig {
            canvas_width:    20,
            avatar_size:     24,
            avatar_margin:   5,
            name_row_height: 0
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_dimensions() {
        let mut layout = default_layout();
        layout.canvas_width = 0;
        assert!(layout.validate().is_err());

        let mut layout = default_layout();
        layout.avatar_size = 0;
        assert!(layout.validate().is_err());
    }

    #[test]
    fn validate_accepts_default_configuration() {
        assert!(default_layout().validate().is_ok());
    }

    proptest! {
        #[test]
        fn canvas_height_matches_row_formula(
            total in 0usize..400,
            canvas_width in 100u32..2000,
            avatar_size in 1u32..=64,
            avatar_margin in 0u32..=16,
            name_row_height in 0u32..=30
        ) {
            let layout = LayoutConfig { canvas_width, avatar_size, avatar_margin, name_row_height };
            prop_assume!(layout.column_count() >= 1);

            let item_height = avatar_size + 2 * avatar_margin + name_row_height;
            let rows = total.div_ceil(layout.column_count() as usize) as u32;
            prop_assert_eq!(layout.canvas_height(total), item_height * rows);
        }

        #[test]
        fn x_cycles_with_column_period_and_y_never_decreases(
            canvas_width in 100u32..2000,
            avatar_size in 1u32..=64,
            avatar_margin in 0u32..=16,
            name_row_height in 0u32..=30
        ) {
            let layout = LayoutConfig { canvas_width, avatar_size, avatar_margin, name_row_height };
            prop_assume!(layout.column_count() >= 1);
            let columns = layout.column_count() as usize;

            let mut previous_y = 0;
            for index in 0..columns * 3 {
                let bounding_box = layout.bounding_box(index);
                prop_assert_eq!(bounding_box.x, layout.bounding_box(index + columns).x);
                prop_assert!(bounding_box.y >= previous_y);
                previous_y = bounding_box.y;
            }
        }
    }
}
