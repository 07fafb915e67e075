use crate::{LayoutParams, Orientation, Point, SizeModel};

/// Grid placement for tile mode.
///
/// Rows run along the scroll axis. In a horizontal grid the roles of x and y swap: each "row"
/// is a column of `items_per_row` cells stacked top to bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileLayout {
    pub orientation: Orientation,
    pub items_per_row: usize,
    pub item_width: f64,
    pub item_height: f64,
    /// Added to the scroll-axis coordinate so tiles start after the leading offset.
    pub offset_before: f64,
}

impl TileLayout {
    pub fn from_params(layout: &LayoutParams) -> Self {
        Self {
            orientation: layout.orientation,
            items_per_row: layout.columns(),
            item_width: layout.item_width,
            item_height: layout.item_height,
            offset_before: layout.offset_before,
        }
    }

    pub fn row_of(&self, index: usize) -> usize {
        index / self.items_per_row.max(1)
    }

    pub fn column_of(&self, index: usize) -> usize {
        index % self.items_per_row.max(1)
    }

    pub fn position_of(&self, index: usize) -> Point {
        let row = self.row_of(index) as f64;
        let column = self.column_of(index) as f64;
        match self.orientation {
            Orientation::Vertical => Point {
                x: column * self.item_width,
                y: self.offset_before + row * self.item_height,
            },
            Orientation::Horizontal => Point {
                x: self.offset_before + row * self.item_width,
                y: column * self.item_height,
            },
        }
    }
}

/// Absolute position of `index` inside the container, for either layout mode.
///
/// Lists place items on the scroll axis at [`SizeModel::offset_of`] with a zero cross
/// coordinate; tile grids delegate to [`TileLayout`].
pub fn position_of(index: usize, model: &SizeModel, layout: &LayoutParams) -> Point {
    if layout.tile {
        return TileLayout::from_params(layout).position_of(index);
    }
    layout
        .orientation
        .point(model.offset_of(index, layout), 0.0)
}
