use crate::{ElementBox, Orientation};

/// Sizes derived from a rendered reference item.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoSize {
    /// Scroll-axis size of one item (one row in tile mode), margins included.
    pub element_size: f64,
    /// Outer box of the measured item.
    pub item: ElementBox,
    /// Tile columns: configured, or derived from the container's cross size. `1` for lists.
    pub items_per_row: usize,
}

impl AutoSize {
    pub fn item_width(&self) -> f64 {
        self.item.width
    }

    pub fn item_height(&self) -> f64 {
        self.item.height
    }
}

/// Result of a probe. `Pending` is a normal, retried condition (the element is not laid out yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProbeOutcome {
    Measured(AutoSize),
    Pending,
}

/// Derives [`AutoSize`] from the measured boxes of one rendered item and its container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AutosizeProbe {
    pub orientation: Orientation,
    pub tile: bool,
    /// Explicit tile columns; wins over the derived value.
    pub items_per_row: Option<usize>,
}

impl AutosizeProbe {
    pub fn new(orientation: Orientation, tile: bool, items_per_row: Option<usize>) -> Self {
        Self {
            orientation,
            tile,
            items_per_row,
        }
    }

    pub fn probe(&self, sample: Option<ElementBox>, container: ElementBox) -> ProbeOutcome {
        if container.is_unsized() {
            vdebug!("AutosizeProbe: container not laid out yet");
            return ProbeOutcome::Pending;
        }
        let Some(sample) = sample else {
            vdebug!("AutosizeProbe: no rendered sample");
            return ProbeOutcome::Pending;
        };

        let main = self.orientation.main(sample);
        if !(main.is_finite() && main > 0.0) {
            vdebug!(main, "AutosizeProbe: sample not laid out yet");
            return ProbeOutcome::Pending;
        }

        let items_per_row = if self.tile {
            self.items_per_row
                .unwrap_or_else(|| {
                    let cross = self.orientation.cross(sample);
                    let available = self.orientation.cross(container);
                    if cross > 0.0 && available.is_finite() {
                        (available / cross).floor() as usize
                    } else {
                        1
                    }
                })
                .max(1)
        } else {
            1
        };

        let size = AutoSize {
            element_size: main,
            item: sample,
            items_per_row,
        };
        vdebug!(
            element_size = size.element_size,
            items_per_row = size.items_per_row,
            "AutosizeProbe: measured"
        );
        ProbeOutcome::Measured(size)
    }
}
