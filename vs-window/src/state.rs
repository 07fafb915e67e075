/// Scroll position and visible extent of the scroll container along the scroll axis.
///
/// Replaced wholesale on every scroll/resize notification.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_position: f64,
    /// `clientHeight` (vertical) or `clientWidth` (horizontal) of the scroll container.
    pub viewport_extent: f64,
}

impl ViewportState {
    /// Creates a viewport, clamping negative or non-finite inputs to zero.
    pub fn new(scroll_position: f64, viewport_extent: f64) -> Self {
        Self {
            scroll_position: sanitize(scroll_position),
            viewport_extent: sanitize(viewport_extent),
        }
    }

    pub fn scroll_end(&self) -> f64 {
        self.scroll_position + self.viewport_extent
    }

    pub fn with_scroll_position(self, scroll_position: f64) -> Self {
        Self {
            scroll_position: sanitize(scroll_position),
            ..self
        }
    }

    pub fn with_viewport_extent(self, viewport_extent: f64) -> Self {
        Self {
            viewport_extent: sanitize(viewport_extent),
            ..self
        }
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}
