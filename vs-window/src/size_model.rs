use crate::LayoutParams;

/// Per-item extents along the scroll axis.
///
/// `Uniform` serves fixed-size lists and tile grids (where the size is the row height).
/// `PerItem` keeps the raw sizes plus a prefix-sum array so offset lookups are `O(1)` and
/// offset → index searches are `O(log n)`.
#[derive(Clone, Debug, PartialEq)]
pub enum SizeModel {
    Uniform { element_size: f64 },
    PerItem(CumulativeSizes),
}

impl SizeModel {
    pub fn uniform(element_size: f64) -> Self {
        Self::Uniform {
            element_size: clamp_size(element_size),
        }
    }

    /// Builds a per-item model in a single pass.
    ///
    /// Negative or non-finite sizes are treated as `0` (and logged).
    pub fn per_item(sizes: impl IntoIterator<Item = f64>) -> Self {
        Self::PerItem(CumulativeSizes::from_sizes(sizes))
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self, Self::Uniform { .. })
    }

    pub fn element_size(&self) -> Option<f64> {
        match self {
            Self::Uniform { element_size } => Some(*element_size),
            Self::PerItem(_) => None,
        }
    }

    pub fn cumulative(&self) -> Option<&CumulativeSizes> {
        match self {
            Self::Uniform { .. } => None,
            Self::PerItem(c) => Some(c),
        }
    }

    /// Size of the item at `index` along the scroll axis.
    pub fn size_of(&self, index: usize) -> f64 {
        match self {
            Self::Uniform { element_size } => *element_size,
            Self::PerItem(c) => c.size_of(index),
        }
    }

    /// Leading edge of `index` relative to the first item (offsets excluded).
    ///
    /// For uniform sizes this is the list position; tile grids place items through
    /// [`crate::TileLayout`] instead.
    pub fn start_of(&self, index: usize) -> f64 {
        match self {
            Self::Uniform { element_size } => index as f64 * element_size,
            Self::PerItem(c) => c.start_of(index),
        }
    }

    /// Leading edge of `index` inside the scroll container (includes `offset_before`).
    pub fn offset_of(&self, index: usize, layout: &LayoutParams) -> f64 {
        layout.offset_before + self.start_of(index)
    }

    /// Scroll-axis extent of `count` items laid out `columns` per row.
    ///
    /// Per-item models always stack one item per row.
    pub fn content_extent(&self, count: usize, columns: usize) -> f64 {
        match self {
            Self::Uniform { element_size } => {
                let rows = count.div_ceil(columns.max(1));
                element_size * rows as f64
            }
            Self::PerItem(c) => c.start_of(count),
        }
    }
}

/// Per-item sizes plus their prefix sums.
///
/// `cumulative` has `len + 1` entries: `cumulative[0] == 0` and
/// `cumulative[i + 1] == cumulative[i] + sizes[i]`, so it is monotonically non-decreasing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CumulativeSizes {
    sizes: Vec<f64>,
    cumulative: Vec<f64>,
}

impl CumulativeSizes {
    pub fn from_sizes(sizes: impl IntoIterator<Item = f64>) -> Self {
        let sizes = sizes.into_iter();
        let (lower, _) = sizes.size_hint();
        let mut out = Self {
            sizes: Vec::with_capacity(lower),
            cumulative: Vec::with_capacity(lower + 1),
        };
        let mut sum = 0.0;
        out.cumulative.push(sum);
        for (i, size) in sizes.enumerate() {
            if !(size.is_finite() && size >= 0.0) {
                vwarn!(index = i, size, "CumulativeSizes: invalid item size, using 0");
            }
            let size = clamp_size(size);
            sum += size;
            out.sizes.push(size);
            out.cumulative.push(sum);
        }
        vdebug!(count = out.sizes.len(), total = sum, "CumulativeSizes::from_sizes");
        out
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    /// The prefix-sum array (`len + 1` entries).
    pub fn offsets(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn size_of(&self, index: usize) -> f64 {
        self.sizes.get(index).copied().unwrap_or(0.0)
    }

    /// Prefix sum up to (excluding) `index`, clamped to the total.
    pub fn start_of(&self, index: usize) -> f64 {
        let i = index.min(self.sizes.len());
        self.cumulative[i]
    }

    /// Smallest `i` such that the item `i` ends at or after `target`
    /// (`cumulative[i + 1] >= target`); `len()` when no item does.
    pub fn first_ending_at_or_after(&self, target: f64) -> usize {
        self.cumulative[1..].partition_point(|&end| end < target)
    }

    /// Smallest `i` in `0..=len()` such that `cumulative[i] >= target`; `len()` when none is.
    pub fn first_starting_at_or_after(&self, target: f64) -> usize {
        self.cumulative
            .partition_point(|&start| start < target)
            .min(self.sizes.len())
    }
}

fn clamp_size(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 { size } else { 0.0 }
}
