use serde::Deserialize;

/// Number of equal steps the maximum is divided into.
pub const TICK_STEPS: usize = 7;

/// Ticks are rounded up to a multiple of this.
pub const TICK_ROUNDING: f64 = 5.0;

// ---------------------------------------------------------------------------
// Layout – static canvas geometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 50.0,
            bottom: 30.0,
            left: 50.0,
            right: 50.0,
        }
    }
}

/// Canvas size and margins, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: Margin::default(),
        }
    }
}

impl Layout {
    pub fn actual_width(&self) -> f64 {
        self.width - (self.margin.left + self.margin.right)
    }

    pub fn actual_height(&self) -> f64 {
        self.height - (self.margin.top + self.margin.bottom)
    }

    /// Pixel y of the value 0.
    pub fn baseline(&self) -> f64 {
        self.actual_height()
    }

    /// Vertical extent between the baseline and the top margin.
    pub fn plot_height(&self) -> f64 {
        self.actual_height() - self.margin.top
    }

    /// Right end of horizontal gridlines and the x axis.
    pub fn grid_right(&self) -> f64 {
        self.actual_width() + self.margin.left / 2.0
    }

    /// Pixel x of the `index`-th of `len` evenly placed points.
    pub fn x(&self, index: usize, len: usize) -> f64 {
        index as f64 * (self.actual_width() / len as f64) + self.margin.left
    }
}

// ---------------------------------------------------------------------------
// Scale – value → pixel height against a shared maximum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ScaleError {
    #[error("series is empty")]
    Empty,
    #[error("series has no finite values")]
    NoFiniteValues,
    #[error("series maximum is {0}, expected a positive value")]
    ZeroMaximum(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    maximum: f64,
}

impl Scale {
    /// Scale against the largest finite value of `values`.
    pub fn from_values(values: &[f64]) -> Result<Self, ScaleError> {
        if values.is_empty() {
            return Err(ScaleError::Empty);
        }
        let maximum = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::max)
            .ok_or(ScaleError::NoFiniteValues)?;
        Self::with_maximum(maximum)
    }

    pub fn with_maximum(maximum: f64) -> Result<Self, ScaleError> {
        if !maximum.is_finite() {
            return Err(ScaleError::NoFiniteValues);
        }
        if maximum <= 0.0 {
            return Err(ScaleError::ZeroMaximum(maximum));
        }
        Ok(Self { maximum })
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// `baseline - (v / M) * plot_height`. NaN in, NaN out.
    pub fn y(&self, value: f64, layout: &Layout) -> f64 {
        layout.baseline() - (value / self.maximum) * layout.plot_height()
    }
}

// ---------------------------------------------------------------------------
// TickSet – gridline values
// ---------------------------------------------------------------------------

/// Ascending, duplicate-free gridline values (zero excluded).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickSet {
    values: Vec<f64>,
}

impl TickSet {
    /// Divide `maximum` into seven whole steps, accumulate them, round each
    /// sum up to a multiple of five and drop repeats.
    ///
    /// Rounding can merge neighbouring steps, so small maxima produce fewer
    /// than seven ticks.
    pub fn from_maximum(maximum: f64) -> Self {
        let step = (maximum / TICK_STEPS as f64).ceil();
        let mut values: Vec<f64> = Vec::with_capacity(TICK_STEPS);
        let mut sum = 0.0;
        for _ in 0..TICK_STEPS {
            sum += step;
            values.push((sum / TICK_ROUNDING).ceil() * TICK_ROUNDING);
        }
        values.dedup();
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Greatest tick, or 0 for an empty set.
    pub fn greatest(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }

    /// The baseline value followed by every tick.
    pub fn with_baseline(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::once(0.0).chain(self.values.iter().copied().filter(|v| *v != 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ticks_for_seventy() {
        let ticks = TickSet::from_maximum(70.0);
        assert_eq!(ticks.values(), &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
    }

    #[test]
    fn small_maxima_merge_ticks() {
        // step 1: sums 1..=7 round to 5,5,5,5,5,10,10
        assert_eq!(TickSet::from_maximum(3.0).values(), &[5.0, 10.0]);
        assert_eq!(TickSet::from_maximum(0.4).values(), &[5.0, 10.0]);
    }

    #[test]
    fn fractional_maximum_rounds_steps_up() {
        // step ceil(100.5 / 7) = 15
        let ticks = TickSet::from_maximum(100.5);
        assert_eq!(ticks.values(), &[15.0, 30.0, 45.0, 60.0, 75.0, 90.0, 105.0]);
    }

    #[test]
    fn baseline_tick_comes_first() {
        let ticks = TickSet::from_maximum(70.0);
        let all: Vec<f64> = ticks.with_baseline().collect();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0], 0.0);
    }

    #[test]
    fn maximum_maps_to_top_margin_and_zero_to_baseline() {
        let layout = Layout::default();
        let scale = Scale::with_maximum(42.0).unwrap();
        assert_eq!(scale.y(42.0, &layout), layout.margin.top);
        assert_eq!(scale.y(0.0, &layout), layout.actual_height());
        assert_eq!(layout.actual_height(), 520.0);
    }

    #[test]
    fn x_positions_start_at_left_margin() {
        let layout = Layout::default();
        assert_eq!(layout.x(0, 10), 50.0);
        assert_eq!(layout.x(5, 10), 50.0 + 5.0 * 90.0);
        assert_eq!(layout.grid_right(), 925.0);
    }

    #[test]
    fn degenerate_series_are_reported() {
        assert_eq!(Scale::from_values(&[]), Err(ScaleError::Empty));
        assert_eq!(Scale::from_values(&[0.0, 0.0]), Err(ScaleError::ZeroMaximum(0.0)));
        assert_eq!(
            Scale::from_values(&[f64::NAN, f64::NAN]),
            Err(ScaleError::NoFiniteValues)
        );
    }

    #[test]
    fn nan_does_not_hide_the_maximum() {
        let scale = Scale::from_values(&[3.0, f64::NAN, 9.0, 1.0]).unwrap();
        assert_eq!(scale.maximum(), 9.0);
        assert!(scale.y(f64::NAN, &Layout::default()).is_nan());
    }

    proptest! {
        /// Property: ticks are strictly ascending and cover the maximum
        #[test]
        fn prop_ticks_ascending_and_covering(maximum in 0.001f64..1.0e6) {
            let ticks = TickSet::from_maximum(maximum);
            let values = ticks.values();
            prop_assert!(!values.is_empty() && values.len() <= TICK_STEPS);
            prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(ticks.greatest() >= maximum);
            prop_assert!(values.iter().all(|v| v % TICK_ROUNDING == 0.0));
        }

        /// Property: every value up to the maximum lands inside the plot
        #[test]
        fn prop_mapping_stays_in_plot(maximum in 0.001f64..1.0e6, frac in 0.0f64..=1.0) {
            let layout = Layout::default();
            let scale = Scale::with_maximum(maximum).unwrap();
            let y = scale.y(maximum * frac, &layout);
            prop_assert!(y <= layout.baseline() + 1e-9);
            prop_assert!(y >= layout.margin.top - 1e-9);
        }
    }
}
