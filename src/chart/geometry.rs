use crate::data::model::Series;

use super::scale::{Layout, Scale, ScaleError, TickSet};

/// Year labels sit this far left of their gridline.
const YEAR_LABEL_OFFSET: f64 = 20.0;
/// Value labels sit this far left of the y axis.
const VALUE_LABEL_GAP: f64 = 10.0;
/// Value labels sit this far below their gridline.
const VALUE_LABEL_DROP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Area paths
// ---------------------------------------------------------------------------

/// Closed outline of the area under one series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AreaPath {
    /// Starts and ends on the baseline.
    pub points: Vec<Point>,
    /// Indices of non-finite values left out of `points`.
    pub gaps: Vec<usize>,
}

/// Trace `series` on `scale`: baseline under the first index, every finite
/// data point left to right, baseline under the last index.
pub fn area_path(series: &Series, scale: &Scale, layout: &Layout) -> AreaPath {
    let len = series.len();
    if len == 0 {
        return AreaPath::default();
    }

    let baseline = layout.baseline();
    let mut path = AreaPath {
        points: Vec::with_capacity(len + 2),
        gaps: Vec::new(),
    };

    path.points.push(Point::new(layout.x(0, len), baseline));
    for (index, &value) in series.values.iter().enumerate() {
        if !value.is_finite() {
            path.gaps.push(index);
            continue;
        }
        path.points
            .push(Point::new(layout.x(index, len), scale.y(value, layout)));
    }
    path.points.push(Point::new(layout.x(len - 1, len), baseline));

    path
}

// ---------------------------------------------------------------------------
// Gridlines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub from: Point,
    pub to: Point,
    pub label: String,
    pub label_at: Point,
}

/// Horizontal gridlines for zero and every tick.
///
/// Ticks are placed on a scale topped by the greatest tick, so the highest
/// gridline sits on the top margin.
pub fn horizontal_grid(ticks: &TickSet, layout: &Layout) -> Result<Vec<GridLine>, ScaleError> {
    let scale = Scale::with_maximum(ticks.greatest())?;
    let left = layout.margin.left;

    Ok(ticks
        .with_baseline()
        .map(|tick| {
            let y = scale.y(tick, layout);
            GridLine {
                from: Point::new(left, y),
                to: Point::new(layout.grid_right(), y),
                label: format!("{tick}"),
                label_at: Point::new(left - VALUE_LABEL_GAP, y + VALUE_LABEL_DROP),
            }
        })
        .collect())
}

/// Whether the year at `index` gets a vertical gridline and label.
pub fn is_labelled_year(year: i32, index: usize, len: usize) -> bool {
    year % 5 == 0 || index + 1 == len
}

/// Vertical gridlines for years divisible by five and for the last year.
pub fn vertical_grid(series: &Series, layout: &Layout) -> Vec<GridLine> {
    let len = series.labels.len();
    let top = layout.margin.top;
    let baseline = layout.baseline();
    let label_y = layout.actual_height() + layout.margin.bottom;

    series
        .labels
        .iter()
        .enumerate()
        .filter(|&(index, &year)| is_labelled_year(year, index, len))
        .map(|(index, year)| {
            let x = layout.x(index, len);
            GridLine {
                from: Point::new(x, top),
                to: Point::new(x, baseline),
                label: year.to_string(),
                label_at: Point::new(x - YEAR_LABEL_OFFSET, label_y),
            }
        })
        .collect()
}

/// The y axis and the x axis, in that order.
pub fn axes(layout: &Layout) -> [(Point, Point); 2] {
    let left = layout.margin.left;
    let baseline = layout.baseline();
    [
        (Point::new(left, layout.margin.top), Point::new(left, baseline)),
        (Point::new(left, baseline), Point::new(layout.grid_right(), baseline)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(labels: Vec<i32>, values: Vec<f64>) -> Series {
        Series { labels, values }
    }

    #[test]
    fn area_is_anchored_to_the_baseline() {
        let layout = Layout::default();
        let s = series(vec![1990, 1991, 1992], vec![10.0, 20.0, 5.0]);
        let scale = Scale::from_values(&s.values).unwrap();
        let path = area_path(&s, &scale, &layout);

        assert_eq!(path.points.len(), 5);
        assert_eq!(path.points[0], Point::new(50.0, 520.0));
        assert_eq!(path.points[2], Point::new(350.0, 50.0));
        assert_eq!(path.points[3].x, 650.0);
        assert_eq!(*path.points.last().unwrap(), Point::new(650.0, 520.0));
        assert!(path.gaps.is_empty());
    }

    #[test]
    fn secondary_series_share_the_primary_scale() {
        let layout = Layout::default();
        let primary = series(vec![2000, 2001], vec![40.0, 20.0]);
        let secondary = series(vec![2000, 2001], vec![20.0, 10.0]);
        let scale = Scale::from_values(&primary.values).unwrap();
        let path = area_path(&secondary, &scale, &layout);
        assert_eq!(path.points[1].y, 520.0 - 0.5 * 470.0);
    }

    #[test]
    fn non_finite_values_become_gaps() {
        let layout = Layout::default();
        let s = series(vec![1990, 1991, 1992], vec![10.0, f64::NAN, 5.0]);
        let scale = Scale::from_values(&s.values).unwrap();
        let path = area_path(&s, &scale, &layout);
        assert_eq!(path.gaps, vec![1]);
        assert_eq!(path.points.len(), 4);
        assert!(path.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn horizontal_grid_spans_zero_to_top() {
        let layout = Layout::default();
        let lines = horizontal_grid(&TickSet::from_maximum(70.0), &layout).unwrap();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0].label, "0");
        assert_eq!(lines[0].from, Point::new(50.0, 520.0));
        assert_eq!(lines[7].label, "70");
        assert_eq!(lines[7].to, Point::new(925.0, 50.0));
        assert_eq!(lines[7].label_at, Point::new(40.0, 55.0));
    }

    #[test]
    fn vertical_grid_labels_fifth_years_and_the_last() {
        let layout = Layout::default();
        let years: Vec<i32> = (1990..=2017).collect();
        let s = series(years.clone(), vec![1.0; years.len()]);
        let labels: Vec<String> = vertical_grid(&s, &layout).into_iter().map(|g| g.label).collect();
        assert_eq!(labels, vec!["1990", "1995", "2000", "2005", "2010", "2015", "2017"]);
    }

    #[test]
    fn vertical_grid_positions() {
        let layout = Layout::default();
        let s = series(vec![1995, 1996], vec![1.0, 2.0]);
        let lines = vertical_grid(&s, &layout);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].from, Point::new(500.0, 50.0));
        assert_eq!(lines[1].to, Point::new(500.0, 520.0));
        assert_eq!(lines[1].label_at, Point::new(480.0, 550.0));
    }

    #[test]
    fn axes_meet_at_the_origin() {
        let [y_axis, x_axis] = axes(&Layout::default());
        assert_eq!(y_axis.1, x_axis.0);
        assert_eq!(y_axis.0, Point::new(50.0, 50.0));
    }
}
