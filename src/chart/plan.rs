use std::fmt;

use crate::color::{AreaStyle, LineStyle, TextStyle};
use crate::config::Theme;
use crate::data::aggregate::{YearGroups, country_records, country_series, world_series};
use crate::data::model::{Dataset, Measure, Series};

use super::geometry::{Point, area_path, axes, horizontal_grid, vertical_grid};
use super::scale::{Layout, Scale, ScaleError, TickSet};

// ---------------------------------------------------------------------------
// Primitives and the surface that draws them
// ---------------------------------------------------------------------------

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    End,
}

/// One drawing command, in canvas pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        style: LineStyle,
    },
    Polygon {
        points: Vec<Point>,
        style: AreaStyle,
    },
    Text {
        at: Point,
        text: String,
        anchor: Anchor,
        style: TextStyle,
    },
}

/// A rendering collaborator. Coordinates arrive fully computed.
pub trait Surface {
    fn draw_line(&mut self, from: Point, to: Point, style: &LineStyle);

    /// Fill and outline a polygon given as an ordered point list.
    fn draw_polygon(&mut self, points: &[Point], style: &AreaStyle);

    /// `at` is the text baseline; `anchor` picks which end sits on it.
    fn draw_text(&mut self, at: Point, text: &str, anchor: Anchor, style: &TextStyle);
}

// ---------------------------------------------------------------------------
// RenderPlan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum PlanWarning {
    /// A value that could not be drawn and was left out of its area.
    NonFinite { measure: Measure, year: i32 },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::NonFinite { measure, year } => {
                write!(f, "{measure} for {year} is not a number")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("no records for country {0:?}")]
    UnknownCountry(String),
    #[error("cannot scale chart: {0}")]
    Scale(#[from] ScaleError),
}

/// Everything needed to draw one view, replacing any previous plan.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub title: String,
    /// Shared maximum all areas are scaled against.
    pub maximum: f64,
    pub ticks: TickSet,
    /// Charted series, back to front.
    pub series: Vec<(Measure, Series)>,
    pub primitives: Vec<Primitive>,
    pub warnings: Vec<PlanWarning>,
}

impl RenderPlan {
    /// Replay every primitive in order.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for primitive in &self.primitives {
            match primitive {
                Primitive::Line { from, to, style } => surface.draw_line(*from, *to, style),
                Primitive::Polygon { points, style } => surface.draw_polygon(points, style),
                Primitive::Text {
                    at,
                    text,
                    anchor,
                    style,
                } => surface.draw_text(*at, text, *anchor, style),
            }
        }
    }

    /// X-axis years of the view.
    pub fn years(&self) -> &[i32] {
        self.series
            .first()
            .map(|(_, s)| s.labels.as_slice())
            .unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Chart – builds plans from a dataset snapshot
// ---------------------------------------------------------------------------

pub struct Chart<'a> {
    dataset: &'a Dataset,
    layout: &'a Layout,
    theme: &'a Theme,
}

impl<'a> Chart<'a> {
    pub fn new(dataset: &'a Dataset, layout: &'a Layout, theme: &'a Theme) -> Self {
        Self {
            dataset,
            layout,
            theme,
        }
    }

    /// All countries summed per year.
    pub fn world(&self) -> Result<RenderPlan, PlanError> {
        let groups = YearGroups::from_records(&self.dataset.records);
        let series = Measure::CHARTED
            .iter()
            .map(|&m| (m, world_series(&groups, m)))
            .collect();
        self.plan("World".to_string(), series)
    }

    /// Drill down to one country, by exact display name.
    pub fn set_country_filter(&self, name: &str) -> Result<RenderPlan, PlanError> {
        let records = country_records(&self.dataset.records, name);
        if records.is_empty() {
            return Err(PlanError::UnknownCountry(name.to_string()));
        }
        let series = Measure::CHARTED
            .iter()
            .map(|&m| (m, country_series(&records, m)))
            .collect();
        self.plan(name.to_string(), series)
    }

    /// The first series is the primary one: it sets the shared maximum,
    /// the ticks and the year gridlines.
    fn plan(&self, title: String, series: Vec<(Measure, Series)>) -> Result<RenderPlan, PlanError> {
        let layout = self.layout;
        let theme = self.theme;

        let primary = series.first().map(|(_, s)| s).ok_or(ScaleError::Empty)?;
        let scale = Scale::from_values(&primary.values)?;
        let ticks = TickSet::from_maximum(scale.maximum());
        log::debug!(
            "{title}: maximum {} ticks {:?}",
            scale.maximum(),
            ticks.values()
        );

        let mut primitives = Vec::new();

        for line in horizontal_grid(&ticks, layout)? {
            primitives.push(Primitive::Line {
                from: line.from,
                to: line.to,
                style: theme.grid,
            });
            primitives.push(Primitive::Text {
                at: line.label_at,
                text: line.label,
                anchor: Anchor::End,
                style: theme.text,
            });
        }

        for line in vertical_grid(primary, layout) {
            primitives.push(Primitive::Line {
                from: line.from,
                to: line.to,
                style: theme.grid,
            });
            primitives.push(Primitive::Text {
                at: line.label_at,
                text: line.label,
                anchor: Anchor::Start,
                style: theme.text,
            });
        }

        let mut warnings = Vec::new();
        for (measure, s) in &series {
            let Some(style) = theme.area(*measure) else {
                continue;
            };
            let path = area_path(s, &scale, layout);
            warnings.extend(path.gaps.iter().map(|&i| PlanWarning::NonFinite {
                measure: *measure,
                year: s.labels[i],
            }));
            primitives.push(Primitive::Polygon {
                points: path.points,
                style,
            });
        }

        for (from, to) in axes(layout) {
            primitives.push(Primitive::Line {
                from,
                to,
                style: theme.axis,
            });
        }

        for warning in &warnings {
            log::warn!("{title}: {warning}");
        }
        log::info!(
            "Built plan for {title}: {} years, {} primitives",
            primary.len(),
            primitives.len()
        );

        Ok(RenderPlan {
            title,
            maximum: scale.maximum(),
            ticks,
            series,
            primitives,
            warnings,
        })
    }
}
