use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::chart::scale::Layout;
use crate::color::{AreaStyle, ColorError, LineStyle, TextStyle, parse_color};
use crate::data::model::{Measure, RowPolicy};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "DEATH_RATE_CONFIG";

// ---------------------------------------------------------------------------
// ChartConfig – everything static about the chart, read from JSON
// ---------------------------------------------------------------------------

/// Every field is optional in the file; missing ones take the defaults.
///
/// ```json
/// {
///   "layout": { "width": 1000, "height": 600, "margin": { "top": 50 } },
///   "styles": { "grid": { "color": "#bbbbbb", "width": 1 } },
///   "row_policy": "skip"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub layout: Layout,
    pub styles: StyleConfig,
    pub row_policy: RowPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AreaStyleSpec {
    pub fill: String,
    #[serde(default = "opaque")]
    pub fill_alpha: f32,
    pub stroke: String,
    pub width: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineStyleSpec {
    pub color: String,
    pub width: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub total: AreaStyleSpec,
    pub total_pollution: AreaStyleSpec,
    pub particulate: AreaStyleSpec,
    pub grid: LineStyleSpec,
    pub axis: LineStyleSpec,
    pub text_color: String,
    pub font_size: f32,
}

fn opaque() -> f32 {
    1.0
}

impl AreaStyleSpec {
    fn new(fill: &str, fill_alpha: f32, stroke: &str, width: f32) -> Self {
        Self {
            fill: fill.to_string(),
            fill_alpha,
            stroke: stroke.to_string(),
            width,
        }
    }

    fn resolve(&self) -> Result<AreaStyle, ColorError> {
        Ok(AreaStyle {
            fill: parse_color(&self.fill, self.fill_alpha)?,
            stroke: parse_color(&self.stroke, 1.0)?,
            width: self.width,
        })
    }
}

impl LineStyleSpec {
    fn resolve(&self) -> Result<LineStyle, ColorError> {
        Ok(LineStyle {
            color: parse_color(&self.color, 1.0)?,
            width: self.width,
        })
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            total: AreaStyleSpec::new("#ea961a", 0.8, "#ea961a", 2.0),
            total_pollution: AreaStyleSpec::new("#f53232", 1.0, "#f53232", 2.0),
            particulate: AreaStyleSpec::new("#5b5bdc", 1.0, "#5b5bdc", 2.0),
            grid: LineStyleSpec {
                color: "#bbbbbb".into(),
                width: 1.0,
            },
            axis: LineStyleSpec {
                color: "#000000".into(),
                width: 2.0,
            },
            text_color: "#000000".into(),
            font_size: 15.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Theme – parsed styles handed to the chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub total: AreaStyle,
    pub total_pollution: AreaStyle,
    pub particulate: AreaStyle,
    pub grid: LineStyle,
    pub axis: LineStyle,
    pub text: TextStyle,
}

impl Theme {
    /// Style of a charted measure; None for measures that are not drawn.
    pub fn area(&self, measure: Measure) -> Option<AreaStyle> {
        match measure {
            Measure::Total => Some(self.total),
            Measure::TotalPollution => Some(self.total_pollution),
            Measure::Particulate => Some(self.particulate),
            Measure::Ozone | Measure::Pollution => None,
        }
    }
}

impl StyleConfig {
    pub fn resolve(&self) -> Result<Theme, ColorError> {
        Ok(Theme {
            total: self.total.resolve()?,
            total_pollution: self.total_pollution.resolve()?,
            particulate: self.particulate.resolve()?,
            grid: self.grid.resolve()?,
            axis: self.axis.resolve()?,
            text: TextStyle {
                color: parse_color(&self.text_color, 1.0)?,
                size: self.font_size,
            },
        })
    }
}

impl ChartConfig {
    /// Load from `path`, else from `$DEATH_RATE_CONFIG`, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                let config = Self::from_json(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?;
                log::info!("Loaded chart config from {}", path.display());
                config
            }
            None => Self::default(),
        };
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if layout.actual_width() <= 0.0 || layout.plot_height() <= 0.0 {
            bail!(
                "canvas {}x{} leaves no room inside its margins",
                layout.width,
                layout.height
            );
        }
        Ok(())
    }

    pub fn theme(&self) -> Result<Theme> {
        self.styles.resolve().context("resolving chart styles")
    }
}
