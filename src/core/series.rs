use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// One named x/y series with bounds computed at construction.
///
/// Bounds are never recomputed; there is no append API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: String,
    points: Vec<DataPoint>,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    x_axis_label: String,
}

impl Series {
    /// Builds a series from raw points, deriving all four bounds from the data.
    ///
    /// Points are expected to be sorted by `x`; order is not enforced.
    pub fn from_points(
        name: impl Into<String>,
        points: Vec<DataPoint>,
        x_axis_label: impl Into<String>,
    ) -> ChartResult<Self> {
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(ChartError::InvalidData(
                "series points must be finite".to_owned(),
            ));
        }

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for point in &points {
            x_min = x_min.min(point.x);
            x_max = x_max.max(point.x);
            y_min = y_min.min(point.y);
            y_max = y_max.max(point.y);
        }
        if points.is_empty() {
            (x_min, x_max, y_min, y_max) = (0.0, 0.0, 0.0, 0.0);
        }

        Ok(Self {
            name: name.into(),
            points,
            x_min,
            x_max,
            y_min,
            y_max,
            x_axis_label: x_axis_label.into(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn x_bounds(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    #[must_use]
    pub fn y_bounds(&self) -> (f64, f64) {
        (self.y_min, self.y_max)
    }

    #[must_use]
    pub fn x_axis_label(&self) -> &str {
        &self.x_axis_label
    }
}

/// Anything that can fill a [`SeriesStore`].
///
/// [`SyntheticWave`] is the in-crate source; a networked source would
/// implement this trait and keep the same output contract.
pub trait SeriesSource {
    /// `existing` is the number of series already held by the target store.
    fn load(&mut self, existing: usize) -> ChartResult<Vec<Series>>;
}

impl SeriesSource for Vec<Series> {
    fn load(&mut self, _existing: usize) -> ChartResult<Vec<Series>> {
        Ok(self.clone())
    }
}

/// Phase applied to the synthetic sine wave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PhaseMode {
    Fixed(f64),
    /// Fresh random phase on every load.
    Random,
    /// Reproducible phase drawn from a seeded generator.
    Seeded(u64),
}

impl PhaseMode {
    fn resolve(self) -> f64 {
        match self {
            Self::Fixed(phase) => phase,
            Self::Random => rand::rng().random::<f64>() * TAU,
            Self::Seeded(seed) => StdRng::seed_from_u64(seed).random::<f64>() * TAU,
        }
    }
}

/// Deterministic-shape sine generator standing in for a real data feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticWave {
    pub x_min: f64,
    pub x_max: f64,
    pub x_axis_label: String,
    /// Sample step along x. Must be at least `1e-4`.
    pub resolution: f64,
    pub scale_factor: f64,
    pub phase: PhaseMode,
}

impl Default for SyntheticWave {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 100.0,
            x_axis_label: "Time".to_owned(),
            resolution: 0.001,
            scale_factor: 100.0,
            phase: PhaseMode::Random,
        }
    }
}

const MIN_RESOLUTION: f64 = 1e-4;

impl SyntheticWave {
    #[must_use]
    pub fn with_x_range(mut self, x_min: f64, x_max: f64) -> Self {
        self.x_min = x_min;
        self.x_max = x_max;
        self
    }

    #[must_use]
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    #[must_use]
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    #[must_use]
    pub fn with_phase(mut self, phase: PhaseMode) -> Self {
        self.phase = phase;
        self
    }

    fn validate(&self) -> ChartResult<()> {
        if !self.x_min.is_finite() || !self.x_max.is_finite() {
            return Err(ChartError::InvalidData(
                "synthetic x range must be finite".to_owned(),
            ));
        }
        if !self.resolution.is_finite() || self.resolution < MIN_RESOLUTION {
            return Err(ChartError::InvalidData(format!(
                "synthetic resolution must be finite and >= {MIN_RESOLUTION}"
            )));
        }
        if !self.scale_factor.is_finite() {
            return Err(ChartError::InvalidData(
                "synthetic scale factor must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    /// Generates one series named after its position in the target store.
    pub fn generate(&self, series_index: usize) -> ChartResult<Series> {
        self.validate()?;
        let phase = self.phase.resolve();

        // Bounds start at zero so they always bracket the midline.
        let (mut y_min, mut y_max) = (0.0_f64, 0.0_f64);
        let mut points = Vec::new();
        let mut x = self.x_min;
        while x < self.x_max {
            let y = (TAU * x + phase).sin() * self.scale_factor;
            y_min = y_min.min(y);
            y_max = y_max.max(y);
            points.push(DataPoint::new(x, y));

            let next = round_to_4_decimals(x + self.resolution);
            if next <= x {
                break;
            }
            x = next;
        }

        debug!(
            series_index,
            points = points.len(),
            phase,
            "generated synthetic series"
        );
        Ok(Series {
            name: format!("series {series_index}"),
            points,
            x_min: self.x_min,
            x_max: self.x_max,
            y_min,
            y_max,
            x_axis_label: self.x_axis_label.clone(),
        })
    }
}

impl SeriesSource for SyntheticWave {
    fn load(&mut self, existing: usize) -> ChartResult<Vec<Series>> {
        Ok(vec![self.generate(existing)?])
    }
}

fn round_to_4_decimals(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Owner of every loaded series. Series are read-only once stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStore {
    series: Vec<Series>,
}

impl SeriesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the store content with what `source` yields and returns
    /// series 0. A source yielding nothing leaves the store untouched.
    pub fn load(&mut self, source: &mut impl SeriesSource) -> ChartResult<&Series> {
        let loaded = source.load(0)?;
        if loaded.is_empty() {
            return Err(ChartError::SeriesNotFound { id: 0, len: 0 });
        }
        debug!(count = loaded.len(), "series store loaded");
        self.series = loaded;
        self.get_series(0)
    }

    /// Appends whatever `source` yields, keeping existing series.
    pub fn extend_from(&mut self, source: &mut impl SeriesSource) -> ChartResult<usize> {
        let loaded = source.load(self.series.len())?;
        let added = loaded.len();
        self.series.extend(loaded);
        Ok(added)
    }

    pub fn get_series(&self, id: usize) -> ChartResult<&Series> {
        self.series.get(id).ok_or(ChartError::SeriesNotFound {
            id,
            len: self.series.len(),
        })
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// True when there is no series 0 or it holds no points.
    #[must_use]
    pub fn primary_is_empty(&self) -> bool {
        self.series.first().is_none_or(Series::is_empty)
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }
}
