//! Transect generation along a baseline
//!
//! The baseline is sampled every `spacing` metres by arc length, starting a
//! small offset in from its first vertex. At each sample the local baseline
//! bearing is smoothed over neighbouring samples, turned ±90° towards the
//! sea, and a transect of `length` metres is cast from a point slightly
//! behind the baseline.

use std::fmt;
use std::str::FromStr;

use geo::{Coord, Line};
use shorekit_core::angle::{normalize_bearing, unit_vector};
use shorekit_core::{Algorithm, Baseline, BaselineId, Error, Result, Transect, TransectId, Warning};
use tracing::{debug, warn};

use super::orientation::smoothed_bearings;
use crate::maybe_rayon::*;
use crate::vector::ArcLengthIndex;

/// Side of the baseline, relative to its vertex order, that faces the sea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeaSide {
    Left,
    #[default]
    Right,
}

impl SeaSide {
    /// Turn (degrees clockwise) from the baseline bearing to the transect bearing
    pub fn turn(self) -> f64 {
        match self {
            SeaSide::Right => 90.0,
            SeaSide::Left => -90.0,
        }
    }
}

impl FromStr for SeaSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(SeaSide::Left),
            "right" => Ok(SeaSide::Right),
            _ => Err(Error::UnknownSeaSide(s.to_string())),
        }
    }
}

impl fmt::Display for SeaSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SeaSide::Left => "left",
            SeaSide::Right => "right",
        })
    }
}

/// Parameters for transect generation
#[derive(Debug, Clone)]
pub struct TransectParams {
    /// Distance between transects along the baseline (m)
    pub spacing: f64,
    /// Transect length seaward of the baseline (m)
    pub length: f64,
    /// Side of the baseline transects extend towards
    pub sea_side: SeaSide,
    /// Arc length of the first sample (m). Keeps the first transect off the
    /// baseline's first vertex, where intersection tests turn degenerate.
    pub start_offset: f64,
    /// How far each transect starts behind the baseline (m), so that it is
    /// guaranteed to cross it
    pub inland_offset: f64,
    /// Neighbouring samples on each side used to smooth the bearing
    pub window: usize,
}

impl Default for TransectParams {
    fn default() -> Self {
        Self {
            spacing: 100.0,
            length: 300.0,
            sea_side: SeaSide::Right,
            start_offset: 1.0,
            inland_offset: 0.5,
            window: 5,
        }
    }
}

impl TransectParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(Error::invalid_parameter("spacing", self.spacing, "must be > 0"));
        }
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(Error::invalid_parameter("length", self.length, "must be > 0"));
        }
        if self.window == 0 {
            return Err(Error::invalid_parameter("window", self.window, "must be >= 1"));
        }
        if !(self.start_offset.is_finite() && self.start_offset >= 0.0) {
            return Err(Error::invalid_parameter(
                "start_offset",
                self.start_offset,
                "must be >= 0",
            ));
        }
        if !(self.inland_offset.is_finite() && self.inland_offset >= 0.0) {
            return Err(Error::invalid_parameter(
                "inland_offset",
                self.inland_offset,
                "must be >= 0",
            ));
        }
        Ok(())
    }

    /// Number of transects a baseline of `length` metres receives
    pub fn sample_count(&self, length: f64) -> usize {
        if length <= self.start_offset {
            return 0;
        }
        ((length - self.start_offset) / self.spacing).floor() as usize + 1
    }
}

/// Generated transects plus non-fatal diagnostics
#[derive(Debug, Clone, Default)]
pub struct TransectSet {
    /// Transects ordered by id
    pub transects: Vec<Transect>,
    pub warnings: Vec<Warning>,
}

impl TransectSet {
    /// Baselines that were too short for any transect
    pub fn empty_baselines(&self) -> Vec<Option<BaselineId>> {
        self.warnings
            .iter()
            .filter_map(|w| match w {
                Warning::EmptyBaseline { baseline_id, .. } => Some(*baseline_id),
                _ => None,
            })
            .collect()
    }
}

/// Sample point and transect bearing for one future transect
#[derive(Debug, Clone, Copy)]
struct Station {
    origin: Coord<f64>,
    bearing: f64,
}

fn stations(baseline: &Baseline, params: &TransectParams) -> Vec<Station> {
    let index = ArcLengthIndex::new(&baseline.geometry);
    let total = index.total_length();
    let count = params.sample_count(total);

    let positions: Vec<_> = (0..count)
        .filter_map(|k| index.locate((params.start_offset + k as f64 * params.spacing).min(total)))
        .collect();
    let coords: Vec<Coord<f64>> = positions.iter().map(|p| p.coord).collect();

    let baseline_bearings = match positions.as_slice() {
        // One sample has no neighbours; use the baseline segment under it
        [only] => vec![only.bearing],
        _ => smoothed_bearings(&coords, params.window),
    };

    coords
        .into_iter()
        .zip(baseline_bearings)
        .map(|(origin, b)| Station {
            origin,
            bearing: normalize_bearing(b + params.sea_side.turn()),
        })
        .collect()
}

fn transect_line(station: Station, params: &TransectParams) -> Line<f64> {
    let (ux, uy) = unit_vector(station.bearing);
    let p = station.origin;
    Line::new(
        Coord {
            x: p.x - params.inland_offset * ux,
            y: p.y - params.inland_offset * uy,
        },
        Coord {
            x: p.x + params.length * ux,
            y: p.y + params.length * uy,
        },
    )
}

/// Generate transects along one or more baselines.
///
/// Transect ids run from 1 in baseline order, shared across baselines.
/// A baseline shorter than `start_offset` yields no transects and an
/// [`Warning::EmptyBaseline`].
///
/// # Errors
/// - Invalid parameters
/// - No baselines, or a baseline part with fewer than 2 finite vertices
pub fn generate_transects(baselines: &[Baseline], params: &TransectParams) -> Result<TransectSet> {
    params.validate()?;
    if baselines.is_empty() {
        return Err(Error::EmptyInput("baselines"));
    }
    for baseline in baselines {
        baseline.validate()?;
    }

    // Sampling is independent per baseline; ids are assigned afterwards so
    // they stay sequential whatever the scheduling.
    let per_baseline: Vec<Vec<Station>> = baselines
        .par_iter()
        .map(|b| stations(b, params))
        .collect();

    let mut set = TransectSet::default();
    let mut next_id: u32 = 1;
    for (baseline, stations) in baselines.iter().zip(per_baseline) {
        if stations.is_empty() {
            let warning = Warning::EmptyBaseline {
                baseline_id: baseline.id,
                length: baseline.length(),
            };
            warn!("{warning}");
            set.warnings.push(warning);
            continue;
        }
        debug!(
            "baseline {:?}: {} transects from id {}",
            baseline.id.map(|b| b.0),
            stations.len(),
            next_id
        );
        for station in stations {
            let transect = Transect::new(
                TransectId(next_id),
                baseline.id,
                transect_line(station, params),
            )?;
            set.transects.push(transect);
            next_id += 1;
        }
    }
    Ok(set)
}

/// Transect generation algorithm
#[derive(Debug, Clone, Default)]
pub struct GenerateTransects;

impl Algorithm for GenerateTransects {
    type Input = Vec<Baseline>;
    type Output = TransectSet;
    type Params = TransectParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Generate Transects"
    }

    fn description(&self) -> &'static str {
        "Cast perpendicular transects at a fixed spacing along smoothed baselines"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        generate_transects(&input, &params)
    }
}
