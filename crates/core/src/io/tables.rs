//! CSV output tables
//!
//! Missing statistics are written as `NaN`; an undefined distance is an
//! empty field. Both read back unchanged.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::model::{
    BaselineId, BaselineIntersection, DistanceObservation, EvolutionMetrics, ShorelineId,
    ShorelineIntersection, Transect, TransectId,
};

#[derive(Serialize)]
struct TransectRow {
    transect_id: TransectId,
    baseline_id: Option<BaselineId>,
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
    bearing: f64,
}

#[derive(Serialize)]
struct BaselinePointRow {
    transect_id: TransectId,
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct ShorelinePointRow {
    transect_id: TransectId,
    shoreline_id: ShorelineId,
    date: NaiveDate,
    x: f64,
    y: f64,
}

fn write_rows<W, T, I>(writer: W, rows: I) -> Result<()>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_transects<W: Write>(writer: W, transects: &[Transect]) -> Result<()> {
    write_rows(
        writer,
        transects.iter().map(|t| TransectRow {
            transect_id: t.id,
            baseline_id: t.baseline_id,
            start_x: t.start().x,
            start_y: t.start().y,
            end_x: t.end().x,
            end_y: t.end().y,
            bearing: t.bearing(),
        }),
    )
}

pub fn write_baseline_points<W: Write>(writer: W, points: &[BaselineIntersection]) -> Result<()> {
    write_rows(
        writer,
        points.iter().map(|p| BaselinePointRow {
            transect_id: p.transect_id,
            x: p.point.x(),
            y: p.point.y(),
        }),
    )
}

pub fn write_shoreline_points<W: Write>(writer: W, points: &[ShorelineIntersection]) -> Result<()> {
    write_rows(
        writer,
        points.iter().map(|p| ShorelinePointRow {
            transect_id: p.transect_id,
            shoreline_id: p.shoreline_id,
            date: p.date,
            x: p.point.x(),
            y: p.point.y(),
        }),
    )
}

pub fn write_observations<W: Write>(writer: W, observations: &[DistanceObservation]) -> Result<()> {
    write_rows(writer, observations)
}

pub fn write_metrics<W: Write>(writer: W, metrics: &[EvolutionMetrics]) -> Result<()> {
    write_rows(writer, metrics)
}

/// Read distance observations written by [`write_observations`]
pub fn read_observations<R: Read>(reader: R) -> Result<Vec<DistanceObservation>> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut out = Vec::new();
    for row in csv.deserialize() {
        out.push(row?);
    }
    Ok(out)
}

pub fn write_transects_csv<P: AsRef<Path>>(path: P, transects: &[Transect]) -> Result<()> {
    write_transects(File::create(path.as_ref())?, transects)
}

pub fn write_baseline_points_csv<P: AsRef<Path>>(
    path: P,
    points: &[BaselineIntersection],
) -> Result<()> {
    write_baseline_points(File::create(path.as_ref())?, points)
}

pub fn write_shoreline_points_csv<P: AsRef<Path>>(
    path: P,
    points: &[ShorelineIntersection],
) -> Result<()> {
    write_shoreline_points(File::create(path.as_ref())?, points)
}

pub fn write_observations_csv<P: AsRef<Path>>(
    path: P,
    observations: &[DistanceObservation],
) -> Result<()> {
    write_observations(File::create(path.as_ref())?, observations)
}

pub fn write_metrics_csv<P: AsRef<Path>>(path: P, metrics: &[EvolutionMetrics]) -> Result<()> {
    write_metrics(File::create(path.as_ref())?, metrics)
}

pub fn read_observations_csv<P: AsRef<Path>>(path: P) -> Result<Vec<DistanceObservation>> {
    read_observations(File::open(path.as_ref())?)
}
