//! GeoJSON reading/writing
//!
//! Only the subset needed here is supported: FeatureCollections of
//! `LineString` / `MultiLineString` features. Z and M ordinates are dropped.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use geo_types::{Coord, Geometry, Line, LineString, MultiLineString, Point};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::{Error, Result};
use crate::model::{Baseline, BaselineId, Shoreline, ShorelineId, Transect, TransectId};
use crate::vector::{AttributeValue, Feature, FeatureCollection};

/// Attribute holding the shoreline identifier unless told otherwise
pub const DEFAULT_SHORELINE_ID_FIELD: &str = "shoreline_id";

const BASELINE_ID: &str = "baseline_id";
const TRANSECT_ID: &str = "transect_id";
const DATE: &str = "date";

#[derive(Deserialize)]
struct CollectionDoc {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<FeatureDoc>,
}

#[derive(Deserialize)]
struct FeatureDoc {
    geometry: Option<GeometryDoc>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum GeometryDoc {
    Point { coordinates: Vec<f64> },
    LineString { coordinates: Vec<Vec<f64>> },
    MultiLineString { coordinates: Vec<Vec<Vec<f64>>> },
    #[serde(other)]
    Unsupported,
}

fn to_coord(index: usize, position: &[f64]) -> Result<Coord<f64>> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(Error::InvalidGeometry {
            feature: format!("feature {index}"),
            reason: format!("position with {} ordinate(s)", position.len()),
        }),
    }
}

fn to_line_string(index: usize, positions: &[Vec<f64>]) -> Result<LineString<f64>> {
    positions
        .iter()
        .map(|p| to_coord(index, p))
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

fn to_geometry(index: usize, doc: GeometryDoc) -> Result<Option<Geometry<f64>>> {
    Ok(match doc {
        GeometryDoc::Point { coordinates } => {
            Some(Geometry::Point(Point::from(to_coord(index, &coordinates)?)))
        }
        GeometryDoc::LineString { coordinates } => {
            Some(Geometry::LineString(to_line_string(index, &coordinates)?))
        }
        GeometryDoc::MultiLineString { coordinates } => Some(Geometry::MultiLineString(
            MultiLineString::new(
                coordinates
                    .iter()
                    .map(|part| to_line_string(index, part))
                    .collect::<Result<Vec<_>>>()?,
            ),
        )),
        GeometryDoc::Unsupported => None,
    })
}

/// Parse a GeoJSON FeatureCollection
pub fn parse_features(text: &str) -> Result<FeatureCollection> {
    let doc: CollectionDoc = serde_json::from_str(text)?;
    if doc.kind != "FeatureCollection" {
        return Err(Error::Other(format!(
            "expected a GeoJSON FeatureCollection, found '{}'",
            doc.kind
        )));
    }

    let mut collection = FeatureCollection::new();
    for (index, feature) in doc.features.into_iter().enumerate() {
        let geometry = match feature.geometry {
            Some(g) => to_geometry(index, g)?,
            None => None,
        };
        let properties = feature
            .properties
            .unwrap_or_default()
            .iter()
            .map(|(k, v)| (k.clone(), AttributeValue::from(v)))
            .collect();
        collection.push(Feature {
            geometry,
            properties,
        });
    }
    Ok(collection)
}

/// Read a GeoJSON FeatureCollection from disk
pub fn read_features<P: AsRef<Path>>(path: P) -> Result<FeatureCollection> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_features(&text)
}

fn linear_geometry(index: usize, feature: &Feature) -> Result<MultiLineString<f64>> {
    feature.lines().ok_or_else(|| Error::InvalidGeometry {
        feature: format!("feature {index}"),
        reason: "expected a LineString or MultiLineString".into(),
    })
}

fn required_i64(index: usize, feature: &Feature, name: &str) -> Result<i64> {
    optional_i64(index, feature, name)?.ok_or_else(|| Error::MissingAttribute {
        feature: index,
        attribute: name.to_string(),
    })
}

fn optional_i64(index: usize, feature: &Feature, name: &str) -> Result<Option<i64>> {
    match feature.get_property(name) {
        None => Ok(None),
        Some(v) => v.as_i64().map(Some).ok_or_else(|| Error::InvalidAttribute {
            feature: index,
            attribute: name.to_string(),
            reason: format!("expected an integer, found {v:?}"),
        }),
    }
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and ISO date-times, which are
/// truncated to their date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let s = value.trim();
    let date_part = match s.char_indices().nth(10) {
        Some((i, 'T')) | Some((i, ' ')) => &s[..i],
        _ => s,
    };
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y/%m/%d"))
        .map_err(|source| Error::Date {
            value: s.to_string(),
            source,
        })
}

/// Typed baselines from features; `baseline_id` is optional
pub fn baselines_from(collection: &FeatureCollection) -> Result<Vec<Baseline>> {
    collection
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let id = optional_i64(index, feature, BASELINE_ID)?.map(BaselineId);
            Ok(Baseline::new(id, linear_geometry(index, feature)?))
        })
        .collect()
}

/// Typed shorelines from features; needs an id attribute and a `date`
pub fn shorelines_from(collection: &FeatureCollection, id_field: &str) -> Result<Vec<Shoreline>> {
    collection
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let id = ShorelineId(required_i64(index, feature, id_field)?);
            let date = match feature.get_property(DATE) {
                Some(AttributeValue::String(s)) => parse_date(s)?,
                Some(other) => {
                    return Err(Error::InvalidAttribute {
                        feature: index,
                        attribute: DATE.to_string(),
                        reason: format!("expected a date string, found {other:?}"),
                    })
                }
                None => {
                    return Err(Error::MissingAttribute {
                        feature: index,
                        attribute: DATE.to_string(),
                    })
                }
            };
            Ok(Shoreline::new(id, date, linear_geometry(index, feature)?))
        })
        .collect()
}

/// Typed transects from features.
///
/// Only the first two vertices of the first part are kept; transects edited
/// in a desktop GIS sometimes pick up extra vertices.
pub fn transects_from(collection: &FeatureCollection) -> Result<Vec<Transect>> {
    let mut seen = HashSet::new();
    collection
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let raw_id = required_i64(index, feature, TRANSECT_ID)?;
            let id = u32::try_from(raw_id)
                .ok()
                .filter(|&v| v > 0)
                .map(TransectId)
                .ok_or_else(|| Error::InvalidAttribute {
                    feature: index,
                    attribute: TRANSECT_ID.to_string(),
                    reason: format!("{raw_id} is not a positive transect id"),
                })?;
            if !seen.insert(id) {
                return Err(Error::InvalidAttribute {
                    feature: index,
                    attribute: TRANSECT_ID.to_string(),
                    reason: format!("transect id {id} is already used by another feature"),
                });
            }
            let baseline_id = optional_i64(index, feature, BASELINE_ID)?.map(BaselineId);
            let geometry = linear_geometry(index, feature)?;
            let coords = geometry.0.first().map(|ls| ls.0.as_slice()).unwrap_or(&[]);
            match coords {
                [start, end, ..] => Transect::new(id, baseline_id, Line::new(*start, *end)),
                _ => Err(Error::InvalidGeometry {
                    feature: format!("transect {id}"),
                    reason: "fewer than 2 vertices".into(),
                }),
            }
        })
        .collect()
}

pub fn read_baselines<P: AsRef<Path>>(path: P) -> Result<Vec<Baseline>> {
    baselines_from(&read_features(path)?)
}

pub fn read_shorelines<P: AsRef<Path>>(path: P, id_field: &str) -> Result<Vec<Shoreline>> {
    shorelines_from(&read_features(path)?, id_field)
}

pub fn read_transects<P: AsRef<Path>>(path: P) -> Result<Vec<Transect>> {
    transects_from(&read_features(path)?)
}

/// Transects as a GeoJSON FeatureCollection value
pub fn transects_to_geojson(transects: &[Transect]) -> Value {
    let features: Vec<Value> = transects
        .iter()
        .map(|t| {
            let mut properties = Map::new();
            properties.insert(TRANSECT_ID.into(), json!(t.id.0));
            if let Some(b) = t.baseline_id {
                properties.insert(BASELINE_ID.into(), json!(b.0));
            }
            properties.insert("bearing".into(), json!(t.bearing()));
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[t.start().x, t.start().y], [t.end().x, t.end().y]],
                },
                "properties": properties,
            })
        })
        .collect();

    json!({ "type": "FeatureCollection", "features": features })
}

pub fn write_transects_geojson<P: AsRef<Path>>(path: P, transects: &[Transect]) -> Result<()> {
    let text = serde_json::to_string_pretty(&transects_to_geojson(transects))?;
    fs::write(path.as_ref(), text)?;
    Ok(())
}
