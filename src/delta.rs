//! Wire shapes for the machining state stream.
//!
//! A keyframe carries a truthy `next` marker and replaces the transient
//! geometry set for a new working step:
//!
//! ```json
//! { "next": true, "workingstep": 42, "geom": [{ "id": "C1", "usage": "cutter", "shell": "C1.stl" }] }
//! ```
//!
//! Anything else is an incremental delta that moves existing geometry:
//!
//! ```json
//! { "prev": 41, "geom": [{ "id": "C1", "usage": "cutter", "xform": [...] }], "mtcoords": [1, 2, 3] }
//! ```

use glam::{Mat4, Vec3};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::NcError;
use crate::math::AABB;
use crate::types::Usage;

/// One geometry descriptor inside a delta
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GeomEntry {
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub usage: Usage,
    #[serde(default, deserialize_with = "lenient")]
    pub shell: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub polyline: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub xform: Option<Vec<f32>>,
    #[serde(default, deserialize_with = "lenient")]
    pub bbox: Option<Vec<f32>>,
    #[serde(default, deserialize_with = "lenient")]
    pub size: Option<u64>,
}

impl GeomEntry {
    pub fn new(id: impl Into<String>, usage: Usage) -> Self {
        Self {
            id: id.into(),
            usage,
            ..Self::default()
        }
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Some(shell.into());
        self
    }

    pub fn with_polyline(mut self, polyline: impl Into<String>) -> Self {
        self.polyline = Some(polyline.into());
        self
    }

    pub fn with_xform(mut self, transform: Mat4) -> Self {
        self.xform = Some(transform.to_cols_array().to_vec());
        self
    }

    pub fn with_bbox(mut self, bounds: AABB) -> Self {
        self.bbox = Some(vec![
            bounds.min.x, bounds.min.y, bounds.min.z,
            bounds.max.x, bounds.max.y, bounds.max.z,
        ]);
        self
    }

    /// Column-major 4x4; `None` unless exactly 16 finite values
    pub fn transform(&self) -> Option<Mat4> {
        let values = self.xform.as_deref()?;
        let cols: [f32; 16] = values.try_into().ok()?;
        if cols.iter().all(|v| v.is_finite()) {
            Some(Mat4::from_cols_array(&cols))
        } else {
            None
        }
    }

    pub fn bounds(&self) -> Option<AABB> {
        self.bbox.as_deref().and_then(AABB::from_slice)
    }

    /// Annotation name: polyline reference without its trailing qualifier
    pub fn polyline_name(&self) -> Option<&str> {
        self.polyline
            .as_deref()
            .and_then(|p| p.split('.').next())
            .filter(|name| !name.is_empty())
    }

    pub fn is_toolpath(&self) -> bool {
        self.usage == Usage::Toolpath || (self.usage == Usage::Tobe && self.polyline.is_some())
    }

    pub fn is_solid(&self) -> bool {
        matches!(self.usage, Usage::Cutter | Usage::Machine | Usage::Fixture)
            || (self.usage == Usage::Tobe && self.shell.is_some())
    }
}

/// Full replacement of the transient geometry set
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keyframe {
    pub workingstep: Option<i64>,
    pub geom: Vec<GeomEntry>,
}

/// In-place motion of existing geometry
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Incremental {
    pub geom: Vec<GeomEntry>,
    pub mtcoords: Option<Vec3>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Delta {
    Keyframe(Keyframe),
    Incremental(Incremental),
}

#[derive(Deserialize)]
struct RawDelta {
    #[serde(default)]
    next: Option<Value>,
    #[serde(default, deserialize_with = "workingstep_number")]
    workingstep: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    geom: Vec<Value>,
    #[serde(default, deserialize_with = "lenient")]
    mtcoords: Option<Vec<f32>>,
}

impl Delta {
    pub fn parse(text: &str) -> Result<Self, NcError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Classify and decode a message; a bad geometry entry is dropped
    /// on its own without failing the rest of the batch
    pub fn from_value(value: Value) -> Result<Self, NcError> {
        let raw: RawDelta = serde_json::from_value(value)?;

        let geom: Vec<GeomEntry> = raw
            .geom
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<GeomEntry>(entry) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::debug!("skipping malformed geometry entry: {err}");
                    None
                }
            })
            .collect();

        if raw.next.as_ref().is_some_and(is_truthy) {
            Ok(Delta::Keyframe(Keyframe {
                workingstep: raw.workingstep,
                geom,
            }))
        } else {
            let mtcoords = raw
                .mtcoords
                .as_deref()
                .and_then(|c| match c {
                    [x, y, z, ..] => Some(Vec3::new(*x, *y, *z)),
                    _ => None,
                });
            Ok(Delta::Incremental(Incremental { geom, mtcoords }))
        }
    }

    pub fn is_keyframe(&self) -> bool {
        matches!(self, Delta::Keyframe(_))
    }

    pub fn geom(&self) -> &[GeomEntry] {
        match self {
            Delta::Keyframe(k) => &k.geom,
            Delta::Incremental(i) => &i.geom,
        }
    }
}

/// Off-type values decode as the field's default instead of failing the
/// surrounding entry or message
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|err| {
        log::debug!("ignoring malformed field: {err}");
        T::default()
    }))
}

/// Working step ids arrive as integers, integral floats or numeric strings
fn workingstep_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let step = match &value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    if step.is_none() && !value.is_null() {
        log::debug!("ignoring malformed workingstep: {value}");
    }
    Ok(step)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
