// crates/infra/src/persistence/layer_reader.rs
//! Loads in-memory layers from GeoJSON feature collections or plain JSON
//! arrays of attribute objects.

use std::path::Path;

use serde_json::Value as Json;
use year_range_filter_domain::{AttributeMap, AttributeValue};
use year_range_filter_shared_kernel::{InfraResult, InfrastructureError};

use super::file_reader::FileReader;
use crate::layer::{Feature, MemoryLayer};

const SUPPORTED: &[&str] = &["geojson", "json"];

/// Reads a layer file. The layer id is the file stem; the display name is the
/// collection's `name` member when present, otherwise the stem.
pub fn load_layer(path: &Path) -> InfraResult<MemoryLayer> {
    let extension = FileReader::extension(path);
    if !SUPPORTED.contains(&extension.as_str()) {
        return Err(InfrastructureError::UnsupportedFormat { path: path.to_path_buf(), extension });
    }

    let text = FileReader::read_to_string(path)?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("layer")
        .to_string();
    parse_layer(&stem, &text)
}

/// Parses layer JSON; `stem` names the source in errors and serves as the id.
pub fn parse_layer(stem: &str, text: &str) -> InfraResult<MemoryLayer> {
    let document: Json = serde_json::from_str(text)?;
    let invalid = |details: &str| InfrastructureError::LayerData {
        source_name: stem.to_string(),
        details: details.to_string(),
    };

    let (name, fields, rows) = match &document {
        Json::Object(collection) => {
            if collection.get("type").and_then(Json::as_str) != Some("FeatureCollection") {
                return Err(invalid("expected a GeoJSON FeatureCollection or an array of objects"));
            }
            let features = collection
                .get("features")
                .and_then(Json::as_array)
                .ok_or_else(|| invalid("'features' must be an array"))?;
            let name = collection.get("name").and_then(Json::as_str).unwrap_or(stem);
            let fields = declared_fields(collection.get("fields"))
                .ok_or_else(|| invalid("'fields' must be an array of strings"))?;
            let rows = features
                .iter()
                .enumerate()
                .map(|(index, feature)| geojson_feature(index, feature).map_err(|d| invalid(&d)))
                .collect::<InfraResult<Vec<_>>>()?;
            (name.to_string(), fields, rows)
        }
        Json::Array(items) => {
            let rows = items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Json::Object(properties) => Ok(Feature::new(index as u64 + 1, attributes(properties))),
                    _ => Err(invalid(&format!("row {} is not an object", index + 1))),
                })
                .collect::<InfraResult<Vec<_>>>()?;
            (stem.to_string(), Vec::new(), rows)
        }
        _ => return Err(invalid("expected a GeoJSON FeatureCollection or an array of objects")),
    };

    Ok(MemoryLayer::new(stem, name, fields, rows))
}

fn declared_fields(value: Option<&Json>) -> Option<Vec<String>> {
    match value {
        None | Some(Json::Null) => Some(Vec::new()),
        Some(Json::Array(names)) => names.iter().map(|n| n.as_str().map(str::to_string)).collect(),
        Some(_) => None,
    }
}

fn geojson_feature(index: usize, feature: &Json) -> Result<Feature, String> {
    let Json::Object(feature) = feature else {
        return Err(format!("feature {} is not an object", index + 1));
    };
    let id = feature.get("id").and_then(Json::as_u64).unwrap_or(index as u64 + 1);
    let attributes = match feature.get("properties") {
        None | Some(Json::Null) => AttributeMap::new(),
        Some(Json::Object(properties)) => attributes(properties),
        Some(_) => return Err(format!("feature {id} has non-object properties")),
    };
    Ok(Feature::new(id, attributes))
}

fn attributes(properties: &serde_json::Map<String, Json>) -> AttributeMap {
    properties.iter().map(|(k, v)| (k.clone(), attribute(v))).collect()
}

fn attribute(value: &Json) -> AttributeValue {
    match value {
        Json::Null => AttributeValue::Null,
        Json::Bool(b) => AttributeValue::Bool(*b),
        Json::Number(n) => n
            .as_i64()
            .map(AttributeValue::Int)
            .or_else(|| n.as_f64().map(AttributeValue::Real))
            .unwrap_or_else(|| AttributeValue::Text(n.to_string())),
        Json::String(s) => AttributeValue::Text(s.clone()),
        // Nested values are kept as their JSON text.
        other => AttributeValue::Text(other.to_string()),
    }
}
