//! Specification document loading.
//!
//! Spec files may be YAML or JSON. Both are normalised to compact JSON text
//! before being embedded in the bootstrap script.

use std::path::Path;

use crate::error::SpecError;

/// Convert a YAML or JSON payload into compact JSON.
///
/// YAML is tried first since it accepts practically every JSON document;
/// strict JSON parsing is the fallback. When both fail, both messages are
/// reported.
pub fn normalize(data: &[u8]) -> Result<String, SpecError> {
    let value: serde_json::Value = match serde_yaml::from_slice::<serde_yaml::Value>(data) {
        // Going through the YAML value keeps non-string keys such as `200:`,
        // which the JSON writer turns into strings.
        Ok(yaml) => serde_json::to_value(yaml)?,
        Err(yaml_err) => serde_json::from_slice(data).map_err(|json_err| SpecError::Parse {
            reason: format!("yaml: {yaml_err}; json: {json_err}"),
        })?,
    };

    if !value.is_object() {
        return Err(SpecError::Parse {
            reason: "document root is not a mapping".to_owned(),
        });
    }

    Ok(serde_json::to_string(&value)?)
}

/// Read a spec file from disk and normalise it.
pub async fn load_file(path: &Path) -> Result<String, SpecError> {
    let data = tokio::fs::read(path).await.map_err(|source| SpecError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = data.len(), "spec file read");
    normalize(&data)
}
