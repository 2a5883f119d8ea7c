use crate::config::{Config, CONFIG_FILE_NAME};
use crate::record::error::RecordError;
use crate::record::models::*;
use crate::record::update::apply_extraction;
use crate::record::validation::*;
use crate::schema::{Category, FieldKind, SchemaRegistry, SchemaValidator};
use crate::units::{rule_for, rules};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use toml::{Table, Value};

/// Load every `*.toml` tractor file in a directory.
///
/// A file that fails to parse becomes a validation error and is skipped;
/// the rest of the catalog still loads.
pub fn load_catalog_from_directory<P: AsRef<Path>>(
    directory: P,
    config: &Config,
) -> Result<(Catalog, ValidationResult), RecordError> {
    let dir_path = directory.as_ref();

    if !dir_path.exists() {
        return Err(RecordError::InvalidDirectory(format!(
            "Directory does not exist: {}",
            dir_path.display()
        )));
    }

    if !dir_path.is_dir() {
        return Err(RecordError::InvalidDirectory(format!(
            "Path is not a directory: {}",
            dir_path.display()
        )));
    }

    let mut validation = ValidationResult::new();
    let mut files = HashMap::new();
    for entry in fs::read_dir(dir_path)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) != Some("toml") {
            continue;
        }
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string());
        if is_config_file(&filename) {
            continue;
        }

        match read_utf8(&path) {
            Ok(content) => {
                files.insert(filename, content);
            }
            Err(message) => {
                log::warn!("Skipping {}: {}", path.display(), message);
                validation.add_error(
                    format!("Failed to read {}: {}", filename, message),
                    Some(filename),
                );
            }
        }
    }

    log::info!("Loading {} catalog files from {}", files.len(), dir_path.display());
    let (catalog, loaded) = load_catalog_from_files(files, config);
    validation.merge(loaded);
    Ok((catalog, validation))
}

fn read_utf8(path: &Path) -> Result<String, String> {
    let bytes = fs::read(path).map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

/// Load a catalog from file contents (filename -> content map)
pub fn load_catalog_from_files(
    files: HashMap<String, String>,
    config: &Config,
) -> (Catalog, ValidationResult) {
    let schema = SchemaRegistry::tractor();
    let mut validation = ValidationResult::new();
    let mut records = Vec::new();

    // Sorted so ids and issue order don't depend on directory order
    let mut filenames: Vec<&String> = files.keys().collect();
    filenames.sort();

    for filename in filenames {
        if is_config_file(filename) {
            continue;
        }

        match load_record_from_content(&files[filename], filename, schema, config, &mut validation) {
            Ok(record) => records.push(record),
            Err(e) => validation.add_error(
                format!("Failed to parse {}: {}", filename, e),
                Some(filename.clone()),
            ),
        }
    }

    let mut seen = HashSet::new();
    for record in &records {
        if !seen.insert(record.model.as_str()) {
            validation.add_warning(
                format!("Duplicate model '{}'", record.model),
                Some(record.id.clone()),
            );
        }
    }

    let validator = SchemaValidator::new(schema);
    for record in &records {
        validation.merge(validator.validate_record(record));
    }

    (Catalog { records }, validation)
}

fn is_config_file(filename: &str) -> bool {
    filename == "config.toml" || filename == CONFIG_FILE_NAME
}

fn load_record_from_content(
    content: &str,
    filename: &str,
    schema: &SchemaRegistry,
    config: &Config,
    validation: &mut ValidationResult,
) -> Result<TractorRecord, RecordError> {
    let invalid = |message: &str| RecordError::InvalidFile(message.to_string());

    // Derive ID from filename (e.g., "8r-370.toml" -> "8r-370")
    let id = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| invalid("Invalid filename"))?;

    let table: Table = toml::from_str(content)?;

    let model = table
        .get("model")
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid("Missing 'model' field"))?;
    let company = table.get("company").and_then(|v| v.as_str()).map(String::from);

    let mut record = TractorRecord::new(id, model, company);
    let markers = config.extraction.not_found_markers.as_slice();

    if let Some(specs) = table.get("specs") {
        let specs = specs.as_table().ok_or_else(|| invalid("'specs' must be a table"))?;
        for (variable, value) in specs {
            let location = Some(format!("{}/{}", id, variable));
            let raw = match raw_spec_string(value) {
                Some(raw) => raw,
                None => {
                    validation.add_error(
                        format!("Spec '{}' must be a string or number", variable),
                        location,
                    );
                    continue;
                }
            };
            if let Err(e) = apply_extraction(&mut record, schema, variable, &raw, markers) {
                validation.add_error(e.to_string(), location);
            }
        }
    }

    if let Some(attributes) = table.get("attributes") {
        let attributes = attributes
            .as_table()
            .ok_or_else(|| invalid("'attributes' must be a table"))?;
        for (name, value) in attributes {
            let location = Some(format!("{}/{}", id, name));

            if rule_for(name).is_some() {
                validation.add_warning(
                    format!("'{}' has a unit conversion and belongs in [specs]", name),
                    location.clone(),
                );
                if let Some(raw) = raw_spec_string(value) {
                    if let Err(e) = apply_extraction(&mut record, schema, name, &raw, markers) {
                        validation.add_error(e.to_string(), location);
                    }
                }
                continue;
            }

            if let Some(rule) = rules().iter().find(|r| r.field == name.as_str()) {
                validation.add_error(
                    format!(
                        "'{}' is filled by conversion; give the raw '{}' value in [specs]",
                        name, rule.variable
                    ),
                    location,
                );
                continue;
            }

            let kind = match schema.field(name) {
                Some(field) if field.category == Category::Identification => {
                    validation.add_error(
                        format!("'{}' belongs at the top level, not in [attributes]", name),
                        location,
                    );
                    continue;
                }
                Some(field) => field.kind,
                None => {
                    validation.add_error(format!("Unknown attribute '{}'", name), location);
                    continue;
                }
            };

            match typed_attribute(kind, value) {
                Some(v) => record.set(name, v),
                None => validation.add_error(
                    format!("Attribute '{}' expects {} value", name, kind),
                    location,
                ),
            }
        }
    }

    for key in table.keys() {
        if !matches!(key.as_str(), "model" | "company" | "specs" | "attributes") {
            validation.add_warning(
                format!("Ignoring unknown top-level key '{}'", key),
                Some(format!("{}/{}", id, key)),
            );
        }
    }

    Ok(record)
}

fn raw_spec_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

fn typed_attribute(kind: FieldKind, value: &Value) -> Option<FieldValue> {
    match (kind, value) {
        (FieldKind::Text, Value::String(s)) => Some(FieldValue::Text(s.clone())),
        (FieldKind::Integer, Value::Integer(i)) => Some(FieldValue::Integer(*i)),
        (FieldKind::Float, Value::Float(f)) => Some(FieldValue::Float(*f)),
        (FieldKind::Float, Value::Integer(i)) => Some(FieldValue::Float(*i as f64)),
        (FieldKind::Boolean, Value::Boolean(b)) => Some(FieldValue::Boolean(*b)),
        _ => None,
    }
}
