use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::models::{Food, SavedData};

/// Load the saved document from a JSON file.
///
/// A missing file yields `Ok(None)`. Fields absent from older files take
/// their defaults.
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<Option<SavedData>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let data = parse_data(&content)?;
    info!(
        path = %path.display(),
        foods = data.foods.len(),
        dishes = data.dishes.len(),
        "loaded data"
    );
    Ok(Some(data))
}

/// Save the document as pretty JSON.
pub fn save_data<P: AsRef<Path>>(path: P, data: &SavedData) -> Result<()> {
    let path = path.as_ref();
    let json = to_json(data)?;
    fs::write(path, json)?;
    info!(path = %path.display(), foods = data.foods.len(), "saved data");
    Ok(())
}

/// Parse a document, e.g. one being imported.
pub fn parse_data(content: &str) -> Result<SavedData> {
    Ok(serde_json::from_str(content)?)
}

/// Serialize a document as pretty JSON.
pub fn to_json(data: &SavedData) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Write one food's history to a CSV file, oldest entry first.
pub fn write_history_csv(food: &Food, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["index", "type", "value", "timestamp", "source", "multiplier"])?;

    for (i, entry) in food.history.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            entry.kind.label().to_string(),
            format!("{:.2}", entry.value),
            entry.timestamp.clone(),
            entry.source_name.clone().unwrap_or_default(),
            entry.multiplier.map(|m| m.to_string()).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
