use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::CollectionImportError;
use crate::collection::domain::Perfume;

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<Perfume>, CollectionImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut perfumes = Vec::new();

    for (index, record) in csv_reader.deserialize::<CollectionRow>().enumerate() {
        let row = record?;
        perfumes.push(row.into_perfume(index + 1)?);
    }

    Ok(perfumes)
}

#[derive(Debug, Deserialize)]
struct CollectionRow {
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(rename = "Brand", default, deserialize_with = "empty_string_as_none")]
    brand: Option<String>,
    #[serde(rename = "Family", default, deserialize_with = "empty_string_as_none")]
    family: Option<String>,
    #[serde(rename = "Mood", default, deserialize_with = "empty_string_as_none")]
    mood: Option<String>,
    #[serde(rename = "Top Notes", default)]
    top_notes: String,
    #[serde(rename = "Middle Notes", default)]
    middle_notes: String,
    #[serde(rename = "Base Notes", default)]
    base_notes: String,
    #[serde(rename = "Usage Contexts", default)]
    usage_contexts: String,
}

impl CollectionRow {
    fn into_perfume(self, row: usize) -> Result<Perfume, CollectionImportError> {
        let name = self
            .name
            .ok_or(CollectionImportError::MissingField { row, field: "Name" })?;
        let brand = self
            .brand
            .ok_or(CollectionImportError::MissingField { row, field: "Brand" })?;
        let family = self
            .family
            .ok_or(CollectionImportError::MissingField { row, field: "Family" })?;
        let mood = self
            .mood
            .ok_or(CollectionImportError::MissingField { row, field: "Mood" })?;

        let contexts = split_list(&self.usage_contexts);
        Ok(Perfume {
            name,
            brand,
            notes_top: split_list(&self.top_notes),
            notes_middle: split_list(&self.middle_notes),
            notes_base: split_list(&self.base_notes),
            family,
            mood,
            usage_contexts: if contexts.is_empty() {
                None
            } else {
                Some(contexts)
            },
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(split_list("Citrus; Bergamot ;;"), vec!["Citrus", "Bergamot"]);
        assert!(split_list("  ").is_empty());
        assert!(split_list("").is_empty());
    }
}
