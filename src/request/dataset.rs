use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rows shown per page of the dataset table
pub const PAGE_SIZE: usize = 15;

/// A B-Fabric dataset flattened into columns and string cells
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct ApiDataset {
    #[serde(default)]
    attribute: Vec<ApiAttribute>,
    #[serde(default)]
    item: Vec<ApiItem>,
}

#[derive(Deserialize)]
struct ApiAttribute {
    name: String,
    position: Option<i64>,
}

#[derive(Deserialize)]
struct ApiItem {
    position: Option<i64>,
    #[serde(default)]
    field: Vec<ApiField>,
}

#[derive(Deserialize)]
struct ApiField {
    attributeposition: i64,
    #[serde(default)]
    value: Value,
}

impl Dataset {
    /// Read the entity's full API response, either an object or a list holding one
    pub fn from_api_response(response: &Value) -> Result<Dataset> {
        let response = match response {
            Value::Null => return Ok(Dataset::default()),
            Value::Array(list) => match list.first() {
                Some(first) => first,
                None => return Ok(Dataset::default()),
            },
            other => other,
        };
        let api: ApiDataset = serde_json::from_value(response.clone()).context("Malformed dataset in API response")?;

        // attributes without a position keep their list order
        let mut attributes: Vec<(i64, String)> = api
            .attribute
            .into_iter()
            .enumerate()
            .map(|(i, a)| (a.position.unwrap_or(i as i64 + 1), a.name))
            .collect();
        attributes.sort_by_key(|(position, _)| *position);

        let mut items: Vec<(i64, Vec<ApiField>)> = api
            .item
            .into_iter()
            .enumerate()
            .map(|(i, item)| (item.position.unwrap_or(i as i64 + 1), item.field))
            .collect();
        items.sort_by_key(|(position, _)| *position);

        let rows = items
            .into_iter()
            .map(|(_, fields)| {
                attributes
                    .iter()
                    .map(|(position, _)| {
                        fields
                            .iter()
                            .find(|f| f.attributeposition == *position)
                            .map_or_else(String::new, |f| cell(&f.value))
                    })
                    .collect()
            })
            .collect();

        let columns = attributes.into_iter().map(|(_, name)| name).collect();
        Ok(Dataset { columns, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page_count(&self) -> usize {
        (self.rows.len() + PAGE_SIZE - 1) / PAGE_SIZE
    }

    /// Rows of a zero-based page, empty past the end
    pub fn page(&self, page: usize) -> &[Vec<String>] {
        let start = page.saturating_mul(PAGE_SIZE).min(self.rows.len());
        let end = (start + PAGE_SIZE).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Keep only the selected rows, in dataset order
    ///
    /// An empty selection keeps every row.
    pub fn select(&self, selection: &[usize]) -> Result<Dataset> {
        if selection.is_empty() {
            return Ok(self.clone());
        }
        let mut selection = selection.to_vec();
        selection.sort_unstable();
        selection.dedup();
        if let Some(row) = selection.iter().find(|row| **row >= self.rows.len()) {
            bail!("Row {row} is out of range, the dataset has {} rows", self.rows.len());
        }
        let rows = selection.iter().map(|row| self.rows[*row].clone()).collect();
        Ok(Dataset { columns: self.columns.clone(), rows })
    }

    /// Write dataset.tsv: a header row of column names, then one line per row
    pub fn write_tsv(&self, path: &Path) -> Result<()> {
        info!("Writing {} dataset rows to {}", self.rows.len(), path.display());
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Necessary)
            .from_path(path)
            .with_context(|| format!("Can't create {}", path.display()))?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Plain text table of one page, each row prefixed with its index
    pub fn render_page(&self, page: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "#\t{}", self.columns.join("\t"));
        let offset = page.saturating_mul(PAGE_SIZE);
        for (i, row) in self.page(page).iter().enumerate() {
            let _ = writeln!(out, "{}\t{}", offset + i, row.join("\t"));
        }
        let _ = write!(out, "page {} of {} ({} rows)", page.saturating_add(1), self.page_count().max(1), self.rows.len());
        out
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
