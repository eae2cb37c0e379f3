//! JSON snapshots as diffable items and sections.
//!
//! An item is any JSON object with an `id` that is a string or a number;
//! its content is the whole object. A section is an item with an `items`
//! array; its content is the object without `items`.

use std::fmt;

use anyhow::{anyhow, bail, Context};
use rowdiff_types::{Diffable, DiffableSection};
use serde_json::{Map, Value};

/// Identity read from an `id` field. Strings and numbers never collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum JsonId {
    Text(String),
    Number(String),
}

impl fmt::Display for JsonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonId::Text(s) => write!(f, "{s:?}"),
            JsonId::Number(n) => f.write_str(n),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JsonItem {
    pub id: JsonId,
    pub content: Value,
}

impl Diffable for JsonItem {
    type Id = JsonId;

    fn diff_id(&self) -> &JsonId {
        &self.id
    }

    fn content_eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JsonSection {
    pub id: JsonId,
    pub header: Map<String, Value>,
    pub items: Vec<JsonItem>,
}

impl Diffable for JsonSection {
    type Id = JsonId;

    fn diff_id(&self) -> &JsonId {
        &self.id
    }

    fn content_eq(&self, other: &Self) -> bool {
        self.header == other.header
    }
}

impl DiffableSection for JsonSection {
    type Item = JsonItem;

    fn items(&self) -> &[JsonItem] {
        &self.items
    }
}

pub fn parse_items(text: &str) -> anyhow::Result<Vec<JsonItem>> {
    let value: Value = serde_json::from_str(text).context("invalid JSON")?;
    items_from_value(value)
}

pub fn parse_sections(text: &str) -> anyhow::Result<Vec<JsonSection>> {
    let value: Value = serde_json::from_str(text).context("invalid JSON")?;
    let Value::Array(elements) = value else {
        bail!("expected a JSON array of sections");
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(position, element)| -> anyhow::Result<JsonSection> {
            let Value::Object(mut header) = element else {
                bail!("section {position} is not an object");
            };
            let id = identity(&header).with_context(|| format!("section {position}"))?;
            let items = match header.remove("items") {
                Some(items) => items_from_value(items).with_context(|| format!("section {position}"))?,
                None => Vec::new(),
            };
            Ok(JsonSection { id, header, items })
        })
        .collect()
}

fn items_from_value(value: Value) -> anyhow::Result<Vec<JsonItem>> {
    let Value::Array(elements) = value else {
        bail!("expected a JSON array of items");
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(position, content)| -> anyhow::Result<JsonItem> {
            let Value::Object(fields) = &content else {
                bail!("item {position} is not an object");
            };
            let id = identity(fields).with_context(|| format!("item {position}"))?;
            Ok(JsonItem { id, content })
        })
        .collect()
}

fn identity(fields: &Map<String, Value>) -> anyhow::Result<JsonId> {
    match fields.get("id") {
        Some(Value::String(s)) => Ok(JsonId::Text(s.clone())),
        Some(Value::Number(n)) => Ok(JsonId::Number(n.to_string())),
        Some(other) => Err(anyhow!("\"id\" must be a string or number, got {other}")),
        None => Err(anyhow!("missing \"id\"")),
    }
}
