//! Resume document model.
//!
//! Section payloads stay as raw JSON inside [`Document`] and are decoded into
//! the typed payloads below one section at a time, so a malformed section
//! cannot take the rest of the document down with it.
//!
//! Every payload field is optional. Missing fields decode to empty text or
//! empty lists; JSON numbers and booleans in text positions are coerced.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::render::escape::value_to_text;

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// Canonical document: ordering metadata plus raw section payloads by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub metadata: Metadata,
    pub sections: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub section_order: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeaderPayload {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "or_default")]
    pub contact: Contact,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "contact_field")]
    pub email: ContactField,
    #[serde(default, deserialize_with = "contact_field")]
    pub phone: ContactField,
    #[serde(default, deserialize_with = "contact_field")]
    pub location: ContactField,
}

/// A contact value with an optional explicit hyperlink target.
/// Accepts either a bare string or `{ "value": ..., "link": ... }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactField {
    pub value: String,
    pub link: String,
}

/// Payload of every item-based section (experience, education, projects, ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPayload {
    #[serde(default, deserialize_with = "text")]
    pub section_title: String,
    #[serde(default, deserialize_with = "or_default")]
    pub items: Vec<ItemRecord>,
}

/// Skills: named categories of short items, plus an optional interests list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategorizedListPayload {
    #[serde(default, deserialize_with = "text")]
    pub section_title: String,
    #[serde(default, deserialize_with = "or_default")]
    pub categories: Vec<SkillCategory>,
    #[serde(default, deserialize_with = "text_list")]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillCategory {
    #[serde(default, alias = "category", deserialize_with = "text")]
    pub name: String,
    #[serde(default, alias = "skills", deserialize_with = "text_list")]
    pub items: Vec<String>,
}

/// Free-text section (summary).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextPayload {
    #[serde(default, deserialize_with = "text")]
    pub section_title: String,
    #[serde(default, alias = "text", deserialize_with = "text")]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguagesPayload {
    #[serde(default, deserialize_with = "text")]
    pub section_title: String,
    #[serde(default, deserialize_with = "or_default")]
    pub items: Vec<LanguageEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LanguageEntry {
    Plain(String),
    Detailed {
        #[serde(default, alias = "name", deserialize_with = "text")]
        language: String,
        #[serde(default, alias = "level", deserialize_with = "text")]
        proficiency: String,
    },
}

impl LanguageEntry {
    pub fn language(&self) -> &str {
        match self {
            LanguageEntry::Plain(s) => s.trim(),
            LanguageEntry::Detailed { language, .. } => language,
        }
    }

    pub fn proficiency(&self) -> &str {
        match self {
            LanguageEntry::Plain(_) => "",
            LanguageEntry::Detailed { proficiency, .. } => proficiency,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Items
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DateRange {
    #[serde(default, deserialize_with = "text")]
    pub start: String,
    #[serde(default, deserialize_with = "text")]
    pub end: String,
    #[serde(default, deserialize_with = "flag")]
    pub is_current: bool,
}

/// One entry of a list section. The union of the fields any list section
/// uses; each section kind's layout decides which ones it reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemRecord {
    #[serde(default, deserialize_with = "text")]
    pub institution: String,
    #[serde(default, deserialize_with = "text")]
    pub company: String,
    #[serde(default, deserialize_with = "text")]
    pub organization: String,
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub degree: String,
    #[serde(default, alias = "position", deserialize_with = "text")]
    pub role: String,
    #[serde(default, alias = "journal", deserialize_with = "text")]
    pub venue: String,
    #[serde(default, deserialize_with = "text")]
    pub issuer: String,
    #[serde(default, deserialize_with = "text")]
    pub location: String,
    #[serde(default, deserialize_with = "text")]
    pub gpa: String,
    #[serde(default, alias = "link", deserialize_with = "text")]
    pub url: String,
    #[serde(default, deserialize_with = "text_list")]
    pub authors: Vec<String>,
    #[serde(default, alias = "date", deserialize_with = "date_range")]
    pub dates: DateRange,
    #[serde(default, deserialize_with = "text_list")]
    pub achievements: Vec<String>,
    #[serde(default, alias = "contributions", deserialize_with = "text_list")]
    pub key_contributions: Vec<String>,
    #[serde(default, alias = "description", deserialize_with = "text_list")]
    pub descriptions: Vec<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub technologies: Vec<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub coursework: Vec<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub honors: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field decoders
// ────────────────────────────────────────────────────────────────────────────

/// Scalar → trimmed text. Null → empty. Arrays and objects are rejected.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    scalar_text(&value).map_err(de::Error::custom)
}

/// Null, a single scalar, or an array of scalars → list of non-blank text.
fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        scalar @ (Value::String(_) | Value::Number(_) | Value::Bool(_)) => vec![scalar],
        Value::Object(_) => return Err(de::Error::custom("expected a list of text, found an object")),
    };

    let mut out = Vec::with_capacity(items.len());
    for item in &items {
        let text = scalar_text(item).map_err(de::Error::custom)?;
        if !text.is_empty() {
            out.push(text);
        }
    }
    Ok(out)
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::String(s) => Ok(matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1"
        )),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|n| n != 0.0)),
        _ => Err(de::Error::custom("expected a boolean")),
    }
}

/// A full `{start, end, is_current}` object, or a single date given as text.
fn date_range<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateRange, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(DateRange::default()),
        obj @ Value::Object(_) => DateRange::deserialize(obj).map_err(de::Error::custom),
        Value::Array(_) => Err(de::Error::custom("expected a date range, found an array")),
        scalar => Ok(DateRange {
            start: value_to_text(&scalar).trim().to_string(),
            ..DateRange::default()
        }),
    }
}

fn contact_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ContactField, D::Error> {
    #[derive(Deserialize)]
    struct Linked {
        #[serde(default, alias = "display", deserialize_with = "text")]
        value: String,
        #[serde(default, alias = "href", alias = "url", deserialize_with = "text")]
        link: String,
    }

    match Value::deserialize(deserializer)? {
        obj @ Value::Object(_) => {
            let Linked { value, link } = Linked::deserialize(obj).map_err(de::Error::custom)?;
            Ok(ContactField { value, link })
        }
        other => Ok(ContactField {
            value: scalar_text(&other).map_err(de::Error::custom)?,
            link: String::new(),
        }),
    }
}

/// Treats an explicit `null` the same as a missing field.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn scalar_text(value: &Value) -> Result<String, String> {
    match value {
        Value::Array(_) => Err("expected text, found an array".to_string()),
        Value::Object(_) => Err("expected text, found an object".to_string()),
        scalar => Ok(value_to_text(scalar).trim().to_string()),
    }
}
