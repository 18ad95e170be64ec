//! Section renderers.
//!
//! `render_section` decodes a raw section payload according to the kind's
//! layout and renders it. Renderers are pure: no logging, no I/O. An empty
//! return value means "nothing to show" and the section title is omitted too.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::render::error::SectionRenderError;
use crate::render::escape::{escape, escape_url};
use crate::render::format::{format_dates, inline_line, join_escaped, render_list};
use crate::render::kind::{Detail, ItemLayout, SectionKind, SectionLayout};
use crate::render::model::{
    CategorizedListPayload, ContactField, HeaderPayload, ItemRecord, LanguagesPayload,
    ListPayload, TextPayload,
};
use crate::render::template::{CATEGORY_GAP, CONTACT_SEPARATOR, ITEM_GAP};

/// Renders one section to a markup fragment.
pub fn render_section(kind: SectionKind, payload: &Value) -> Result<String, SectionRenderError> {
    let layout = kind.layout();
    let fragment = match layout {
        SectionLayout::Header => render_header(&decode(kind, layout, payload)?),
        SectionLayout::Text => render_summary(kind, &decode(kind, layout, payload)?),
        SectionLayout::Categorized => render_skills(kind, &decode(kind, layout, payload)?),
        SectionLayout::Languages => render_languages(kind, &decode(kind, layout, payload)?),
        SectionLayout::Items(items) => {
            render_item_section(kind, &items, &decode(kind, layout, payload)?)
        }
    };
    Ok(fragment)
}

/// Decodes a payload, accepting the shorthand forms: a bare array for
/// item/category/language sections and a bare string for text sections.
fn decode<T: DeserializeOwned>(
    kind: SectionKind,
    layout: SectionLayout,
    payload: &Value,
) -> Result<T, SectionRenderError> {
    let expanded = match (layout, payload) {
        (SectionLayout::Items(_) | SectionLayout::Languages, Value::Array(_)) => {
            json!({ "items": payload })
        }
        (SectionLayout::Categorized, Value::Array(_)) => json!({ "categories": payload }),
        (SectionLayout::Text, Value::String(_)) => json!({ "content": payload }),
        _ => payload.clone(),
    };
    serde_json::from_value(expanded).map_err(|source| SectionRenderError {
        section: kind,
        source,
    })
}

fn section_title(kind: SectionKind, explicit: &str) -> String {
    if explicit.is_empty() {
        escape(&kind.default_title())
    } else {
        escape(explicit)
    }
}

/// Prefixes a non-empty body with its title block.
fn titled(title: &str, body: &str) -> String {
    if body.trim().is_empty() {
        return String::new();
    }
    format!("\\section*{{{title}}}\n{body}")
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

fn render_header(header: &HeaderPayload) -> String {
    let name = escape(&header.name);
    let title = escape(&header.title);
    let contact = contact_line(header);

    let mut lines = Vec::new();
    if !name.is_empty() {
        lines.push(format!("{{\\LARGE\\bfseries {name}}}"));
    }
    if !title.is_empty() {
        lines.push(format!("{{\\large {title}}}"));
    }
    if !contact.is_empty() {
        lines.push(format!("{{\\small {contact}}}"));
    }
    if lines.is_empty() {
        return String::new();
    }

    format!(
        "\\begin{{center}}\n{}\n\\end{{center}}\n",
        lines.join("\\\\[2pt]\n")
    )
}

fn contact_line(header: &HeaderPayload) -> String {
    let contact = &header.contact;
    [
        contact_part(&contact.location, LinkScheme::None),
        contact_part(&contact.email, LinkScheme::Mailto),
        contact_part(&contact.phone, LinkScheme::Tel),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(CONTACT_SEPARATOR)
}

#[derive(Debug, Clone, Copy)]
enum LinkScheme {
    None,
    Mailto,
    Tel,
}

impl LinkScheme {
    /// Derives a link target from the display value, or `None` if the value
    /// does not look like something the scheme can address.
    fn derive(self, display: &str) -> Option<String> {
        match self {
            LinkScheme::None => None,
            LinkScheme::Mailto => {
                let (local, domain) = display.split_once('@')?;
                let plausible = !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !display.chars().any(char::is_whitespace);
                plausible.then(|| format!("mailto:{display}"))
            }
            LinkScheme::Tel => {
                let digits: String = display
                    .chars()
                    .enumerate()
                    .filter(|&(i, c)| c.is_ascii_digit() || (i == 0 && c == '+'))
                    .map(|(_, c)| c)
                    .collect();
                digits
                    .chars()
                    .any(|c| c.is_ascii_digit())
                    .then(|| format!("tel:{digits}"))
            }
        }
    }
}

fn contact_part(field: &ContactField, scheme: LinkScheme) -> Option<String> {
    if field.value.is_empty() {
        return None;
    }
    let display = escape(&field.value);
    let target = if field.link.is_empty() {
        scheme.derive(&field.value)
    } else {
        Some(field.link.clone())
    };
    Some(match target {
        Some(target) => format!("\\href{{{}}}{{{}}}", escape_url(&target), display),
        None => display,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Text, skills, languages
// ────────────────────────────────────────────────────────────────────────────

fn render_summary(kind: SectionKind, payload: &TextPayload) -> String {
    let content = escape(&payload.content);
    if content.is_empty() {
        return String::new();
    }
    titled(
        &section_title(kind, &payload.section_title),
        &format!("{content}\\par\n"),
    )
}

fn render_skills(kind: SectionKind, payload: &CategorizedListPayload) -> String {
    let mut lines: Vec<String> = payload
        .categories
        .iter()
        .filter_map(|category| {
            let items = join_escaped(&category.items);
            if items.is_empty() {
                None
            } else if category.name.is_empty() {
                Some(format!("{items}\\par\n"))
            } else {
                Some(format!(
                    "\\textbf{{{}:}} {}\\par\n",
                    escape(&category.name),
                    items
                ))
            }
        })
        .collect();

    let interests = inline_line("Interests", &payload.interests);
    if !interests.is_empty() {
        lines.push(interests);
    }

    let body = lines.join(&format!("\\vspace{{{CATEGORY_GAP}}}\n"));
    titled(&section_title(kind, &payload.section_title), &body)
}

fn render_languages(kind: SectionKind, payload: &LanguagesPayload) -> String {
    let entries: Vec<String> = payload
        .items
        .iter()
        .filter(|entry| !entry.language().is_empty())
        .map(|entry| match entry.proficiency() {
            "" => escape(entry.language()),
            level => format!("{} ({})", escape(entry.language()), escape(level)),
        })
        .collect();
    if entries.is_empty() {
        return String::new();
    }
    titled(
        &section_title(kind, &payload.section_title),
        &format!("{}\\par\n", entries.join(", ")),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Item sections
// ────────────────────────────────────────────────────────────────────────────

fn render_item_section(kind: SectionKind, layout: &ItemLayout, payload: &ListPayload) -> String {
    let blocks: Vec<String> = payload
        .items
        .iter()
        .map(|item| render_item(layout, item))
        .filter(|block| !block.is_empty())
        .collect();

    // Gap between consecutive items only, never after the last.
    let body = blocks.join(&format!("\\vspace{{{ITEM_GAP}}}\n"));
    titled(&section_title(kind, &payload.section_title), &body)
}

fn render_item(layout: &ItemLayout, item: &ItemRecord) -> String {
    let mut out = header_block(layout, item);

    let bullets: Vec<&String> = layout
        .bullets
        .iter()
        .flat_map(|&field| item.bullets(field))
        .collect();
    out.push_str(&render_list(&bullets));

    for &field in layout.inline {
        out.push_str(&inline_line(field.caption(), item.inline(field)));
    }
    out
}

/// Two or three lines: primary label ↔ location, secondary label ↔ dates,
/// then an optional detail line. When a line pair has nothing on its left
/// and right, the dates move up next to the primary label.
fn header_block(layout: &ItemLayout, item: &ItemRecord) -> String {
    let primary = wrap("\\textbf", &escape(item.first_label(layout.primary)));
    let secondary = wrap("\\textit", &escape(item.first_label(layout.secondary)));
    let location = escape(&item.location);
    let dates = format_dates(&item.dates);

    let mut lines = Vec::new();
    if secondary.is_empty() && location.is_empty() {
        lines.extend(aligned(&primary, &dates));
    } else {
        lines.extend(aligned(&primary, &location));
        lines.extend(aligned(&secondary, &dates));
    }
    if let Some(detail) = layout.detail.and_then(|d| detail_line(d, item)) {
        lines.push(detail);
    }

    if lines.is_empty() {
        return String::new();
    }
    format!("{}\\par\n", lines.join(" \\\\{}\n"))
}

fn detail_line(detail: Detail, item: &ItemRecord) -> Option<String> {
    match detail {
        Detail::Gpa if !item.gpa.is_empty() => Some(format!("GPA: {}", escape(&item.gpa))),
        Detail::Url if !item.url.is_empty() => Some(format!(
            "\\href{{{}}}{{\\small {}}}",
            escape_url(&item.url),
            escape(&item.url)
        )),
        Detail::Authors if !item.authors.is_empty() => Some(join_escaped(&item.authors)),
        _ => None,
    }
}

fn wrap(command: &str, text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("{command}{{{text}}}")
    }
}

fn aligned(left: &str, right: &str) -> Option<String> {
    match (left.is_empty(), right.is_empty()) {
        (true, true) => None,
        (false, true) => Some(left.to_string()),
        (true, false) => Some(format!("\\hfill {right}")),
        (false, false) => Some(format!("{left} \\hfill {right}")),
    }
}
