//! Field formatters shared by the section renderers.

use crate::render::escape::escape;
use crate::render::model::DateRange;
use crate::render::template::{
    DATE_SEPARATOR, LIST_ITEM_SEP, LIST_PAR_SEP, LIST_TOP_SEP, PRESENT_LABEL,
};

/// Formats a date range as `start -- end`, collapsing to whichever side is set.
///
/// `is_current`, or an end of "present" in any case, yields the `Present` label.
pub fn format_dates(dates: &DateRange) -> String {
    let start = escape(dates.start.trim());
    let end = if dates.is_current || dates.end.trim().eq_ignore_ascii_case("present") {
        PRESENT_LABEL.to_string()
    } else {
        escape(dates.end.trim())
    };

    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start}{DATE_SEPARATOR}{end}"),
        (false, true) => start,
        (true, false) => end,
        (true, true) => String::new(),
    }
}

/// Renders a bullet list block. Empty input (after dropping blank entries)
/// emits nothing at all.
pub fn render_list<S: AsRef<str>>(items: &[S]) -> String {
    let entries: Vec<&str> = items
        .iter()
        .map(|item| item.as_ref().trim())
        .filter(|item| !item.is_empty())
        .collect();
    if entries.is_empty() {
        return String::new();
    }

    let mut out = format!(
        "\\begin{{itemize}}[leftmargin=*, itemsep={LIST_ITEM_SEP}, parsep={LIST_PAR_SEP}, topsep={LIST_TOP_SEP}]\n"
    );
    for entry in entries {
        out.push_str("  \\item{} ");
        out.push_str(&escape(entry));
        out.push('\n');
    }
    out.push_str("\\end{itemize}\n");
    out
}

/// Escapes each non-blank entry and joins them with `", "`.
pub fn join_escaped<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| item.as_ref().trim())
        .filter(|item| !item.is_empty())
        .map(escape)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `\textbf{Caption:} a, b, c` as its own paragraph, or nothing if `items` is empty.
pub fn inline_line<S: AsRef<str>>(caption: &str, items: &[S]) -> String {
    let joined = join_escaped(items);
    if joined.is_empty() {
        return String::new();
    }
    format!("\\textbf{{{}:}} {}\\par\n", escape(caption), joined)
}
