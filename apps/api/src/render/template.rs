//! Fixed markup fragments and layout constants shared by the renderers.
//!
//! None of these are caller-configurable.

/// Section order assigned to documents that do not carry one.
/// `header` is always rendered first and never needs to be listed.
pub const DEFAULT_SECTION_ORDER: &[&str] = &[
    "education",
    "experience",
    "projects",
    "skills",
    "interests",
    "certifications",
];

/// Document class, margins and the minimal package set.
pub const PREAMBLE: &str = r"\documentclass[11pt,letterpaper]{article}
\usepackage[margin=0.6in]{geometry}
\usepackage[T1]{fontenc}
\usepackage[utf8]{inputenc}
\usepackage{lmodern}
\usepackage{enumitem}
\usepackage{titlesec}
\usepackage[hidelinks]{hyperref}
\titleformat{\section}{\large\bfseries\scshape}{}{0em}{}[\titlerule]
\titlespacing*{\section}{0pt}{8pt}{4pt}
\setlength{\parindent}{0pt}
\pagestyle{empty}
\begin{document}
";

pub const CLOSING: &str = "\\end{document}\n";

/// Compiled in place of a rendered document when no markup could be produced.
pub const FALLBACK_DOCUMENT: &str = r"\documentclass[11pt,letterpaper]{article}
\usepackage[margin=0.6in]{geometry}
\pagestyle{empty}
\begin{document}
\begin{center}
{\Large\bfseries Resume}\\[4pt]
The submitted resume data could not be rendered.
\end{center}
\end{document}
";

// ────────────────────────────────────────────────────────────────────────────
// Spacing
// ────────────────────────────────────────────────────────────────────────────

/// Gap inserted between consecutive items of a list section.
pub const ITEM_GAP: &str = "6pt";

/// Gap inserted between consecutive skill categories.
pub const CATEGORY_GAP: &str = "2pt";

/// `itemize` spacing options.
pub const LIST_ITEM_SEP: &str = "0pt";
pub const LIST_PAR_SEP: &str = "0pt";
pub const LIST_TOP_SEP: &str = "2pt";

/// Separator between contact fields on the header line.
pub const CONTACT_SEPARATOR: &str = r" \textbullet{} ";

/// Separator between the two ends of a date range.
pub const DATE_SEPARATOR: &str = " -- ";

/// End label used for ongoing ranges.
pub const PRESENT_LABEL: &str = "Present";
