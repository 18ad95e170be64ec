//! Section kinds and the layout registry.
//!
//! `SectionKind::layout` is an exhaustive match: adding a kind without
//! deciding how it renders does not compile.

use serde::{Deserialize, Serialize};

use crate::render::model::ItemRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Summary,
    Education,
    Experience,
    Skills,
    Projects,
    Leadership,
    Languages,
    Certifications,
    Publications,
    Research,
    Achievements,
}

impl SectionKind {
    pub const ALL: [SectionKind; 12] = [
        SectionKind::Header,
        SectionKind::Summary,
        SectionKind::Education,
        SectionKind::Experience,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Leadership,
        SectionKind::Languages,
        SectionKind::Certifications,
        SectionKind::Publications,
        SectionKind::Research,
        SectionKind::Achievements,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Summary => "summary",
            SectionKind::Education => "education",
            SectionKind::Experience => "experience",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Leadership => "leadership",
            SectionKind::Languages => "languages",
            SectionKind::Certifications => "certifications",
            SectionKind::Publications => "publications",
            SectionKind::Research => "research",
            SectionKind::Achievements => "achievements",
        }
    }

    /// Parses an ordering key. Surrounding whitespace and ASCII case are ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(key))
    }

    /// Title used when a payload carries no `section_title`.
    pub fn default_title(self) -> String {
        let key = self.key();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    pub fn layout(self) -> SectionLayout {
        use self::BulletField::*;
        use self::InlineField::*;
        use self::Label::*;

        match self {
            SectionKind::Header => SectionLayout::Header,
            SectionKind::Summary => SectionLayout::Text,
            SectionKind::Skills => SectionLayout::Categorized,
            SectionKind::Languages => SectionLayout::Languages,
            SectionKind::Education => SectionLayout::Items(ItemLayout {
                primary: &[Institution, Organization, Name],
                secondary: &[Degree, Title],
                detail: Some(Detail::Gpa),
                bullets: &[Achievements, Descriptions],
                inline: &[Coursework, Honors],
            }),
            SectionKind::Experience => SectionLayout::Items(ItemLayout {
                primary: &[Company, Organization],
                secondary: &[Title, Role],
                detail: None,
                bullets: &[Achievements, KeyContributions, Descriptions],
                inline: &[Technologies],
            }),
            SectionKind::Projects => SectionLayout::Items(ItemLayout {
                primary: &[Title, Name],
                secondary: &[Role, Organization],
                detail: Some(Detail::Url),
                bullets: &[Descriptions, KeyContributions, Achievements],
                inline: &[Technologies],
            }),
            SectionKind::Leadership => SectionLayout::Items(ItemLayout {
                primary: &[Organization, Company],
                secondary: &[Title, Role],
                detail: None,
                bullets: &[Achievements, KeyContributions, Descriptions],
                inline: &[],
            }),
            SectionKind::Certifications => SectionLayout::Items(ItemLayout {
                primary: &[Title, Name],
                secondary: &[Issuer, Organization],
                detail: Some(Detail::Url),
                bullets: &[Descriptions],
                inline: &[],
            }),
            SectionKind::Publications => SectionLayout::Items(ItemLayout {
                primary: &[Title, Name],
                secondary: &[Venue, Organization],
                detail: Some(Detail::Authors),
                bullets: &[Descriptions, Achievements],
                inline: &[],
            }),
            SectionKind::Research => SectionLayout::Items(ItemLayout {
                primary: &[Title, Name],
                secondary: &[Institution, Organization],
                detail: None,
                bullets: &[Achievements, KeyContributions, Descriptions],
                inline: &[Technologies],
            }),
            SectionKind::Achievements => SectionLayout::Items(ItemLayout {
                primary: &[Title, Name],
                secondary: &[Organization, Issuer],
                detail: None,
                bullets: &[Descriptions],
                inline: &[],
            }),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layouts
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionLayout {
    Header,
    Text,
    Categorized,
    Languages,
    Items(ItemLayout),
}

/// Which `ItemRecord` fields an item-based section reads, and where.
///
/// Labels are candidate lists: the first non-empty field wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemLayout {
    /// Left side of line 1, right-aligned against the location.
    pub primary: &'static [Label],
    /// Left side of line 2, right-aligned against the date range.
    pub secondary: &'static [Label],
    /// Optional third header line.
    pub detail: Option<Detail>,
    /// Arrays concatenated, in this order, into one bullet list.
    pub bullets: &'static [BulletField],
    /// Arrays rendered as `Caption: a, b, c` lines after the bullets.
    pub inline: &'static [InlineField],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Institution,
    Company,
    Organization,
    Title,
    Name,
    Degree,
    Role,
    Venue,
    Issuer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    Gpa,
    Url,
    Authors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletField {
    Achievements,
    KeyContributions,
    Descriptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineField {
    Technologies,
    Coursework,
    Honors,
}

impl InlineField {
    pub fn caption(self) -> &'static str {
        match self {
            InlineField::Technologies => "Technologies",
            InlineField::Coursework => "Relevant Coursework",
            InlineField::Honors => "Honors",
        }
    }
}

impl ItemRecord {
    pub fn label(&self, label: Label) -> &str {
        match label {
            Label::Institution => &self.institution,
            Label::Company => &self.company,
            Label::Organization => &self.organization,
            Label::Title => &self.title,
            Label::Name => &self.name,
            Label::Degree => &self.degree,
            Label::Role => &self.role,
            Label::Venue => &self.venue,
            Label::Issuer => &self.issuer,
        }
    }

    /// First non-empty label among `candidates`, or `""`.
    pub fn first_label(&self, candidates: &[Label]) -> &str {
        candidates
            .iter()
            .map(|&label| self.label(label))
            .find(|text| !text.is_empty())
            .unwrap_or("")
    }

    pub fn bullets(&self, field: BulletField) -> &[String] {
        match field {
            BulletField::Achievements => &self.achievements,
            BulletField::KeyContributions => &self.key_contributions,
            BulletField::Descriptions => &self.descriptions,
        }
    }

    pub fn inline(&self, field: InlineField) -> &[String] {
        match field {
            InlineField::Technologies => &self.technologies,
            InlineField::Coursework => &self.coursework,
            InlineField::Honors => &self.honors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::from_key(kind.key()), Some(kind));
        }
    }

    #[test]
    fn test_from_key_is_lenient_about_case_and_whitespace() {
        assert_eq!(
            SectionKind::from_key(" Experience "),
            Some(SectionKind::Experience)
        );
        assert_eq!(SectionKind::from_key("interests"), None);
        assert_eq!(SectionKind::from_key(""), None);
    }

    #[test]
    fn test_default_title_capitalizes_key() {
        assert_eq!(SectionKind::Education.default_title(), "Education");
        assert_eq!(SectionKind::Certifications.default_title(), "Certifications");
    }

    #[test]
    fn test_only_list_kinds_have_item_layouts() {
        let item_kinds: Vec<_> = SectionKind::ALL
            .into_iter()
            .filter(|k| matches!(k.layout(), SectionLayout::Items(_)))
            .collect();
        assert_eq!(item_kinds.len(), 8);
        assert!(!item_kinds.contains(&SectionKind::Header));
        assert!(!item_kinds.contains(&SectionKind::Skills));
        assert!(!item_kinds.contains(&SectionKind::Summary));
        assert!(!item_kinds.contains(&SectionKind::Languages));
    }

    #[test]
    fn test_first_label_skips_empty_candidates() {
        let item = ItemRecord {
            organization: "Chess Club".to_string(),
            ..ItemRecord::default()
        };
        assert_eq!(item.first_label(&[Label::Company, Label::Organization]), "Chess Club");
        assert_eq!(item.first_label(&[Label::Title]), "");
    }
}
