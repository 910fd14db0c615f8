//! Serializable brief types.
//!
//! [`BriefData`] is both the in-memory live value and the on-disk / export
//! representation. Every optional leaf is stored as its normalized default
//! (empty string, `false`, or the stated enum default) rather than as an
//! `Option`, so the renderer and the form never have to distinguish
//! "absent" from "empty".
//!
//! Deserialization is routed through [`super::schema::validate`] via
//! `#[serde(try_from)]`, which means every JSON source (import file, store
//! snapshot, saved record) is checked against the same shape rules.

use serde::{Deserialize, Serialize};

/// Priority level of a brief. Only `Urgent` changes the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

/// Binary answer used by `brand.logoUsage` and `deliverables.editableRequired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const ALL: [YesNo; 2] = [YesNo::Yes, YesNo::No];

    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

/// The whole brief: one record per form section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct BriefData {
    pub general: General,
    pub objective: Objective,
    pub platform: Platform,
    pub audience: Audience,
    pub message: Message,
    pub copy: Copywriting,
    pub visual: Visual,
    pub brand: Brand,
    pub assets: Assets,
    pub deliverables: Deliverables,
    pub validation: Validation,
    pub context: Context,
    pub notes: Notes,
}

/// `general`: who asked for what, and by when.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct General {
    pub client_brand: String,
    pub project_name: String,
    /// Date string as entered (`YYYY-MM-DD` from a date picker).
    pub date_of_request: String,
    pub requested_by: String,
    pub deadline_date: String,
    pub deadline_time: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub goal_awareness: bool,
    pub goal_engagement: bool,
    pub goal_traffic: bool,
    pub goal_conversion: bool,
    pub goal_community: bool,
    pub goal_event: bool,
    pub key_objective: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    /// Ordered set: insertion order is kept, duplicates are never stored.
    pub platforms: Vec<String>,
    pub format: String,
    pub dimensions: String,
    pub visuals_count: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Audience {
    pub age_range: String,
    pub location: String,
    pub profile: String,
    pub pain_point: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub main_message: String,
    pub secondary_message: String,
}

/// `copy`: on-visual text. `headlines` and `ctas` always hold at least one
/// entry (possibly an empty placeholder).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Copywriting {
    pub headlines: Vec<String>,
    pub ctas: Vec<String>,
    pub language: String,
}

impl Default for Copywriting {
    fn default() -> Self {
        Self {
            headlines: vec![String::new()],
            ctas: vec![String::new()],
            language: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visual {
    pub mood: String,
    pub colors: String,
    pub style: String,
    pub references: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub logo_usage: YesNo,
    pub fonts: String,
    pub dos: String,
    pub donts: String,
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            logo_usage: YesNo::Yes,
            fonts: String::new(),
            dos: String::new(),
            donts: String::new(),
        }
    }
}

/// `assets`: what the client provides. `assets_links` always holds at
/// least one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assets {
    pub provide_photos: bool,
    pub provide_videos: bool,
    pub provide_logos: bool,
    pub provide_guidelines: bool,
    pub provide_previous: bool,
    pub assets_links: Vec<String>,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            provide_photos: false,
            provide_videos: false,
            provide_logos: false,
            provide_guidelines: false,
            provide_previous: false,
            assets_links: vec![String::new()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deliverables {
    pub final_format: String,
    pub editable_required: YesNo,
    pub export_variations: String,
}

impl Default for Deliverables {
    fn default() -> Self {
        Self {
            final_format: String::new(),
            editable_required: YesNo::No,
            export_variations: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub validator: String,
    pub revisions_included: String,
    pub feedback_deadline: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub past_insight: String,
    pub competitor_benchmark: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notes {
    pub internal_notes: String,
}

impl BriefData {
    /// Client name for display and archive grouping, `None` when blank.
    pub fn client_name(&self) -> Option<&str> {
        non_blank(&self.general.client_brand)
    }

    /// Project name for display and file naming, `None` when blank.
    pub fn project_name(&self) -> Option<&str> {
        non_blank(&self.general.project_name)
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enums_match_stated_defaults() {
        let data = BriefData::default();
        assert_eq!(data.general.priority, Priority::Medium);
        assert_eq!(data.brand.logo_usage, YesNo::Yes);
        assert_eq!(data.deliverables.editable_required, YesNo::No);
    }

    #[test]
    fn default_required_sequences_hold_one_placeholder() {
        let data = BriefData::default();
        assert_eq!(data.copy.headlines, vec![String::new()]);
        assert_eq!(data.copy.ctas, vec![String::new()]);
        assert_eq!(data.assets.assets_links, vec![String::new()]);
    }

    #[test]
    fn default_optional_leaves_are_empty_or_false() {
        let data = BriefData::default();
        assert!(data.general.client_brand.is_empty());
        assert!(data.general.date_of_request.is_empty());
        assert!(data.platform.platforms.is_empty());
        assert!(!data.objective.goal_event);
        assert!(!data.assets.provide_previous);
        assert!(data.notes.internal_notes.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(BriefData::default()).expect("serialize");
        assert_eq!(value["general"]["clientBrand"], "");
        assert_eq!(value["general"]["priority"], "Medium");
        assert_eq!(value["assets"]["assetsLinks"][0], "");
        assert_eq!(value["deliverables"]["editableRequired"], "No");
        assert_eq!(value["objective"]["goalAwareness"], false);
    }

    #[test]
    fn client_and_project_names_ignore_whitespace_only_values() {
        let mut data = BriefData::default();
        data.general.client_brand = "   ".to_string();
        data.general.project_name = " Ramadan Special ".to_string();
        assert_eq!(data.client_name(), None);
        assert_eq!(data.project_name(), Some("Ramadan Special"));
    }
}
