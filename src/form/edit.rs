//! Typed form events.
//!
//! A [`FieldEdit`] names exactly one leaf of [`BriefData`] and carries its
//! new value. The section and field sets are closed: each section has its
//! own edit enum, so an event for a field that does not exist cannot be
//! expressed.
//!
//! Wire shape (adjacently tagged, camelCase):
//!
//! ```json
//! { "section": "general", "edit": { "field": "clientBrand", "value": "7Ciel" } }
//! { "section": "copy", "edit": { "field": "headline", "value": { "index": 1, "value": "Iftar" } } }
//! ```

use serde::Deserialize;

use crate::brief::{BriefData, Priority, YesNo};

/// New text for one element of a required sequence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListItem {
    pub index: usize,
    pub value: String,
}

/// Check or uncheck one platform in the ordered platform set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformToggle {
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "section", content = "edit", rename_all = "camelCase")]
pub enum FieldEdit {
    General(GeneralEdit),
    Objective(ObjectiveEdit),
    Platform(PlatformEdit),
    Audience(AudienceEdit),
    Message(MessageEdit),
    Copy(CopyEdit),
    Visual(VisualEdit),
    Brand(BrandEdit),
    Assets(AssetsEdit),
    Deliverables(DeliverablesEdit),
    Validation(ValidationEdit),
    Context(ContextEdit),
    Notes(NotesEdit),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum GeneralEdit {
    ClientBrand(String),
    ProjectName(String),
    DateOfRequest(String),
    RequestedBy(String),
    DeadlineDate(String),
    DeadlineTime(String),
    Priority(Priority),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ObjectiveEdit {
    GoalAwareness(bool),
    GoalEngagement(bool),
    GoalTraffic(bool),
    GoalConversion(bool),
    GoalCommunity(bool),
    GoalEvent(bool),
    KeyObjective(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum PlatformEdit {
    /// Replace the whole set; duplicates are dropped keeping the first.
    Platforms(Vec<String>),
    Toggle(PlatformToggle),
    Format(String),
    Dimensions(String),
    VisualsCount(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum AudienceEdit {
    AgeRange(String),
    Location(String),
    Profile(String),
    PainPoint(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum MessageEdit {
    MainMessage(String),
    SecondaryMessage(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum CopyEdit {
    Headline(ListItem),
    Cta(ListItem),
    Language(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum VisualEdit {
    Mood(String),
    Colors(String),
    Style(String),
    References(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum BrandEdit {
    LogoUsage(YesNo),
    Fonts(String),
    Dos(String),
    Donts(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum AssetsEdit {
    ProvidePhotos(bool),
    ProvideVideos(bool),
    ProvideLogos(bool),
    ProvideGuidelines(bool),
    ProvidePrevious(bool),
    AssetsLink(ListItem),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum DeliverablesEdit {
    FinalFormat(String),
    EditableRequired(YesNo),
    ExportVariations(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ValidationEdit {
    Validator(String),
    RevisionsIncluded(String),
    FeedbackDeadline(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ContextEdit {
    PastInsight(String),
    CompetitorBenchmark(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum NotesEdit {
    InternalNotes(String),
}

/// The three sequences that must always keep at least one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListField {
    Headlines,
    Ctas,
    AssetsLinks,
}

impl ListField {
    pub fn name(self) -> &'static str {
        match self {
            ListField::Headlines => "copy.headlines",
            ListField::Ctas => "copy.ctas",
            ListField::AssetsLinks => "assets.assetsLinks",
        }
    }

    pub(crate) fn items(self, data: &BriefData) -> &Vec<String> {
        match self {
            ListField::Headlines => &data.copy.headlines,
            ListField::Ctas => &data.copy.ctas,
            ListField::AssetsLinks => &data.assets.assets_links,
        }
    }

    pub(crate) fn items_mut(self, data: &mut BriefData) -> &mut Vec<String> {
        match self {
            ListField::Headlines => &mut data.copy.headlines,
            ListField::Ctas => &mut data.copy.ctas,
            ListField::AssetsLinks => &mut data.assets.assets_links,
        }
    }
}
