//! Live form state.
//!
//! [`BriefForm`] is the sole owner of the brief being edited. It exposes a
//! closed set of mutations; each one either applies completely or leaves
//! the value untouched. Persistence is not its concern; the command layer
//! saves a snapshot after every successful mutation.

pub mod edit;

pub use edit::{
    AssetsEdit, AudienceEdit, BrandEdit, ContextEdit, CopyEdit, DeliverablesEdit, FieldEdit,
    GeneralEdit, ListField, ListItem, MessageEdit, NotesEdit, ObjectiveEdit, PlatformEdit,
    PlatformToggle, ValidationEdit, VisualEdit,
};

use crate::brief::BriefData;
use crate::error::AppError;

/// The brief currently being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BriefForm {
    data: BriefData,
}

impl BriefForm {
    pub fn new(data: BriefData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &BriefData {
        &self.data
    }

    /// Apply one input event. Intermediate values (an emptied field, an
    /// empty headline) are accepted as-is.
    ///
    /// Returns [`AppError::InvalidEdit`] when a list-item event points past
    /// the end of its sequence; the value is not modified in that case.
    pub fn apply(&mut self, edit: FieldEdit) -> Result<(), AppError> {
        let d = &mut self.data;
        match edit {
            FieldEdit::General(e) => match e {
                GeneralEdit::ClientBrand(v) => d.general.client_brand = v,
                GeneralEdit::ProjectName(v) => d.general.project_name = v,
                GeneralEdit::DateOfRequest(v) => d.general.date_of_request = v,
                GeneralEdit::RequestedBy(v) => d.general.requested_by = v,
                GeneralEdit::DeadlineDate(v) => d.general.deadline_date = v,
                GeneralEdit::DeadlineTime(v) => d.general.deadline_time = v,
                GeneralEdit::Priority(v) => d.general.priority = v,
            },
            FieldEdit::Objective(e) => match e {
                ObjectiveEdit::GoalAwareness(v) => d.objective.goal_awareness = v,
                ObjectiveEdit::GoalEngagement(v) => d.objective.goal_engagement = v,
                ObjectiveEdit::GoalTraffic(v) => d.objective.goal_traffic = v,
                ObjectiveEdit::GoalConversion(v) => d.objective.goal_conversion = v,
                ObjectiveEdit::GoalCommunity(v) => d.objective.goal_community = v,
                ObjectiveEdit::GoalEvent(v) => d.objective.goal_event = v,
                ObjectiveEdit::KeyObjective(v) => d.objective.key_objective = v,
            },
            FieldEdit::Platform(e) => match e {
                PlatformEdit::Platforms(list) => {
                    let mut set: Vec<String> = Vec::with_capacity(list.len());
                    for name in list {
                        if !set.contains(&name) {
                            set.push(name);
                        }
                    }
                    d.platform.platforms = set;
                }
                PlatformEdit::Toggle(PlatformToggle { name, enabled }) => {
                    let present = d.platform.platforms.contains(&name);
                    if enabled && !present {
                        d.platform.platforms.push(name);
                    } else if !enabled {
                        d.platform.platforms.retain(|p| *p != name);
                    }
                }
                PlatformEdit::Format(v) => d.platform.format = v,
                PlatformEdit::Dimensions(v) => d.platform.dimensions = v,
                PlatformEdit::VisualsCount(v) => d.platform.visuals_count = v,
            },
            FieldEdit::Audience(e) => match e {
                AudienceEdit::AgeRange(v) => d.audience.age_range = v,
                AudienceEdit::Location(v) => d.audience.location = v,
                AudienceEdit::Profile(v) => d.audience.profile = v,
                AudienceEdit::PainPoint(v) => d.audience.pain_point = v,
            },
            FieldEdit::Message(e) => match e {
                MessageEdit::MainMessage(v) => d.message.main_message = v,
                MessageEdit::SecondaryMessage(v) => d.message.secondary_message = v,
            },
            FieldEdit::Copy(e) => match e {
                CopyEdit::Headline(item) => set_item(d, ListField::Headlines, item)?,
                CopyEdit::Cta(item) => set_item(d, ListField::Ctas, item)?,
                CopyEdit::Language(v) => d.copy.language = v,
            },
            FieldEdit::Visual(e) => match e {
                VisualEdit::Mood(v) => d.visual.mood = v,
                VisualEdit::Colors(v) => d.visual.colors = v,
                VisualEdit::Style(v) => d.visual.style = v,
                VisualEdit::References(v) => d.visual.references = v,
            },
            FieldEdit::Brand(e) => match e {
                BrandEdit::LogoUsage(v) => d.brand.logo_usage = v,
                BrandEdit::Fonts(v) => d.brand.fonts = v,
                BrandEdit::Dos(v) => d.brand.dos = v,
                BrandEdit::Donts(v) => d.brand.donts = v,
            },
            FieldEdit::Assets(e) => match e {
                AssetsEdit::ProvidePhotos(v) => d.assets.provide_photos = v,
                AssetsEdit::ProvideVideos(v) => d.assets.provide_videos = v,
                AssetsEdit::ProvideLogos(v) => d.assets.provide_logos = v,
                AssetsEdit::ProvideGuidelines(v) => d.assets.provide_guidelines = v,
                AssetsEdit::ProvidePrevious(v) => d.assets.provide_previous = v,
                AssetsEdit::AssetsLink(item) => set_item(d, ListField::AssetsLinks, item)?,
            },
            FieldEdit::Deliverables(e) => match e {
                DeliverablesEdit::FinalFormat(v) => d.deliverables.final_format = v,
                DeliverablesEdit::EditableRequired(v) => d.deliverables.editable_required = v,
                DeliverablesEdit::ExportVariations(v) => d.deliverables.export_variations = v,
            },
            FieldEdit::Validation(e) => match e {
                ValidationEdit::Validator(v) => d.validation.validator = v,
                ValidationEdit::RevisionsIncluded(v) => d.validation.revisions_included = v,
                ValidationEdit::FeedbackDeadline(v) => d.validation.feedback_deadline = v,
            },
            FieldEdit::Context(e) => match e {
                ContextEdit::PastInsight(v) => d.context.past_insight = v,
                ContextEdit::CompetitorBenchmark(v) => d.context.competitor_benchmark = v,
            },
            FieldEdit::Notes(NotesEdit::InternalNotes(v)) => d.notes.internal_notes = v,
        }
        Ok(())
    }

    /// Apply a stream of events in order.
    ///
    /// Stops at the first rejected event; everything before it stays
    /// applied. Returns the number of events applied.
    pub fn observe<I>(&mut self, edits: I) -> Result<usize, AppError>
    where
        I: IntoIterator<Item = FieldEdit>,
    {
        let mut applied = 0;
        for edit in edits {
            self.apply(edit)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Append an empty entry to `field`; returns the new length.
    pub fn append_list_item(&mut self, field: ListField) -> usize {
        let items = field.items_mut(&mut self.data);
        items.push(String::new());
        items.len()
    }

    /// Remove the entry at `index` from `field`.
    ///
    /// A sequence never shrinks below one element: removing the last entry
    /// (or an index past the end) does nothing and returns `false`.
    pub fn remove_list_item(&mut self, field: ListField, index: usize) -> bool {
        let items = field.items_mut(&mut self.data);
        if items.len() <= 1 || index >= items.len() {
            tracing::debug!(field = field.name(), index, "list item removal ignored");
            return false;
        }
        items.remove(index);
        true
    }

    /// Replace the whole value (file import, archived record).
    pub fn load_external(&mut self, data: BriefData) {
        self.data = data;
    }

    /// Replace the value with the canonical default. Callers must have the
    /// user's confirmation before invoking this.
    pub fn reset_to_default(&mut self) {
        self.data = BriefData::default();
    }
}

fn set_item(data: &mut BriefData, field: ListField, item: ListItem) -> Result<(), AppError> {
    let len = field.items(data).len();
    let slot = field
        .items_mut(data)
        .get_mut(item.index)
        .ok_or_else(|| {
            AppError::InvalidEdit(format!(
                "{} has no item {} (length {len})",
                field.name(),
                item.index
            ))
        })?;
    *slot = item.value;
    Ok(())
}
