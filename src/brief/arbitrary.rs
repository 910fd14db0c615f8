//! proptest generators for [`BriefData`].
//!
//! Generated values are already normalized: required sequences are never
//! empty and platforms are unique, so they survive validation unchanged.

use proptest::collection::{btree_set, vec};
use proptest::prelude::*;

use super::{BriefData, Priority, YesNo};

/// Empty about a third of the time, otherwise 1-16 printable characters.
pub fn text() -> impl Strategy<Value = String> {
    prop_oneof![1 => Just(String::new()), 2 => "\\PC{1,16}"]
}

pub fn priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
        Just(Priority::Urgent),
    ]
}

pub fn yes_no() -> impl Strategy<Value = YesNo> {
    prop_oneof![Just(YesNo::Yes), Just(YesNo::No)]
}

fn required_list() -> impl Strategy<Value = Vec<String>> {
    vec(text(), 1..5)
}

fn platforms() -> impl Strategy<Value = Vec<String>> {
    btree_set("\\PC{1,12}", 0..4).prop_map(|set| set.into_iter().collect())
}

pub fn brief() -> impl Strategy<Value = BriefData> {
    (
        (proptest::array::uniform6(text()), priority()),
        (proptest::array::uniform6(any::<bool>()), text()),
        (platforms(), proptest::array::uniform3(text())),
        proptest::array::uniform4(text()),
        proptest::array::uniform2(text()),
        (required_list(), required_list(), text()),
        proptest::array::uniform4(text()),
        (yes_no(), proptest::array::uniform3(text())),
        (proptest::array::uniform5(any::<bool>()), required_list()),
        (yes_no(), proptest::array::uniform2(text())),
        proptest::array::uniform6(text()),
    )
        .prop_map(
            |(
                ([client, project, date, by, deadline_date, deadline_time], priority),
                (goals, key_objective),
                (platforms, [format, dimensions, visuals_count]),
                [age_range, location, profile, pain_point],
                [main_message, secondary_message],
                (headlines, ctas, language),
                [mood, colors, style, references],
                (logo_usage, [fonts, dos, donts]),
                (provided, assets_links),
                (editable_required, [final_format, export_variations]),
                [validator, revisions, feedback, insight, benchmark, notes],
            )| {
                let mut d = BriefData::default();
                let g = &mut d.general;
                g.client_brand = client;
                g.project_name = project;
                g.date_of_request = date;
                g.requested_by = by;
                g.deadline_date = deadline_date;
                g.deadline_time = deadline_time;
                g.priority = priority;

                let o = &mut d.objective;
                [
                    o.goal_awareness,
                    o.goal_engagement,
                    o.goal_traffic,
                    o.goal_conversion,
                    o.goal_community,
                    o.goal_event,
                ] = goals;
                o.key_objective = key_objective;

                d.platform.platforms = platforms;
                d.platform.format = format;
                d.platform.dimensions = dimensions;
                d.platform.visuals_count = visuals_count;

                d.audience.age_range = age_range;
                d.audience.location = location;
                d.audience.profile = profile;
                d.audience.pain_point = pain_point;

                d.message.main_message = main_message;
                d.message.secondary_message = secondary_message;

                d.copy.headlines = headlines;
                d.copy.ctas = ctas;
                d.copy.language = language;

                d.visual.mood = mood;
                d.visual.colors = colors;
                d.visual.style = style;
                d.visual.references = references;

                d.brand.logo_usage = logo_usage;
                d.brand.fonts = fonts;
                d.brand.dos = dos;
                d.brand.donts = donts;

                let a = &mut d.assets;
                [
                    a.provide_photos,
                    a.provide_videos,
                    a.provide_logos,
                    a.provide_guidelines,
                    a.provide_previous,
                ] = provided;
                a.assets_links = assets_links;

                d.deliverables.final_format = final_format;
                d.deliverables.editable_required = editable_required;
                d.deliverables.export_variations = export_variations;

                d.validation.validator = validator;
                d.validation.revisions_included = revisions;
                d.validation.feedback_deadline = feedback;
                d.context.past_insight = insight;
                d.context.competitor_benchmark = benchmark;
                d.notes.internal_notes = notes;
                d
            },
        )
}
