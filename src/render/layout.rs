//! Data selection for the brief document.
//!
//! [`build`] turns a [`BriefData`] into a [`DocumentTree`]: header, six
//! fixed sections, footer. Omission happens here: a leaf whose value is
//! empty, `false` or an empty sequence produces no block at all. Any other
//! value is kept exactly as entered.
//!
//! The `validation`, `context` and `notes` sections are internal to the
//! agency and never appear in the document.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::brief::{BriefData, Priority};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTree {
    pub header: Header,
    pub sections: Vec<Section>,
    pub footer: Footer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Mark drawn first, in the top-left corner.
    pub logo: Logo,
    pub client: Option<String>,
    pub project: Option<String>,
    /// Badge shown only for [`Priority::Urgent`].
    pub urgent: bool,
    /// Label / value pairs under the title line.
    pub meta: Vec<(String, String)>,
}

/// Placeholder box reserved for the agency logo.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    pub text: &'static str,
    pub width_mm: f32,
    pub height_mm: f32,
}

pub const LOGO: Logo = Logo {
    text: "AGENCY LOGO",
    width_mm: 42.0,
    height_mm: 10.0,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: &'static str,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    /// A labelled text value.
    Field { label: &'static str, value: String },
    /// Checkbox-style flags; only checked items are listed.
    Checks {
        label: &'static str,
        items: Vec<&'static str>,
    },
    /// Inline tags.
    Tags { label: &'static str, items: Vec<String> },
    /// One line per entry.
    List { label: &'static str, items: Vec<String> },
    /// Clickable links.
    Links { label: &'static str, links: Vec<Link> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub generated: String,
    pub marker: &'static str,
    pub page: String,
}

pub const SECTION_TITLES: [&str; 6] = [
    "01. OBJECTIVES & STRATEGY",
    "02. PLATFORM SPECIFICS",
    "03. TARGET AUDIENCE",
    "04. MESSAGING & COPY",
    "05. VISUAL DIRECTION",
    "06. ASSETS & DELIVERABLES",
];

/// Build the document tree. `today` supplies the generation date shown in
/// the header (when the brief has no request date) and the footer year.
pub fn build(data: &BriefData, today: NaiveDate) -> DocumentTree {
    DocumentTree {
        header: header(data, today),
        sections: vec![
            objectives(data),
            platform(data),
            audience(data),
            messaging(data),
            visual(data),
            assets(data),
        ],
        footer: Footer {
            generated: format!("Generated by Brief Generator - {}", today.year()),
            marker: "INTERNAL USE ONLY",
            page: "PAGE 1 OF 1".to_string(),
        },
    }
}

fn text(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn non_empty(items: &[String]) -> Vec<String> {
    items.iter().filter_map(|s| text(s)).collect()
}

fn header(data: &BriefData, today: NaiveDate) -> Header {
    let g = &data.general;
    let mut meta = Vec::new();
    if let Some(v) = text(&g.requested_by) {
        meta.push(("REQUESTED BY".to_string(), v));
    }
    let date = text(&g.date_of_request).unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
    meta.push(("DATE".to_string(), date));
    let deadline: Vec<&str> = [g.deadline_date.as_str(), g.deadline_time.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !deadline.is_empty() {
        meta.push(("DEADLINE".to_string(), deadline.join(" ")));
    }
    Header {
        logo: LOGO,
        client: text(&g.client_brand),
        project: text(&g.project_name),
        urgent: g.priority == Priority::Urgent,
        meta,
    }
}

/// Collects blocks, dropping the empty ones.
#[derive(Default)]
struct Blocks(Vec<Block>);

impl Blocks {
    fn field(&mut self, label: &'static str, value: &str) -> &mut Self {
        if let Some(value) = text(value) {
            self.0.push(Block::Field { label, value });
        }
        self
    }

    fn checks(&mut self, label: &'static str, flags: &[(&'static str, bool)]) -> &mut Self {
        let items: Vec<&'static str> = flags
            .iter()
            .filter(|(_, on)| *on)
            .map(|(name, _)| *name)
            .collect();
        if !items.is_empty() {
            self.0.push(Block::Checks { label, items });
        }
        self
    }

    fn tags(&mut self, label: &'static str, items: &[String]) -> &mut Self {
        let items = non_empty(items);
        if !items.is_empty() {
            self.0.push(Block::Tags { label, items });
        }
        self
    }

    fn list(&mut self, label: &'static str, items: &[String]) -> &mut Self {
        let items = non_empty(items);
        if !items.is_empty() {
            self.0.push(Block::List { label, items });
        }
        self
    }

    fn links(&mut self, label: &'static str, urls: &[String]) -> &mut Self {
        let links: Vec<Link> = non_empty(urls)
            .into_iter()
            .enumerate()
            .map(|(i, url)| Link {
                text: format!("OPEN LINK {}", i + 1),
                url,
            })
            .collect();
        if !links.is_empty() {
            self.0.push(Block::Links { label, links });
        }
        self
    }

    fn into_section(self, title: &'static str) -> Section {
        Section {
            title,
            blocks: self.0,
        }
    }
}

fn objectives(data: &BriefData) -> Section {
    let o = &data.objective;
    let mut b = Blocks::default();
    b.checks(
        "GOALS",
        &[
            ("Awareness", o.goal_awareness),
            ("Engagement", o.goal_engagement),
            ("Traffic", o.goal_traffic),
            ("Conversion", o.goal_conversion),
            ("Community", o.goal_community),
            ("Event", o.goal_event),
        ],
    )
    .field("Key Objective", &o.key_objective);
    b.into_section(SECTION_TITLES[0])
}

fn platform(data: &BriefData) -> Section {
    let p = &data.platform;
    let mut b = Blocks::default();
    b.tags("Platforms", &p.platforms)
        .field("Format", &p.format)
        .field("Size", &p.dimensions)
        .field("Count", &p.visuals_count);
    b.into_section(SECTION_TITLES[1])
}

fn audience(data: &BriefData) -> Section {
    let a = &data.audience;
    let mut b = Blocks::default();
    b.field("Age Range", &a.age_range)
        .field("Location", &a.location)
        .field("Profile Persona", &a.profile)
        .field("Key Pain Point", &a.pain_point);
    b.into_section(SECTION_TITLES[2])
}

fn messaging(data: &BriefData) -> Section {
    let mut b = Blocks::default();
    b.field("Main Message", &data.message.main_message)
        .field("Secondary Message", &data.message.secondary_message)
        .list("COPY & TEXT VISUAL", &data.copy.headlines)
        .list("SUBTEXT / CTAS", &data.copy.ctas)
        .field("Language", &data.copy.language);
    b.into_section(SECTION_TITLES[3])
}

fn visual(data: &BriefData) -> Section {
    let v = &data.visual;
    let br = &data.brand;
    let mut b = Blocks::default();
    b.field("Mood/Tone", &v.mood)
        .field("Style", &v.style)
        .field("Color Palette", &v.colors)
        .field("Visual References", &v.references)
        .field("Logo Usage", br.logo_usage.as_str())
        .field("Fonts", &br.fonts)
        .field("Required Elements (Do's)", &br.dos)
        .field("Avoid Elements (Don'ts)", &br.donts);
    b.into_section(SECTION_TITLES[4])
}

fn assets(data: &BriefData) -> Section {
    let a = &data.assets;
    let d = &data.deliverables;
    let mut b = Blocks::default();
    b.checks(
        "PROVIDED ASSETS",
        &[
            ("Photos", a.provide_photos),
            ("Videos", a.provide_videos),
            ("Logos", a.provide_logos),
            ("Guidelines", a.provide_guidelines),
            ("Prev. Designs", a.provide_previous),
        ],
    )
    .field("Final Format", &d.final_format)
    .field("Editable?", d.editable_required.as_str())
    .field("Export Variations", &d.export_variations)
    .links("ASSETS LINKS", &a.assets_links);
    b.into_section(SECTION_TITLES[5])
}

impl DocumentTree {
    /// Every content value in the sections, in document order. Header and
    /// footer are excluded. Used to check the omission rule.
    pub fn visible_values(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for section in &self.sections {
            for block in &section.blocks {
                match block {
                    Block::Field { value, .. } => out.push(value.as_str()),
                    Block::Checks { items, .. } => out.extend(items.iter().copied()),
                    Block::Tags { items, .. } | Block::List { items, .. } => {
                        out.extend(items.iter().map(String::as_str))
                    }
                    Block::Links { links, .. } => {
                        out.extend(links.iter().map(|l| l.url.as_str()))
                    }
                }
            }
        }
        out
    }

    /// Labels of every block, in document order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.sections
            .iter()
            .flat_map(|s| s.blocks.iter())
            .map(|b| match b {
                Block::Field { label, .. }
                | Block::Checks { label, .. }
                | Block::Tags { label, .. }
                | Block::List { label, .. }
                | Block::Links { label, .. } => *label,
            })
            .collect()
    }
}
