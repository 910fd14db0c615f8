//! Shape validation for untrusted brief JSON.
//!
//! [`validate`] walks the whole value instead of stopping at the first
//! problem, so an import error can list every offending field at once.
//!
//! Rules:
//! - every section key must be present and hold an object;
//! - optional leaves may be absent (normalized to their default), but when
//!   present they must carry the declared JSON type; `null` is not accepted;
//! - required leaves must be present;
//! - enum leaves must be one of their literal spellings;
//! - unknown keys are ignored.
//!
//! Required sequences that arrive empty are normalized to a single empty
//! placeholder, and `platform.platforms` is de-duplicated keeping the first
//! occurrence.

use serde::Serialize;
use serde_json::{Map, Value};

use super::types::{
    Assets, Audience, Brand, BriefData, Context, Copywriting, Deliverables, General, Message,
    Notes, Objective, Platform, Priority, Validation, Visual, YesNo,
};

/// One non-conforming field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Dotted path, e.g. `general.priority` or `copy.headlines[2]`.
    pub path: String,
    pub reason: String,
}

/// Every issue found while checking one value against the brief shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("brief does not match the expected shape: {}", describe(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

fn describe(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.path, i.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Enum types whose JSON form is one of a fixed set of literals.
trait Literal: Copy + 'static {
    const ALL: &'static [Self];
    fn literal(self) -> &'static str;
}

impl Literal for Priority {
    const ALL: &'static [Self] = &Priority::ALL;
    fn literal(self) -> &'static str {
        self.as_str()
    }
}

impl Literal for YesNo {
    const ALL: &'static [Self] = &YesNo::ALL;
    fn literal(self) -> &'static str {
        self.as_str()
    }
}

/// Check `value` against the brief shape and return the normalized brief.
pub fn validate(value: &Value) -> Result<BriefData, ValidationError> {
    let Some(root) = value.as_object() else {
        return Err(ValidationError {
            issues: vec![FieldIssue {
                path: "$".to_string(),
                reason: "expected an object".to_string(),
            }],
        });
    };

    let mut issues = Vec::new();

    let general = {
        let mut s = Section::open(root, "general", &mut issues);
        General {
            client_brand: s.opt_str("clientBrand"),
            project_name: s.opt_str("projectName"),
            date_of_request: s.opt_str("dateOfRequest"),
            requested_by: s.opt_str("requestedBy"),
            deadline_date: s.opt_str("deadlineDate"),
            deadline_time: s.opt_str("deadlineTime"),
            priority: s.opt_enum("priority", Priority::Medium),
        }
    };

    let objective = {
        let mut s = Section::open(root, "objective", &mut issues);
        Objective {
            goal_awareness: s.opt_bool("goalAwareness"),
            goal_engagement: s.opt_bool("goalEngagement"),
            goal_traffic: s.opt_bool("goalTraffic"),
            goal_conversion: s.opt_bool("goalConversion"),
            goal_community: s.opt_bool("goalCommunity"),
            goal_event: s.opt_bool("goalEvent"),
            key_objective: s.opt_str("keyObjective"),
        }
    };

    let platform = {
        let mut s = Section::open(root, "platform", &mut issues);
        Platform {
            platforms: dedup(s.opt_list("platforms")),
            format: s.opt_str("format"),
            dimensions: s.opt_str("dimensions"),
            visuals_count: s.opt_str("visualsCount"),
        }
    };

    let audience = {
        let mut s = Section::open(root, "audience", &mut issues);
        Audience {
            age_range: s.opt_str("ageRange"),
            location: s.opt_str("location"),
            profile: s.opt_str("profile"),
            pain_point: s.opt_str("painPoint"),
        }
    };

    let message = {
        let mut s = Section::open(root, "message", &mut issues);
        Message {
            main_message: s.opt_str("mainMessage"),
            secondary_message: s.opt_str("secondaryMessage"),
        }
    };

    let copy = {
        let mut s = Section::open(root, "copy", &mut issues);
        Copywriting {
            headlines: s.req_list("headlines"),
            ctas: s.req_list("ctas"),
            language: s.opt_str("language"),
        }
    };

    let visual = {
        let mut s = Section::open(root, "visual", &mut issues);
        Visual {
            mood: s.opt_str("mood"),
            colors: s.opt_str("colors"),
            style: s.opt_str("style"),
            references: s.opt_str("references"),
        }
    };

    let brand = {
        let mut s = Section::open(root, "brand", &mut issues);
        Brand {
            logo_usage: s.req_enum("logoUsage", YesNo::Yes),
            fonts: s.opt_str("fonts"),
            dos: s.opt_str("dos"),
            donts: s.opt_str("donts"),
        }
    };

    let assets = {
        let mut s = Section::open(root, "assets", &mut issues);
        Assets {
            provide_photos: s.req_bool("providePhotos"),
            provide_videos: s.req_bool("provideVideos"),
            provide_logos: s.req_bool("provideLogos"),
            provide_guidelines: s.req_bool("provideGuidelines"),
            provide_previous: s.req_bool("providePrevious"),
            assets_links: s.req_list("assetsLinks"),
        }
    };

    let deliverables = {
        let mut s = Section::open(root, "deliverables", &mut issues);
        Deliverables {
            final_format: s.opt_str("finalFormat"),
            editable_required: s.req_enum("editableRequired", YesNo::No),
            export_variations: s.opt_str("exportVariations"),
        }
    };

    let validation = {
        let mut s = Section::open(root, "validation", &mut issues);
        Validation {
            validator: s.opt_str("validator"),
            revisions_included: s.opt_str("revisionsIncluded"),
            feedback_deadline: s.opt_str("feedbackDeadline"),
        }
    };

    let context = {
        let mut s = Section::open(root, "context", &mut issues);
        Context {
            past_insight: s.opt_str("pastInsight"),
            competitor_benchmark: s.opt_str("competitorBenchmark"),
        }
    };

    let notes = {
        let mut s = Section::open(root, "notes", &mut issues);
        Notes {
            internal_notes: s.opt_str("internalNotes"),
        }
    };

    if !issues.is_empty() {
        return Err(ValidationError { issues });
    }

    Ok(BriefData {
        general,
        objective,
        platform,
        audience,
        message,
        copy,
        visual,
        brand,
        assets,
        deliverables,
        validation,
        context,
        notes,
    })
}

impl TryFrom<Value> for BriefData {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validate(&value)
    }
}

/// Reader over one section object that records issues as it goes.
///
/// When the section itself is missing or malformed a single issue is
/// recorded and every read returns the leaf default, so one bad section
/// does not bury the report in per-field noise.
struct Section<'v, 'i> {
    name: &'static str,
    map: Option<&'v Map<String, Value>>,
    issues: &'i mut Vec<FieldIssue>,
}

impl<'v, 'i> Section<'v, 'i> {
    fn open(
        root: &'v Map<String, Value>,
        name: &'static str,
        issues: &'i mut Vec<FieldIssue>,
    ) -> Self {
        let map = match root.get(name) {
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                issues.push(FieldIssue {
                    path: name.to_string(),
                    reason: "expected an object".to_string(),
                });
                None
            }
            None => {
                issues.push(FieldIssue {
                    path: name.to_string(),
                    reason: "required section missing".to_string(),
                });
                None
            }
        };
        Self { name, map, issues }
    }

    fn path(&self, key: &str) -> String {
        format!("{}.{key}", self.name)
    }

    fn issue(&mut self, path: String, reason: impl Into<String>) {
        self.issues.push(FieldIssue {
            path,
            reason: reason.into(),
        });
    }

    /// Look up `key`; records a "required" issue when `required` and absent.
    fn get(&mut self, key: &str, required: bool) -> Option<&'v Value> {
        let map = self.map?;
        let found = map.get(key);
        if found.is_none() && required {
            let path = self.path(key);
            self.issue(path, "required field missing");
        }
        found
    }

    fn opt_str(&mut self, key: &str) -> String {
        match self.get(key, false) {
            None => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                let path = self.path(key);
                self.issue(path, "expected a string");
                String::new()
            }
        }
    }

    fn bool_at(&mut self, key: &str, required: bool) -> bool {
        match self.get(key, required) {
            None => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                let path = self.path(key);
                self.issue(path, "expected a boolean");
                false
            }
        }
    }

    fn opt_bool(&mut self, key: &str) -> bool {
        self.bool_at(key, false)
    }

    fn req_bool(&mut self, key: &str) -> bool {
        self.bool_at(key, true)
    }

    fn list_at(&mut self, key: &str, required: bool) -> Vec<String> {
        let items = match self.get(key, required) {
            None => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                let path = self.path(key);
                self.issue(path, "expected an array of strings");
                return Vec::new();
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                _ => {
                    let path = format!("{}[{idx}]", self.path(key));
                    self.issue(path, "expected a string");
                }
            }
        }
        out
    }

    fn opt_list(&mut self, key: &str) -> Vec<String> {
        self.list_at(key, false)
    }

    /// Required sequence; never returns an empty vector.
    fn req_list(&mut self, key: &str) -> Vec<String> {
        let mut items = self.list_at(key, true);
        if items.is_empty() {
            items.push(String::new());
        }
        items
    }

    fn enum_at<T: Literal>(&mut self, key: &str, required: bool, default: T) -> T {
        match self.get(key, required) {
            None => default,
            Some(Value::String(s)) => {
                let found = T::ALL.iter().copied().find(|v| v.literal() == s.as_str());
                match found {
                    Some(v) => v,
                    None => {
                        let path = self.path(key);
                        self.issue(path, expected_one_of::<T>());
                        default
                    }
                }
            }
            Some(_) => {
                let path = self.path(key);
                self.issue(path, expected_one_of::<T>());
                default
            }
        }
    }

    fn opt_enum<T: Literal>(&mut self, key: &str, default: T) -> T {
        self.enum_at(key, false, default)
    }

    fn req_enum<T: Literal>(&mut self, key: &str, default: T) -> T {
        self.enum_at(key, true, default)
    }
}

fn expected_one_of<T: Literal>() -> String {
    let names: Vec<&str> = T::ALL.iter().map(|v| v.literal()).collect();
    format!("expected one of {}", names.join(", "))
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
