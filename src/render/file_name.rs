//! Artifact naming shared by the local download and the archive upload.

use chrono::NaiveDate;

/// Lower-case ASCII letters and digits are kept; every other character
/// becomes `_`. Applying it twice gives the same result as applying it once.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// `{client}_{project}_{YYYY-MM-DD}.pdf`, with `client` / `project` used
/// when the respective name is empty.
pub fn artifact_file_name(client: &str, project: &str, date: NaiveDate) -> String {
    let client = non_empty_or(sanitize(client), "client");
    let project = non_empty_or(sanitize(project), "project");
    format!("{client}_{project}_{}.pdf", date.format("%Y-%m-%d"))
}

fn non_empty_or(s: String, fallback: &str) -> String {
    if s.is_empty() {
        fallback.to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date")
    }

    fn matches_charset(s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }

    #[test]
    fn sanitize_lowercases_and_replaces() {
        assert_eq!(sanitize("Ramadan Special"), "ramadan_special");
        assert_eq!(sanitize("7Ciel"), "7ciel");
        assert_eq!(sanitize("Café & Co."), "caf____co_");
    }

    #[test]
    fn sanitize_is_idempotent_and_restricted() {
        for s in ["Ramadan Special", "ÀÉÎ/õü", "a--b__c", "   ", "x.Y.z!", "İstanbul"] {
            let once = sanitize(s);
            assert_eq!(sanitize(&once), once, "not idempotent for {s:?}");
            assert!(matches_charset(&once), "bad charset for {s:?}: {once}");
        }
    }

    #[test]
    fn file_name_for_known_client_and_project() {
        assert_eq!(
            artifact_file_name("7Ciel", "Ramadan Special", date()),
            "7ciel_ramadan_special_2026-03-01.pdf"
        );
    }

    #[test]
    fn file_name_falls_back_for_missing_names() {
        assert_eq!(
            artifact_file_name("", "", date()),
            "client_project_2026-03-01.pdf"
        );
        assert_eq!(
            artifact_file_name("Acme", "", date()),
            "acme_project_2026-03-01.pdf"
        );
    }

    proptest! {
        #[test]
        fn sanitize_any_input_is_idempotent_and_restricted(s in "(?s).{1,40}") {
            let once = sanitize(&s);
            prop_assert_eq!(sanitize(&once), once.clone());
            prop_assert!(matches_charset(&once), "bad charset: {}", once);
            prop_assert_eq!(once.chars().count(), s.chars().count());
        }

        #[test]
        fn artifact_name_is_always_well_formed(client in "(?s).{0,20}", project in "(?s).{0,20}") {
            let name = artifact_file_name(&client, &project, date());
            let stem = name.strip_suffix("_2026-03-01.pdf");
            prop_assert!(stem.is_some_and(matches_charset), "bad name: {}", name);
        }
    }
}
