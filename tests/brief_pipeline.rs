use std::time::Duration;

use briefgen_lib::archive::{ArchiveBackend, HttpArchive};
use briefgen_lib::brief::{io, BriefData, Priority};
use briefgen_lib::error::AppError;
use briefgen_lib::form::{BriefForm, FieldEdit, GeneralEdit, ListField};
use briefgen_lib::notify::Level;
use briefgen_lib::pipeline::{generate_and_deliver, ArchiveStatus, DownloadStatus};
use briefgen_lib::render::layout;
use briefgen_lib::store::SnapshotStore;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date")
}

fn urgent_form() -> BriefForm {
    let mut form = BriefForm::default();
    form.observe([
        FieldEdit::General(GeneralEdit::ClientBrand("7Ciel".to_string())),
        FieldEdit::General(GeneralEdit::ProjectName("Ramadan Special".to_string())),
        FieldEdit::General(GeneralEdit::Priority(Priority::Urgent)),
    ])
    .expect("edits");
    form
}

fn http_archive(server: &MockServer) -> ArchiveBackend {
    ArchiveBackend::Http(HttpArchive::new(&server.uri(), Duration::from_secs(5)).expect("client"))
}

#[tokio::test]
async fn urgent_brief_is_rendered_and_archived() {
    let form = urgent_form();
    let tree = layout::build(form.data(), today());
    assert!(tree.header.urgent);
    assert_eq!(tree.header.project.as_deref(), Some("Ramadan Special"));

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/briefs/save"))
        .and(body_string_contains("7ciel_ramadan_special_2026-03-01.pdf"))
        .and(body_string_contains("7Ciel"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let out = tempfile::tempdir().expect("tempdir");
    let outcome = generate_and_deliver(form.data(), out.path(), &http_archive(&server), today())
        .await
        .expect("generate");

    assert_eq!(outcome.file_name, "7ciel_ramadan_special_2026-03-01.pdf");
    assert_eq!(outcome.archive, ArchiveStatus::Archived);
    let notes = outcome.notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "PDF generated and saved to Archive!");
}

#[tokio::test]
async fn archive_failure_keeps_local_pdf_and_warns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/briefs/save"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "bucket offline" })),
        )
        .mount(&server)
        .await;

    let out = tempfile::tempdir().expect("tempdir");
    let form = urgent_form();
    let outcome = generate_and_deliver(form.data(), out.path(), &http_archive(&server), today())
        .await
        .expect("generate");

    let local = out.path().join(&outcome.file_name);
    assert_eq!(outcome.download, DownloadStatus::Saved { path: local.clone() });
    assert!(std::fs::read(&local).expect("local pdf").starts_with(b"%PDF"));
    assert_eq!(
        outcome.archive,
        ArchiveStatus::Failed {
            reason: "bucket offline".to_string()
        }
    );

    let notes = outcome.notifications();
    assert!(notes.iter().any(|n| n.level == Level::Warning && n.title == "Archive Error: bucket offline"));
    assert!(notes.iter().all(|n| n.level != Level::Error));
}

#[test]
fn invalid_import_is_rejected_and_state_kept() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bad = dir.path().join("brief.json");
    std::fs::write(&bad, r#"{"foo":1}"#).expect("write");

    let mut form = urgent_form();
    let before = form.data().clone();
    match io::import_from_path(&bad) {
        Ok(data) => form.load_external(data),
        Err(e) => assert!(matches!(e, AppError::SchemaValidation(ref m) if m.contains("general"))),
    }
    assert_eq!(form.data(), &before);
}

#[test]
fn live_brief_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let form = urgent_form();
    SnapshotStore::in_dir(dir.path())
        .expect("store")
        .save_live(form.data())
        .expect("save");

    let restored = SnapshotStore::in_dir(dir.path()).expect("store").load_live();
    assert_eq!(&restored, form.data());
}

#[test]
fn required_lists_never_drop_below_one_entry() {
    let mut form = BriefForm::new(BriefData::default());
    assert!(!form.remove_list_item(ListField::AssetsLinks, 0));
    assert_eq!(form.data().assets.assets_links, vec![String::new()]);
    assert_eq!(form.append_list_item(ListField::AssetsLinks), 2);
    assert!(form.remove_list_item(ListField::AssetsLinks, 1));
    assert!(!form.remove_list_item(ListField::AssetsLinks, 0));
}

#[test]
fn exported_file_reimports_identically() {
    let dir = tempfile::tempdir().expect("tempdir");
    let form = urgent_form();
    let path = io::export_to_dir(form.data(), dir.path()).expect("export");
    let back = io::import_from_path(&path).expect("import");
    assert_eq!(&back, form.data());
}
