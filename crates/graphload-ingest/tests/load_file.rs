//! End-to-end dry runs over documents on disk.

use std::io::Write;

use graphload_core::{RelationshipMode, RelationshipStrategy};
use graphload_ingest::{LoadOptions, Loader, PlanWriter};

fn write_document(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_dry_run_over_document_on_disk() {
    let file = write_document(
        r#"{
            "entities": [
                { "id": "hn", "name": "Hà Nội", "label": ["Thành phố"], "properties": { "dân số": 8000000 } },
                { "id": "vn", "name": "Việt Nam", "label": "Quốc gia" }
            ],
            "triplets": [
                { "subject_id": "hn", "object_id": "vn", "predicate": "là thủ đô của", "metadata": { "src": "wiki" } }
            ]
        }"#,
    );

    let loader = Loader::new(PlanWriter::new(false), LoadOptions::default());
    let report = loader.load_file(file.path()).await.unwrap();

    assert!(report.is_clean());
    assert!(report.cleared);
    assert_eq!(report.entities.created, 2);
    assert_eq!(report.relationships.created, 1);
    assert_eq!(report.strategy, Some(RelationshipStrategy::Native));

    let statements = loader.writer().statements();
    assert!(statements[0].cypher.starts_with("CREATE (n:`Thành phố`)"));
    assert!(statements[0].cypher.contains("n.`dân_số` = $prop_0"));
    assert!(statements[1].cypher.starts_with("CREATE (n:`Quốc gia`)"));
    assert!(statements[2].cypher.contains("[r:`LÀ_THỦ_ĐÔ_CỦA` $props]"));
}

#[tokio::test]
async fn test_keep_existing_with_forced_apoc() {
    let file = write_document(
        r#"{ "entities": [{ "id": 1 }, { "id": 2 }], "triplets": [{ "subject_id": 1, "object_id": 2 }] }"#,
    );

    let options = LoadOptions {
        clear_before_load: false,
        relationship_mode: RelationshipMode::Apoc,
    };
    let loader = Loader::new(PlanWriter::new(false), options);
    let report = loader.load_file(file.path()).await.unwrap();

    assert!(!report.cleared);
    assert_eq!(report.relationships.created, 1);
    let statements = loader.writer().statements();
    assert_eq!(
        statements[2].params.get("predicate"),
        Some(&serde_json::json!("RELATED_TO"))
    );
}

#[tokio::test]
async fn test_non_object_document_is_fatal() {
    let file = write_document("[]");
    let loader = Loader::new(PlanWriter::new(false), LoadOptions::default());
    let err = loader.load_file(file.path()).await.unwrap_err();
    assert!(err.to_string().contains("top level must be an object"));
}
