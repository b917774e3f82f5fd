use std::sync::Arc;
use std::{fs, path::PathBuf};

use pagequery_core::index::IndexReader;
use pagequery_core::{
    MemoryIndex, PageLookupRequest, PageSearch, PageSnapshot, ReferenceRequest,
};
use serde::Deserialize;
use serde_json::Value;
use tempfile::tempdir;
use uuid::Uuid;

const FIXED_TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LookupContractFixture {
    hidden_pages: Vec<String>,
    snapshot: PageSnapshot,
    lookups: Vec<LookupCase>,
    references: Vec<ReferenceCase>,
    error_payload_index: Value,
}

#[derive(Debug, Deserialize)]
struct LookupCase {
    request: PageLookupRequest,
    expected: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ReferenceCase {
    request: ReferenceRequest,
    expected: Vec<String>,
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("lookup_contract_fixture.json")
}

fn load_fixture() -> LookupContractFixture {
    let raw = fs::read_to_string(fixture_path()).expect("read lookup contract fixture");
    serde_json::from_str(&raw).expect("parse lookup contract fixture")
}

fn fixture_index(fixture: &LookupContractFixture) -> Arc<MemoryIndex> {
    let index = MemoryIndex::from_snapshot(fixture.snapshot.clone())
        .expect("fixture snapshot")
        .with_hidden_patterns(&fixture.hidden_pages)
        .expect("hidden patterns");
    Arc::new(index)
}

fn fixture_search(fixture: &LookupContractFixture) -> PageSearch {
    let index = fixture_index(fixture);
    PageSearch::new(index.clone(), index.clone(), index)
}

#[test]
fn page_lookups_match_fixture_expectations() {
    let fixture = load_fixture();
    let search = fixture_search(&fixture);

    for case in &fixture.lookups {
        let hits = search.lookup(&case.request).expect("page lookup");
        let ids = hits.iter().map(|hit| hit.id.to_string()).collect::<Vec<_>>();
        assert_eq!(ids, case.expected, "query {:?}", case.request.query);
    }
}

#[test]
fn reference_lookups_match_fixture_expectations() {
    let fixture = load_fixture();
    let search = fixture_search(&fixture);

    for case in &fixture.references {
        let pages = search.references(&case.request).expect("reference lookup");
        let ids = pages.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(ids, case.expected, "request {:?}", case.request);
    }
}

#[test]
fn lookup_hits_carry_first_heading() {
    let fixture = load_fixture();
    let search = fixture_search(&fixture);

    let hits = search
        .lookup(&PageLookupRequest::new("tables"))
        .expect("page lookup");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title.as_deref(), Some("Tables"));

    let serialized = serde_json::to_value(&hits[0]).expect("serialize hit");
    assert_eq!(
        serialized,
        serde_json::json!({"id": "wiki:syntax:tables", "title": "Tables"})
    );
}

#[test]
fn error_payload_fixture_matches_index_error_contract() {
    let fixture = load_fixture();
    let index = fixture_index(&fixture);

    let err = index
        .lookup_key("relation_bogus", "wiki:syntax", None)
        .expect_err("unknown relation");
    let payload = err.to_payload("lookup_key", Some("wiki:syntax".to_string()));
    let mut serialized = serde_json::to_value(payload).expect("serialize error payload");

    let trace_id = serialized
        .get("trace_id")
        .and_then(Value::as_str)
        .expect("trace_id string");
    Uuid::parse_str(trace_id).expect("trace_id must be a UUID");
    serialized["trace_id"] = Value::String(FIXED_TRACE_ID.to_string());

    assert_eq!(serialized, fixture.error_payload_index);
}

#[test]
fn snapshot_loads_from_disk() {
    let fixture = load_fixture();
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("pages.json");
    fs::write(
        &path,
        serde_json::to_string_pretty(&fixture.snapshot).expect("serialize snapshot"),
    )
    .expect("write snapshot");

    let index = MemoryIndex::load(&path).expect("load snapshot");
    assert_eq!(index.len(), fixture.snapshot.pages.len());

    let missing = MemoryIndex::load(&dir.path().join("missing.json")).expect_err("missing file");
    assert_eq!(missing.code(), "IO_ERROR");
}
