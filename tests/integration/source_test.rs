//! Record source and fetcher behaviour.

use super::fixture;
use typeahead::source::{
    FileSource, Fetcher, HttpConfig, RecordSource, SampleSource, SourceSpec,
};

#[tokio::test]
async fn test_file_fixture_through_fetcher() {
    let source = FileSource::new(fixture("trio.json"));
    let mut fetcher = Fetcher::new();

    let state = fetcher.fetch(&source).await;
    assert!(!state.loading);
    assert!(!state.error);
    assert_eq!(state.data.len(), 3);
    assert_eq!(state.data[1]["name"], "Albert");
}

#[tokio::test]
async fn test_same_location_is_requested_once() {
    let mut fetcher = Fetcher::new();
    let source = FileSource::new(fixture("trio.json"));

    fetcher.fetch(&source).await;
    fetcher.fetch(&source).await;
    assert_eq!(fetcher.requests(), 1);

    fetcher.fetch(&FileSource::new(fixture("many.json"))).await;
    assert_eq!(fetcher.requests(), 2);
    assert_eq!(fetcher.state().data.len(), 12);
}

#[tokio::test]
async fn test_non_array_document_sets_error() {
    let mut fetcher = Fetcher::new();
    let state = fetcher.fetch(&FileSource::new(fixture("not_array.json"))).await;
    assert!(state.error);
    assert!(state.data.is_empty());
}

#[tokio::test]
async fn test_unreachable_url_sets_error() {
    let spec = SourceSpec::parse("http://127.0.0.1:1/users");
    let source = spec
        .into_source(HttpConfig::default().with_timeout(2))
        .unwrap();
    let mut fetcher = Fetcher::new();

    let state = fetcher.fetch(source.as_ref()).await;
    assert!(state.error);
    assert!(!state.loading);
    assert!(state.data.is_empty());
}

#[tokio::test]
async fn test_spec_builds_each_kind() {
    let sample = SourceSpec::parse("sample:")
        .into_source(HttpConfig::default())
        .unwrap();
    assert_eq!(sample.location(), SampleSource::new().location());
    assert_eq!(sample.load().await.unwrap().len(), 10);

    let path = fixture("trio.json");
    let file = SourceSpec::parse(&path.display().to_string())
        .into_source(HttpConfig::default())
        .unwrap();
    assert_eq!(file.location(), path.display().to_string());
}
