use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use boxupdater::{
    latest_only, sort_releases, CommandInvoker, CommandSource, Disambiguate, FeedRelease,
    InvokeError, MemoryStorage, NewRepository, Registry, ReleaseResolver, ReleaseSort,
    ReleaseSource, ResolveError, SourceError,
};
use serde_json::Value;

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn gp2040_feed() -> Vec<FeedRelease> {
    let bytes = std::fs::read(fixtures_root().join("gp2040-releases.json")).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Serves the fixture feed and remembers who asked.
#[derive(Default)]
struct FixtureSource {
    requests: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ReleaseSource for FixtureSource {
    async fn list_releases(&self, owner: &str, name: &str) -> Result<Vec<FeedRelease>, SourceError> {
        self.requests
            .lock()
            .unwrap()
            .push((owner.to_string(), name.to_string()));
        Ok(gp2040_feed())
    }
}

/// Host channel answering `list_releases` with the fixture feed.
#[derive(Default)]
struct FixtureHost {
    calls: AtomicUsize,
}

#[async_trait]
impl CommandInvoker for FixtureHost {
    async fn invoke(&self, operation: &str, _params: Value) -> Result<Value, InvokeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match operation {
            boxupdater::releases::GET_RELEASES => Ok(serde_json::to_value(gp2040_feed()).unwrap()),
            other => Err(InvokeError::new(other, "unsupported")),
        }
    }
}

fn registry() -> Registry {
    Registry::load(Box::new(MemoryStorage::new()), Box::new(Disambiguate)).unwrap()
}

#[tokio::test]
async fn resolves_fixture_feed_in_feed_order() {
    let source = Arc::new(FixtureSource::default());
    let resolver = ReleaseResolver::from_shared(source.clone());

    let releases = resolver.fetch_releases(&registry(), "GP2040-CE").await.unwrap();

    let pairs: Vec<_> = releases
        .iter()
        .map(|r| (r.tag_name.as_str(), r.name.as_str()))
        .collect();
    assert_eq!(
        pairs,
        [
            ("v0.7.9", "GP2040-CE_0.7.9_Pico.uf2"),
            ("v0.7.9", "GP2040-CE_0.7.9_PicoW.uf2"),
            ("v0.7.8", "GP2040-CE_0.7.8_Pico.uf2"),
        ]
    );
    assert_eq!(releases[0].download_count, 5210);
    assert_eq!(releases[0].uploaded_at, "2024-06-02T18:04:11Z");
    assert_eq!(
        source.requests.lock().unwrap().as_slice(),
        [("OpenStickCommunity".to_string(), "GP2040-CE".to_string())]
    );
}

#[tokio::test]
async fn disambiguated_label_resolves_its_own_owner() {
    let source = Arc::new(FixtureSource::default());
    let resolver = ReleaseResolver::from_shared(source.clone());
    let mut registry = registry();
    registry
        .add(NewRepository::new("someone", "GP2040-CE").with_asset_filter("PicoW"))
        .unwrap();

    let releases = resolver
        .fetch_releases(&registry, "GP2040-CE (someone)")
        .await
        .unwrap();

    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0].name, "GP2040-CE_0.7.9_PicoW.uf2");
    assert_eq!(source.requests.lock().unwrap()[0].0, "someone");
}

#[tokio::test]
async fn command_source_is_interchangeable() {
    let resolver = ReleaseResolver::new(CommandSource::new(FixtureHost::default()));

    let releases = resolver.fetch_releases(&registry(), "HayBox").await.unwrap();

    assert_eq!(releases.len(), 3);
}

#[tokio::test]
async fn not_found_makes_no_host_call() {
    let host = Arc::new(FixtureHost::default());
    let resolver = ReleaseResolver::new(CommandSource::new(SharedHost(host.clone())));

    let result = resolver.fetch_releases(&registry(), "nonexistent").await;

    assert!(matches!(result, Err(ResolveError::NotFound { identifier }) if identifier == "nonexistent"));
    assert_eq!(host.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn presentation_helpers_reorder_resolved_list() {
    let resolver = ReleaseResolver::new(FixtureSource::default());
    let releases = resolver.fetch_releases(&registry(), "GP2040-CE").await.unwrap();

    let latest = latest_only(releases.clone());
    assert_eq!(latest.len(), 2);

    let mut by_downloads = releases;
    sort_releases(&mut by_downloads, ReleaseSort::MostDownloaded);
    assert_eq!(by_downloads[0].name, "GP2040-CE_0.7.8_Pico.uf2");
}

/// Lets a test keep a handle on the host after handing it to a source.
struct SharedHost(Arc<FixtureHost>);

#[async_trait]
impl CommandInvoker for SharedHost {
    async fn invoke(&self, operation: &str, params: Value) -> Result<Value, InvokeError> {
        self.0.invoke(operation, params).await
    }
}
