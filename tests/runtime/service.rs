//! Integration tests for the remote config service

use std::sync::Arc;

use flagwright_runtime::service::Subscription;
use flagwright_runtime::{
    Capability, ExperimentalGroup, FlagKey, InMemoryProvider, Raw, RemoteConfigProvider,
    RemoteConfigService, RemoteKey, RemoteValue, ServiceObserver,
};
use parking_lot::Mutex;

use crate::generated::flags::{Banner, Onboarding, Paywall, PaywallVariant};

/// `Paywall` taking part in the "paywall" experiment, implemented by hand
/// over the generated type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TrackedPaywall(Paywall);

impl RemoteValue for TrackedPaywall {
    const CAPABILITY: Capability = <Paywall as RemoteValue>::CAPABILITY;

    fn default_value() -> Self {
        Self(<Paywall as RemoteValue>::default_value())
    }

    fn decode(raw: Raw<'_>) -> Option<Self> {
        <Paywall as RemoteValue>::decode(raw).map(Self)
    }

    fn describe(&self) -> String {
        self.0.describe()
    }

    fn is_baseline(&self) -> bool {
        self.0.is_baseline()
    }

    fn experimental_group(&self) -> Option<ExperimentalGroup> {
        Some(ExperimentalGroup::new("paywall", self.0.name()))
    }
}

#[derive(Default)]
struct Events {
    missing: Mutex<Vec<String>>,
    incorrect: Mutex<Vec<(String, String)>>,
    groups: Mutex<Vec<ExperimentalGroup>>,
    summaries: Mutex<usize>,
}

impl ServiceObserver for Events {
    fn key_not_found(&self, key: &str) {
        self.missing.lock().push(key.to_string());
    }

    fn keys_not_found(&self, _keys: &[String]) {
        *self.summaries.lock() += 1;
    }

    fn incorrect_value(&self, key: &str, value: &str) {
        self.incorrect.lock().push((key.to_string(), value.to_string()));
    }

    fn experimental_group(&self, group: &ExperimentalGroup) {
        self.groups.lock().push(group.clone());
    }
}

fn service(provider: InMemoryProvider) -> (RemoteConfigService, Arc<Events>) {
    let events = Arc::new(Events::default());
    let service =
        RemoteConfigService::new(Arc::new(provider)).with_observer(Arc::clone(&events) as Arc<dyn ServiceObserver>);
    (service, events)
}

fn onboarding() -> FlagKey<Onboarding> {
    FlagKey::new("onboarding")
}

fn paywall() -> FlagKey<TrackedPaywall> {
    FlagKey::new("paywall").with_title("Paywall experiment")
}

#[test]
fn provider_values_decode() {
    let provider = InMemoryProvider::new()
        .with("onboarding", "true")
        .with("paywall", "b_long");
    let (service, events) = service(provider);

    assert_eq!(service.value::<Onboarding>(&onboarding()).unwrap(), Onboarding::Enabled);
    assert_eq!(
        service.value::<TrackedPaywall>(&paywall()).unwrap(),
        TrackedPaywall(Paywall::new(false, PaywallVariant::B))
    );
    assert!(events.missing.lock().is_empty());
    assert_eq!(
        *events.groups.lock(),
        vec![ExperimentalGroup::new("paywall", "b_long")]
    );
}

#[test]
fn baseline_values_are_not_tracked() {
    let provider = InMemoryProvider::new().with("paywall", "a_baseline");
    let (service, events) = service(provider);

    let value = service.value::<TrackedPaywall>(&paywall()).unwrap();
    assert!(value.0.baseline);
    assert!(events.groups.lock().is_empty());
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let (service, events) = service(InMemoryProvider::new().with("onboarding", ""));

    assert_eq!(service.value::<Onboarding>(&onboarding()).unwrap(), Onboarding::Disabled);
    assert_eq!(service.missing_keys(), vec!["onboarding".to_string()]);
    assert_eq!(*events.missing.lock(), vec!["onboarding".to_string()]);
    assert!(service.incorrect_values().is_empty());
}

#[test]
fn undecodable_values_are_reported() {
    let (service, events) = service(InMemoryProvider::new().with("onboarding", "yes"));

    assert_eq!(service.value::<Onboarding>(&onboarding()).unwrap(), Onboarding::Disabled);
    let expected = vec![("onboarding".to_string(), "yes".to_string())];
    assert_eq!(service.incorrect_values(), expected);
    assert_eq!(*events.incorrect.lock(), expected);
    assert!(service.missing_keys().is_empty());
}

#[test]
fn values_are_resolved_once() {
    let provider = Arc::new(InMemoryProvider::new().with("onboarding", "true"));
    let service = RemoteConfigService::new(Arc::clone(&provider) as Arc<dyn RemoteConfigProvider>);
    let key = onboarding();

    assert!(service.value::<Onboarding>(&key).unwrap().is_enabled());
    provider.set("onboarding", "false");
    assert!(service.value::<Onboarding>(&key).unwrap().is_enabled());
}

#[test]
fn overrides_win_over_the_provider() {
    let (service, _) = service(InMemoryProvider::new().with("onboarding", "false"));
    service.set_override("onboarding", "true");
    assert_eq!(service.value::<Onboarding>(&onboarding()).unwrap(), Onboarding::Enabled);
}

#[test]
fn wrong_type_is_an_error() {
    let (service, _) = service(InMemoryProvider::new());
    assert!(service.value::<Banner>(&onboarding()).is_err());
    assert!(service.subscribe::<Banner>(&onboarding()).is_err());
    assert!(service.value::<Paywall>(&paywall()).is_err());
}

#[test]
fn prefetch_reports_and_registers() {
    let (service, events) = service(InMemoryProvider::new().with("paywall", "a"));
    let onboarding = onboarding();
    let paywall = paywall();
    let keys: [&dyn RemoteKey; 2] = [&onboarding, &paywall];

    service.prefetch(&keys);

    assert_eq!(*events.summaries.lock(), 1);
    assert_eq!(
        service.current_remote_data(),
        vec![
            ("onboarding".to_string(), "disabled".to_string()),
            ("Paywall experiment".to_string(), "a".to_string()),
        ]
    );
}

#[test]
fn concurrent_readers_agree() {
    let provider = InMemoryProvider::new().with("paywall", "b_long");
    let (service, events) = service(provider);
    let service = Arc::new(service);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            std::thread::spawn(move || service.value::<TrackedPaywall>(&paywall()).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().0, Paywall::new(false, PaywallVariant::B));
    }
    assert_eq!(events.groups.lock().len(), 1);
}

#[tokio::test]
async fn fetch_then_refresh_publishes() {
    let provider = Arc::new(InMemoryProvider::new().with("onboarding", "false"));
    let service = RemoteConfigService::new(Arc::clone(&provider) as Arc<dyn RemoteConfigProvider>);
    let key = onboarding();
    service.prefetch(&[&key as &dyn RemoteKey]);

    let mut subscription: Subscription<Onboarding> = service.subscribe(&key).unwrap();
    assert_eq!(subscription.current(), Onboarding::Disabled);

    provider.stage("onboarding", "true");
    service.fetch().await.unwrap();
    assert_eq!(service.value::<Onboarding>(&key).unwrap(), Onboarding::Disabled);

    service.refresh();
    assert_eq!(subscription.changed().await.unwrap(), Onboarding::Enabled);
    assert_eq!(service.value::<Onboarding>(&key).unwrap(), Onboarding::Enabled);
}

#[tokio::test]
async fn offline_fetch_keeps_cached_values() {
    let provider = Arc::new(InMemoryProvider::new().with("onboarding", "true"));
    let service = RemoteConfigService::new(Arc::clone(&provider) as Arc<dyn RemoteConfigProvider>);
    let key = onboarding();
    assert!(service.value::<Onboarding>(&key).unwrap().is_enabled());

    provider.set_offline(true);
    assert!(service.fetch().await.is_err());
    assert!(service.value::<Onboarding>(&key).unwrap().is_enabled());
}
