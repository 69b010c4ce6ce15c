use api_factory::{
    ApiClient, ApiFactory, ApiInterface, BackendConfig, DiagnosticsFlag, FactoryError,
    NetworkConfig,
};
use std::sync::Arc;

struct RawApi {
    client: ApiClient,
}

impl ApiInterface for RawApi {
    fn bind(client: ApiClient) -> Self {
        Self { client }
    }
}

fn factory_with(flag: &DiagnosticsFlag) -> ApiFactory {
    ApiFactory::new(NetworkConfig::default(), Arc::new(flag.clone()))
}

#[test]
fn test_auto_keys_follow_registration_order() {
    let factory = factory_with(&DiagnosticsFlag::new(false));

    assert_eq!(factory.add("https://one.example.com").unwrap(), "0");
    assert_eq!(factory.add("https://two.example.com").unwrap(), "1");

    let second: RawApi = factory.create_by_index(1).unwrap();
    assert_eq!(second.client.base_url().as_str(), "https://two.example.com/");
}

#[test]
fn test_empty_registry_is_configuration_error() {
    let factory = factory_with(&DiagnosticsFlag::new(false));

    let err = factory.create::<RawApi>().err().unwrap();
    assert!(matches!(err, FactoryError::NoClients));
    assert!(err.is_configuration());
}

#[test]
fn test_unknown_key_is_lookup_miss() {
    let factory = factory_with(&DiagnosticsFlag::new(false));
    factory.add("https://one.example.com/").unwrap();

    let err = factory.create_by_key::<RawApi>("missing").err().unwrap();
    assert!(matches!(&err, FactoryError::ClientNotFound(key) if key == "missing"));
    assert!(err.is_lookup_miss());
}

#[test]
fn test_absent_base_url_rejected_without_registering() {
    let factory = factory_with(&DiagnosticsFlag::new(false));

    assert!(matches!(
        factory.add_optional(None),
        Err(FactoryError::EmptyBaseUrl)
    ));
    assert!(factory.is_empty());
}

#[test]
fn test_diagnostics_sampled_when_client_is_built() {
    let flag = DiagnosticsFlag::new(false);
    let factory = factory_with(&flag);

    factory.add("https://quiet.example.com/").unwrap();
    flag.set(true);
    factory.add_with_key("loud", "https://loud.example.com/").unwrap();

    assert!(!factory.client(0).unwrap().logs_traffic());
    assert!(factory.client("loud").unwrap().logs_traffic());
}

#[test]
fn test_register_backends_mixes_keys() {
    let factory = factory_with(&DiagnosticsFlag::new(false));
    let keys = factory
        .register_backends(&[
            BackendConfig {
                key: None,
                base_url: "https://api.example.com/".to_string(),
            },
            BackendConfig {
                key: Some("dev".to_string()),
                base_url: "https://dev.example.com/".to_string(),
            },
        ])
        .unwrap();

    assert_eq!(keys, vec!["0".to_string(), "dev".to_string()]);
    assert_eq!(factory.len(), 2);
}

#[test]
fn test_concurrent_registration_assigns_distinct_keys() {
    let factory = Arc::new(factory_with(&DiagnosticsFlag::new(false)));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let factory = Arc::clone(&factory);
            std::thread::spawn(move || {
                factory
                    .add(&format!("https://host{i}.example.com/"))
                    .unwrap()
            })
        })
        .collect();

    let mut keys: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    keys.sort_by_key(|key| key.parse::<usize>().unwrap());

    let expected: Vec<String> = (0..8).map(|i| i.to_string()).collect();
    assert_eq!(keys, expected);
}
