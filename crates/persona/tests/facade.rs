use persona::domain::config::ApiConfig;

#[test]
fn init_returns_people_slice() {
    let slices = persona::init(&ApiConfig::default()).expect("init");
    let names: Vec<&str> = slices.iter().map(|slice| slice.name).collect();
    assert_eq!(names, ["People"]);
}

#[test]
fn people_feature_is_always_enabled() {
    assert!(persona::features::is_enabled("people"));
    assert!(!persona::features::is_enabled("licensing"));
}

#[cfg(feature = "server")]
#[test]
fn api_router_exposes_system_and_people_paths() {
    let (_, api) = persona::server::router::api_router::<()>().split_for_parts();
    for path in ["/", "/health", "/person/new", "/person/{person_id}"] {
        assert!(api.paths.paths.contains_key(path), "{path} missing");
    }
}
