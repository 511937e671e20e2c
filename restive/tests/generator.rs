//! Route generation from resource configuration.

mod common;

use common::OBJECT_ID;
use restive::{
    ActionTemplate, ConfigUpdate, ConfigurationError, Method, RESOURCE_PLACEHOLDER,
    ResourceConfig, ResourceOptions, RouteFactory, RouteDraft, RouteSpec, keys,
    resource::generate,
};

fn actions(routes: &[RouteSpec]) -> Vec<&str> {
    routes.iter().map(RouteSpec::action).collect()
}

#[test]
fn test_generation_is_deterministic() {
    let config = ResourceConfig::default();
    let options = ResourceOptions::new()
        .scope("/api")
        .action("search", ActionTemplate::new("/{resource}/search", Method::GET));

    let first = generate(&config, "posts", &options).unwrap();
    let second = generate(&config, "posts", &options).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.iter().map(ToString::to_string).collect::<Vec<_>>(),
        second.iter().map(ToString::to_string).collect::<Vec<_>>()
    );
}

#[test]
fn test_filter_algebra() {
    let config = ResourceConfig::default();

    let routes = generate(&config, "posts", &ResourceOptions::new().except(["delete"])).unwrap();
    assert_eq!(
        actions(&routes),
        ["index", "show", "add", "create", "edit", "update"]
    );

    let routes = generate(&config, "posts", &ResourceOptions::new().only(["index", "show"])).unwrap();
    assert_eq!(actions(&routes), ["index", "show"]);

    let routes = generate(
        &config,
        "posts",
        &ResourceOptions::new().only(["index"]).except(["index"]),
    )
    .unwrap();
    assert!(routes.is_empty());
}

#[test]
fn test_only_keeps_configured_order() {
    let routes = generate(
        &ResourceConfig::default(),
        "posts",
        &ResourceOptions::new().only(["delete", "index"]),
    )
    .unwrap();
    assert_eq!(actions(&routes), ["index", "delete"]);
}

#[test]
fn test_templates_carry_the_plural_resource() {
    for name in ["post", "Post", "posts"] {
        let routes = generate(&ResourceConfig::default(), name, &ResourceOptions::new()).unwrap();
        for route in &routes {
            assert!(route.template().contains("/posts"), "{route}");
            assert!(!route.template().contains(RESOURCE_PLACEHOLDER), "{route}");
            assert_eq!(route.controller(), "posts");
        }
    }
}

#[test]
fn test_irregular_resource_names() {
    for name in ["person", "Person", "people"] {
        let routes = generate(
            &ResourceConfig::default(),
            name,
            &ResourceOptions::new().only(["show"]),
        )
        .unwrap();
        assert_eq!(routes[0].template(), "(/v{version})?/people/{id}(.{type})?");
        assert_eq!(routes[0].controller(), "people");
    }
}

#[test]
fn test_id_constraint() {
    let routes = generate(
        &ResourceConfig::default(),
        "posts",
        &ResourceOptions::new().only(["show"]),
    )
    .unwrap();
    let show = &routes[0];

    assert!(show.accepts("id", OBJECT_ID));
    assert!(show.accepts("id", "12345"));
    assert!(!show.accepts("id", "abc"));
    assert!(!show.accepts("id", "12345x"));
}

#[test]
fn test_bindings() {
    let routes = generate(
        &ResourceConfig::default(),
        "posts",
        &ResourceOptions::new().only(["update"]),
    )
    .unwrap();
    let params = routes[0].params();

    assert_eq!(params.controller(), Some("posts"));
    assert_eq!(params.action(), Some("update"));
    assert_eq!(params.get(keys::METHOD), Some("PUT"));
    assert_eq!(routes[0].method(), &Method::PUT);
}

#[test]
fn test_optional_fragments_expand() {
    let routes = generate(
        &ResourceConfig::default(),
        "posts",
        &ResourceOptions::new().only(["show"]),
    )
    .unwrap();

    assert_eq!(
        routes[0].variants(),
        [
            "/posts/{id}",
            "/v{version}/posts/{id}",
            "/posts/{id}.{type}",
            "/v{version}/posts/{id}.{type}",
        ]
    );
}

#[test]
fn test_empty_resource_name() {
    let err = generate(&ResourceConfig::default(), "", &ResourceOptions::new()).unwrap_err();
    assert!(matches!(err, ConfigurationError::EmptyResourceName));
}

#[test]
fn test_configure_merges_over_defaults() {
    let mut config = ResourceConfig::default();
    config
        .configure(
            ConfigUpdate::new()
                .action("index", ActionTemplate::new("/{resource}/all", Method::GET))
                .action("feed", ActionTemplate::new("/{resource}/feed", Method::GET).unversioned()),
        )
        .unwrap();

    let routes = generate(&config, "posts", &ResourceOptions::new()).unwrap();
    assert_eq!(routes.len(), 8);
    assert_eq!(routes[0].template(), "(/v{version})?/posts/all");
    assert_eq!(routes[7].template(), "/posts/feed");

    let snapshot = config.snapshot();
    assert_eq!(snapshot.types.len(), 8);
}

#[derive(Debug)]
struct ApiPrefix;

impl RouteFactory for ApiPrefix {
    fn build(&self, mut draft: RouteDraft) -> Result<RouteSpec, ConfigurationError> {
        draft.template = format!("/api{}", draft.template);
        draft.params.insert("api", "true");
        Ok(RouteSpec::new(draft))
    }
}

#[test]
fn test_route_factory_is_replaceable() {
    let mut config = ResourceConfig::default();
    config
        .configure(ConfigUpdate::new().route_factory(ApiPrefix))
        .unwrap();

    let routes = generate(&config, "posts", &ResourceOptions::new().only(["index"])).unwrap();
    assert_eq!(routes[0].template(), "/api(/v{version})?/posts(.{type})?");
    assert_eq!(routes[0].params().get("api"), Some("true"));
}

#[test]
fn test_options_load_from_toml() {
    let options: ResourceOptions = toml::from_str(
        r#"
        except = ["delete"]
        scope = "/admin"

        [types.publish]
        template = "/{resource}/{id}/publish"
        method = "post"
        constraints = { id = "[0-9]+" }
        "#,
    )
    .unwrap();

    let routes = generate(&ResourceConfig::default(), "article", &options).unwrap();
    let publish = routes.last().unwrap();

    assert_eq!(routes.len(), 7);
    assert_eq!(publish.action(), "publish");
    assert_eq!(publish.method(), &Method::POST);
    assert_eq!(publish.template(), "/admin(/v{version})?/articles/{id}/publish");
    assert!(publish.accepts("id", "7"));
}
