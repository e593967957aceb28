use super::*;
use serde_json::json;

struct EchoTag {
    arguments: String,
}

#[async_trait]
impl Tag for EchoTag {
    fn name(&self) -> &str {
        "echo"
    }

    async fn render(&self, context: &TagContext) -> Result<String, Error> {
        let title = context.variables["title"].as_str().unwrap_or_default();
        Ok(format!("[{}|{}]", self.arguments, title))
    }
}

fn echo_factory(arguments: &str) -> Result<Box<dyn Tag>, Error> {
    Ok(Box::new(EchoTag {
        arguments: arguments.to_string(),
    }))
}

#[test]
fn test_registry_starts_empty() {
    let registry = TagRegistry::new();

    assert!(registry.names().is_empty());
    assert!(!registry.contains("echo"));
}

#[test]
fn test_register_and_contains() {
    let mut registry = TagRegistry::new();

    registry.register("echo", echo_factory).unwrap();

    assert!(registry.contains("echo"));
    assert_eq!(registry.names(), vec!["echo"]);
}

#[test]
fn test_register_duplicate_name_fails() {
    let mut registry = TagRegistry::new();
    registry.register("echo", echo_factory).unwrap();

    let result = registry.register("echo", echo_factory);

    match result {
        Err(Error::DuplicateTag(name)) => assert_eq!(name, "echo"),
        other => panic!("Expected DuplicateTag error, got {other:?}"),
    }
}

#[test]
fn test_names_are_sorted() {
    let mut registry = TagRegistry::new();
    registry.register("zeta", echo_factory).unwrap();
    registry.register("alpha", echo_factory).unwrap();

    assert_eq!(registry.names(), vec!["alpha", "zeta"]);
}

#[test]
fn test_create_unknown_tag_fails() {
    let registry = TagRegistry::new();

    let result = registry.create("missing", "");

    assert!(matches!(result, Err(Error::UnknownTag(name)) if name == "missing"));
}

#[test]
fn test_create_propagates_factory_error() {
    let mut registry = TagRegistry::new();
    registry
        .register("broken", |_: &str| -> Result<Box<dyn Tag>, Error> {
            Err(Error::Render {
                message: "cannot build".to_string(),
            })
        })
        .unwrap();

    let result = registry.create("broken", "");

    assert!(matches!(result, Err(Error::Render { .. })));
}

#[tokio::test]
async fn test_created_tag_receives_raw_arguments_and_context() {
    let mut registry = TagRegistry::new();
    registry.register("echo", echo_factory).unwrap();

    let tag = registry.create("echo", " some args ").unwrap();
    let context = TagContext::new(json!({ "title": "Home" }));

    assert_eq!(tag.name(), "echo");
    assert_eq!(tag.render(&context).await.unwrap(), "[ some args |Home]");
}

#[test]
fn test_registry_debug_lists_tag_names() {
    let mut registry = TagRegistry::new();
    registry.register("echo", echo_factory).unwrap();

    let debug_output = format!("{:?}", registry);

    assert!(debug_output.contains("TagRegistry"));
    assert!(debug_output.contains("echo"));
}
