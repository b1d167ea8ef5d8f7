//! Integration tests for the full slug lifecycle: registration, update
//! orchestration, persistence callbacks, and declarative configuration.

use sluggable::{
    lowercase, reset, update_slugs, JsonRecord, SlugConfig, SlugOptions, SlugRecord,
    SlugRegistry, SlugUpdater, SourceMode,
};

/// Minimal stand-in for a persisted entity, with a record of every
/// single-column write the orchestrator asks for.
#[derive(Default)]
struct Article {
    title: String,
    author: String,
    slug: String,
    byline_slug: String,
    column_updates: Vec<(String, String)>,
}

impl SlugRecord for Article {
    fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "title" => &self.title,
            "author" => &self.author,
            "slug" => &self.slug,
            "byline_slug" => &self.byline_slug,
            _ => return None,
        };
        if value.is_empty() {
            None
        } else {
            Some(value.clone())
        }
    }

    fn set_field(&mut self, name: &str, value: &str) {
        match name {
            "slug" => self.slug = value.to_string(),
            "byline_slug" => self.byline_slug = value.to_string(),
            _ => {}
        }
    }
}

fn article_registry() -> SlugRegistry<Article> {
    let mut registry = SlugRegistry::new();

    registry
        .register(
            SlugOptions::new()
                .source(|article: &Article| article.title.clone())
                .preprocessor(lowercase),
        )
        .unwrap();

    registry
        .register(
            SlugOptions::new()
                .attribute("byline_slug")
                .source(|article: &Article| format!("{} {}", article.title, article.author))
                .preprocessor(lowercase)
                .separator("_")
                .allow_underscores(true),
        )
        .unwrap();

    registry
}

fn run_lifecycle(article: &mut Article, registry: &SlugRegistry<Article>) -> Vec<String> {
    let mut updates = std::mem::take(&mut article.column_updates);
    let changed = SlugUpdater::new()
        .run(article, registry, |attribute, value| {
            updates.push((attribute.to_string(), value.to_string()));
            Ok::<(), String>(())
        })
        .unwrap();
    article.column_updates = updates;
    changed
}

#[test]
fn test_create_then_update_lifecycle() {
    let registry = article_registry();
    let mut article = Article {
        title: "Hello World!!!".to_string(),
        author: "Jo March".to_string(),
        ..Article::default()
    };

    // After create: both slugs generated, one column write each.
    let changed = run_lifecycle(&mut article, &registry);
    assert_eq!(changed, vec!["slug".to_string(), "byline_slug".to_string()]);
    assert_eq!(article.slug, "hello-world");
    assert_eq!(article.byline_slug, "hello_world_jo_march");
    assert_eq!(
        article.column_updates,
        vec![
            ("slug".to_string(), "hello-world".to_string()),
            ("byline_slug".to_string(), "hello_world_jo_march".to_string()),
        ]
    );

    // Saving again without changes: nothing is written.
    article.column_updates.clear();
    let changed = run_lifecycle(&mut article, &registry);
    assert!(changed.is_empty());
    assert!(article.column_updates.is_empty());

    // After updating the source field: both slugs follow.
    article.title = "Updated Title".to_string();
    let changed = run_lifecycle(&mut article, &registry);
    assert_eq!(changed.len(), 2);
    assert_eq!(article.slug, "updated-title");
    assert_eq!(article.byline_slug, "updated_title_jo_march");
}

#[test]
fn test_manual_trigger_reports_whether_anything_changed() {
    let registry = article_registry();
    let mut article = Article {
        title: "One Shot".to_string(),
        author: "A B".to_string(),
        ..Article::default()
    };

    let changed = update_slugs(&mut article, &registry, |_, _| Ok::<(), String>(())).unwrap();
    assert!(changed);

    let changed = update_slugs(&mut article, &registry, |_, _| Ok::<(), String>(())).unwrap();
    assert!(!changed);
}

#[test]
fn test_reset_then_run_regenerates() {
    let registry = article_registry();
    let mut article = Article {
        title: "Steady Title".to_string(),
        author: "A B".to_string(),
        ..Article::default()
    };

    run_lifecycle(&mut article, &registry);
    article.column_updates.clear();

    reset(&mut article, None);
    assert!(article.slug.is_empty());

    let changed = run_lifecycle(&mut article, &registry);
    assert_eq!(changed, vec!["slug".to_string()]);
    assert_eq!(article.slug, "steady-title");
}

#[test]
fn test_generate_if_empty_respects_manual_slug() {
    let registry = article_registry();
    let mut article = Article {
        title: "Real Title".to_string(),
        author: "A B".to_string(),
        slug: "My Custom Slug".to_string(),
        ..Article::default()
    };

    SlugUpdater::with_mode(SourceMode::GenerateIfEmpty)
        .run(&mut article, &registry, |_, _| Ok::<(), String>(()))
        .unwrap();

    // The manual value is normalized, not replaced from the title.
    assert_eq!(article.slug, "my-custom-slug");
}

#[test]
fn test_subtype_inherits_configuration_independently() {
    let parent = article_registry();

    let mut child: SlugRegistry<Article> = SlugRegistry::new();
    child.copy_from(&parent);
    assert_eq!(child.attributes(), parent.attributes());

    // Reconfigure the child; the parent keeps its own entry.
    child
        .register(
            SlugOptions::new()
                .source(|article: &Article| article.author.clone())
                .preprocessor(lowercase)
                .separator("."),
        )
        .unwrap();

    let mut article = Article {
        title: "Shared Title".to_string(),
        author: "Jo March".to_string(),
        ..Article::default()
    };
    run_lifecycle(&mut article, &child);
    assert_eq!(article.slug, "jo.march");

    let mut article = Article {
        title: "Shared Title".to_string(),
        author: "Jo March".to_string(),
        ..Article::default()
    };
    run_lifecycle(&mut article, &parent);
    assert_eq!(article.slug, "shared-title");
}

#[test]
fn test_yaml_config_drives_json_records() {
    let yaml = r#"
slugs:
  - source: title
    preprocessor: lowercase
  - attribute: code_slug
    source: code
    separator: "_"
    allow_underscores: true
"#;

    let config = SlugConfig::from_yaml_str(yaml).unwrap();
    let mut registry: SlugRegistry<JsonRecord> = SlugRegistry::new();
    config.apply(&mut registry).unwrap();

    let mut record = JsonRecord::new()
        .with_field("title", "Launch Day: The Recap")
        .with_field("code", "REV 2");

    let mut calls = Vec::new();
    config
        .updater()
        .run(&mut record, &registry, |attribute, value| {
            calls.push((attribute.to_string(), value.to_string()));
            Ok::<(), String>(())
        })
        .unwrap();

    assert_eq!(
        record.field("slug"),
        Some("launch-day-the-recap".to_string())
    );
    assert_eq!(record.field("code_slug"), Some("REV_2".to_string()));
    assert_eq!(calls.len(), 2);
}

#[test]
fn test_persistence_failure_stops_the_run() {
    let registry = article_registry();
    let mut article = Article {
        title: "Doomed".to_string(),
        author: "A B".to_string(),
        ..Article::default()
    };

    let result = SlugUpdater::new().run(&mut article, &registry, |_, _| {
        Err::<(), String>("disk full".to_string())
    });

    assert_eq!(result, Err("disk full".to_string()));
    // First attribute was set locally before its failed write; the second
    // was never reached.
    assert_eq!(article.slug, "doomed");
    assert!(article.byline_slug.is_empty());
}
