//! Integration tests for the generic-relation lookup chain.
//!
//! These exercise the registry and lookup service end-to-end with
//! in-memory model handles; database-backed handles are covered by
//! their own unit tests and require a live PostgreSQL instance.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use reperto_contenttypes::{
    AppError, ContentTypeRegistry, GenericLookup, Instance, ModelHandle, ModelMeta,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// In-memory model handle backed by a fixed record map.
#[derive(Debug)]
struct StaticModel {
    meta: ModelMeta,
    records: HashMap<i64, serde_json::Value>,
}

impl StaticModel {
    fn new(app_label: &str, model: &str) -> Self {
        Self {
            meta: ModelMeta::new(app_label, model),
            records: HashMap::new(),
        }
    }

    fn with_record(mut self, object_id: i64, fields: serde_json::Value) -> Self {
        self.records.insert(object_id, fields);
        self
    }
}

#[async_trait]
impl ModelHandle for StaticModel {
    fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    async fn get(&self, object_id: i64) -> anyhow::Result<Option<Instance>> {
        Ok(self.records.get(&object_id).map(|fields| Instance {
            object_id,
            app_label: self.meta.app_label.clone(),
            model: self.meta.model.clone(),
            fields: fields.clone(),
        }))
    }
}

/// Model handle whose storage always fails.
#[derive(Debug)]
struct BrokenModel {
    meta: ModelMeta,
}

#[async_trait]
impl ModelHandle for BrokenModel {
    fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    async fn get(&self, _object_id: i64) -> anyhow::Result<Option<Instance>> {
        anyhow::bail!("storage unavailable")
    }
}

fn build_lookup() -> GenericLookup {
    init_tracing();

    let registry = ContentTypeRegistry::new();
    registry.register(Arc::new(
        StaticModel::new("blog", "post")
            .with_record(1, serde_json::json!({"title": "First post"}))
            .with_record(2, serde_json::json!({"title": "Second post"})),
    ));
    registry.register(Arc::new(
        StaticModel::new("auth", "user").with_record(7, serde_json::json!({"name": "ada"})),
    ));
    registry.register(Arc::new(BrokenModel {
        meta: ModelMeta::new("legacy", "archive"),
    }));

    GenericLookup::new(registry)
}

#[test]
fn content_type_resolves_registered_pair() {
    let lookup = build_lookup();

    let descriptor = lookup.content_type("auth", "user").unwrap();
    assert_eq!(descriptor.app_label, "auth");
    assert_eq!(descriptor.model, "user");
}

#[test]
fn content_type_rejects_unregistered_pair() {
    let lookup = build_lookup();

    let err = lookup.content_type("auth", "group").unwrap_err();
    assert!(matches!(err, AppError::App(_)));
    assert_eq!(err.to_string(), "Invalid Content Type (auth:group)");
}

#[test]
fn content_type_matching_is_case_sensitive() {
    let lookup = build_lookup();

    let err = lookup.content_type("Auth", "user").unwrap_err();
    assert_eq!(err.to_string(), "Invalid Content Type (Auth:user)");
}

#[test]
fn model_resolves_handle_for_registered_pair() {
    let lookup = build_lookup();

    let handle = lookup.model("blog", "post").unwrap();
    assert_eq!(handle.meta().app_label, "blog");
    assert_eq!(handle.meta().model, "post");
}

#[tokio::test]
async fn instance_resolves_existing_record() {
    let lookup = build_lookup();

    let instance = lookup.instance("blog", "post", 2).await.unwrap();
    assert_eq!(instance.object_id, 2);
    assert_eq!(instance.app_label, "blog");
    assert_eq!(instance.model, "post");
    assert_eq!(instance.fields["title"], "Second post");
}

#[tokio::test]
async fn instance_rejects_missing_record() {
    let lookup = build_lookup();

    let err = lookup.instance("auth", "user", 99).await.unwrap_err();
    assert!(matches!(err, AppError::App(_)));
    assert_eq!(err.to_string(), "user Object with id 99 does not exists");
}

#[tokio::test]
async fn instance_rejects_unknown_content_type_before_storage() {
    let lookup = build_lookup();

    let err = lookup.instance("blog", "comment", 1).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid Content Type (blog:comment)");
}

#[tokio::test]
async fn storage_errors_propagate_as_internal() {
    let lookup = build_lookup();

    let err = lookup.instance("legacy", "archive", 1).await.unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));
}

#[tokio::test]
async fn handles_are_shared_across_lookup_clones() {
    let lookup = build_lookup();
    let clone = lookup.clone();

    let a = lookup.instance("auth", "user", 7).await.unwrap();
    let b = clone.instance("auth", "user", 7).await.unwrap();

    assert_eq!(a.fields["name"], b.fields["name"]);
}
