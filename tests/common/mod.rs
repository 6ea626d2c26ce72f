#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use hrms_backend::handlers::HandlerContext;
use hrms_backend::models::{
    AttributeValue, AuthTokens, DocumentBucket, IdentityError, Item, ItemKey, StoreError,
    TableSchema, Tables,
};
use hrms_backend::ports::{IdentityProvider, ItemStore, SequentialIdGenerator};
use hrms_storage_memory::InMemoryItemStore;

fn attr(pairs: &[(&str, &str)]) -> Item {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), AttributeValue::string(*v)))
        .collect()
}

/// A minimal contract test suite that every `ItemStore` backend must satisfy.
///
/// This keeps backend parity honest (in-memory, SQLx, and any future backends).
pub async fn run_item_store_contract(
    store: &dyn ItemStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let tables = Tables::default();

    // Profile roundtrip (partition key only)
    let profile = attr(&[
        ("userId", "user_1"),
        ("empId", "E-1"),
        ("name", "Ada"),
        ("email", "ada@example.com"),
        ("department", "Engineering"),
    ]);
    store.put_item(&tables.profiles, &profile).await?;

    let fetched = store
        .get_item(&tables.profiles, &ItemKey::partition("user_1"))
        .await?
        .ok_or_else(|| std::io::Error::other("profile should exist"))?;
    assert_eq!(fetched, profile);

    assert!(store
        .get_item(&tables.profiles, &ItemKey::partition("user_2"))
        .await?
        .is_none());

    // Full replacement on the same key
    let replacement = attr(&[("userId", "user_1"), ("name", "Ada L.")]);
    store.put_item(&tables.profiles, &replacement).await?;
    let fetched = store
        .get_item(&tables.profiles, &ItemKey::partition("user_1"))
        .await?
        .ok_or_else(|| std::io::Error::other("profile should still exist"))?;
    assert_eq!(fetched, replacement);

    // Partition queries: scoped, ordered by first insertion, overwrites keep position
    for (user, leave) in [("user_1", "l1"), ("user_2", "l2"), ("user_1", "l3")] {
        store
            .put_item(
                &tables.leaves,
                &attr(&[("userId", user), ("leaveId", leave), ("status", "Pending")]),
            )
            .await?;
    }
    store
        .put_item(
            &tables.leaves,
            &attr(&[("userId", "user_1"), ("leaveId", "l1"), ("status", "Approved")]),
        )
        .await?;

    let leaves = store.query_partition(&tables.leaves, "user_1").await?;
    let summary: Vec<(String, String)> = leaves
        .iter()
        .map(|item| {
            (
                item["leaveId"].as_str().unwrap_or_default().to_string(),
                item["status"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("l1".to_string(), "Approved".to_string()),
            ("l3".to_string(), "Pending".to_string()),
        ]
    );

    assert!(store
        .query_partition(&tables.leaves, "nobody")
        .await?
        .is_empty());

    // Tables are isolated even when keys collide
    store
        .put_item(
            &tables.feedback,
            &attr(&[("userId", "user_1"), ("feedbackId", "l1"), ("feedback", "hi")]),
        )
        .await?;
    assert_eq!(store.query_partition(&tables.leaves, "user_1").await?.len(), 2);
    assert_eq!(store.query_partition(&tables.feedback, "user_1").await?.len(), 1);

    // Numbers survive as numbers
    let mut document = attr(&[
        ("userId", "user_1"),
        ("documentId", "d1"),
        ("fileName", "cv.pdf"),
    ]);
    document.insert("fileSize".to_string(), AttributeValue::number(2048));
    store.put_item(&tables.documents, &document).await?;
    let fetched = store
        .get_item(&tables.documents, &ItemKey::with_sort("user_1", "d1"))
        .await?
        .ok_or_else(|| std::io::Error::other("document should exist"))?;
    assert_eq!(fetched["fileSize"].as_i64(), Some(2048));

    // Items missing a key attribute are rejected
    let keyless = attr(&[("userId", "user_1")]);
    assert!(store.put_item(&tables.leaves, &keyless).await.is_err());

    store.healthcheck().await?;
    Ok(())
}

/// In-memory store that counts every call and can be told to fail.
#[derive(Default)]
pub struct SpyStore {
    inner: InMemoryItemStore,
    calls: AtomicUsize,
    failure: Option<StoreError>,
}

impl SpyStore {
    pub fn failing(err: StoreError) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.failure.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl ItemStore for SpyStore {
    async fn init(&self) -> Result<(), StoreError> {
        self.record()?;
        self.inner.init().await
    }

    async fn put_item(&self, table: &TableSchema, item: &Item) -> Result<(), StoreError> {
        self.record()?;
        self.inner.put_item(table, item).await
    }

    async fn get_item(&self, table: &TableSchema, key: &ItemKey) -> Result<Option<Item>, StoreError> {
        self.record()?;
        self.inner.get_item(table, key).await
    }

    async fn query_partition(
        &self,
        table: &TableSchema,
        partition: &str,
    ) -> Result<Vec<Item>, StoreError> {
        self.record()?;
        self.inner.query_partition(table, partition).await
    }
}

/// Identity provider with outcomes fixed up front.
#[derive(Default)]
pub struct ScriptedIdentity {
    pub calls: Mutex<Vec<&'static str>>,
    pub sign_up: Option<IdentityError>,
    pub authenticate: Option<IdentityError>,
    pub confirm: Option<IdentityError>,
    pub resend: Option<IdentityError>,
    pub subject: Option<String>,
}

impl ScriptedIdentity {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(
        &self,
        call: &'static str,
        outcome: &Option<IdentityError>,
    ) -> Result<(), IdentityError> {
        self.calls.lock().expect("calls lock").push(call);
        outcome.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentity {
    async fn sign_up(&self, _email: &str, _password: &str) -> Result<(), IdentityError> {
        self.record("sign_up", &self.sign_up)
    }

    async fn authenticate(&self, _email: &str, _password: &str) -> Result<AuthTokens, IdentityError> {
        self.record("authenticate", &self.authenticate)?;
        Ok(AuthTokens {
            id_token: "id-token".to_string(),
            access_token: "access-token".to_string(),
            refresh_token: None,
            subject: self.subject.clone(),
        })
    }

    async fn confirm_sign_up(&self, _email: &str, _code: &str) -> Result<(), IdentityError> {
        self.record("confirm_sign_up", &self.confirm)
    }

    async fn resend_confirmation_code(&self, _email: &str) -> Result<(), IdentityError> {
        self.record("resend_confirmation_code", &self.resend)
    }
}

pub fn context(store: Arc<SpyStore>, identity: Arc<ScriptedIdentity>) -> HandlerContext {
    HandlerContext::new(
        store,
        identity,
        Arc::new(SequentialIdGenerator::new("id")),
        Tables::default(),
        DocumentBucket::default(),
    )
}
