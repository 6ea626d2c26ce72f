use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use hrms_core::{
    AuthTokens, DocumentBucket, IdentityError, Item, ItemKey, StoreError, TableSchema, Tables,
};
use hrms_ports::{IdentityProvider, ItemStore, SequentialIdGenerator};
use hrms_storage_memory::InMemoryItemStore;

use crate::HandlerContext;

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
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
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

/// Identity provider whose outcomes are set up front by each test.
#[derive(Default)]
pub struct ScriptedIdentity {
    pub calls: Mutex<Vec<String>>,
    pub sign_up: Option<IdentityError>,
    pub authenticate: Option<IdentityError>,
    pub confirm: Option<IdentityError>,
    pub resend: Option<IdentityError>,
    pub subject: Option<String>,
}

impl ScriptedIdentity {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String, outcome: &Option<IdentityError>) -> Result<(), IdentityError> {
        self.calls.lock().expect("calls lock").push(call);
        match outcome {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), IdentityError> {
        self.record(format!("sign_up:{email}:{password}"), &self.sign_up)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError> {
        self.record(format!("authenticate:{email}:{password}"), &self.authenticate)?;
        Ok(AuthTokens {
            id_token: "id-token".to_string(),
            access_token: "access-token".to_string(),
            refresh_token: Some("refresh-token".to_string()),
            subject: self.subject.clone(),
        })
    }

    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError> {
        self.record(format!("confirm:{email}:{code}"), &self.confirm)
    }

    async fn resend_confirmation_code(&self, email: &str) -> Result<(), IdentityError> {
        self.record(format!("resend:{email}"), &self.resend)
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

pub fn store_context() -> (Arc<SpyStore>, HandlerContext) {
    let store = Arc::new(SpyStore::default());
    let ctx = context(store.clone(), Arc::new(ScriptedIdentity::default()));
    (store, ctx)
}
