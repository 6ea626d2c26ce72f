use async_trait::async_trait;
use tracing::{field, Instrument};

use hrms_core::{AuthTokens, IdentityError, Item, ItemKey, StoreError, TableSchema};
use hrms_ports::{DynIdentityProvider, DynItemStore, IdentityProvider, ItemStore};

use crate::telemetry::annotate_span_with_trace_ids;

/// A thin wrapper around a `DynItemStore` that creates a tracing span for each storage call.
///
/// Request spans opened by the HTTP layer extend through the handlers down into
/// persistence calls.
pub struct ObservedItemStore {
    inner: DynItemStore,
    db_system: String,
}

impl ObservedItemStore {
    pub fn new(inner: DynItemStore, db_system: impl Into<String>) -> Self {
        Self {
            inner,
            db_system: db_system.into(),
        }
    }

    fn span(&self, operation: &'static str, table: &str) -> tracing::Span {
        let span = tracing::info_span!(
            "db",
            trace_id = field::Empty,
            span_id = field::Empty,
            db_system = %self.db_system,
            db_operation = operation,
            db_table = %table
        );
        annotate_span_with_trace_ids(&span);
        span
    }
}

#[async_trait]
impl ItemStore for ObservedItemStore {
    async fn init(&self) -> Result<(), StoreError> {
        let span = self.span("init", "");
        async move { self.inner.init().await }
            .instrument(span)
            .await
    }

    async fn put_item(&self, table: &TableSchema, item: &Item) -> Result<(), StoreError> {
        let span = self.span("put_item", &table.name);
        async move { self.inner.put_item(table, item).await }
            .instrument(span)
            .await
    }

    async fn get_item(
        &self,
        table: &TableSchema,
        key: &ItemKey,
    ) -> Result<Option<Item>, StoreError> {
        let span = tracing::info_span!(
            "db",
            trace_id = field::Empty,
            span_id = field::Empty,
            db_system = %self.db_system,
            db_operation = "get_item",
            db_table = %table.name,
            partition = %key.partition,
            found = field::Empty
        );
        annotate_span_with_trace_ids(&span);
        async move {
            let item = self.inner.get_item(table, key).await?;
            tracing::Span::current().record("found", item.is_some());
            Ok::<_, StoreError>(item)
        }
        .instrument(span)
        .await
    }

    async fn query_partition(
        &self,
        table: &TableSchema,
        partition: &str,
    ) -> Result<Vec<Item>, StoreError> {
        let span = tracing::info_span!(
            "db",
            trace_id = field::Empty,
            span_id = field::Empty,
            db_system = %self.db_system,
            db_operation = "query_partition",
            db_table = %table.name,
            partition = %partition,
            item_count = field::Empty
        );
        annotate_span_with_trace_ids(&span);
        async move {
            let items = self.inner.query_partition(table, partition).await?;
            tracing::Span::current().record("item_count", items.len());
            Ok::<_, StoreError>(items)
        }
        .instrument(span)
        .await
    }

    async fn healthcheck(&self) -> Result<(), StoreError> {
        let span = self.span("healthcheck", "");
        async move { self.inner.healthcheck().await }
            .instrument(span)
            .await
    }
}

/// Identity provider wrapper that opens an `identity` span per call.
///
/// Passwords and codes never reach the span; only the operation and its outcome do.
pub struct ObservedIdentityProvider {
    inner: DynIdentityProvider,
    provider: String,
}

impl ObservedIdentityProvider {
    pub fn new(inner: DynIdentityProvider, provider: impl Into<String>) -> Self {
        Self {
            inner,
            provider: provider.into(),
        }
    }

    fn span(&self, operation: &'static str) -> tracing::Span {
        let span = tracing::info_span!(
            "identity",
            trace_id = field::Empty,
            span_id = field::Empty,
            identity_provider = %self.provider,
            identity_operation = operation,
            outcome = field::Empty
        );
        annotate_span_with_trace_ids(&span);
        span
    }
}

fn record_outcome<T>(result: &Result<T, IdentityError>) {
    let outcome = match result {
        Ok(_) => "ok".to_string(),
        Err(err) => err.to_string(),
    };
    tracing::Span::current().record("outcome", outcome.as_str());
}

#[async_trait]
impl IdentityProvider for ObservedIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), IdentityError> {
        let span = self.span("sign_up");
        async move {
            let result = self.inner.sign_up(email, password).await;
            record_outcome(&result);
            result
        }
        .instrument(span)
        .await
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError> {
        let span = self.span("authenticate");
        async move {
            let result = self.inner.authenticate(email, password).await;
            record_outcome(&result);
            result
        }
        .instrument(span)
        .await
    }

    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError> {
        let span = self.span("confirm_sign_up");
        async move {
            let result = self.inner.confirm_sign_up(email, code).await;
            record_outcome(&result);
            result
        }
        .instrument(span)
        .await
    }

    async fn resend_confirmation_code(&self, email: &str) -> Result<(), IdentityError> {
        let span = self.span("resend_confirmation_code");
        async move {
            let result = self.inner.resend_confirmation_code(email).await;
            record_outcome(&result);
            result
        }
        .instrument(span)
        .await
    }
}
