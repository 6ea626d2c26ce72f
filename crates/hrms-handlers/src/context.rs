use hrms_core::{DocumentBucket, Tables};
use hrms_ports::{DynIdGenerator, DynIdentityProvider, DynItemStore};

/// Collaborators shared by every handler, built once at process start.
#[derive(Clone)]
pub struct HandlerContext {
    pub store: DynItemStore,
    pub identity: DynIdentityProvider,
    pub ids: DynIdGenerator,
    pub tables: Tables,
    pub documents: DocumentBucket,
}

impl HandlerContext {
    pub fn new(
        store: DynItemStore,
        identity: DynIdentityProvider,
        ids: DynIdGenerator,
        tables: Tables,
        documents: DocumentBucket,
    ) -> Self {
        Self {
            store,
            identity,
            ids,
            tables,
            documents,
        }
    }
}
