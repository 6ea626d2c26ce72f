use async_trait::async_trait;
use hrms_core::{Item, ItemKey, StoreError, TableSchema};
use hrms_ports::ItemStore;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Postgres, Sqlite};
use std::borrow::Cow;
use std::path::PathBuf;

#[derive(Clone, Debug)]
enum DatabasePool {
    Sqlite(Pool<Sqlite>),
    Postgres(Pool<Postgres>),
}

/// Item store over a single SQL table (SQLite/Postgres) using SQLx.
///
/// Every logical table shares `hrms_items`; rows are keyed by
/// `(table_name, partition_key, sort_key)` and carry the item as JSON. The `seq` column
/// records first insertion, which fixes partition query order.
pub struct SqlxItemStore {
    pool: DatabasePool,
}

impl SqlxItemStore {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = if database_url.starts_with("postgres") {
            DatabasePool::Postgres(Pool::<Postgres>::connect(database_url).await?)
        } else if database_url.starts_with("sqlite::memory:") {
            // Each in-memory connection is its own database; pin the pool to one.
            DatabasePool::Sqlite(
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect(database_url)
                    .await?,
            )
        } else {
            // Best-effort: if we can't create the parent directory or file, sqlx will surface
            // the underlying error on connect.
            if let Some(path) = sqlite_db_path(database_url) {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        let _ = std::fs::create_dir_all(parent);
                    }
                }

                if !path.as_os_str().is_empty() && !path.exists() {
                    let _ = std::fs::File::create(&path);
                }
            }

            let connect_url = sqlite_url_with_create_mode(database_url);
            DatabasePool::Sqlite(Pool::<Sqlite>::connect(connect_url.as_ref()).await?)
        };

        Ok(Self { pool })
    }

    async fn init_sqlx(&self) -> Result<(), sqlx::Error> {
        match &self.pool {
            DatabasePool::Sqlite(pool) => {
                sqlx::query(
                    r#"
                    CREATE TABLE IF NOT EXISTS hrms_items (
                        seq INTEGER PRIMARY KEY AUTOINCREMENT,
                        table_name TEXT NOT NULL,
                        partition_key TEXT NOT NULL,
                        sort_key TEXT NOT NULL DEFAULT '',
                        body TEXT NOT NULL,
                        UNIQUE (table_name, partition_key, sort_key)
                    );
                    "#,
                )
                .execute(pool)
                .await?;
                sqlx::query(
                    r#"CREATE INDEX IF NOT EXISTS idx_hrms_items_partition ON hrms_items(table_name, partition_key, seq);"#,
                )
                .execute(pool)
                .await?;
            }
            DatabasePool::Postgres(pool) => {
                sqlx::query(
                    r#"
                    CREATE TABLE IF NOT EXISTS hrms_items (
                        seq BIGSERIAL PRIMARY KEY,
                        table_name TEXT NOT NULL,
                        partition_key TEXT NOT NULL,
                        sort_key TEXT NOT NULL DEFAULT '',
                        body TEXT NOT NULL,
                        UNIQUE (table_name, partition_key, sort_key)
                    );
                    "#,
                )
                .execute(pool)
                .await?;
                sqlx::query(
                    r#"CREATE INDEX IF NOT EXISTS idx_hrms_items_partition ON hrms_items(table_name, partition_key, seq);"#,
                )
                .execute(pool)
                .await?;
            }
        }

        Ok(())
    }
}

fn encode(item: &Item) -> Result<String, StoreError> {
    serde_json::to_string(item).map_err(StoreError::decode)
}

fn decode(body: &str) -> Result<Item, StoreError> {
    serde_json::from_str(body).map_err(StoreError::decode)
}

#[async_trait]
impl ItemStore for SqlxItemStore {
    async fn init(&self) -> Result<(), StoreError> {
        self.init_sqlx().await.map_err(Into::into)
    }

    async fn healthcheck(&self) -> Result<(), StoreError> {
        // Keep readiness cheap: don't re-run the schema bootstrap.
        match &self.pool {
            DatabasePool::Sqlite(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
            DatabasePool::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
        }

        Ok(())
    }

    async fn put_item(&self, table: &TableSchema, item: &Item) -> Result<(), StoreError> {
        let key = table.key_of(item)?;
        let sort = key.sort.unwrap_or_default();
        let body = encode(item)?;

        match &self.pool {
            DatabasePool::Sqlite(pool) => {
                sqlx::query(
                    r#"
                    INSERT INTO hrms_items (table_name, partition_key, sort_key, body)
                    VALUES (?, ?, ?, ?)
                    ON CONFLICT (table_name, partition_key, sort_key) DO UPDATE SET body = excluded.body
                    "#,
                )
                .bind(&table.name)
                .bind(&key.partition)
                .bind(&sort)
                .bind(&body)
                .execute(pool)
                .await?;
            }
            DatabasePool::Postgres(pool) => {
                sqlx::query(
                    r#"
                    INSERT INTO hrms_items (table_name, partition_key, sort_key, body)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (table_name, partition_key, sort_key) DO UPDATE SET body = EXCLUDED.body
                    "#,
                )
                .bind(&table.name)
                .bind(&key.partition)
                .bind(&sort)
                .bind(&body)
                .execute(pool)
                .await?;
            }
        }

        Ok(())
    }

    async fn get_item(
        &self,
        table: &TableSchema,
        key: &ItemKey,
    ) -> Result<Option<Item>, StoreError> {
        let sort = key.sort.as_deref().unwrap_or_default();
        let body = match &self.pool {
            DatabasePool::Sqlite(pool) => {
                sqlx::query_scalar::<_, String>(
                    "SELECT body FROM hrms_items WHERE table_name = ? AND partition_key = ? AND sort_key = ?",
                )
                .bind(&table.name)
                .bind(&key.partition)
                .bind(sort)
                .fetch_optional(pool)
                .await?
            }
            DatabasePool::Postgres(pool) => {
                sqlx::query_scalar::<_, String>(
                    "SELECT body FROM hrms_items WHERE table_name = $1 AND partition_key = $2 AND sort_key = $3",
                )
                .bind(&table.name)
                .bind(&key.partition)
                .bind(sort)
                .fetch_optional(pool)
                .await?
            }
        };

        body.as_deref().map(decode).transpose()
    }

    async fn query_partition(
        &self,
        table: &TableSchema,
        partition: &str,
    ) -> Result<Vec<Item>, StoreError> {
        let bodies = match &self.pool {
            DatabasePool::Sqlite(pool) => {
                sqlx::query_scalar::<_, String>(
                    "SELECT body FROM hrms_items WHERE table_name = ? AND partition_key = ? ORDER BY seq",
                )
                .bind(&table.name)
                .bind(partition)
                .fetch_all(pool)
                .await?
            }
            DatabasePool::Postgres(pool) => {
                sqlx::query_scalar::<_, String>(
                    "SELECT body FROM hrms_items WHERE table_name = $1 AND partition_key = $2 ORDER BY seq",
                )
                .bind(&table.name)
                .bind(partition)
                .fetch_all(pool)
                .await?
            }
        };

        bodies.iter().map(|body| decode(body)).collect()
    }
}

fn sqlite_db_path(database_url: &str) -> Option<PathBuf> {
    let rest = database_url.strip_prefix("sqlite:")?;
    if rest.starts_with(":memory:") {
        return None;
    }

    // Normalize URL-ish forms into a filesystem-ish path by reducing multiple
    // leading slashes to a single leading slash.
    let rest = if let Some(stripped) = rest.strip_prefix("//") {
        if stripped.starts_with('/') {
            stripped
        } else {
            &rest[1..]
        }
    } else {
        rest
    };

    let path_part = rest.split('?').next().unwrap_or(rest);
    if path_part.is_empty() {
        return None;
    }

    Some(PathBuf::from(path_part))
}

fn sqlite_url_with_create_mode(database_url: &str) -> Cow<'_, str> {
    if !database_url.starts_with("sqlite:") || database_url.starts_with("sqlite::memory:") {
        return Cow::Borrowed(database_url);
    }

    // SQLite will not create a missing database file unless asked to.
    if database_url.contains("mode=") {
        return Cow::Borrowed(database_url);
    }

    let sep = if database_url.contains('?') { '&' } else { '?' };
    Cow::Owned(format!("{database_url}{sep}mode=rwc"))
}
