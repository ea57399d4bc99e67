use async_trait::async_trait;
use entities::schema::{ColumnDetails, TableSchemas};
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub table_name: String,
    pub column: ColumnDetails,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SchemaRepo: Send + Sync {
    async fn list_base_tables(&self) -> anyhow::Result<Vec<String>>;

    /// Columns of the given tables, in ordinal order within each table.
    async fn list_columns(&self, tables: &[String]) -> anyhow::Result<Vec<TableColumn>>;
}

#[async_trait]
pub trait SchemaInteractor: Send + Sync {
    async fn describe(&self) -> anyhow::Result<TableSchemas>;
}

pub struct SchemaInteractorImpl {
    repo: Arc<dyn SchemaRepo>,
}

impl SchemaInteractorImpl {
    pub fn new(repo: Arc<dyn SchemaRepo>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl SchemaInteractor for SchemaInteractorImpl {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn describe(&self) -> anyhow::Result<TableSchemas> {
        let tables = self.repo.list_base_tables().await?;
        let mut schemas: TableSchemas = tables
            .iter()
            .map(|table| (table.clone(), Vec::new()))
            .collect();

        if tables.is_empty() {
            return Ok(schemas);
        }

        for TableColumn { table_name, column } in self.repo.list_columns(&tables).await? {
            if let Some(columns) = schemas.get_mut(&table_name) {
                columns.push(column);
            }
        }
        tracing::info!(tables = schemas.len(), "Described database schema");
        Ok(schemas)
    }
}
