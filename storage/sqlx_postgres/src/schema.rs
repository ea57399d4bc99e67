use crate::repository::Repository;
use anyhow::Context;
use async_trait::async_trait;
use entities::schema::ColumnDetails;
use sqlx::FromRow;
use use_cases::schema::{SchemaRepo, TableColumn};

#[derive(FromRow)]
struct ColumnRow {
    table_name: String,
    column_name: String,
    data_type: String,
    is_nullable: String,
}

impl From<ColumnRow> for TableColumn {
    fn from(row: ColumnRow) -> Self {
        TableColumn {
            table_name: row.table_name,
            column: ColumnDetails {
                column_name: row.column_name,
                data_type: row.data_type,
                is_nullable: row.is_nullable,
            },
        }
    }
}

#[async_trait]
impl SchemaRepo for Repository {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn list_base_tables(&self) -> anyhow::Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_type = 'BASE TABLE'
              AND table_schema NOT IN ('pg_catalog', 'information_schema')
            ORDER BY table_name
            "#,
        )
        .fetch_all(self.pool())
        .await
        .context("Failed to list base tables")
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn list_columns(&self, tables: &[String]) -> anyhow::Result<Vec<TableColumn>> {
        let rows = sqlx::query_as::<_, ColumnRow>(
            r#"
            SELECT table_name::text AS table_name,
                   column_name::text AS column_name,
                   data_type::text AS data_type,
                   is_nullable::text AS is_nullable
            FROM information_schema.columns
            WHERE table_schema NOT IN ('pg_catalog', 'information_schema')
              AND table_name::text = ANY($1)
            ORDER BY table_name, ordinal_position
            "#,
        )
        .bind(tables.to_vec())
        .fetch_all(self.pool())
        .await
        .context("Failed to list table columns")?;

        Ok(rows.into_iter().map(TableColumn::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::Repository;
    use use_cases::schema::SchemaRepo;

    #[tokio::test]
    #[ignore = "requires a running Postgres instance"]
    async fn test_migrated_tables_are_described() {
        let repository = Repository::new_test_repo().await;

        let tables = repository.list_base_tables().await.unwrap();
        for table in ["members", "parcs_locations", "scores", "subscriptions", "tokens"] {
            assert!(tables.iter().any(|name| name == table), "{table} missing");
        }

        let columns = repository
            .list_columns(&["tokens".to_string()])
            .await
            .unwrap();
        let names: Vec<_> = columns
            .iter()
            .map(|column| column.column.column_name.as_str())
            .collect();
        assert_eq!(names, vec!["id", "member_id", "access_id"]);
        assert_eq!(columns[2].column.is_nullable, "YES");
    }
}
