use mysql::prelude::Queryable;
use mysql::Conn;
use tracing::{error, trace};

use super::{CatalogIntrospector, CatalogSource};
use crate::prelude::ViewliftError;
use crate::schema::Column;

/// Introspector reading the MySQL `information_schema`
pub type MySqlIntrospector<'a> = CatalogIntrospector<MySqlCatalog<'a>>;

/// MySQL catalog queries over a borrowed connection
pub struct MySqlCatalog<'a> {
    conn: &'a mut Conn,
}

impl<'a> MySqlCatalog<'a> {
    pub fn new(conn: &'a mut Conn) -> Self {
        Self { conn }
    }
}

impl<'a> MySqlIntrospector<'a> {
    pub fn mysql(conn: &'a mut Conn) -> Self {
        CatalogIntrospector::new(MySqlCatalog::new(conn))
    }
}

impl CatalogSource for MySqlCatalog<'_> {
    /// Query all view names in a database
    fn views(&mut self, database: &str) -> Result<Vec<String>, ViewliftError> {
        trace!(database = ?database, "Querying views");

        let sql = r#"
            SELECT TABLE_NAME
            FROM information_schema.VIEWS
            WHERE TABLE_SCHEMA = ?
            ORDER BY TABLE_NAME
        "#;

        let views: Vec<String> = self.conn.exec(sql, (database,)).map_err(|e| {
            error!(database = ?database, error = ?e, "Failed to query views");
            ViewliftError::Introspection {
                database: database.to_string(),
                message: format!("Failed to query views: {}", e),
            }
        })?;

        trace!(views = ?views, "Views found");
        Ok(views)
    }

    /// Query all columns of a view
    fn columns(&mut self, database: &str, view: &str) -> Result<Vec<Column>, ViewliftError> {
        trace!(database = ?database, view = ?view, "Querying columns");

        let sql = r#"
            SELECT
                COLUMN_NAME,
                ORDINAL_POSITION,
                DATA_TYPE,
                COLUMN_TYPE,
                IS_NULLABLE
            FROM information_schema.COLUMNS
            WHERE TABLE_SCHEMA = ?
                AND TABLE_NAME = ?
            ORDER BY ORDINAL_POSITION
        "#;

        let rows: Vec<(String, u32, String, String, String)> =
            self.conn.exec(sql, (database, view)).map_err(|e| {
                error!(
                    database = ?database,
                    view = ?view,
                    error = ?e,
                    "Failed to query columns"
                );
                ViewliftError::Introspection {
                    database: database.to_string(),
                    message: format!("Failed to query columns for view '{}': {}", view, e),
                }
            })?;

        let mut columns = Vec::with_capacity(rows.len());
        for (name, ordinal, data_type, column_type, is_nullable) in rows {
            let column = Column {
                ordinal,
                name,
                data_type: data_type.to_lowercase(),
                column_type: column_type.to_lowercase(),
                is_nullable: is_nullable.eq_ignore_ascii_case("YES"),
            };
            trace!(view = ?view, column = ?column, "Parsed column");
            columns.push(column);
        }

        Ok(columns)
    }
}
