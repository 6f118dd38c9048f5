//! 连接引导：确保目标数据库存在、固定时区、应用建表语句。

use config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::schema;

/// SQLSTATE duplicate_database：并发建库时另一端先赢了 CREATE
const DUPLICATE_DATABASE: &str = "42P04";

pub async fn create_pg_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// 连接维护库，目标库不存在时建库
pub async fn ensure_database(database: &DatabaseConfig) -> Result<(), sqlx::Error> {
    let server_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database.server_url())
        .await?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&database.db_name)
            .fetch_one(&server_pool)
            .await?;

    if !exists {
        tracing::info!(db_name = %database.db_name, "creating database");
        let create = format!("CREATE DATABASE {}", quote_ident(&database.db_name));
        if let Err(err) = sqlx::query(&create).execute(&server_pool).await {
            if !is_duplicate_database(&err) {
                return Err(err);
            }
        }
    }

    server_pool.close().await;
    Ok(())
}

/// ALTER DATABASE ... SET timezone，重复执行无副作用
pub async fn apply_timezone(pool: &PgPool, database: &DatabaseConfig) -> Result<(), sqlx::Error> {
    let stmt = format!(
        "ALTER DATABASE {} SET timezone TO {}",
        quote_ident(&database.db_name),
        quote_literal(&database.timezone)
    );
    sqlx::query(&stmt).execute(pool).await?;
    Ok(())
}

/// 组合入口：建库、开池、设时区、建表，返回可用连接池
pub async fn connect(database: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    ensure_database(database).await?;

    let pool = create_pg_pool(&database.url(), database.max_connections).await?;
    apply_timezone(&pool, database).await?;
    schema::apply(&pool).await?;

    Ok(pool)
}

fn is_duplicate_database(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(DUPLICATE_DATABASE)
    )
}

// CREATE DATABASE / ALTER DATABASE 不支持参数绑定，标识符和字面量手动转义
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_escapes_embedded_quotes() {
        assert_eq!(quote_ident("test_db"), "\"test_db\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn quote_literal_escapes_embedded_quotes() {
        assert_eq!(quote_literal("Asia/Taipei"), "'Asia/Taipei'");
        assert_eq!(quote_literal("o'clock"), "'o''clock'");
    }
}
