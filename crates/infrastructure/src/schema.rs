//! 建表语句：显式、幂等，不依赖全局注册表。

use sqlx::PgPool;

// users 必须先于 user_address（外键依赖）
const TABLES: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS robot_infos (
        robot_id TEXT PRIMARY KEY,
        robot_name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS robot_states (
        robot_id TEXT PRIMARY KEY,
        map_uuid UUID NOT NULL,
        position_x DOUBLE PRECISION NOT NULL,
        position_y DOUBLE PRECISION NOT NULL,
        position_theta DOUBLE PRECISION NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGINT PRIMARY KEY,
        name TEXT NOT NULL,
        username TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_address (
        id BIGINT PRIMARY KEY,
        address TEXT NOT NULL,
        user_id BIGINT NOT NULL REFERENCES users (id)
    )
    "#,
];

pub async fn apply(pool: &PgPool) -> Result<(), sqlx::Error> {
    for stmt in TABLES {
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}
