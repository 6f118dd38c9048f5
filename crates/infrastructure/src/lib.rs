//! 基础设施层实现。
//!
//! 提供数据库引导、建表与 PostgreSQL 仓储适配器，实现领域层定义的接口。

pub mod bootstrap;
pub mod repository;
pub mod schema;

pub use bootstrap::{connect, create_pg_pool, ensure_database};
pub use repository::{PgRobotRepository, PgStorage, PgUserRepository};
