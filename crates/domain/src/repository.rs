use async_trait::async_trait;

use crate::errors::RepositoryResult;
use crate::robot::{RobotInfo, RobotSnapshot, RobotState};
use crate::user::{Address, User, UserWithAddresses};
use crate::value_objects::RobotId;

/// 机器人仓储接口
///
/// 批量写入要么整体生效要么整体回滚，不做部分应用。
#[async_trait]
pub trait RobotRepository: Send + Sync {
    async fn register(&self, robots: &[RobotInfo]) -> RepositoryResult<()>;
    async fn upsert_states(&self, states: &[RobotState]) -> RepositoryResult<()>;
    async fn fetch_names(&self, ids: &[RobotId]) -> RepositoryResult<Vec<RobotInfo>>;
    async fn fetch_snapshots(&self) -> RepositoryResult<Vec<RobotSnapshot>>;
}

/// 用户仓储接口
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn upsert_user(&self, user: &User) -> RepositoryResult<()>;
    async fn upsert_addresses(&self, addresses: &[Address]) -> RepositoryResult<()>;
    async fn fetch_with_addresses(
        &self,
        user_id: i64,
    ) -> RepositoryResult<Option<UserWithAddresses>>;
}
