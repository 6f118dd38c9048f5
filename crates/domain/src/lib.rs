//! 机器人注册中心核心领域模型
//!
//! 包含机器人身份、状态、用户等核心实体，以及仓储接口定义。

pub mod errors;
pub mod repository;
pub mod robot;
pub mod user;
pub mod value_objects;

// 重新导出常用类型
pub use errors::{RepositoryError, RepositoryResult};
pub use repository::{RobotRepository, UserRepository};
pub use robot::{RobotInfo, RobotSnapshot, RobotState};
pub use user::{Address, User, UserWithAddresses};
pub use value_objects::{Pose, RobotId};
