use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::{Pose, RobotId};

/// 机器人身份记录，对应 robot_infos 表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotInfo {
    pub id: RobotId,
    pub name: String,
}

impl RobotInfo {
    pub fn new(id: RobotId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// 机器人状态记录，对应 robot_states 表
///
/// 与身份记录共享主键：每个机器人至多一条状态，后写覆盖。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotState {
    pub id: RobotId,
    pub map_uuid: Uuid,
    pub pose: Pose,
}

impl RobotState {
    pub fn new(id: RobotId, map_uuid: Uuid, pose: Pose) -> Self {
        Self { id, map_uuid, pose }
    }
}

/// 身份与状态联表后的组合记录，仅包含两表都有行的机器人
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotSnapshot {
    pub id: RobotId,
    pub name: String,
    pub map_uuid: Uuid,
    pub pose: Pose,
}
