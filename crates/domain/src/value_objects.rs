use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::RepositoryError;

/// 经过验证的机器人序列号
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RobotId(String);

impl RobotId {
    pub fn parse(value: impl Into<String>) -> Result<Self, RepositoryError> {
        let value = value.into().trim().to_owned();
        if value.is_empty() {
            return Err(RepositoryError::invalid_argument(
                "robot_id",
                "cannot be empty",
            ));
        }
        if value.len() > 64 {
            return Err(RepositoryError::invalid_argument("robot_id", "too long"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RobotId> for String {
    fn from(value: RobotId) -> Self {
        value.0
    }
}

/// 平面位姿：x/y 坐标加朝向角
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robot_id_parse_trims_whitespace() {
        let id = RobotId::parse("  smr01  ").expect("valid id");
        assert_eq!(id.as_str(), "smr01");
    }

    #[test]
    fn robot_id_rejects_empty() {
        assert!(RobotId::parse("").is_err());
        assert!(RobotId::parse("   ").is_err());
    }

    #[test]
    fn robot_id_rejects_overlong() {
        let long = "x".repeat(65);
        assert!(RobotId::parse(long).is_err());
        let max = "x".repeat(64);
        assert!(RobotId::parse(max).is_ok());
    }

    #[test]
    fn pose_default_is_origin() {
        let pose = Pose::default();
        assert_eq!(pose, Pose::new(0.0, 0.0, 0.0));
    }
}
