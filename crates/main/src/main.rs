//! 主应用程序入口
//!
//! 引导数据库后跑一遍注册/状态上报/查询流程。

use config::AppConfig;
use domain::{
    Address, Pose, RobotId, RobotInfo, RobotRepository, RobotState, User, UserRepository,
};
use infrastructure::{bootstrap, PgStorage};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 读取环境变量配置
    let config = AppConfig::from_env_with_defaults();
    config.validate()?;

    tracing::info!(
        host = %config.database.host,
        port = config.database.port,
        db_name = %config.database.db_name,
        "connecting to postgres"
    );

    let pool = bootstrap::connect(&config.database).await?;
    let storage = PgStorage::new(pool);

    register_fleet(&storage).await?;
    report_state(&storage).await?;
    query_fleet(&storage).await?;
    user_address_demo(&storage).await?;

    Ok(())
}

async fn register_fleet(storage: &PgStorage) -> anyhow::Result<()> {
    let robots = vec![
        RobotInfo::new(RobotId::parse("smr01")?, "01"),
        RobotInfo::new(RobotId::parse("smr02")?, "02"),
        RobotInfo::new(RobotId::parse("smr03")?, "03"),
        RobotInfo::new(RobotId::parse("smr04")?, "04"),
        RobotInfo::new(RobotId::parse("smr05")?, "05"),
    ];
    storage.robot_repository.register(&robots).await?;
    tracing::info!(count = robots.len(), "registered fleet");
    Ok(())
}

async fn report_state(storage: &PgStorage) -> anyhow::Result<()> {
    let state = RobotState::new(RobotId::parse("smr01")?, Uuid::new_v4(), Pose::default());
    storage.robot_repository.upsert_states(&[state]).await?;
    Ok(())
}

async fn query_fleet(storage: &PgStorage) -> anyhow::Result<()> {
    let ids = [RobotId::parse("smr01")?, RobotId::parse("smr02")?];
    let robots = storage.robot_repository.fetch_names(&ids).await?;
    for robot in &robots {
        tracing::info!(robot_id = %robot.id, robot_name = %robot.name, "fetched robot name");
    }

    let snapshots = storage.robot_repository.fetch_snapshots().await?;
    for snapshot in &snapshots {
        tracing::info!(
            robot_id = %snapshot.id,
            robot_name = %snapshot.name,
            map_uuid = %snapshot.map_uuid,
            x = snapshot.pose.x,
            y = snapshot.pose.y,
            theta = snapshot.pose.theta,
            "fetched robot state"
        );
    }
    Ok(())
}

async fn user_address_demo(storage: &PgStorage) -> anyhow::Result<()> {
    let user = User {
        id: 0,
        name: "Chunwei".to_string(),
        username: "Andy".to_string(),
    };
    storage.user_repository.upsert_user(&user).await?;
    storage
        .user_repository
        .upsert_addresses(&[
            Address {
                id: 0,
                address: "New Taipei city".to_string(),
                user_id: 0,
            },
            Address {
                id: 1,
                address: "Taichung city".to_string(),
                user_id: 0,
            },
        ])
        .await?;

    if let Some(found) = storage.user_repository.fetch_with_addresses(0).await? {
        for address in &found.addresses {
            tracing::info!(
                name = %found.user.name,
                username = %found.user.username,
                address = %address.address,
                "fetched user address"
            );
        }
    }
    Ok(())
}
