use config::DatabaseConfig;
use domain::{
    Address, Pose, RobotId, RobotInfo, RobotRepository, RobotState, User, UserRepository,
};
use infrastructure::{bootstrap, PgStorage};
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;
use uuid::Uuid;

fn database_config(port: u16) -> DatabaseConfig {
    DatabaseConfig {
        host: "127.0.0.1".to_string(),
        port,
        db_name: "fleet_registry".to_string(),
        user: "postgres".to_string(),
        password: "postgres".to_string(),
        max_connections: 5,
        timezone: "Asia/Taipei".to_string(),
    }
}

async fn start_storage() -> (ContainerAsync<Postgres>, PgStorage) {
    let node = Postgres::default().start().await.expect("start postgres");
    let port = node.get_host_port_ipv4(5432u16).await.expect("port");

    let config = database_config(port);
    let pool = bootstrap::connect(&config).await.expect("bootstrap");

    (node, PgStorage::new(pool))
}

fn robot_id(value: &str) -> RobotId {
    RobotId::parse(value).expect("robot id")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[ignore = "requires local docker daemon"]
async fn robot_repository_round_trip() {
    let (_node, storage) = start_storage().await;
    let robots = &storage.robot_repository;

    robots
        .register(&[
            RobotInfo::new(robot_id("smr01"), "01"),
            RobotInfo::new(robot_id("smr02"), "02"),
        ])
        .await
        .expect("register");

    // 同主键再次写入：后写覆盖，只留一行
    robots
        .register(&[RobotInfo::new(robot_id("smr01"), "01-renamed")])
        .await
        .expect("re-register");

    let names = robots
        .fetch_names(&[robot_id("smr01"), robot_id("missing")])
        .await
        .expect("fetch names");
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].id.as_str(), "smr01");
    assert_eq!(names[0].name, "01-renamed");

    // 空批次是无操作
    robots.register(&[]).await.expect("empty register");
    robots.upsert_states(&[]).await.expect("empty upsert");

    let map_uuid = Uuid::new_v4();
    robots
        .upsert_states(&[RobotState::new(
            robot_id("smr01"),
            map_uuid,
            Pose::new(1.0, 2.0, 0.5),
        )])
        .await
        .expect("upsert state");

    // 联表抓取只返回身份和状态都存在的机器人；smr02 没有状态
    let snapshots = robots.fetch_snapshots().await.expect("fetch snapshots");
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].id.as_str(), "smr01");
    assert_eq!(snapshots[0].name, "01-renamed");
    assert_eq!(snapshots[0].map_uuid, map_uuid);
    assert_eq!(snapshots[0].pose, Pose::new(1.0, 2.0, 0.5));

    // 状态也是后写覆盖
    let next_map = Uuid::new_v4();
    robots
        .upsert_states(&[RobotState::new(
            robot_id("smr01"),
            next_map,
            Pose::new(3.0, 4.0, 1.5),
        )])
        .await
        .expect("upsert state again");

    let snapshots = robots.fetch_snapshots().await.expect("fetch snapshots");
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].map_uuid, next_map);
    assert_eq!(snapshots[0].pose, Pose::new(3.0, 4.0, 1.5));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[ignore = "requires local docker daemon"]
async fn user_repository_round_trip_and_fk_rollback() {
    let (_node, storage) = start_storage().await;
    let users = &storage.user_repository;

    users
        .upsert_user(&User {
            id: 0,
            name: "Chunwei".to_string(),
            username: "Andy".to_string(),
        })
        .await
        .expect("upsert user");

    users
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
        .await
        .expect("upsert addresses");

    let found = users
        .fetch_with_addresses(0)
        .await
        .expect("fetch")
        .expect("user exists");
    assert_eq!(found.user.name, "Chunwei");
    assert_eq!(found.addresses.len(), 2);
    assert_eq!(found.addresses[0].address, "New Taipei city");

    // 含外键违规行的批次整体失败，合法行也不落库
    let result = users
        .upsert_addresses(&[
            Address {
                id: 2,
                address: "Kaohsiung city".to_string(),
                user_id: 0,
            },
            Address {
                id: 3,
                address: "Nowhere".to_string(),
                user_id: 999,
            },
        ])
        .await;
    assert!(result.is_err());

    let found = users
        .fetch_with_addresses(0)
        .await
        .expect("fetch")
        .expect("user exists");
    assert_eq!(found.addresses.len(), 2);

    // 用户本身也是后写覆盖
    users
        .upsert_user(&User {
            id: 0,
            name: "Chunwei".to_string(),
            username: "andy.chen".to_string(),
        })
        .await
        .expect("upsert user again");

    let found = users
        .fetch_with_addresses(0)
        .await
        .expect("fetch")
        .expect("user exists");
    assert_eq!(found.user.username, "andy.chen");

    assert!(users
        .fetch_with_addresses(42)
        .await
        .expect("fetch missing")
        .is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[ignore = "requires local docker daemon"]
async fn bootstrap_is_idempotent() {
    let node = Postgres::default().start().await.expect("start postgres");
    let port = node.get_host_port_ipv4(5432u16).await.expect("port");
    let config = database_config(port);

    // 第一次建库建表，第二次全部走已存在分支
    let pool = bootstrap::connect(&config).await.expect("first connect");
    pool.close().await;

    let pool = bootstrap::connect(&config).await.expect("second connect");

    let timezone: String = sqlx::query_scalar("SHOW timezone")
        .fetch_one(&pool)
        .await
        .expect("show timezone");
    assert_eq!(timezone, "Asia/Taipei");
}
