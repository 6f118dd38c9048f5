use std::sync::Arc;

use async_trait::async_trait;
use domain::{
    Address, Pose, RepositoryError, RepositoryResult, RobotId, RobotInfo, RobotRepository,
    RobotSnapshot, RobotState, User, UserRepository, UserWithAddresses,
};
use futures_util::TryStreamExt;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub(crate) fn map_sqlx_err(err: sqlx::Error) -> RepositoryError {
    RepositoryError::storage(err.to_string())
}

fn invalid_data(message: impl Into<String>) -> RepositoryError {
    RepositoryError::invalid_data(message)
}

#[derive(Debug, FromRow)]
struct RobotInfoRecord {
    robot_id: String,
    robot_name: String,
}

impl TryFrom<RobotInfoRecord> for RobotInfo {
    type Error = RepositoryError;

    fn try_from(value: RobotInfoRecord) -> Result<Self, Self::Error> {
        let id = RobotId::parse(value.robot_id).map_err(|err| invalid_data(err.to_string()))?;
        Ok(RobotInfo {
            id,
            name: value.robot_name,
        })
    }
}

#[derive(Debug, FromRow)]
struct SnapshotRecord {
    robot_id: String,
    robot_name: String,
    map_uuid: Uuid,
    position_x: f64,
    position_y: f64,
    position_theta: f64,
}

impl TryFrom<SnapshotRecord> for RobotSnapshot {
    type Error = RepositoryError;

    fn try_from(value: SnapshotRecord) -> Result<Self, Self::Error> {
        let id = RobotId::parse(value.robot_id).map_err(|err| invalid_data(err.to_string()))?;
        Ok(RobotSnapshot {
            id,
            name: value.robot_name,
            map_uuid: value.map_uuid,
            pose: Pose::new(value.position_x, value.position_y, value.position_theta),
        })
    }
}

#[derive(Debug, FromRow)]
struct UserRecord {
    id: i64,
    name: String,
    username: String,
}

impl From<UserRecord> for User {
    fn from(value: UserRecord) -> Self {
        User {
            id: value.id,
            name: value.name,
            username: value.username,
        }
    }
}

#[derive(Debug, FromRow)]
struct AddressRecord {
    id: i64,
    address: String,
    user_id: i64,
}

impl From<AddressRecord> for Address {
    fn from(value: AddressRecord) -> Self {
        Address {
            id: value.id,
            address: value.address,
            user_id: value.user_id,
        }
    }
}

#[derive(Clone)]
pub struct PgRobotRepository {
    pool: PgPool,
}

impl PgRobotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RobotRepository for PgRobotRepository {
    async fn register(&self, robots: &[RobotInfo]) -> RepositoryResult<()> {
        if robots.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

        let mut stmt: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO robot_infos (robot_id, robot_name) ");
        stmt.push_values(robots, |mut row, robot| {
            row.push_bind(robot.id.as_str()).push_bind(&robot.name);
        });
        stmt.push(" ON CONFLICT (robot_id) DO UPDATE SET robot_name = EXCLUDED.robot_name");

        stmt.build()
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;
        tx.commit().await.map_err(map_sqlx_err)?;

        tracing::debug!(count = robots.len(), "registered robot infos");
        Ok(())
    }

    async fn upsert_states(&self, states: &[RobotState]) -> RepositoryResult<()> {
        if states.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

        let mut stmt: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO robot_states (robot_id, map_uuid, position_x, position_y, position_theta) ",
        );
        stmt.push_values(states, |mut row, state| {
            row.push_bind(state.id.as_str())
                .push_bind(state.map_uuid)
                .push_bind(state.pose.x)
                .push_bind(state.pose.y)
                .push_bind(state.pose.theta);
        });
        stmt.push(
            " ON CONFLICT (robot_id) DO UPDATE SET \
             map_uuid = EXCLUDED.map_uuid, \
             position_x = EXCLUDED.position_x, \
             position_y = EXCLUDED.position_y, \
             position_theta = EXCLUDED.position_theta",
        );

        stmt.build()
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;
        tx.commit().await.map_err(map_sqlx_err)?;

        tracing::debug!(count = states.len(), "upserted robot states");
        Ok(())
    }

    async fn fetch_names(&self, ids: &[RobotId]) -> RepositoryResult<Vec<RobotInfo>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = ids.iter().map(|id| id.as_str().to_owned()).collect();
        let mut rows = sqlx::query_as::<_, RobotInfoRecord>(
            r#"SELECT robot_id, robot_name FROM robot_infos WHERE robot_id = ANY($1)"#,
        )
        .bind(&ids)
        .fetch(&self.pool);

        let mut robots = Vec::new();
        while let Some(record) = rows.try_next().await.map_err(map_sqlx_err)? {
            robots.push(RobotInfo::try_from(record)?);
        }
        Ok(robots)
    }

    async fn fetch_snapshots(&self) -> RepositoryResult<Vec<RobotSnapshot>> {
        let mut rows = sqlx::query_as::<_, SnapshotRecord>(
            r#"
            SELECT i.robot_id, i.robot_name, s.map_uuid, s.position_x, s.position_y, s.position_theta
            FROM robot_infos i
            JOIN robot_states s ON i.robot_id = s.robot_id
            "#,
        )
        .fetch(&self.pool);

        let mut snapshots = Vec::new();
        while let Some(record) = rows.try_next().await.map_err(map_sqlx_err)? {
            snapshots.push(RobotSnapshot::try_from(record)?);
        }
        Ok(snapshots)
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn upsert_user(&self, user: &User) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, username)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, username = EXCLUDED.username
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.username)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(())
    }

    async fn upsert_addresses(&self, addresses: &[Address]) -> RepositoryResult<()> {
        if addresses.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

        let mut stmt: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO user_address (id, address, user_id) ");
        stmt.push_values(addresses, |mut row, addr| {
            row.push_bind(addr.id)
                .push_bind(&addr.address)
                .push_bind(addr.user_id);
        });
        stmt.push(
            " ON CONFLICT (id) DO UPDATE SET \
             address = EXCLUDED.address, \
             user_id = EXCLUDED.user_id",
        );

        stmt.build()
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;
        tx.commit().await.map_err(map_sqlx_err)?;

        tracing::debug!(count = addresses.len(), "upserted user addresses");
        Ok(())
    }

    async fn fetch_with_addresses(
        &self,
        user_id: i64,
    ) -> RepositoryResult<Option<UserWithAddresses>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, name, username FROM users WHERE id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        let Some(user) = user else {
            return Ok(None);
        };

        let mut rows = sqlx::query_as::<_, AddressRecord>(
            r#"SELECT id, address, user_id FROM user_address WHERE user_id = $1 ORDER BY id"#,
        )
        .bind(user_id)
        .fetch(&self.pool);

        let mut addresses = Vec::new();
        while let Some(record) = rows.try_next().await.map_err(map_sqlx_err)? {
            addresses.push(Address::from(record));
        }

        Ok(Some(UserWithAddresses {
            user: user.into(),
            addresses,
        }))
    }
}

#[derive(Clone)]
pub struct PgStorage {
    pub pool: PgPool,
    pub robot_repository: Arc<PgRobotRepository>,
    pub user_repository: Arc<PgUserRepository>,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self {
            robot_repository: Arc::new(PgRobotRepository::new(pool.clone())),
            user_repository: Arc::new(PgUserRepository::new(pool.clone())),
            pool,
        }
    }
}
