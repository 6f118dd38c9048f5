use serde::{Deserialize, Serialize};

/// 用户记录，对应 users 表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
}

/// 地址记录，对应 user_address 表；user_id 外键指向 users.id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub address: String,
    pub user_id: i64,
}

/// 用户及其全部地址
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWithAddresses {
    pub user: User,
    pub addresses: Vec<Address>,
}
