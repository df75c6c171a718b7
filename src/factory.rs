// Pattern 2: Abstract Factory - one family of user stores per database
//
// An aggregated `Database` trait has to grow a method (and every backend has
// to follow) each time a new user field appears. Splitting the fields into
// their own traits keeps each one closed for modification, at the cost of
// needing a factory that hands out the right family for a backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PatternError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DatabaseKind {
    #[default]
    MySql,
    PostgreSql,
}

impl DatabaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseKind::MySql => "mysql",
            DatabaseKind::PostgreSql => "postgresql",
        }
    }
}

impl FromStr for DatabaseKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(DatabaseKind::MySql),
            "postgresql" | "postgres" => Ok(DatabaseKind::PostgreSql),
            _ => Err(PatternError::UnknownDatabase(s.to_string())),
        }
    }
}

impl TryFrom<String> for DatabaseKind {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DatabaseKind> for String {
    fn from(kind: DatabaseKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Aggregated interface
// ============================================================================

/// Every user operation on one trait.
pub trait Database {
    fn get_name(&self, id: i64) -> String;
    fn insert_name(&self, name: &str) -> i64;
}

pub struct MySqlDatabase;

impl Database for MySqlDatabase {
    fn get_name(&self, id: i64) -> String {
        debug!(id, "mysql: get name");
        "sql user name".to_string()
    }

    fn insert_name(&self, name: &str) -> i64 {
        debug!(user = name, "mysql: insert name");
        0
    }
}

pub struct PostgreSqlDatabase;

impl Database for PostgreSqlDatabase {
    fn get_name(&self, id: i64) -> String {
        debug!(id, "postgresql: get name");
        "postgre sql user name".to_string()
    }

    fn insert_name(&self, name: &str) -> i64 {
        debug!(user = name, "postgresql: insert name");
        0
    }
}

pub fn open_database(kind: DatabaseKind) -> Box<dyn Database> {
    match kind {
        DatabaseKind::MySql => Box::new(MySqlDatabase),
        DatabaseKind::PostgreSql => Box::new(PostgreSqlDatabase),
    }
}

/// A user record backed by whichever database it was given.
pub struct User {
    database: Box<dyn Database>,
}

impl User {
    pub fn new(database: Box<dyn Database>) -> Self {
        Self { database }
    }

    pub fn get_name(&self, id: i64) -> String {
        self.database.get_name(id)
    }

    pub fn insert_name(&self, name: &str) -> i64 {
        self.database.insert_name(name)
    }
}

// ============================================================================
// Split interfaces and their factory
// ============================================================================

pub trait UserName {
    fn get(&self, id: i64) -> String;
    fn insert(&self, name: &str) -> i64;
}

pub trait UserEmail {
    fn get(&self, id: i64) -> String;
    fn insert(&self, email: &str) -> i64;
}

pub struct MySqlUserName;

impl UserName for MySqlUserName {
    fn get(&self, _id: i64) -> String {
        "mysql user name".to_string()
    }

    fn insert(&self, _name: &str) -> i64 {
        0
    }
}

pub struct PostgreSqlUserName;

impl UserName for PostgreSqlUserName {
    fn get(&self, _id: i64) -> String {
        "postgresql user name".to_string()
    }

    fn insert(&self, _name: &str) -> i64 {
        0
    }
}

pub struct MySqlUserEmail;

impl UserEmail for MySqlUserEmail {
    fn get(&self, _id: i64) -> String {
        "mysql user email".to_string()
    }

    fn insert(&self, _email: &str) -> i64 {
        0
    }
}

pub struct PostgreSqlUserEmail;

impl UserEmail for PostgreSqlUserEmail {
    fn get(&self, _id: i64) -> String {
        "postgresql user email".to_string()
    }

    fn insert(&self, _email: &str) -> i64 {
        0
    }
}

/// Creates the family of user stores for a single backend.
pub trait UserStoreFactory {
    fn kind(&self) -> DatabaseKind;
    fn create_user_name(&self) -> Box<dyn UserName>;
    fn create_user_email(&self) -> Box<dyn UserEmail>;
}

pub struct MySqlFactory;

impl UserStoreFactory for MySqlFactory {
    fn kind(&self) -> DatabaseKind {
        DatabaseKind::MySql
    }

    fn create_user_name(&self) -> Box<dyn UserName> {
        Box::new(MySqlUserName)
    }

    fn create_user_email(&self) -> Box<dyn UserEmail> {
        Box::new(MySqlUserEmail)
    }
}

pub struct PostgreSqlFactory;

impl UserStoreFactory for PostgreSqlFactory {
    fn kind(&self) -> DatabaseKind {
        DatabaseKind::PostgreSql
    }

    fn create_user_name(&self) -> Box<dyn UserName> {
        Box::new(PostgreSqlUserName)
    }

    fn create_user_email(&self) -> Box<dyn UserEmail> {
        Box::new(PostgreSqlUserEmail)
    }
}

pub fn factory_for(kind: DatabaseKind) -> Box<dyn UserStoreFactory> {
    debug!(backend = %kind, "selecting user store factory");
    match kind {
        DatabaseKind::MySql => Box::new(MySqlFactory),
        DatabaseKind::PostgreSql => Box::new(PostgreSqlFactory),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_forwards_to_database() {
        let user = User::new(Box::new(MySqlDatabase));
        assert_eq!(user.get_name(7), "sql user name");
        assert_eq!(user.insert_name("ada"), 0);

        let user = User::new(open_database(DatabaseKind::PostgreSql));
        assert_eq!(user.get_name(7), "postgre sql user name");
    }

    #[test]
    fn test_factory_builds_matching_family() {
        let mysql = factory_for(DatabaseKind::MySql);
        assert_eq!(mysql.kind(), DatabaseKind::MySql);
        assert_eq!(mysql.create_user_name().get(1), "mysql user name");
        assert_eq!(mysql.create_user_email().get(1), "mysql user email");

        let postgres = factory_for(DatabaseKind::PostgreSql);
        assert_eq!(postgres.kind(), DatabaseKind::PostgreSql);
        assert_eq!(postgres.create_user_name().get(1), "postgresql user name");
        assert_eq!(postgres.create_user_email().get(1), "postgresql user email");
    }

    #[test]
    fn test_inserts_return_placeholder_id() {
        for kind in [DatabaseKind::MySql, DatabaseKind::PostgreSql] {
            let factory = factory_for(kind);
            assert_eq!(factory.create_user_name().insert("ada"), 0);
            assert_eq!(factory.create_user_email().insert("ada@example.com"), 0);
        }
    }

    #[test]
    fn test_database_kind_parsing() {
        assert_eq!("mysql".parse::<DatabaseKind>().unwrap(), DatabaseKind::MySql);
        assert_eq!("MySQL".parse::<DatabaseKind>().unwrap(), DatabaseKind::MySql);
        assert_eq!(
            "postgres".parse::<DatabaseKind>().unwrap(),
            DatabaseKind::PostgreSql
        );
        assert_eq!(
            "postgresql".parse::<DatabaseKind>().unwrap(),
            DatabaseKind::PostgreSql
        );
        assert!(matches!(
            "oracle".parse::<DatabaseKind>(),
            Err(PatternError::UnknownDatabase(name)) if name == "oracle"
        ));
    }

    #[test]
    fn test_database_kind_display_round_trips() {
        for kind in [DatabaseKind::MySql, DatabaseKind::PostgreSql] {
            assert_eq!(kind.to_string().parse::<DatabaseKind>().unwrap(), kind);
        }
    }
}
