#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use sea_orm::{ActiveValue::Set, Database, DatabaseConnection, DbErr, EntityTrait};
use sea_orm_migration::prelude::*;
use tower::ServiceExt;

use crudcursor::{CursorResource, PaginationConfig, PaginationMode, router};

pub mod person;

use person::Person;

pub const PEOPLE: i32 = 20;

pub fn age_of(id: i32) -> i32 {
    20 + (id * 7) % 5
}

pub fn nickname_of(id: i32) -> Option<String> {
    (id % 3 == 0).then(|| format!("nick-{:02}", 21 - id))
}

/// Route library logs to the test harness output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    init_tracing();
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_people(db: &DatabaseConnection, count: i32) -> Result<(), DbErr> {
    if count == 0 {
        return Ok(());
    }
    let rows = (1..=count).map(|id| person::ActiveModel {
        id: Set(id),
        name: Set(format!("Person {id:02}")),
        age: Set(age_of(id)),
        nickname: Set(nickname_of(id)),
    });
    person::Entity::insert_many(rows).exec(db).await?;
    Ok(())
}

pub async fn setup_seeded_db() -> DatabaseConnection {
    let db = setup_test_db().await.expect("Failed to setup test database");
    seed_people(&db, PEOPLE)
        .await
        .expect("Failed to seed test database");
    db
}

/// Offset-by-default people listing.
pub struct People;

impl CursorResource for People {
    type EntityType = person::Entity;
    type ColumnType = person::Column;
    type ListModel = Person;

    const RESOURCE_NAME_PLURAL: &'static str = "people";

    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![
            ("id", person::Column::Id),
            ("name", person::Column::Name),
            ("age", person::Column::Age),
            ("nickname", person::Column::Nickname),
        ]
    }
}

/// Cursor-by-default listing of the same table with a small page cap.
pub struct PeopleFeed;

impl CursorResource for PeopleFeed {
    type EntityType = person::Entity;
    type ColumnType = person::Column;
    type ListModel = Person;

    const RESOURCE_NAME_PLURAL: &'static str = "feed";

    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![("id", person::Column::Id), ("age", person::Column::Age)]
    }

    fn pagination_config() -> PaginationConfig {
        PaginationConfig::builder()
            .default_mode(PaginationMode::Cursor)
            .default_limit(4)
            .max_limit(5)
            .content_range(false)
            .build()
    }
}

pub fn setup_test_app(db: &DatabaseConnection) -> Router {
    Router::new()
        .nest("/people", router::<People>(db))
        .nest("/feed", router::<PeopleFeed>(db))
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_json(app: &Router, uri: &str) -> serde_json::Value {
    let response = get(app, uri).await;
    assert_eq!(response.status(), 200, "GET {uri} failed");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn ids(page: &serde_json::Value) -> Vec<i64> {
    page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect()
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreatePeopleTable)]
    }
}

pub struct CreatePeopleTable;

impl MigrationName for CreatePeopleTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_people_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreatePeopleTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(PeopleTable)
            .if_not_exists()
            .col(
                ColumnDef::new(PeopleColumn::Id)
                    .integer()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(PeopleColumn::Name).string().not_null())
            .col(ColumnDef::new(PeopleColumn::Age).integer().not_null())
            .col(ColumnDef::new(PeopleColumn::Nickname).string().null())
            .to_owned();

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PeopleTable).to_owned())
            .await
    }
}

#[derive(Debug)]
pub enum PeopleColumn {
    Id,
    Name,
    Age,
    Nickname,
}

impl Iden for PeopleColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Name => "name",
                Self::Age => "age",
                Self::Nickname => "nickname",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct PeopleTable;

impl Iden for PeopleTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "people").unwrap();
    }
}
