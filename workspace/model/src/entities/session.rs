use sea_orm::entity::prelude::*;

/// One login session. A row is written at registration and at every login;
/// logout lowers `logged_in` and keeps the row, so only rows with the flag
/// raised authenticate a token. Rows are never expired.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Opaque bearer token handed to the client.
    #[sea_orm(unique)]
    pub token: String,
    pub user_id: i32,
    pub logged_in: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
