use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryFilter, QueryOrder};

/// A registered forum member. Artists are members with `is_musician` set;
/// everything else about the two kinds is identical.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Display name; doubles as the login name.
    #[sea_orm(unique)]
    pub name: String,
    /// Argon2 PHC string. The clear-text password is never persisted.
    pub password_hash: String,
    /// Zip code of the member's home town.
    pub home_town: i32,
    pub bio: String,
    pub is_musician: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Posts written by this member.
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
    /// Comments written by this member.
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    /// Login sessions opened by this member.
    #[sea_orm(has_many = "super::session::Entity")]
    Session,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// All posts written by this member, oldest first.
    pub async fn posts(&self, db: &DatabaseConnection) -> Result<Vec<super::post::Model>, DbErr> {
        super::post::Entity::find()
            .filter(super::post::Column::UserId.eq(self.id))
            .order_by_asc(super::post::Column::Id)
            .all(db)
            .await
    }
}
