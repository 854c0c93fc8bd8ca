use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryFilter, QueryOrder};

/// A music genre. Every board on the forum is backed by one genre row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "genres")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Posts filed under this genre.
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// All posts on this genre's board, oldest first.
    pub async fn posts(&self, db: &DatabaseConnection) -> Result<Vec<super::post::Model>, DbErr> {
        super::post::Entity::find()
            .filter(super::post::Column::GenreId.eq(self.id))
            .order_by_asc(super::post::Column::Id)
            .all(db)
            .await
    }
}
