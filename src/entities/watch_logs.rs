use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "watch_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_name = "type")]
    pub media_type: String,
    pub release_year: Option<i32>,
    pub rating: String,
    /// Rows written before status tracking existed carry no value here.
    pub status: Option<String>,
    /// Calendar day as `YYYY-MM-DD`.
    pub date_watched: String,
    pub is_rewatch: bool,
    pub season: Option<i32>,
    pub episode: Option<i32>,
    pub total_episodes: Option<i32>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
