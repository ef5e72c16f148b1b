use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct FavoriteRecord {
    pub id: i64,
    pub recipe_id: i64,
    pub added_at: String,
}
