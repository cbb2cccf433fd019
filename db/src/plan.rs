use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::models::plan::Plan;

pub async fn list<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<Vec<Plan>> {
    sqlx::query_as::<_, Plan>("SELECT * FROM plans ORDER BY price ASC")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn find_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    plan_id: i64,
) -> Res<Option<Plan>> {
    sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE id = $1")
        .bind(plan_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn find_by_name<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    name: &str,
) -> Res<Option<Plan>> {
    sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE name = $1")
        .bind(name)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}
