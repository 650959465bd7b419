use anyhow::Result;
use chrono::NaiveDate;
use sqlx::PgPool;

/// Internship model - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Internship {
    pub id: i64,
    pub joined_date: NaiveDate,
    pub completion_date: NaiveDate,
    pub is_certified: bool,
    pub mentor_name: String,
    pub user_id: i64,
}

/// Fields for inserting a new internship record.
#[derive(Debug, Clone)]
pub struct NewInternship {
    pub joined_date: NaiveDate,
    pub completion_date: NaiveDate,
    pub is_certified: bool,
    pub mentor_name: String,
    pub user_id: i64,
}

impl Internship {
    /// Insert new internship
    pub async fn insert(new: NewInternship, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO internships (
                joined_date,
                completion_date,
                is_certified,
                mentor_name,
                user_id
             )
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(new.joined_date)
        .bind(new.completion_date)
        .bind(new.is_certified)
        .bind(&new.mentor_name)
        .bind(new.user_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find the internships recorded for a user
    pub async fn find_by_user(user_id: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM internships WHERE user_id = $1 ORDER BY id")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}
