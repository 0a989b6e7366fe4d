//! Review persistence and the rating aggregate updater.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use super::projects::rating_average;
use crate::errors::AppError;
use crate::models::Review;

/// Fresh aggregate values after a review lands.
#[derive(Debug, Clone, Copy)]
pub struct RatingAggregate {
    pub avg_rating: f64,
    pub ratings_count: i64,
}

/// Repository for immutable project reviews.
#[derive(Clone)]
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List a project's reviews, newest first.
    pub async fn list_for_project(&self, project_id: &str) -> Result<Vec<Review>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, project_id, reviewer_id, rating, comment, created_at
               FROM reviews WHERE project_id = ? ORDER BY created_at DESC, id"#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(review_from_row).collect())
    }

    /// Persist a review and update the owning project's aggregate in one
    /// transaction.
    ///
    /// The aggregate update is a relative increment of the raw sum/count, so
    /// concurrent submissions serialize at the database and none is lost. Its
    /// affected-row count doubles as the project existence check: zero rows
    /// rolls the transaction back before any review is written.
    pub async fn create(
        &self,
        project_id: &str,
        reviewer_id: Option<&str>,
        rating: i64,
        comment: Option<&str>,
    ) -> Result<(Review, RatingAggregate), AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE projects SET rating_sum = rating_sum + ?, ratings_count = ratings_count + 1 WHERE id = ?"
        )
        .bind(rating)
        .bind(project_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Project {} not found",
                project_id
            )));
        }

        sqlx::query(
            "INSERT INTO reviews (id, project_id, reviewer_id, rating, comment, created_at) VALUES (?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(project_id)
        .bind(reviewer_id)
        .bind(rating)
        .bind(comment)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query("SELECT rating_sum, ratings_count FROM projects WHERE id = ?")
            .bind(project_id)
            .fetch_one(&mut *tx)
            .await?;
        let rating_sum: i64 = row.get("rating_sum");
        let ratings_count: i64 = row.get("ratings_count");

        tx.commit().await?;

        let review = Review {
            id,
            project_id: project_id.to_string(),
            reviewer_id: reviewer_id.map(|s| s.to_string()),
            rating,
            comment: comment.map(|s| s.to_string()),
            created_at: now,
        };

        Ok((
            review,
            RatingAggregate {
                avg_rating: rating_average(rating_sum, ratings_count),
                ratings_count,
            },
        ))
    }
}

fn review_from_row(row: &sqlx::sqlite::SqliteRow) -> Review {
    Review {
        id: row.get("id"),
        project_id: row.get("project_id"),
        reviewer_id: row.get("reviewer_id"),
        rating: row.get("rating"),
        comment: row.get("comment"),
        created_at: row.get("created_at"),
    }
}
