use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{SkillRow, UserProfileRow};

pub async fn fetch_profile(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<UserProfileRow>, AppError> {
    Ok(
        sqlx::query_as::<_, UserProfileRow>("SELECT * FROM user_profiles WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?,
    )
}

/// The user's recorded skills, in name order for stable output.
pub async fn fetch_skills(pool: &PgPool, user_id: Uuid) -> Result<Vec<SkillRow>, AppError> {
    Ok(sqlx::query_as::<_, SkillRow>(
        "SELECT * FROM user_skills WHERE user_id = $1 ORDER BY name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// A skill as submitted by the client, pre-insert.
pub struct NewSkill<'a> {
    pub name: &'a str,
    pub category: Option<&'a str>,
    pub proficiency_level: i16,
}

/// Replaces the user's recorded skill list wholesale, in one transaction.
pub async fn replace_skills(
    pool: &PgPool,
    user_id: Uuid,
    skills: &[NewSkill<'_>],
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM user_skills WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    for skill in skills {
        sqlx::query(
            r#"
            INSERT INTO user_skills (id, user_id, name, category, proficiency_level)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(skill.name)
        .bind(skill.category)
        .bind(skill.proficiency_level)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!("Replaced skill list for user {user_id} ({} skills)", skills.len());
    Ok(())
}
