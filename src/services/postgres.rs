use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::models::{AnswerSet, Profile, Role, RoleDetails, TraitCode, ANSWER_COUNT};
use crate::services::store::{ProfileStore, StoreError};

/// PostgreSQL-backed profile store.
///
/// Profiles live in a single wide table with nullable role-specific columns
/// (trait codes and the five answer slots); rows are decoded into the tagged
/// [`Profile`] at this boundary. Match records are written append-only inside
/// one transaction per batch.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string and run migrations.
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings.
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }
}

const PROFILE_COLUMNS: &str = r#"
    id, username, email, role, mbti, preferred_mbti,
    answer1, answer2, answer3, answer4, answer5
"#;

fn trait_code_from(raw: Option<String>, id: i64) -> Result<Option<TraitCode>, StoreError> {
    raw.map(|code| {
        TraitCode::parse(&code)
            .map_err(|e| StoreError::Decode(format!("profile {}: {}", id, e)))
    })
    .transpose()
}

fn answers_from_row(row: &PgRow, id: i64) -> Result<AnswerSet, StoreError> {
    let mut slots = [None; ANSWER_COUNT];
    for (index, slot) in slots.iter_mut().enumerate() {
        let column = format!("answer{}", index + 1);
        let raw: Option<i16> = row.get(column.as_str());
        *slot = raw
            .map(|value| {
                u8::try_from(value).map_err(|_| {
                    StoreError::Decode(format!(
                        "profile {}: answer value {} does not fit the answer type",
                        id, value
                    ))
                })
            })
            .transpose()?;
    }
    Ok(AnswerSet::new(slots))
}

fn profile_from_row(row: &PgRow) -> Result<Profile, StoreError> {
    let id: i64 = row.get("id");
    let username: String = row.get("username");
    let email: String = row.get("email");
    let role: String = row.get("role");
    let answers = answers_from_row(row, id)?;

    let details = match role.as_str() {
        "seeker" => RoleDetails::Seeker {
            mbti: trait_code_from(row.get("mbti"), id)?,
            answers,
        },
        "company" => RoleDetails::Company {
            preferred_mbti: trait_code_from(row.get("preferred_mbti"), id)?,
            answers,
        },
        other => {
            return Err(StoreError::Decode(format!(
                "profile {}: unknown role {:?}",
                id, other
            )))
        }
    };

    Ok(Profile {
        id,
        username,
        email,
        details,
    })
}

#[async_trait]
impl ProfileStore for PostgresStore {
    async fn fetch_by_id(&self, id: i64) -> Result<Profile, StoreError> {
        let query = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("profile {}", id)))?;

        profile_from_row(&row)
    }

    async fn fetch_by_role(&self, role: Role) -> Result<Vec<Profile>, StoreError> {
        let query = format!(
            "SELECT {} FROM profiles WHERE role = $1 ORDER BY id",
            PROFILE_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await?;

        let profiles = rows
            .iter()
            .map(profile_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fetched {} {} profiles", profiles.len(), role);

        Ok(profiles)
    }

    async fn persist_match_batch(
        &self,
        seeker_id: i64,
        company_ids: &[i64],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for company_id in company_ids {
            sqlx::query(
                "INSERT INTO matches (seeker_id, company_id, created_at) VALUES ($1, $2, NOW())",
            )
            .bind(seeker_id)
            .bind(company_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            "Persisted {} match records for seeker {}",
            company_ids.len(),
            seeker_id
        );

        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
