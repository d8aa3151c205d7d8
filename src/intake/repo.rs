use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::Date;
use uuid::Uuid;

/// One recorded consumption event. Nutrient values are absolute for the
/// logged quantity, already scaled from per-gram catalog data when the
/// entry was created; they are never re-derived from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IntakeEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "crate::utils::iso_date")]
    pub date: Date,
    pub description: String,
    pub grams: f64,
    pub calorias: f64,
    pub proteinas: f64,
    pub carbo: f64,
    pub gordura: f64,
}

/// Cached per-(user, date) nutrient sums. Derived data: always
/// recomputable from the log entries the total tracks.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IntakeTotals {
    pub user_id: Uuid,
    #[serde(with = "crate::utils::iso_date")]
    pub date: Date,
    pub calorias: f64,
    pub proteinas: f64,
    pub carbo: f64,
    pub gordura: f64,
}

impl IntakeTotals {
    pub fn zero(user_id: Uuid, date: Date) -> Self {
        Self {
            user_id,
            date,
            calorias: 0.0,
            proteinas: 0.0,
            carbo: 0.0,
            gordura: 0.0,
        }
    }
}

/// Partial-field patch for an entry. Identity is not a field here, so a
/// client can never overwrite it.
#[derive(Debug, Default)]
pub struct EntryPatch {
    pub description: Option<String>,
    pub grams: Option<f64>,
    pub calorias: Option<f64>,
    pub proteinas: Option<f64>,
    pub carbo: Option<f64>,
    pub gordura: Option<f64>,
    pub date: Option<Date>,
}

const ENTRY_COLUMNS: &str =
    "id, user_id, date, description, grams, calorias, proteinas, carbo, gordura";

pub async fn insert_entry(db: &PgPool, entry: &IntakeEntry) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO intake_log
            (id, user_id, date, description, grams, calorias, proteinas, carbo, gordura)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(entry.id)
    .bind(entry.user_id)
    .bind(entry.date)
    .bind(&entry.description)
    .bind(entry.grams)
    .bind(entry.calorias)
    .bind(entry.proteinas)
    .bind(entry.carbo)
    .bind(entry.gordura)
    .execute(db)
    .await
    .context("insert intake entry")?;
    Ok(())
}

/// Copy a working-set entry into the historical log, keeping its id. A
/// no-op when the entry is already archived, which makes repeated moves
/// safe.
pub async fn archive_entry(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO intake_log_history
            (id, user_id, date, description, grams, calorias, proteinas, carbo, gordura, created_at)
        SELECT id, user_id, date, description, grams, calorias, proteinas, carbo, gordura, created_at
        FROM intake_log
        WHERE id = $1
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(id)
    .execute(db)
    .await
    .context("archive intake entry")?;
    Ok(())
}

pub async fn find_entry(db: &PgPool, id: Uuid) -> anyhow::Result<Option<IntakeEntry>> {
    let entry = sqlx::query_as::<_, IntakeEntry>(&format!(
        "SELECT {ENTRY_COLUMNS} FROM intake_log WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
    .context("find intake entry")?;
    Ok(entry)
}

/// Apply a partial patch; absent fields keep their stored value.
pub async fn update_entry(
    db: &PgPool,
    id: Uuid,
    patch: &EntryPatch,
) -> anyhow::Result<Option<IntakeEntry>> {
    let entry = sqlx::query_as::<_, IntakeEntry>(&format!(
        r#"
        UPDATE intake_log SET
            description = COALESCE($2, description),
            grams = COALESCE($3, grams),
            calorias = COALESCE($4, calorias),
            proteinas = COALESCE($5, proteinas),
            carbo = COALESCE($6, carbo),
            gordura = COALESCE($7, gordura),
            date = COALESCE($8, date)
        WHERE id = $1
        RETURNING {ENTRY_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(patch.description.as_deref())
    .bind(patch.grams)
    .bind(patch.calorias)
    .bind(patch.proteinas)
    .bind(patch.carbo)
    .bind(patch.gordura)
    .bind(patch.date)
    .fetch_optional(db)
    .await
    .context("update intake entry")?;
    Ok(entry)
}

pub async fn delete_entry(db: &PgPool, id: Uuid) -> anyhow::Result<Option<IntakeEntry>> {
    let entry = sqlx::query_as::<_, IntakeEntry>(&format!(
        "DELETE FROM intake_log WHERE id = $1 RETURNING {ENTRY_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
    .context("delete intake entry")?;
    Ok(entry)
}

pub async fn list_working_set(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
) -> anyhow::Result<Vec<IntakeEntry>> {
    let rows = sqlx::query_as::<_, IntakeEntry>(&format!(
        r#"
        SELECT {ENTRY_COLUMNS}
        FROM intake_log
        WHERE user_id = $1 AND date = $2
        ORDER BY created_at ASC
        "#
    ))
    .bind(user_id)
    .bind(date)
    .fetch_all(db)
    .await
    .context("list working-set entries")?;
    Ok(rows)
}

pub async fn list_history(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
) -> anyhow::Result<Vec<IntakeEntry>> {
    let rows = sqlx::query_as::<_, IntakeEntry>(&format!(
        r#"
        SELECT {ENTRY_COLUMNS}
        FROM intake_log_history
        WHERE user_id = $1 AND date = $2
        ORDER BY created_at ASC
        "#
    ))
    .bind(user_id)
    .bind(date)
    .fetch_all(db)
    .await
    .context("list historical entries")?;
    Ok(rows)
}

pub async fn upsert_daily_total(db: &PgPool, totals: &IntakeTotals) -> anyhow::Result<()> {
    upsert_total(db, "daily_totals", totals)
        .await
        .context("upsert daily total")
}

pub async fn upsert_historical_total(db: &PgPool, totals: &IntakeTotals) -> anyhow::Result<()> {
    upsert_total(db, "historical_totals", totals)
        .await
        .context("upsert historical total")
}

/// Insert-or-replace on (user_id, date). The row swap is atomic on the
/// database side; there is no in-process locking.
async fn upsert_total(db: &PgPool, table: &str, totals: &IntakeTotals) -> anyhow::Result<()> {
    sqlx::query(&format!(
        r#"
        INSERT INTO {table} (user_id, date, calorias, proteinas, carbo, gordura)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id, date) DO UPDATE SET
            calorias = EXCLUDED.calorias,
            proteinas = EXCLUDED.proteinas,
            carbo = EXCLUDED.carbo,
            gordura = EXCLUDED.gordura
        "#
    ))
    .bind(totals.user_id)
    .bind(totals.date)
    .bind(totals.calorias)
    .bind(totals.proteinas)
    .bind(totals.carbo)
    .bind(totals.gordura)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn find_daily_total(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
) -> anyhow::Result<Option<IntakeTotals>> {
    let totals = sqlx::query_as::<_, IntakeTotals>(
        r#"
        SELECT user_id, date, calorias, proteinas, carbo, gordura
        FROM daily_totals
        WHERE user_id = $1 AND date = $2
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_optional(db)
    .await
    .context("find daily total")?;
    Ok(totals)
}

pub async fn list_historical_totals(
    db: &PgPool,
    user_id: Uuid,
    cutoff: Date,
    limit: i64,
) -> anyhow::Result<Vec<IntakeTotals>> {
    let rows = sqlx::query_as::<_, IntakeTotals>(
        r#"
        SELECT user_id, date, calorias, proteinas, carbo, gordura
        FROM historical_totals
        WHERE user_id = $1 AND date >= $2
        ORDER BY date ASC
        LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(cutoff)
    .bind(limit)
    .fetch_all(db)
    .await
    .context("list historical totals")?;
    Ok(rows)
}

/// Move every working-set entry dated exactly `boundary` into the
/// historical log. Ids are preserved and the copy skips rows already
/// archived, so re-running for the same boundary moves nothing.
/// Returns the number of rows moved.
pub async fn move_day_to_history(db: &PgPool, boundary: Date) -> anyhow::Result<u64> {
    let mut tx = db.begin().await.context("begin rollover move")?;

    sqlx::query(
        r#"
        INSERT INTO intake_log_history
            (id, user_id, date, description, grams, calorias, proteinas, carbo, gordura, created_at)
        SELECT id, user_id, date, description, grams, calorias, proteinas, carbo, gordura, created_at
        FROM intake_log
        WHERE date = $1
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(boundary)
    .execute(&mut *tx)
    .await
    .context("copy day into history")?;

    let deleted = sqlx::query(r#"DELETE FROM intake_log WHERE date = $1"#)
        .bind(boundary)
        .execute(&mut *tx)
        .await
        .context("clear day from working set")?;

    tx.commit().await.context("commit rollover move")?;

    Ok(deleted.rows_affected())
}

/// Every owner with archived entries for `date`, not just the ones moved
/// by the current call. An interrupted run may have committed the move but
/// died before refreshing some of these owners' totals.
pub async fn archived_owners_for_date(db: &PgPool, date: Date) -> anyhow::Result<Vec<Uuid>> {
    let rows: Vec<(Uuid,)> = sqlx::query_as(
        r#"SELECT DISTINCT user_id FROM intake_log_history WHERE date = $1 ORDER BY user_id"#,
    )
    .bind(date)
    .fetch_all(db)
    .await
    .context("list archived owners")?;
    Ok(rows.into_iter().map(|(user_id,)| user_id).collect())
}
