//! Idempotent DDL bootstrap. There is exactly one fixed schema per
//! database kind, so provisioning runs inline DDL instead of cloning a
//! template database.

use sqlx::PgPool;

/// System database: shop-owner identity records.
pub async fn ensure_system_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            shop_name TEXT NOT NULL,
            database TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Tenant database: one shop's debt notes.
pub async fn ensure_shop_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        DO $$ BEGIN
            CREATE TYPE debt_status AS ENUM ('unpaid', 'paid', 'disabled');
        EXCEPTION WHEN duplicate_object THEN NULL;
        END $$
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS debts (
            id UUID PRIMARY KEY,
            customer_name TEXT NOT NULL,
            phone TEXT,
            items JSONB NOT NULL DEFAULT '[]'::jsonb,
            total NUMERIC(14, 2) NOT NULL,
            due_date TIMESTAMPTZ,
            status debt_status NOT NULL DEFAULT 'unpaid',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
