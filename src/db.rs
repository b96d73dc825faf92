//!
//! # Schema Setup
//!
//! Idempotent database initialization, run once at process start. Every
//! statement is safe to re-run: enum types are created inside
//! `duplicate_object` guards, tables with `IF NOT EXISTS`, and columns added
//! after the first release with `ADD COLUMN IF NOT EXISTS`.

use sqlx::PgPool;

const ENUM_TYPES: &[&str] = &[
    r#"DO $$ BEGIN
        CREATE TYPE user_role AS ENUM ('student', 'college', 'admin');
    EXCEPTION WHEN duplicate_object THEN NULL;
    END $$"#,
    r#"DO $$ BEGIN
        CREATE TYPE application_status AS ENUM
            ('applied', 'shortlisted', 'interview', 'selected', 'rejected');
    EXCEPTION WHEN duplicate_object THEN NULL;
    END $$"#,
    r#"DO $$ BEGIN
        CREATE TYPE caf_status AS ENUM ('pending', 'approved', 'rejected');
    EXCEPTION WHEN duplicate_object THEN NULL;
    END $$"#,
];

const TABLES: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS profile (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(100) UNIQUE NOT NULL,
        role user_role NOT NULL DEFAULT 'student',
        college VARCHAR(100),
        pass_out_year INT,
        department VARCHAR(100),
        password VARCHAR(255) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS communities (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) UNIQUE NOT NULL,
        description TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS community_members (
        id SERIAL PRIMARY KEY,
        community_id INT NOT NULL REFERENCES communities(id) ON DELETE CASCADE,
        user_id INT NOT NULL REFERENCES profile(id) ON DELETE CASCADE,
        joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        UNIQUE (community_id, user_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS community_posts (
        id SERIAL PRIMARY KEY,
        community_id INT NOT NULL REFERENCES communities(id) ON DELETE CASCADE,
        user_id INT NOT NULL REFERENCES profile(id) ON DELETE CASCADE,
        content TEXT NOT NULL,
        post_type VARCHAR(50) NOT NULL DEFAULT 'discussion',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS caf_forms (
        id SERIAL PRIMARY KEY,
        college_id INT NOT NULL REFERENCES profile(id) ON DELETE CASCADE,
        company_name VARCHAR(200) NOT NULL,
        job_role VARCHAR(200) NOT NULL,
        description TEXT,
        package VARCHAR(100),
        eligibility VARCHAR(500),
        drive_date DATE,
        status caf_status NOT NULL DEFAULT 'pending',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS companies (
        id SERIAL PRIMARY KEY,
        name VARCHAR(200) NOT NULL,
        industry VARCHAR(100),
        website VARCHAR(500),
        description TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS jobs (
        id SERIAL PRIMARY KEY,
        title VARCHAR(200) NOT NULL,
        company_name VARCHAR(200) NOT NULL,
        location VARCHAR(200),
        job_type VARCHAR(50),
        description TEXT,
        posted_by INT REFERENCES profile(id) ON DELETE SET NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS events (
        id SERIAL PRIMARY KEY,
        title VARCHAR(200) NOT NULL,
        description TEXT,
        event_date DATE,
        location VARCHAR(200),
        created_by INT REFERENCES profile(id) ON DELETE SET NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS documents (
        id SERIAL PRIMARY KEY,
        title VARCHAR(200) NOT NULL,
        file_url VARCHAR(500) NOT NULL,
        doc_type VARCHAR(50),
        uploaded_by INT REFERENCES profile(id) ON DELETE SET NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS placement_events (
        id SERIAL PRIMARY KEY,
        title VARCHAR(200) NOT NULL,
        company_name VARCHAR(200) NOT NULL,
        event_date DATE,
        venue VARCHAR(200),
        description TEXT,
        created_by INT REFERENCES profile(id) ON DELETE SET NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS applications (
        id SERIAL PRIMARY KEY,
        student_id INT NOT NULL REFERENCES profile(id) ON DELETE CASCADE,
        company_name VARCHAR(200) NOT NULL,
        role VARCHAR(200) NOT NULL,
        status application_status NOT NULL DEFAULT 'applied',
        applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS student_profiles (
        id SERIAL PRIMARY KEY,
        student_id INT UNIQUE NOT NULL REFERENCES profile(id) ON DELETE CASCADE,
        resume_url VARCHAR(500),
        skills TEXT,
        course VARCHAR(100),
        completion_percentage INT NOT NULL DEFAULT 0,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS notifications (
        id SERIAL PRIMARY KEY,
        user_id INT NOT NULL REFERENCES profile(id) ON DELETE CASCADE,
        title VARCHAR(200) NOT NULL,
        message TEXT,
        is_read BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
];

// Columns that postdate the first deployed schema. Kept separate so older
// databases pick them up without a migration tool.
const COLUMN_UPGRADES: &[&str] = &[
    "ALTER TABLE profile ADD COLUMN IF NOT EXISTS phone VARCHAR(20)",
    "ALTER TABLE communities ADD COLUMN IF NOT EXISTS category VARCHAR(50)",
    "ALTER TABLE communities ADD COLUMN IF NOT EXISTS password VARCHAR(255)",
    "ALTER TABLE communities ADD COLUMN IF NOT EXISTS cover_image VARCHAR(500)",
    "ALTER TABLE communities ADD COLUMN IF NOT EXISTS created_by INT REFERENCES profile(id) ON DELETE SET NULL",
];

/// Ensures every table, enum type, and column the application uses exists.
/// Called once at startup; all statements are idempotent.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for stmt in ENUM_TYPES {
        sqlx::query(stmt).execute(pool).await?;
    }
    for stmt in TABLES {
        sqlx::query(stmt).execute(pool).await?;
    }
    for stmt in COLUMN_UPGRADES {
        sqlx::query(stmt).execute(pool).await?;
    }
    log::info!("Database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_statement_is_idempotent() {
        for stmt in ENUM_TYPES {
            assert!(stmt.contains("duplicate_object"), "unguarded type: {}", stmt);
        }
        for stmt in TABLES {
            assert!(stmt.contains("IF NOT EXISTS"), "unguarded table: {}", stmt);
        }
        for stmt in COLUMN_UPGRADES {
            assert!(stmt.contains("IF NOT EXISTS"), "unguarded column: {}", stmt);
        }
    }

    #[test]
    fn test_membership_pair_is_unique() {
        let members = TABLES
            .iter()
            .find(|s| s.contains("community_members"))
            .unwrap();
        assert!(members.contains("UNIQUE (community_id, user_id)"));
    }
}
