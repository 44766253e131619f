use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement,
};

use super::config::Config;

/// Opens the store described by `config` and brings the schema up to date.
pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);
    if let Some(max) = config.max_connections {
        options.max_connections(max);
    }

    tracing::info!("Connecting to {}", config.database_url);
    open(options).await
}

/// Opens a store by URL with default pool settings (used by tests with `sqlite::memory:`).
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);
    open(options).await
}

async fn open(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // SQLite has no fixed-point type: money columns are REAL and values are
    // rounded to two places when read back.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            course_id INTEGER PRIMARY KEY AUTOINCREMENT,
            course_name VARCHAR(100) NOT NULL,
            duration VARCHAR(50)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS students (
            student_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(100) NOT NULL,
            email VARCHAR(100) UNIQUE,
            phone VARCHAR(15),
            course_id INTEGER REFERENCES courses(course_id) ON DELETE SET NULL,
            balance REAL NOT NULL DEFAULT 0 CHECK (balance >= 0),
            enrollment_status VARCHAR(16) NOT NULL DEFAULT 'ACTIVE'
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS payments (
            payment_id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER NOT NULL REFERENCES students(student_id),
            amount REAL NOT NULL CHECK (amount > 0),
            payment_date TEXT NOT NULL,
            payment_type VARCHAR(16) NOT NULL CHECK (payment_type IN ('payment', 'refund'))
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_payments_student_id ON payments(student_id)".to_owned(),
    ))
    .await?;

    Ok(())
}
