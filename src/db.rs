use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use tokio::fs;

pub const MIGRATIONS_DIR: &str = "migrations";

pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let conn = Database::connect(database_url)
        .await
        .context("connecting to the products database")?;
    Ok(conn)
}

/// Replays every `.sql` file under [`MIGRATIONS_DIR`] in filename order and
/// returns how many files ran.
///
/// Nothing records applied files, so each one must be idempotent
/// (`CREATE TABLE IF NOT EXISTS`).
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<usize> {
    let files = migration_files(Path::new(MIGRATIONS_DIR)).await?;
    let backend = conn.get_database_backend();

    for file in &files {
        let sql = fs::read_to_string(file)
            .await
            .with_context(|| format!("reading {}", file.display()))?;
        let mut applied = 0;
        for stmt in statements(&sql) {
            conn.execute(Statement::from_string(backend, stmt)).await?;
            applied += 1;
        }
        tracing::debug!(file = %file.display(), statements = applied, "migration applied");
    }

    Ok(files.len())
}

async fn migration_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .await
        .with_context(|| format!("reading {}", dir.display()))?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// Postgres prepared statements take one command each.
fn statements(sql: &str) -> impl Iterator<Item = String> + '_ {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(|stmt| format!("{stmt};"))
}
