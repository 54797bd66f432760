use log::info;
use rusqlite::Connection;

use crate::WorkingDirectory;

pub fn open_db(wd: &WorkingDirectory) -> rusqlite::Result<Connection> {
    let path = &wd.path.join("sushi-runner.db");
    if !path.exists() { info!("Creating new database {}", path.display()) }
    let conn = Connection::open(path)?;

    static SCHEMA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/db/schema.sql"));
    conn.execute(SCHEMA, [])?;

    info!("Creating dry run save point");
    conn.execute("SAVEPOINT dry_run", [])?;

    Ok(conn)
}

/// No-op once the save point has been released
pub fn release_or_rollback(conn: &Connection, dry_run: bool) -> rusqlite::Result<()> {
    if conn.is_autocommit() {
        return Ok(());
    }
    match dry_run {
        true => {
            info!("--dry-run set, rolling back database state");
            conn.execute("ROLLBACK TO dry_run", [])?;
            // ROLLBACK TO keeps the save point open
            conn.execute("RELEASE dry_run", [])?;
        }
        false => {
            info!("--dry-run not set, releasing dry run save point");
            conn.execute("RELEASE dry_run", [])?;
        }
    }
    Ok(())
}
