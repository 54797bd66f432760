use chrono::Utc;
use log::info;
use rusqlite::{params, Connection};

use crate::db::job::state::JobState;

pub fn update(conn: &Connection, id: i64, state: JobState) -> rusqlite::Result<()> {
    info!("Updating job {id} with state {state}");
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "UPDATE job SET state = ?1, updated_at = ?2 WHERE id = ?3",
        params![state.as_str(), now, id],
    )?;
    Ok(())
}
