use crate::error::{CatalogError, Result};
use crate::storage::ScheduleSink;
use crate::types::NormalizedRow;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::info;

/// SQLite sink: drops and recreates the destination table, inserts all
/// rows in one transaction, then verifies the table exists
pub struct SqliteSink {
    path: PathBuf,
}

impl SqliteSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ScheduleSink for SqliteSink {
    async fn replace_table(&self, table: &str, rows: &[NormalizedRow]) -> Result<()> {
        // The table name is interpolated into DDL, so it must be a bare
        // identifier
        validate_table_name(table)?;

        let mut conn = Connection::open(&self.path).map_err(db_error)?;
        let tx = conn.transaction().map_err(db_error)?;

        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table};
             CREATE TABLE {table} (
                crn           TEXT NOT NULL,
                course_id     TEXT NOT NULL,
                display_name  TEXT NOT NULL,
                section_id    TEXT NOT NULL,
                credits       REAL NOT NULL,
                schedule_type TEXT NOT NULL,
                campus        TEXT NOT NULL,
                building      TEXT,
                start_date    TEXT,
                end_date      TEXT,
                start_time    TEXT NOT NULL,
                end_time      TEXT NOT NULL,
                monday        INTEGER NOT NULL,
                tuesday       INTEGER NOT NULL,
                wednesday     INTEGER NOT NULL,
                thursday      INTEGER NOT NULL,
                friday        INTEGER NOT NULL
            );"
        ))
        .map_err(db_error)?;

        {
            let mut stmt = tx
                .prepare(&format!(
                    "INSERT INTO {table} (crn, course_id, display_name, section_id, credits, \
                     schedule_type, campus, building, start_date, end_date, start_time, end_time, \
                     monday, tuesday, wednesday, thursday, friday) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)"
                ))
                .map_err(db_error)?;
            for row in rows {
                stmt.execute(params![
                    row.crn,
                    row.course_id,
                    row.display_name,
                    row.section_id,
                    row.credits,
                    row.schedule_type,
                    row.campus,
                    row.building,
                    row.start_date,
                    row.end_date,
                    row.start_time.format("%H:%M:%S").to_string(),
                    row.end_time.format("%H:%M:%S").to_string(),
                    row.monday,
                    row.tuesday,
                    row.wednesday,
                    row.thursday,
                    row.friday,
                ])
                .map_err(db_error)?;
            }
        }

        tx.commit().map_err(db_error)?;

        // Confirm the load landed before reporting success
        let created: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![table],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_error)?;
        if created.is_none() {
            return Err(CatalogError::Database {
                message: format!("table '{table}' missing after load"),
            });
        }

        info!(
            "Loaded {} rows into table '{}' at {}",
            rows.len(),
            table,
            self.path.display()
        );
        Ok(())
    }
}

fn validate_table_name(table: &str) -> Result<()> {
    let valid = !table.is_empty()
        && !table.starts_with(|c: char| c.is_ascii_digit())
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(CatalogError::Database {
            message: format!("invalid table name: {table:?}"),
        })
    }
}

fn db_error(e: rusqlite::Error) -> CatalogError {
    CatalogError::Database {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use tempfile::tempdir;

    fn row(crn: &str) -> NormalizedRow {
        NormalizedRow {
            crn: crn.to_string(),
            course_id: "CS 1331".to_string(),
            display_name: "Object-Oriented Programming".to_string(),
            section_id: "A".to_string(),
            credits: 3.0,
            schedule_type: "Lecture".to_string(),
            campus: "Atlanta".to_string(),
            building: None,
            start_date: Some("2025-01-06".to_string()),
            end_date: Some("2025-05-02".to_string()),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
            monday: true,
            tuesday: false,
            wednesday: true,
            thursday: false,
            friday: true,
        }
    }

    #[tokio::test]
    async fn creates_and_fills_the_table() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let sink = SqliteSink::new(&db_path);

        sink.replace_table("gt_classes", &[row("12345"), row("12346")])
            .await
            .unwrap();

        let conn = Connection::open(&db_path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM gt_classes", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let (crn, start_time, monday): (String, String, bool) = conn
            .query_row(
                "SELECT crn, start_time, monday FROM gt_classes LIMIT 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(crn, "12345");
        assert_eq!(start_time, "08:00:00");
        assert!(monday);
    }

    #[tokio::test]
    async fn loading_twice_leaves_one_copy() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let sink = SqliteSink::new(&db_path);

        let rows = vec![row("12345")];
        sink.replace_table("gt_classes", &rows).await.unwrap();
        sink.replace_table("gt_classes", &rows).await.unwrap();

        let conn = Connection::open(&db_path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM gt_classes", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn rejects_non_identifier_table_names() {
        let dir = tempdir().unwrap();
        let sink = SqliteSink::new(dir.path().join("test.db"));

        let err = sink
            .replace_table("gt_classes; DROP TABLE x", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Database { .. }));
    }
}
