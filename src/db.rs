use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::de::DeserializeOwned;

use crate::case_study::CaseStudy;

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create database directory {}", dir.display()))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS case_studies (
            id              TEXT PRIMARY KEY,
            company         TEXT NOT NULL,
            title           TEXT NOT NULL,
            tags            TEXT NOT NULL DEFAULT '[]',
            display_order   INTEGER NOT NULL DEFAULT 0,
            client_snapshot TEXT NOT NULL DEFAULT '',
            background      TEXT NOT NULL DEFAULT '',
            challenge       TEXT NOT NULL DEFAULT '[]',
            process         TEXT NOT NULL DEFAULT '[]',
            results         TEXT NOT NULL DEFAULT '[]',
            company_size    TEXT,
            timeline        TEXT,
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_case_studies_order ON case_studies(display_order);
        ",
    )?;
    Ok(())
}

const SELECT_COLUMNS: &str = "SELECT id, company, title, tags, display_order, client_snapshot, \
     background, challenge, process, results, company_size, timeline, created_at, updated_at \
     FROM case_studies";

/// List fields are stored as JSON text.
fn json_column<T: DeserializeOwned>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn case_study_from_row(row: &Row) -> rusqlite::Result<CaseStudy> {
    Ok(CaseStudy {
        id: row.get(0)?,
        company: row.get(1)?,
        title: row.get(2)?,
        tags: json_column(row, 3)?,
        display_order: row.get(4)?,
        client_snapshot: row.get(5)?,
        background: row.get(6)?,
        challenge: json_column(row, 7)?,
        process: json_column(row, 8)?,
        results: json_column(row, 9)?,
        company_size: row.get(10)?,
        timeline: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

// ── Reads ──

/// Every case study in display order.
pub fn list(conn: &Connection) -> Result<Vec<CaseStudy>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY display_order, id", SELECT_COLUMNS))?;
    let rows = stmt
        .query_map([], case_study_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<CaseStudy>> {
    let row = conn
        .query_row(
            &format!("{} WHERE id = ?1", SELECT_COLUMNS),
            params![id],
            case_study_from_row,
        )
        .optional()?;
    Ok(row)
}

/// Display position for a newly added case study: after everything else.
pub fn next_display_order(conn: &Connection) -> Result<i64> {
    let next = conn.query_row(
        "SELECT COALESCE(MAX(display_order) + 1, 0) FROM case_studies",
        [],
        |row| row.get(0),
    )?;
    Ok(next)
}

// ── Writes ──

/// Insert or update by id. `created_at` of an existing row is never touched.
pub fn upsert(conn: &Connection, records: &[CaseStudy]) -> Result<usize> {
    let now = chrono::Utc::now().to_rfc3339();
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO case_studies (
                id, company, title, tags, display_order, client_snapshot, background,
                challenge, process, results, company_size, timeline, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            ON CONFLICT(id) DO UPDATE SET
                company = excluded.company,
                title = excluded.title,
                tags = excluded.tags,
                display_order = excluded.display_order,
                client_snapshot = excluded.client_snapshot,
                background = excluded.background,
                challenge = excluded.challenge,
                process = excluded.process,
                results = excluded.results,
                company_size = excluded.company_size,
                timeline = excluded.timeline,
                updated_at = excluded.updated_at",
        )?;
        for r in records {
            count += stmt.execute(params![
                r.id,
                r.company,
                r.title,
                serde_json::to_string(&r.tags)?,
                r.display_order,
                r.client_snapshot,
                r.background,
                serde_json::to_string(&r.challenge)?,
                serde_json::to_string(&r.process)?,
                serde_json::to_string(&r.results)?,
                r.company_size,
                r.timeline,
                r.created_at.as_deref().unwrap_or(&now),
                now,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

/// Remove by id; unknown ids are ignored. Returns rows removed.
pub fn delete(conn: &Connection, ids: &[String]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare("DELETE FROM case_studies WHERE id = ?1")?;
        for id in ids {
            count += stmt.execute(params![id])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

/// Put `ids` first, in the given order. Everything not listed keeps its
/// relative order behind them.
pub fn reorder(conn: &Connection, ids: &[String]) -> Result<usize> {
    let now = chrono::Utc::now().to_rfc3339();
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        tx.execute(
            "UPDATE case_studies SET display_order = display_order + ?1",
            params![ids.len() as i64],
        )?;
        let mut stmt = tx.prepare(
            "UPDATE case_studies SET display_order = ?1, updated_at = ?2 WHERE id = ?3",
        )?;
        for (position, id) in ids.iter().enumerate() {
            count += stmt.execute(params![position as i64, now, id])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ProcessStep, ResultMetric};

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn sample(company: &str, order: i64) -> CaseStudy {
        let mut cs = CaseStudy::new(company, "Case Study");
        cs.display_order = order;
        cs
    }

    fn ids(conn: &Connection) -> Vec<String> {
        list(conn).unwrap().into_iter().map(|c| c.id).collect()
    }

    #[test]
    fn upsert_round_trips_every_field() {
        let conn = memory_db();
        let mut cs = sample("Northwind", 2);
        cs.tags = vec!["Logistics".into(), "Planning".into()];
        cs.client_snapshot = "Regional freight operator".into();
        cs.background = "Spreadsheet planning".into();
        cs.challenge = vec!["Carrier capacity tracked by hand".into()];
        cs.process = vec![ProcessStep {
            phase: "Phase 1".into(),
            description: "Mapped every handoff".into(),
        }];
        cs.results = vec![ResultMetric {
            metric: "38%".into(),
            value: "38% fewer late shipments".into(),
            description: "38% fewer late shipments".into(),
        }];
        cs.company_size = Some("1,200 employees".into());
        cs.timeline = Some("9 months".into());

        assert_eq!(upsert(&conn, std::slice::from_ref(&cs)).unwrap(), 1);

        let stored = get(&conn, &cs.id).unwrap().unwrap();
        assert!(stored.created_at.is_some());
        assert!(stored.updated_at.is_some());
        assert_eq!(
            CaseStudy {
                created_at: None,
                updated_at: None,
                ..stored
            },
            cs
        );
    }

    #[test]
    fn upsert_keeps_created_at() {
        let conn = memory_db();
        let mut cs = sample("Acme", 0);
        cs.created_at = Some("2020-01-01T00:00:00+00:00".into());
        upsert(&conn, &[cs.clone()]).unwrap();

        cs.created_at = None;
        cs.title = "Renamed".into();
        upsert(&conn, &[cs.clone()]).unwrap();

        let stored = get(&conn, &cs.id).unwrap().unwrap();
        assert_eq!(stored.title, "Renamed");
        assert_eq!(stored.created_at.as_deref(), Some("2020-01-01T00:00:00+00:00"));
        assert_eq!(list(&conn).unwrap().len(), 1);
    }

    #[test]
    fn list_is_in_display_order() {
        let conn = memory_db();
        upsert(&conn, &[sample("Gamma", 2), sample("Alpha", 0), sample("Beta", 1)]).unwrap();
        assert_eq!(
            ids(&conn),
            ["alpha-case-study", "beta-case-study", "gamma-case-study"]
        );
    }

    #[test]
    fn get_missing() {
        let conn = memory_db();
        assert!(get(&conn, "nope").unwrap().is_none());
    }

    #[test]
    fn delete_ignores_unknown_ids() {
        let conn = memory_db();
        upsert(&conn, &[sample("Alpha", 0), sample("Beta", 1)]).unwrap();
        let removed = delete(&conn, &["alpha-case-study".into(), "ghost".into()]).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(ids(&conn), ["beta-case-study"]);
    }

    #[test]
    fn reorder_moves_listed_first() {
        let conn = memory_db();
        upsert(
            &conn,
            &[sample("Alpha", 0), sample("Beta", 1), sample("Gamma", 2), sample("Delta", 3)],
        )
        .unwrap();

        let changed =
            reorder(&conn, &["gamma-case-study".into(), "alpha-case-study".into()]).unwrap();
        assert_eq!(changed, 2);
        assert_eq!(
            ids(&conn),
            ["gamma-case-study", "alpha-case-study", "beta-case-study", "delta-case-study"]
        );
    }

    #[test]
    fn next_order_appends() {
        let conn = memory_db();
        assert_eq!(next_display_order(&conn).unwrap(), 0);
        upsert(&conn, &[sample("Alpha", 0), sample("Beta", 4)]).unwrap();
        assert_eq!(next_display_order(&conn).unwrap(), 5);
    }

    #[test]
    fn connect_creates_parent_dir() {
        let dir = std::env::temp_dir().join(format!("casekit-db-test-{}", std::process::id()));
        let path = dir.join("nested").join("store.sqlite");
        let conn = connect(&path).unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
        assert!(path.exists());
        drop(conn);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
