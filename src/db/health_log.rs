//! Append-only health log: one entry per saved analysis.

use std::str::FromStr;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Domain, DomainResult, Language, RiskLevel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthLogEntry {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub log_type: Domain,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub data: serde_json::Value,
    pub result: String,
    pub risk_level: RiskLevel,
}

/// An entry before it is stored; id and timestamp are assigned on append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHealthLog {
    #[serde(rename = "type")]
    pub log_type: Domain,
    #[serde(default)]
    pub data: serde_json::Value,
    pub result: String,
    pub risk_level: RiskLevel,
}

impl NewHealthLog {
    /// Log entry for an analysis result. `None` for retake results, which
    /// carry no reading worth keeping.
    pub fn from_result(result: &DomainResult, language: Language) -> Result<Option<Self>, DatabaseError> {
        if result.is_retake() {
            return Ok(None);
        }
        Ok(Some(Self {
            log_type: result.domain(),
            data: serde_json::to_value(result)?,
            result: result.message().in_language(language).to_string(),
            risk_level: result.risk_level(),
        }))
    }
}

pub fn append_log(conn: &Connection, log: NewHealthLog) -> Result<HealthLogEntry, DatabaseError> {
    let entry = HealthLogEntry {
        id: Uuid::new_v4(),
        log_type: log.log_type,
        timestamp: chrono::Utc::now().timestamp_millis(),
        data: log.data,
        result: log.result,
        risk_level: log.risk_level,
    };

    conn.execute(
        "INSERT INTO health_logs (id, log_type, timestamp, data, result, risk_level)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.id.to_string(),
            entry.log_type.as_str(),
            entry.timestamp,
            serde_json::to_string(&entry.data)?,
            entry.result,
            entry.risk_level.as_str(),
        ],
    )?;

    tracing::debug!(
        id = %entry.id,
        domain = entry.log_type.as_str(),
        risk = entry.risk_level.as_str(),
        "Health log appended"
    );
    Ok(entry)
}

/// All entries in the order they were appended.
pub fn list_logs(conn: &Connection) -> Result<Vec<HealthLogEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, log_type, timestamp, data, result, risk_level
         FROM health_logs ORDER BY seq ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut entries = Vec::new();
    for row in rows {
        let (id, log_type, timestamp, data, result, risk_level) = row?;
        entries.push(HealthLogEntry {
            id: Uuid::parse_str(&id).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            log_type: Domain::from_str(&log_type)?,
            timestamp,
            data: serde_json::from_str(&data)?,
            result,
            risk_level: RiskLevel::from_str(&risk_level)?,
        });
    }
    Ok(entries)
}

/// Delete every entry. Returns how many were removed.
pub fn clear_logs(conn: &Connection) -> Result<usize, DatabaseError> {
    let removed = conn.execute("DELETE FROM health_logs", [])?;
    tracing::info!(removed, "Health log cleared");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::RetakeReason;
    use crate::pipeline::domains::{anemia, retake};

    fn new_log(domain: Domain, risk: RiskLevel) -> NewHealthLog {
        NewHealthLog {
            log_type: domain,
            data: serde_json::json!({ "value": 1 }),
            result: "ok".into(),
            risk_level: risk,
        }
    }

    #[test]
    fn list_returns_entries_in_call_order() {
        let conn = open_memory_database().unwrap();
        let first = append_log(&conn, new_log(Domain::Nutrition, RiskLevel::Low)).unwrap();
        let second = append_log(&conn, new_log(Domain::Anemia, RiskLevel::High)).unwrap();
        let third = append_log(&conn, new_log(Domain::BloodPressure, RiskLevel::Medium)).unwrap();

        let logs = list_logs(&conn).unwrap();
        let ids: Vec<Uuid> = logs.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
        assert_eq!(logs[0], first);
        assert_eq!(logs[1], second);
        assert_eq!(logs.last(), Some(&third));
    }

    #[test]
    fn listed_entry_matches_appended_entry() {
        let conn = open_memory_database().unwrap();
        let log = NewHealthLog {
            log_type: Domain::Nutrition,
            data: serde_json::json!({
                "kind": "nutrition",
                "foods": ["ভাত", "ডাল", "rice"],
                "nutrients": { "protein": 12.5, "iron": 0.25, "calories": 420 },
                "deficiencies": [],
                "note": null
            }),
            result: "আরও সবজি খান".into(),
            risk_level: RiskLevel::Medium,
        };

        let appended = append_log(&conn, log).unwrap();
        let logs = list_logs(&conn).unwrap();
        assert_eq!(logs, vec![appended.clone()]);
        assert_eq!(logs[0].timestamp, appended.timestamp);
        assert_eq!(logs[0].data["foods"][0], "ভাত");
        assert_eq!(logs[0].data["nutrients"]["iron"], 0.25);
    }

    #[test]
    fn ids_are_unique_and_timestamps_set() {
        let conn = open_memory_database().unwrap();
        let a = append_log(&conn, new_log(Domain::Diabetes, RiskLevel::Low)).unwrap();
        let b = append_log(&conn, new_log(Domain::Diabetes, RiskLevel::Low)).unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.timestamp > 0);
        assert!(b.timestamp >= a.timestamp);
    }

    #[test]
    fn clear_removes_everything() {
        let conn = open_memory_database().unwrap();
        append_log(&conn, new_log(Domain::Infection, RiskLevel::Low)).unwrap();
        append_log(&conn, new_log(Domain::Infection, RiskLevel::High)).unwrap();
        assert_eq!(clear_logs(&conn).unwrap(), 2);
        assert!(list_logs(&conn).unwrap().is_empty());
        assert_eq!(clear_logs(&conn).unwrap(), 0);
    }

    #[test]
    fn from_result_uses_preferred_language_message() {
        let result = DomainResult::Anemia(anemia::assess(anemia::AnemiaReading::from_score(70.0)));
        let log = NewHealthLog::from_result(&result, Language::Bn).unwrap().unwrap();
        assert_eq!(log.log_type, Domain::Anemia);
        assert_eq!(log.risk_level, RiskLevel::High);
        assert_eq!(log.result, result.message().bn);
        assert_eq!(log.data["pallorLevel"], 70);
    }

    #[test]
    fn retake_results_are_not_logged() {
        let result = DomainResult::Retake(retake(Domain::BloodPressure, RetakeReason::ImageNotClear));
        assert!(NewHealthLog::from_result(&result, Language::En).unwrap().is_none());
    }

    #[test]
    fn entry_serializes_with_type_key() {
        let entry = HealthLogEntry {
            id: Uuid::nil(),
            log_type: Domain::BloodPressure,
            timestamp: 5,
            data: serde_json::Value::Null,
            result: "a".into(),
            risk_level: RiskLevel::Medium,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "bp");
        assert_eq!(json["riskLevel"], "medium");
    }
}
