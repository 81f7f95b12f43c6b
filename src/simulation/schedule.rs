//! Servicios agendados y recordatorios
//!
//! Los servicios futuros generan recordatorios; un set acotado keyed por
//! (vehículo, fecha) evita repetir el mismo recordatorio en la sesión.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::vehicle::SimError;

/// Entrada de servicio en el historial de un vehículo simulado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub date: DateTime<Utc>,
    pub kind: String,
    pub cost: f64,
    #[serde(default)]
    pub notes: String,
}

impl ServiceEntry {
    pub fn new(
        date: DateTime<Utc>,
        kind: &str,
        cost: f64,
        notes: &str,
    ) -> Result<Self, SimError> {
        if kind.trim().is_empty() {
            return Err(SimError::EmptyServiceKind);
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(SimError::NegativeCost);
        }
        Ok(Self {
            date,
            kind: kind.trim().to_string(),
            cost,
            notes: notes.trim().to_string(),
        })
    }

    /// Agendado hoy o en el futuro (comparación por día, en UTC)
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date.date_naive() >= now.date_naive()
    }
}

impl fmt::Display for ServiceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {:.2}",
            self.kind,
            self.date.format("%Y-%m-%d"),
            self.cost
        )?;
        if !self.notes.is_empty() {
            write!(f, " ({})", self.notes)?;
        }
        Ok(())
    }
}

/// Set acotado de recordatorios ya mostrados, keyed por (vehículo, fecha).
/// Al llegar a capacidad se descarta la entrada más antigua (FIFO).
#[derive(Debug)]
pub struct ReminderLog {
    seen: HashSet<(String, NaiveDate)>,
    order: VecDeque<(String, NaiveDate)>,
    capacity: usize,
}

impl ReminderLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            seen: HashSet::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Marcar un recordatorio como mostrado. Devuelve true si es nuevo.
    pub fn mark(&mut self, vehicle_id: &str, date: NaiveDate) -> bool {
        let key = (vehicle_id.to_string(), date);
        if self.seen.contains(&key) {
            return false;
        }
        if self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.seen.insert(key);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_entry_validation() {
        let now = Utc::now();
        assert!(ServiceEntry::new(now, "aceite", 40.0, "").is_ok());
        assert_eq!(
            ServiceEntry::new(now, "  ", 40.0, "").unwrap_err(),
            SimError::EmptyServiceKind
        );
        assert_eq!(
            ServiceEntry::new(now, "aceite", -1.0, "").unwrap_err(),
            SimError::NegativeCost
        );
    }

    #[test]
    fn test_is_upcoming() {
        let now = Utc::now();
        let past = ServiceEntry::new(now - Duration::days(2), "aceite", 40.0, "").unwrap();
        let today = ServiceEntry::new(now, "frenos", 90.0, "").unwrap();
        let future = ServiceEntry::new(now + Duration::days(2), "revisión", 60.0, "").unwrap();

        assert!(!past.is_upcoming(now));
        assert!(today.is_upcoming(now));
        assert!(future.is_upcoming(now));
    }

    #[test]
    fn test_display_includes_notes() {
        let now = Utc::now();
        let entry = ServiceEntry::new(now, "aceite", 40.5, "filtro incluido").unwrap();
        let text = entry.to_string();
        assert!(text.starts_with("aceite"));
        assert!(text.contains("40.50"));
        assert!(text.contains("filtro incluido"));
    }

    #[test]
    fn test_reminder_dedup() {
        let mut log = ReminderLog::new(10);
        let date = Utc::now().date_naive();

        assert!(log.mark("v1", date));
        assert!(!log.mark("v1", date));
        // Otro vehículo con la misma fecha es otro recordatorio
        assert!(log.mark("v2", date));
    }

    #[test]
    fn test_reminder_log_is_bounded() {
        let mut log = ReminderLog::new(2);
        let date = Utc::now().date_naive();

        assert!(log.mark("v1", date));
        assert!(log.mark("v2", date));
        assert_eq!(log.len(), 2);

        // v3 expulsa a v1 (FIFO), que vuelve a contar como nuevo
        assert!(log.mark("v3", date));
        assert_eq!(log.len(), 2);
        assert!(log.mark("v1", date));
    }
}
