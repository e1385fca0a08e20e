use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::RwLock;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ApiError;
use crate::model::employee::{Cpf, Employee};
use crate::model::punch::PunchEvent;
use crate::store::PunchStore;

#[derive(Debug)]
struct EmployeeRecord {
    employee: Employee,
    punches: BTreeMap<NaiveDate, Vec<PunchEvent>>,
}

/// In-memory store keyed by CPF. Stands in for the document database the
/// deployment wires up; good enough for the whole API surface and for tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<Cpf, EmployeeRecord>>,
}

/// Shape of the optional SEED_DATA file: a list of employees, each with an
/// optional day-keyed punch map.
#[derive(Debug, Deserialize)]
struct SeedEmployee {
    #[serde(flatten)]
    employee: Employee,
    #[serde(default)]
    punches: BTreeMap<NaiveDate, Vec<PunchEvent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads employees and punches from a JSON seed file.
    pub fn from_seed_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let seed: Vec<SeedEmployee> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse seed file {}", path.display()))?;

        let store = MemoryStore::new();
        {
            let mut inner = store.inner.write().unwrap_or_else(|e| e.into_inner());
            for entry in seed {
                let cpf = entry.employee.cpf.clone();
                inner.insert(
                    cpf,
                    EmployeeRecord {
                        employee: entry.employee,
                        punches: entry.punches,
                    },
                );
            }
        }
        Ok(store)
    }

    pub fn employee_count(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl PunchStore for MemoryStore {
    fn create_employee(&self, employee: Employee) -> Result<(), ApiError> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if inner.contains_key(&employee.cpf) {
            return Err(ApiError::validation(format!(
                "employee {} already registered",
                employee.cpf
            )));
        }
        inner.insert(
            employee.cpf.clone(),
            EmployeeRecord { employee, punches: BTreeMap::new() },
        );
        Ok(())
    }

    fn list_employees(&self) -> Vec<Employee> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut employees: Vec<Employee> =
            inner.values().map(|r| r.employee.clone()).collect();
        employees.sort_by(|a, b| a.nome.cmp(&b.nome));
        employees
    }

    fn employee(&self, cpf: &Cpf) -> Result<Employee, ApiError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner
            .get(cpf)
            .map(|r| r.employee.clone())
            .ok_or_else(|| ApiError::not_found(format!("employee {cpf} not found")))
    }

    fn punches_for_day(&self, cpf: &Cpf, day: NaiveDate) -> Result<Vec<PunchEvent>, ApiError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let record = inner
            .get(cpf)
            .ok_or_else(|| ApiError::not_found(format!("employee {cpf} not found")))?;
        Ok(record.punches.get(&day).cloned().unwrap_or_default())
    }

    fn punches(&self, cpf: &Cpf) -> Result<BTreeMap<NaiveDate, Vec<PunchEvent>>, ApiError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let record = inner
            .get(cpf)
            .ok_or_else(|| ApiError::not_found(format!("employee {cpf} not found")))?;
        Ok(record.punches.clone())
    }

    fn append_punches(
        &self,
        cpf: &Cpf,
        day: NaiveDate,
        events: Vec<PunchEvent>,
    ) -> Result<(), ApiError> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let record = inner
            .get_mut(cpf)
            .ok_or_else(|| ApiError::not_found(format!("employee {cpf} not found")))?;
        let list = record.punches.entry(day).or_default();
        for event in events {
            if !list.contains(&event) {
                list.push(event);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::punch::PunchKind;
    use chrono::{TimeZone, Utc};

    fn employee(cpf: &str, nome: &str) -> Employee {
        Employee {
            cpf: Cpf(cpf.into()),
            nome: nome.into(),
            departamento: None,
            email: None,
        }
    }

    fn punch(hour: u32) -> PunchEvent {
        let at = Utc.with_ymd_and_hms(2024, 5, 6, hour, 0, 0).unwrap();
        PunchEvent::new(
            PunchKind::ClockIn,
            at,
            NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
        )
    }

    #[test]
    fn unknown_employee_is_not_found() {
        let store = MemoryStore::new();
        let err = store.punches(&Cpf("999".into())).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let store = MemoryStore::new();
        store.create_employee(employee("111", "Ana")).unwrap();
        assert!(store.create_employee(employee("111", "Ana")).is_err());
    }

    #[test]
    fn append_deduplicates_identical_events() {
        let store = MemoryStore::new();
        let cpf = Cpf("111".into());
        store.create_employee(employee("111", "Ana")).unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        store
            .append_punches(&cpf, day, vec![punch(8), punch(8)])
            .unwrap();
        store.append_punches(&cpf, day, vec![punch(8)]).unwrap();

        assert_eq!(store.punches_for_day(&cpf, day).unwrap().len(), 1);
    }

    #[test]
    fn employees_list_sorted_by_name() {
        let store = MemoryStore::new();
        store.create_employee(employee("222", "Bruno")).unwrap();
        store.create_employee(employee("111", "Ana")).unwrap();
        let names: Vec<String> =
            store.list_employees().into_iter().map(|e| e.nome).collect();
        assert_eq!(names, vec!["Ana", "Bruno"]);
    }
}
