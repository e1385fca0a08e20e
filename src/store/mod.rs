//! Punch persistence boundary.
//!
//! The engine only ever sees plain data; this trait is the injected handle
//! that hides where it came from. Punch lists are append-only: nothing in
//! the service mutates or deletes a stored event.

mod memory;

pub use memory::MemoryStore;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::ApiError;
use crate::model::employee::{Cpf, Employee};
use crate::model::punch::PunchEvent;

pub trait PunchStore: Send + Sync {
    fn create_employee(&self, employee: Employee) -> Result<(), ApiError>;

    /// All employees, sorted by name.
    fn list_employees(&self) -> Vec<Employee>;

    fn employee(&self, cpf: &Cpf) -> Result<Employee, ApiError>;

    /// Stored punches for one day, in storage order.
    fn punches_for_day(&self, cpf: &Cpf, day: NaiveDate) -> Result<Vec<PunchEvent>, ApiError>;

    /// The full per-day punch map for one employee.
    fn punches(&self, cpf: &Cpf) -> Result<BTreeMap<NaiveDate, Vec<PunchEvent>>, ApiError>;

    /// Appends events to a day's list with set-union semantics: an event
    /// identical to one already filed under that day is dropped silently.
    fn append_punches(
        &self,
        cpf: &Cpf,
        day: NaiveDate,
        events: Vec<PunchEvent>,
    ) -> Result<(), ApiError>;
}
