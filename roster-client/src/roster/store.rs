//! Record store: current rows, baseline and pending buckets

use crate::RosterError;
use shared::util::LocalIdGenerator;
use shared::{Employee, EmployeeId};
use std::fmt;
use std::str::FromStr;

/// Which list a row lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Rows loaded from the store
    Current,
    /// Rows added locally, not yet persisted
    PendingCreates,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Current => write!(f, "current"),
            Bucket::PendingCreates => write!(f, "pendingCreates"),
        }
    }
}

/// Editable employee field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeField {
    FirstName,
    LastName,
    Branch,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 3] = [Self::FirstName, Self::LastName, Self::Branch];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeField::FirstName => "firstName",
            EmployeeField::LastName => "lastName",
            EmployeeField::Branch => "branch",
        }
    }

    pub fn get<'a>(&self, employee: &'a Employee) -> &'a str {
        match self {
            EmployeeField::FirstName => &employee.first_name,
            EmployeeField::LastName => &employee.last_name,
            EmployeeField::Branch => &employee.branch,
        }
    }

    pub fn set(&self, employee: &mut Employee, value: impl Into<String>) {
        let slot = match self {
            EmployeeField::FirstName => &mut employee.first_name,
            EmployeeField::LastName => &mut employee.last_name,
            EmployeeField::Branch => &mut employee.branch,
        };
        *slot = value.into();
    }
}

impl fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeField {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" | "first_name" => Ok(EmployeeField::FirstName),
            "lastName" | "last_name" => Ok(EmployeeField::LastName),
            "branch" => Ok(EmployeeField::Branch),
            other => Err(RosterError::UnknownField(other.to_string())),
        }
    }
}

/// A loaded row plus its local dirty flag
///
/// `is_changed` never leaves the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub employee: Employee,
    pub is_changed: bool,
}

impl EmployeeRow {
    pub fn id(&self) -> EmployeeId {
        self.employee.id
    }
}

impl From<Employee> for EmployeeRow {
    fn from(employee: Employee) -> Self {
        Self {
            employee,
            is_changed: false,
        }
    }
}

/// Roster state for one table session
///
/// - `current`: rows as rendered and edited
/// - `baseline`: rows as last confirmed by the store
/// - `pending_creates`: local additions, never also in `current`
/// - `pending_deletes`: ids removed from `current`, unique
#[derive(Debug, Clone, Default)]
pub struct RosterState {
    pub(crate) baseline: Vec<Employee>,
    pub(crate) current: Vec<EmployeeRow>,
    pub(crate) pending_creates: Vec<Employee>,
    pub(crate) pending_deletes: Vec<EmployeeId>,
    pub(crate) ids: LocalIdGenerator,
}

impl RosterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `current` and `baseline` with a fresh list from the store.
    ///
    /// Every row comes back clean. Pending buckets are left alone; rows
    /// whose ids are still pending deletion stay hidden from `current`.
    pub fn load(&mut self, records: Vec<Employee>) {
        self.current = records
            .iter()
            .filter(|e| !self.pending_deletes.contains(&e.id))
            .cloned()
            .map(EmployeeRow::from)
            .collect();
        self.baseline = records;
        tracing::debug!(
            rows = self.current.len(),
            pending_deletes = self.pending_deletes.len(),
            "Roster loaded"
        );
    }

    /// Rows of `current` on the given page; empty when out of range
    pub fn windowed(&self, page_index: usize, page_size: usize) -> &[EmployeeRow] {
        let start = page_index.saturating_mul(page_size);
        if page_size == 0 || start >= self.current.len() {
            return &[];
        }
        let end = start.saturating_add(page_size).min(self.current.len());
        &self.current[start..end]
    }

    pub fn current(&self) -> &[EmployeeRow] {
        &self.current
    }

    pub fn baseline(&self) -> &[Employee] {
        &self.baseline
    }

    pub fn pending_creates(&self) -> &[Employee] {
        &self.pending_creates
    }

    pub fn pending_deletes(&self) -> &[EmployeeId] {
        &self.pending_deletes
    }

    /// Whether anything would be sent by a flush
    pub fn is_dirty(&self) -> bool {
        !self.pending_creates.is_empty()
            || !self.pending_deletes.is_empty()
            || self.current.iter().any(|row| row.is_changed)
    }

    pub fn len(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Current => self.current.len(),
            Bucket::PendingCreates => self.pending_creates.len(),
        }
    }

    /// Id of the row at `index`, for routing a UI event to a record
    pub fn id_at(&self, bucket: Bucket, index: usize) -> Result<EmployeeId, RosterError> {
        let id = match bucket {
            Bucket::Current => self.current.get(index).map(EmployeeRow::id),
            Bucket::PendingCreates => self.pending_creates.get(index).map(|e| e.id),
        };
        id.ok_or(RosterError::IndexOutOfRange {
            bucket,
            index,
            len: self.len(bucket),
        })
    }

    pub(crate) fn position(&self, bucket: Bucket, id: EmployeeId) -> Option<usize> {
        match bucket {
            Bucket::Current => self.current.iter().position(|row| row.id() == id),
            Bucket::PendingCreates => self.pending_creates.iter().position(|e| e.id == id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: i64) -> Vec<Employee> {
        (1..=n)
            .map(|i| Employee::new(i, format!("F{i}"), format!("L{i}"), "X"))
            .collect()
    }

    #[test]
    fn test_load_replaces_current_and_baseline() {
        let mut state = RosterState::new();
        state.load(roster(3));
        assert_eq!(state.current().len(), 3);
        assert_eq!(state.baseline().len(), 3);
        assert!(state.current().iter().all(|row| !row.is_changed));

        state.current[0].is_changed = true;
        state.load(roster(2));
        assert_eq!(state.current().len(), 2);
        assert_eq!(state.baseline().len(), 2);
        assert!(state.current().iter().all(|row| !row.is_changed));
    }

    #[test]
    fn test_load_keeps_pending_buckets() {
        let mut state = RosterState::new();
        state.pending_creates.push(Employee::blank(EmployeeId(900)));
        state.pending_deletes.push(EmployeeId(2));

        state.load(roster(3));

        assert_eq!(state.pending_creates().len(), 1);
        assert_eq!(state.pending_deletes(), &[EmployeeId(2)]);
        // still pending deletion, so not shown again
        let ids: Vec<_> = state.current().iter().map(EmployeeRow::id).collect();
        assert_eq!(ids, vec![EmployeeId(1), EmployeeId(3)]);
        assert_eq!(state.baseline().len(), 3);
    }

    #[test]
    fn test_windowed_pages() {
        let mut state = RosterState::new();
        state.load(roster(12));

        let first = state.windowed(0, 5);
        assert_eq!(first.len(), 5);
        assert_eq!(first[0].id(), EmployeeId(1));

        let last = state.windowed(2, 5);
        assert_eq!(last.len(), 2);
        assert_eq!(last[1].id(), EmployeeId(12));

        assert!(state.windowed(3, 5).is_empty());
        assert!(state.windowed(usize::MAX, 5).is_empty());
        assert!(state.windowed(0, 0).is_empty());
    }

    #[test]
    fn test_id_at_out_of_range() {
        let mut state = RosterState::new();
        state.load(roster(1));
        assert_eq!(state.id_at(Bucket::Current, 0).unwrap(), EmployeeId(1));

        match state.id_at(Bucket::PendingCreates, 0) {
            Err(RosterError::IndexOutOfRange { bucket, index, len }) => {
                assert_eq!(bucket, Bucket::PendingCreates);
                assert_eq!(index, 0);
                assert_eq!(len, 0);
            }
            other => panic!("Expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_field_names() {
        assert_eq!("firstName".parse::<EmployeeField>().unwrap(), EmployeeField::FirstName);
        assert_eq!("last_name".parse::<EmployeeField>().unwrap(), EmployeeField::LastName);
        assert_eq!("branch".parse::<EmployeeField>().unwrap(), EmployeeField::Branch);
        assert!(matches!(
            "salary".parse::<EmployeeField>(),
            Err(RosterError::UnknownField(name)) if name == "salary"
        ));

        let mut employee = Employee::blank(EmployeeId(1));
        for field in EmployeeField::ALL {
            field.set(&mut employee, field.as_str());
            assert_eq!(field.get(&employee), field.as_str());
        }
    }
}
