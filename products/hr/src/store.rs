use tracing::debug;

use crate::{Employee, roster::demo_roster};

/// Owns the roster and answers the read-only roster queries.
///
/// The roster is fixed at construction. Every query is a pure function of it,
/// so a store behind an `Arc` can be read from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct EmployeeStore {
    roster: Vec<Employee>,
}

impl EmployeeStore {
    pub fn new(roster: impl Into<Vec<Employee>>) -> Self {
        let roster = roster.into();
        debug!(employees = roster.len(), "employee store constructed");
        Self { roster }
    }

    /// Store seeded with the bundled demo roster.
    pub fn demo() -> Self {
        Self::new(demo_roster())
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// The full roster in insertion order.
    pub fn list_all(&self) -> &[Employee] {
        &self.roster
    }

    /// One `"<name> (<department>)"` label per employee.
    ///
    /// Index `i` of the result always describes `list_all()[i]`; callers zip
    /// the two back together when rendering rows.
    pub fn project_name_department(&self) -> Vec<String> {
        self.roster
            .iter()
            .map(Employee::name_and_department)
            .collect()
    }

    /// Mean salary across the roster, `0.0` when the roster is empty.
    pub fn average_salary(&self) -> f64 {
        if self.roster.is_empty() {
            return 0.0;
        }
        compensated_sum(self.roster.iter().map(Employee::salary)) / self.roster.len() as f64
    }

    /// Employees strictly older than `threshold`, in roster order.
    pub fn filter_by_age(&self, threshold: i32) -> Vec<Employee> {
        let matched: Vec<Employee> = self
            .roster
            .iter()
            .filter(|employee| employee.age() > threshold)
            .cloned()
            .collect();
        debug!(threshold, matched = matched.len(), "filtered roster by age");
        matched
    }
}

impl FromIterator<Employee> for EmployeeStore {
    fn from_iter<I: IntoIterator<Item = Employee>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

// Neumaier summation. An overflowed total yields the plain sum, never NaN.
fn compensated_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    let mut simple = 0.0_f64;
    for value in values {
        simple += value;
        let next = sum + value;
        if sum.abs() >= value.abs() {
            compensation += (sum - next) + value;
        } else {
            compensation += (value - next) + sum;
        }
        sum = next;
    }
    let total = sum + compensation;
    if total.is_nan() && simple.is_infinite() {
        simple
    } else {
        total
    }
}
