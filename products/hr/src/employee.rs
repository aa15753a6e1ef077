use std::fmt;

use serde::{Deserialize, Serialize};

/// A single roster entry. Values are never mutated once built.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Employee {
    name: String,
    age: i32,
    department: String,
    salary: f64,
}

impl Employee {
    pub fn new(
        name: impl Into<String>,
        age: i32,
        department: impl Into<String>,
        salary: f64,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            department: department.into(),
            salary,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    /// `"<name> (<department>)"`, the label used by the name/department projection.
    pub fn name_and_department(&self) -> String {
        format!("{} ({})", self.name, self.department)
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:?}` keeps one decimal on whole amounts: 70000.0
        write!(
            f,
            "{} ({}), {}, ${:?}",
            self.name, self.age, self.department, self.salary
        )
    }
}
