//! What the user currently sees: the last rendered roster result.

use std::{fmt, sync::Arc};

use platform_api::{ApiResult, parse_age_threshold};
use products_hr::{Employee, EmployeeStore};
use serde::Serialize;

/// One table row: the projection label zipped back with age and salary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmployeeRow {
    pub label: String,
    pub age: i32,
    pub salary: f64,
}

/// Zip `labels` with the employees they were projected from.
pub fn zip_rows(labels: Vec<String>, employees: &[Employee]) -> Vec<EmployeeRow> {
    labels
        .into_iter()
        .zip(employees)
        .map(|(label, employee)| EmployeeRow {
            label,
            age: employee.age(),
            salary: employee.salary(),
        })
        .collect()
}

/// Table rows for the full roster.
pub fn roster_rows(store: &EmployeeStore) -> Vec<EmployeeRow> {
    zip_rows(store.project_name_department(), store.list_all())
}

fn rows_for(employees: &[Employee]) -> Vec<EmployeeRow> {
    zip_rows(
        employees.iter().map(Employee::name_and_department).collect(),
        employees,
    )
}

#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Blank,
    Listing(Vec<Employee>),
    Roster(Vec<EmployeeRow>),
    NameDepartments(Vec<String>),
    AverageSalary(f64),
    OlderThan {
        threshold: i32,
        rows: Vec<EmployeeRow>,
    },
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Blank => Ok(()),
            Screen::Listing(employees) => {
                writeln!(f, "Employees loaded.")?;
                for employee in employees {
                    writeln!(f, "  {employee}")?;
                }
                Ok(())
            }
            Screen::Roster(rows) => {
                writeln!(f, "Employees loaded.")?;
                write_table(f, rows)
            }
            Screen::NameDepartments(labels) => {
                writeln!(f, "Names & departments:")?;
                for label in labels {
                    writeln!(f, "  {label}")?;
                }
                Ok(())
            }
            Screen::AverageSalary(average) => writeln!(f, "Average salary: {average:.2}"),
            Screen::OlderThan { threshold, rows } => {
                writeln!(f, "Employees older than {threshold}:")?;
                if rows.is_empty() {
                    return writeln!(f, "  (none)");
                }
                write_table(f, rows)
            }
        }
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, rows: &[EmployeeRow]) -> fmt::Result {
    let width = rows
        .iter()
        .map(|row| row.label.chars().count())
        .chain(std::iter::once("Employee".len()))
        .max()
        .unwrap_or_default();
    writeln!(f, "  {:<width$}  {:>5}  {:>12}", "Employee", "Age", "Salary")?;
    for row in rows {
        writeln!(
            f,
            "  {:<width$}  {:>5}  {:>12.2}",
            row.label, row.age, row.salary
        )?;
    }
    Ok(())
}

/// Holds the store and the screen currently displayed.
pub struct RosterView {
    store: Arc<EmployeeStore>,
    screen: Screen,
}

impl RosterView {
    pub fn new(store: Arc<EmployeeStore>) -> Self {
        Self {
            store,
            screen: Screen::Blank,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Plain one-line-per-employee listing.
    pub fn list(&mut self) -> &Screen {
        self.show(Screen::Listing(self.store.list_all().to_vec()))
    }

    pub fn load(&mut self) -> &Screen {
        self.show(Screen::Roster(roster_rows(&self.store)))
    }

    pub fn name_departments(&mut self) -> &Screen {
        self.show(Screen::NameDepartments(self.store.project_name_department()))
    }

    pub fn average_salary(&mut self) -> &Screen {
        self.show(Screen::AverageSalary(self.store.average_salary()))
    }

    /// Parse `raw` and show the filtered roster. A parse failure leaves the
    /// current screen in place.
    pub fn filter(&mut self, raw: &str) -> ApiResult<&Screen> {
        let threshold = parse_age_threshold(raw)?;
        let rows = rows_for(&self.store.filter_by_age(threshold));
        Ok(self.show(Screen::OlderThan { threshold, rows }))
    }

    fn show(&mut self, screen: Screen) -> &Screen {
        self.screen = screen;
        &self.screen
    }
}
