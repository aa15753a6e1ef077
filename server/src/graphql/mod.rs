use std::sync::Arc;

use async_graphql::{EmptyMutation, EmptySubscription, Object, Schema, SimpleObject};
use products_hr::{Employee, EmployeeStore};
use tracing::instrument;

use crate::view::{EmployeeRow, roster_rows};

pub type SchemaType = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn build_schema(store: Arc<EmployeeStore>) -> SchemaType {
    Schema::build(QueryRoot::new(store), EmptyMutation, EmptySubscription).finish()
}

pub struct QueryRoot {
    store: Arc<EmployeeStore>,
}

impl QueryRoot {
    pub fn new(store: Arc<EmployeeStore>) -> Self {
        Self { store }
    }
}

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.health", skip_all)]
    async fn health(&self) -> HealthPayload {
        HealthPayload {
            ok: true,
            employees: i32::try_from(self.store.len()).unwrap_or(i32::MAX),
        }
    }

    #[instrument(name = "graphql.version", skip_all)]
    async fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Every employee in roster order.
    #[instrument(name = "graphql.employees", skip_all)]
    async fn employees(&self) -> Vec<EmployeeNode> {
        nodes(self.store.list_all())
    }

    /// `"<name> (<department>)"` per employee, aligned with `employees`.
    #[instrument(name = "graphql.name_departments", skip_all)]
    async fn name_departments(&self) -> Vec<String> {
        self.store.project_name_department()
    }

    #[instrument(name = "graphql.average_salary", skip_all)]
    async fn average_salary(&self) -> f64 {
        self.store.average_salary()
    }

    /// Employees whose age is strictly greater than `threshold`.
    #[instrument(name = "graphql.employees_older_than", skip_all, fields(threshold = threshold))]
    async fn employees_older_than(&self, threshold: i32) -> Vec<EmployeeNode> {
        nodes(&self.store.filter_by_age(threshold))
    }

    #[instrument(name = "graphql.roster_rows", skip_all)]
    async fn roster_rows(&self) -> Vec<RosterRowNode> {
        roster_rows(&self.store)
            .into_iter()
            .map(RosterRowNode::from)
            .collect()
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct HealthPayload {
    pub ok: bool,
    pub employees: i32,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct EmployeeNode {
    pub name: String,
    pub age: i32,
    pub department: String,
    pub salary: f64,
}

impl From<&Employee> for EmployeeNode {
    fn from(value: &Employee) -> Self {
        Self {
            name: value.name().to_string(),
            age: value.age(),
            department: value.department().to_string(),
            salary: value.salary(),
        }
    }
}

fn nodes(employees: &[Employee]) -> Vec<EmployeeNode> {
    employees.iter().map(EmployeeNode::from).collect()
}

#[derive(Clone, Debug, SimpleObject)]
pub struct RosterRowNode {
    pub label: String,
    pub age: i32,
    pub salary: f64,
}

impl From<EmployeeRow> for RosterRowNode {
    fn from(value: EmployeeRow) -> Self {
        Self {
            label: value.label,
            age: value.age,
            salary: value.salary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Request;
    use serde_json::json;

    async fn query(store: EmployeeStore, source: &str) -> serde_json::Value {
        let schema = build_schema(Arc::new(store));
        let response = schema.execute(Request::new(source)).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        response.data.into_json().unwrap()
    }

    #[tokio::test]
    async fn health_query_returns_ok() {
        let body = query(EmployeeStore::demo(), "{ health { ok employees } }").await;
        assert_eq!(body, json!({"health": {"ok": true, "employees": 5}}));
    }

    #[tokio::test]
    async fn average_salary_of_demo_roster() {
        let body = query(EmployeeStore::demo(), "{ averageSalary }").await;
        assert_eq!(body, json!({"averageSalary": 64800.0}));
    }

    #[tokio::test]
    async fn average_salary_of_empty_roster_is_zero() {
        let body = query(EmployeeStore::default(), "{ averageSalary employees { name } }").await;
        assert_eq!(body, json!({"averageSalary": 0.0, "employees": []}));
    }

    #[tokio::test]
    async fn older_than_filter_preserves_order() {
        let body = query(
            EmployeeStore::demo(),
            "{ employeesOlderThan(threshold: 30) { name age } }",
        )
        .await;
        assert_eq!(
            body,
            json!({"employeesOlderThan": [
                {"name": "Bob", "age": 35},
                {"name": "Charlie", "age": 40},
                {"name": "Diana", "age": 32},
            ]})
        );
    }

    #[tokio::test]
    async fn name_departments_align_with_rows() {
        let body = query(
            EmployeeStore::demo(),
            "{ nameDepartments rosterRows { label age } }",
        )
        .await;
        assert_eq!(body["nameDepartments"][2], json!("Charlie (Engineering)"));
        assert_eq!(
            body["rosterRows"][2],
            json!({"label": "Charlie (Engineering)", "age": 40})
        );
    }

    #[tokio::test]
    async fn non_integer_threshold_is_rejected_by_schema() {
        let schema = build_schema(Arc::new(EmployeeStore::demo()));
        let response = schema
            .execute(Request::new(
                r#"{ employeesOlderThan(threshold: "abc") { name } }"#,
            ))
            .await;
        assert!(!response.errors.is_empty());
    }
}
