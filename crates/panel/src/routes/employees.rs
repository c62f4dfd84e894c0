//! Employees section (admin): read-only staff list.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};

use crate::api::Employee;
use crate::filters;
use crate::state::AppState;
use crate::views::{Notice, Shell};

use super::report_load_failure;

#[derive(Debug, Clone)]
pub struct EmployeeRow {
    pub rut: String,
    pub name: String,
    /// Empty when the API has no age.
    pub age: String,
    pub activity: &'static str,
}

impl From<&Employee> for EmployeeRow {
    fn from(employee: &Employee) -> Self {
        Self {
            rut: employee.rut.clone(),
            name: employee.full_name(),
            age: employee.age.map(|age| age.to_string()).unwrap_or_default(),
            activity: employee.activity_status().label(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "sections/employees.html")]
pub struct EmployeesTemplate {
    pub shell: Shell,
    pub notice: Option<Notice>,
    pub rows: Vec<EmployeeRow>,
    pub load_error: Option<String>,
}

/// Render the employees section.
pub async fn page(state: &AppState, shell: Shell, notice: Option<Notice>) -> Response {
    let (rows, load_error) = match state.api().list_employees().await {
        Ok(employees) => (employees.iter().map(EmployeeRow::from).collect(), None),
        Err(e) => (Vec::new(), Some(report_load_failure(state, "los empleados", &e).await)),
    };

    EmployeesTemplate {
        shell,
        notice,
        rows,
        load_error,
    }
    .into_response()
}
