//! services/selection_service.rs
//! Selección en cascada unidad -> departamento -> empleado.
//!
//! Cambiar un padre limpia siempre las selecciones y listas de opciones de
//! sus hijos, también cuando el padre queda vacío. Las listas de opciones se
//! vuelven a pedir al backend; cada petición lleva una generación y sólo se
//! aplica si sigue siendo la vigente.

use std::collections::HashSet;

use futures::future::try_join_all;
use serde::Serialize;

use crate::{
    error::ApiResult,
    models::option_model::{DepartmentOption, EmployeeOption},
    services::payroll_api_service::PayrollApi,
};

/// Qué pedir al backend tras un cambio de padre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub generation: u64,
    pub parent_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SelectionCascade {
    unit_ids: Vec<i64>,
    department_ids: Vec<i64>,
    employee_ids: Vec<i64>,
    departments: Vec<DepartmentOption>,
    employees: Vec<EmployeeOption>,
    #[serde(skip)]
    department_generation: u64,
    #[serde(skip)]
    employee_generation: u64,
}

impl SelectionCascade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit_ids(&self) -> &[i64] {
        &self.unit_ids
    }

    pub fn department_ids(&self) -> &[i64] {
        &self.department_ids
    }

    pub fn employee_ids(&self) -> &[i64] {
        &self.employee_ids
    }

    pub fn departments(&self) -> &[DepartmentOption] {
        &self.departments
    }

    pub fn employees(&self) -> &[EmployeeOption] {
        &self.employees
    }

    /// Nueva selección de unidades: limpia departamentos y empleados.
    pub fn select_units(&mut self, unit_ids: Vec<i64>) -> Option<FetchPlan> {
        self.unit_ids = dedup(unit_ids);
        self.department_ids.clear();
        self.departments.clear();
        self.department_generation += 1;
        self.clear_employees();

        plan(self.department_generation, &self.unit_ids)
    }

    /// Nueva selección de departamentos: limpia empleados.
    pub fn select_departments(&mut self, department_ids: Vec<i64>) -> Option<FetchPlan> {
        self.department_ids = dedup(department_ids);
        self.clear_employees();

        plan(self.employee_generation, &self.department_ids)
    }

    pub fn select_employees(&mut self, employee_ids: Vec<i64>) {
        self.employee_ids = dedup(employee_ids);
    }

    pub fn apply_departments(&mut self, generation: u64, options: Vec<DepartmentOption>) -> bool {
        if !self.departments_current(generation) {
            return false;
        }
        self.departments = options;
        true
    }

    pub fn apply_employees(&mut self, generation: u64, options: Vec<EmployeeOption>) -> bool {
        if !self.employees_current(generation) {
            return false;
        }
        self.employees = options;
        true
    }

    /// La petición de departamentos con esta generación sigue vigente.
    pub fn departments_current(&self, generation: u64) -> bool {
        generation == self.department_generation
    }

    pub fn employees_current(&self, generation: u64) -> bool {
        generation == self.employee_generation
    }

    fn clear_employees(&mut self) {
        self.employee_ids.clear();
        self.employees.clear();
        self.employee_generation += 1;
    }
}

fn plan(generation: u64, parent_ids: &[i64]) -> Option<FetchPlan> {
    if parent_ids.is_empty() {
        return None;
    }
    Some(FetchPlan {
        generation,
        parent_ids: parent_ids.to_vec(),
    })
}

fn dedup(ids: Vec<i64>) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Pide los departamentos de cada unidad en paralelo y los une sin duplicados.
pub async fn fetch_departments(
    api: &dyn PayrollApi,
    plan: &FetchPlan,
) -> ApiResult<Vec<DepartmentOption>> {
    let pages = try_join_all(plan.parent_ids.iter().map(|id| api.departments(Some(*id)))).await?;
    let mut seen = HashSet::new();
    Ok(pages
        .into_iter()
        .flatten()
        .filter(|d| seen.insert(d.id))
        .collect())
}

/// Igual que `fetch_departments`, por departamento.
pub async fn fetch_employees(
    api: &dyn PayrollApi,
    plan: &FetchPlan,
) -> ApiResult<Vec<EmployeeOption>> {
    let pages = try_join_all(plan.parent_ids.iter().map(|id| api.employees(Some(*id)))).await?;
    let mut seen = HashSet::new();
    Ok(pages
        .into_iter()
        .flatten()
        .filter(|e| seen.insert(e.id))
        .collect())
}
