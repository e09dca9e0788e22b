//! tests/selection_tests.rs
//! Cascada unidad -> departamento -> empleado.

use std::sync::Arc;

use crate::services::selection_service::SelectionCascade;
use crate::services::submission_service::FormService;
use crate::tests::mock_api::{department, employee, store_with, Call, MockPayrollApi};

#[test]
fn unit_change_clears_departments_and_employees() {
    let mut cascade = SelectionCascade::new();
    let plan = cascade.select_units(vec![1]).unwrap();
    cascade.apply_departments(plan.generation, vec![department(10, 1)]);
    let plan = cascade.select_departments(vec![10]).unwrap();
    cascade.apply_employees(plan.generation, vec![employee(100, 10)]);
    cascade.select_employees(vec![100]);

    let plan = cascade.select_units(vec![2]);

    assert_eq!(plan.unwrap().parent_ids, vec![2]);
    assert!(cascade.department_ids().is_empty());
    assert!(cascade.departments().is_empty());
    assert!(cascade.employee_ids().is_empty());
    assert!(cascade.employees().is_empty());
}

#[test]
fn department_change_only_clears_employees() {
    let mut cascade = SelectionCascade::new();
    let plan = cascade.select_units(vec![1]).unwrap();
    cascade.apply_departments(plan.generation, vec![department(10, 1), department(11, 1)]);
    let plan = cascade.select_departments(vec![10]).unwrap();
    cascade.apply_employees(plan.generation, vec![employee(100, 10)]);
    cascade.select_employees(vec![100]);

    cascade.select_departments(vec![11]);

    assert_eq!(cascade.unit_ids(), &[1]);
    assert_eq!(cascade.departments().len(), 2);
    assert!(cascade.employee_ids().is_empty());
    assert!(cascade.employees().is_empty());
}

#[test]
fn clearing_parent_still_cascades_without_fetch() {
    let mut cascade = SelectionCascade::new();
    let plan = cascade.select_units(vec![1]).unwrap();
    cascade.apply_departments(plan.generation, vec![department(10, 1)]);
    cascade.select_departments(vec![10]);

    let plan = cascade.select_units(Vec::new());

    assert!(plan.is_none());
    assert!(cascade.departments().is_empty());
    assert!(cascade.department_ids().is_empty());
}

#[test]
fn outdated_option_list_is_not_applied() {
    let mut cascade = SelectionCascade::new();
    let old = cascade.select_units(vec![1]).unwrap();
    let new = cascade.select_units(vec![2]).unwrap();

    assert!(!cascade.apply_departments(old.generation, vec![department(10, 1)]));
    assert!(cascade.apply_departments(new.generation, vec![department(20, 2)]));
    assert_eq!(cascade.departments()[0].id, 20);
}

#[test]
fn duplicate_ids_are_collapsed() {
    let mut cascade = SelectionCascade::new();
    cascade.select_units(vec![1, 2, 1]);
    assert_eq!(cascade.unit_ids(), &[1, 2]);
}

#[actix_rt::test]
async fn departments_of_several_units_are_merged() {
    let mock = Arc::new(
        MockPayrollApi::new()
            .with_departments(1, vec![department(10, 1), department(11, 1)])
            .with_departments(2, vec![department(11, 1), department(20, 2)]),
    );
    let store = store_with(mock.clone(), 10);
    let form = FormService::new(mock.clone(), store, "{pay_period} {employee_name}");

    let view = form.select_units(vec![1, 2]).await;

    let ids: Vec<i64> = view.departments.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![10, 11, 20]);
    assert!(mock.was_called(|c| *c == Call::Departments(Some(1))));
    assert!(mock.was_called(|c| *c == Call::Departments(Some(2))));
}

#[actix_rt::test]
async fn unit_change_clears_form_filters() {
    let mock = Arc::new(
        MockPayrollApi::new()
            .with_departments(1, vec![department(10, 1)])
            .with_employees(10, vec![employee(100, 10)]),
    );
    let store = store_with(mock.clone(), 10);
    let form = FormService::new(mock.clone(), store, "{pay_period} {employee_name}");

    form.select_units(vec![1]).await;
    let view = form.select_departments(vec![10]).await;
    assert_eq!(view.employees.len(), 1);
    form.select_employees(vec![100]).await;

    let view = form.select_units(vec![]).await;

    assert!(view.unit_ids.is_empty());
    assert!(view.department_ids.is_empty());
    assert!(view.employee_ids.is_empty());
    assert!(view.departments.is_empty());
    assert!(view.employees.is_empty());
}

#[actix_rt::test]
async fn cascade_error_is_cleared_by_next_successful_fetch() {
    let mock = Arc::new(MockPayrollApi::new().with_departments(1, vec![department(10, 1)]));
    let store = store_with(mock.clone(), 10);
    let form = FormService::new(mock.clone(), store, "{pay_period} {employee_name}");

    mock.fail_departments(1);
    let view = form.select_units(vec![1]).await;
    assert_eq!(view.options_error.as_deref(), Some("加载选项失败"));
    assert!(view.departments.is_empty());

    mock.restore_departments(1);
    let view = form.select_units(vec![1]).await;
    assert!(view.options_error.is_none());
    assert_eq!(view.departments.len(), 1);
}

#[actix_rt::test]
async fn failure_of_superseded_fetch_is_ignored() {
    let mock = Arc::new(MockPayrollApi::new().with_departments(2, vec![department(20, 2)]));
    mock.fail_departments(1);
    let gate = mock.gate("unit-1");
    let store = store_with(mock.clone(), 10);
    let form = FormService::new(mock.clone(), store, "{pay_period} {employee_name}");

    let slow = {
        let form = form.clone();
        tokio::spawn(async move { form.select_units(vec![1]).await })
    };
    while !mock.was_called(|c| *c == Call::Departments(Some(1))) {
        tokio::task::yield_now().await;
    }

    form.select_units(vec![2]).await;
    gate.add_permits(1);
    slow.await.unwrap();

    let view = form.view().await;
    assert_eq!(view.unit_ids, vec![2]);
    assert_eq!(view.departments[0].id, 20);
    assert!(view.options_error.is_none());
}
