//! services/submission_service.rs
//! Formulario de envío de recibos: valores por defecto, validación y despacho.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::{
    models::{
        email_task_model::{SendFilters, SendRequest},
        form_model::{FieldError, FormErrors, FormPatch, FormView},
        option_model::{EmailServerConfigOption, FormOptions},
    },
    services::{
        payroll_api_service::PayrollApi,
        selection_service::{fetch_departments, fetch_employees, SelectionCascade},
    },
    store::{async_slot::SlotStatus, task_store::TaskStore},
};

const OPTIONS_FAILED_MSG: &str = "加载选项失败";

#[derive(Debug, Clone)]
pub struct SubmissionForm {
    pub pay_period: Option<String>,
    pub email_config_id: Option<i64>,
    pub subject_template: String,
    pub employee_specific_data_required: bool,
    pub selection: SelectionCascade,
}

impl SubmissionForm {
    pub fn new(default_subject_template: &str) -> Self {
        Self {
            pay_period: None,
            email_config_id: None,
            subject_template: default_subject_template.to_string(),
            employee_specific_data_required: true,
            selection: SelectionCascade::new(),
        }
    }

    /// Config por defecto: la marcada `is_default`, si no la primera.
    /// Sólo se aplica mientras no haya una elegida.
    pub fn apply_default_email_config(&mut self, configs: &[EmailServerConfigOption]) {
        if self.email_config_id.is_some() {
            return;
        }
        self.email_config_id = configs
            .iter()
            .find(|c| c.is_default)
            .or_else(|| configs.first())
            .map(|c| c.id);
    }

    pub fn apply_patch(&mut self, patch: FormPatch) {
        if let Some(pay_period) = patch.pay_period {
            self.pay_period = Some(pay_period.trim().to_string()).filter(|p| !p.is_empty());
        }
        if let Some(id) = patch.email_config_id {
            self.email_config_id = Some(id);
        }
        if let Some(subject) = patch.subject_template {
            self.subject_template = subject;
        }
        if let Some(required) = patch.employee_specific_data_required {
            self.employee_specific_data_required = required;
        }
    }

    /// Valida y construye exactamente un `SendRequest`.
    pub fn finalize(&self) -> Result<SendRequest, FormErrors> {
        let mut errors = Vec::new();

        match self.pay_period.as_deref() {
            None => errors.push(FieldError {
                field: "pay_period",
                message: "请选择工资期间".to_string(),
            }),
            Some(p) if !is_valid_pay_period(p) => errors.push(FieldError {
                field: "pay_period",
                message: format!("工资期间格式应为 YYYY-MM: {}", p),
            }),
            Some(_) => {}
        }

        if self.email_config_id.is_none() {
            errors.push(FieldError {
                field: "email_config_id",
                message: "请选择邮件服务器配置".to_string(),
            });
        }

        if self.subject_template.trim().is_empty() {
            errors.push(FieldError {
                field: "subject_template",
                message: "请输入邮件主题模板".to_string(),
            });
        }

        match (&self.pay_period, self.email_config_id, errors.is_empty()) {
            (Some(pay_period), Some(email_config_id), true) => Ok(SendRequest {
                pay_period: pay_period.clone(),
                email_config_id,
                subject_template: self.subject_template.clone(),
                filters: SendFilters {
                    unit_ids: self.selection.unit_ids().to_vec(),
                    department_ids: self.selection.department_ids().to_vec(),
                    employee_ids: self.selection.employee_ids().to_vec(),
                    employee_specific_data_required: self.employee_specific_data_required,
                },
            }),
            _ => Err(FormErrors { errors }),
        }
    }
}

/// "YYYY-MM" con un mes real.
pub fn is_valid_pay_period(raw: &str) -> bool {
    raw.len() == 7 && NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d").is_ok()
}

#[derive(Debug, Clone, Default)]
struct FormSession {
    options: FormOptions,
    options_error: Option<String>,
}

#[derive(Clone)]
pub struct FormService {
    api: Arc<dyn PayrollApi>,
    store: TaskStore,
    form: Arc<RwLock<SubmissionForm>>,
    session: Arc<RwLock<FormSession>>,
}

impl FormService {
    pub fn new(api: Arc<dyn PayrollApi>, store: TaskStore, default_subject_template: &str) -> Self {
        Self {
            api,
            store,
            form: Arc::new(RwLock::new(SubmissionForm::new(default_subject_template))),
            session: Arc::new(RwLock::new(FormSession::default())),
        }
    }

    pub async fn view(&self) -> FormView {
        let form = self.form.read().await;
        let session = self.session.read().await;
        FormView {
            pay_period: form.pay_period.clone(),
            email_config_id: form.email_config_id,
            subject_template: form.subject_template.clone(),
            employee_specific_data_required: form.employee_specific_data_required,
            unit_ids: form.selection.unit_ids().to_vec(),
            department_ids: form.selection.department_ids().to_vec(),
            employee_ids: form.selection.employee_ids().to_vec(),
            options: session.options.clone(),
            departments: form.selection.departments().to_vec(),
            employees: form.selection.employees().to_vec(),
            options_error: session.options_error.clone(),
        }
    }

    /// Carga periodos, configs de servidor y unidades en paralelo.
    pub async fn load_options(&self) -> FormView {
        log::info!("(load_options) Cargando opciones del formulario...");
        let loaded = futures::try_join!(
            self.api.pay_periods(),
            self.api.email_server_configs(),
            self.api.units()
        );

        match loaded {
            Ok((pay_periods, email_configs, units)) => {
                log::info!(
                    "(load_options) periodos={}, configs={}, unidades={}",
                    pay_periods.len(),
                    email_configs.len(),
                    units.len()
                );
                self.form
                    .write()
                    .await
                    .apply_default_email_config(&email_configs);
                let mut session = self.session.write().await;
                session.options = FormOptions {
                    pay_periods,
                    email_configs,
                    units,
                };
                session.options_error = None;
            }
            Err(e) => {
                log::error!("(load_options) Error cargando opciones: {}", e);
                self.session.write().await.options_error =
                    Some(e.user_message(OPTIONS_FAILED_MSG));
            }
        }

        self.view().await
    }

    pub async fn update(&self, patch: FormPatch) -> FormView {
        self.form.write().await.apply_patch(patch);
        self.view().await
    }

    pub async fn select_units(&self, unit_ids: Vec<i64>) -> FormView {
        let plan = self.form.write().await.selection.select_units(unit_ids);

        if let Some(plan) = plan {
            let fetched = fetch_departments(self.api.as_ref(), &plan).await;
            let mut form = self.form.write().await;
            match fetched {
                Ok(options) => {
                    if form.selection.apply_departments(plan.generation, options) {
                        self.session.write().await.options_error = None;
                    } else {
                        log::debug!("(select_units) Departamentos obsoletos descartados");
                    }
                }
                Err(e) if form.selection.departments_current(plan.generation) => {
                    self.record_options_error("select_units", e.user_message(OPTIONS_FAILED_MSG))
                        .await
                }
                Err(e) => log::debug!("(select_units) Error obsoleto descartado: {}", e),
            }
        }

        self.view().await
    }

    pub async fn select_departments(&self, department_ids: Vec<i64>) -> FormView {
        let plan = self
            .form
            .write()
            .await
            .selection
            .select_departments(department_ids);

        if let Some(plan) = plan {
            let fetched = fetch_employees(self.api.as_ref(), &plan).await;
            let mut form = self.form.write().await;
            match fetched {
                Ok(options) => {
                    if form.selection.apply_employees(plan.generation, options) {
                        self.session.write().await.options_error = None;
                    } else {
                        log::debug!("(select_departments) Empleados obsoletos descartados");
                    }
                }
                Err(e) if form.selection.employees_current(plan.generation) => {
                    self.record_options_error(
                        "select_departments",
                        e.user_message(OPTIONS_FAILED_MSG),
                    )
                    .await
                }
                Err(e) => log::debug!("(select_departments) Error obsoleto descartado: {}", e),
            }
        }

        self.view().await
    }

    pub async fn select_employees(&self, employee_ids: Vec<i64>) -> FormView {
        self.form
            .write()
            .await
            .selection
            .select_employees(employee_ids);
        self.view().await
    }

    /// Valida y, si todo está bien, despacha el envío al store.
    /// Los errores de validación se devuelven sin tocar el store.
    pub async fn submit(&self) -> Result<SlotStatus, FormErrors> {
        let request = self.form.read().await.finalize()?;
        self.store.reset_submission().await;
        Ok(self.store.submit(request).await)
    }

    async fn record_options_error(&self, origin: &str, message: String) {
        log::error!("({}) {}", origin, message);
        self.session.write().await.options_error = Some(message);
    }
}
