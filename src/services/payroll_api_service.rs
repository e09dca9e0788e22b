//! services/payroll_api_service.rs
//! Cliente REST del backend de nóminas (envío de recibos por email).

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{
    config::console_config::ConsoleConfig,
    error::{extract_detail, ApiError, ApiResult},
    models::{
        email_task_model::{SendRequest, SendResponse, TaskDetail, TaskHistoryPage, TaskLogsPage},
        option_model::{
            DepartmentOption, EmailServerConfigOption, EmployeeOption, ListEnvelope, UnitOption,
        },
    },
};

/// Operaciones que la consola consume del backend.
#[async_trait]
pub trait PayrollApi: Send + Sync {
    async fn send_payslip_emails(&self, req: &SendRequest) -> ApiResult<SendResponse>;

    async fn task_history(&self, skip: u64, limit: u64) -> ApiResult<TaskHistoryPage>;

    async fn task_detail(&self, task_uuid: &str) -> ApiResult<TaskDetail>;

    async fn task_logs(&self, task_uuid: &str, skip: u64, limit: u64) -> ApiResult<TaskLogsPage>;

    async fn pay_periods(&self) -> ApiResult<Vec<String>>;

    async fn email_server_configs(&self) -> ApiResult<Vec<EmailServerConfigOption>>;

    async fn units(&self) -> ApiResult<Vec<UnitOption>>;

    async fn departments(&self, unit_id: Option<i64>) -> ApiResult<Vec<DepartmentOption>>;

    async fn employees(&self, department_id: Option<i64>) -> ApiResult<Vec<EmployeeOption>>;
}

#[derive(Clone)]
pub struct HttpPayrollApi {
    http_client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpPayrollApi {
    pub fn new(config: &ConsoleConfig) -> anyhow::Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .context("No se pudo construir el cliente HTTP")?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("X-Request-Id", Uuid::new_v4().to_string());
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let url = self.url(path);
        log::debug!("(get_json) GET {} {:?}", url, query);

        let builder = self.http_client.get(&url).query(query);
        let resp = self.authorized(builder).send().await?;
        Self::read_json(&url, resp).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("(post_json) POST {}", url);

        let builder = self.http_client.post(&url).json(body);
        let resp = self.authorized(builder).send().await?;
        Self::read_json(&url, resp).await
    }

    async fn read_json<T: DeserializeOwned>(url: &str, resp: reqwest::Response) -> ApiResult<T> {
        let status = resp.status();
        if !status.is_success() {
            let body_txt = resp.text().await.unwrap_or_default();
            log::error!(
                "(read_json) {} respondió {}. body='{}'",
                url,
                status,
                body_txt
            );
            return Err(ApiError::Server {
                status: status.as_u16(),
                detail: extract_detail(&body_txt),
            });
        }
        Ok(resp.json::<T>().await?)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Vec<T>> {
        let envelope: ListEnvelope<T> = self.get_json(path, query).await?;
        Ok(envelope.into_vec())
    }
}

fn page_query(skip: u64, limit: u64) -> [(&'static str, String); 2] {
    [("skip", skip.to_string()), ("limit", limit.to_string())]
}

#[async_trait]
impl PayrollApi for HttpPayrollApi {
    async fn send_payslip_emails(&self, req: &SendRequest) -> ApiResult<SendResponse> {
        log::info!(
            "(send_payslip_emails) pay_period={}, email_config_id={}",
            req.pay_period,
            req.email_config_id
        );
        self.post_json("/email-sender/send-payslip-emails", req)
            .await
    }

    async fn task_history(&self, skip: u64, limit: u64) -> ApiResult<TaskHistoryPage> {
        self.get_json("/email-sender/tasks", &page_query(skip, limit))
            .await
    }

    async fn task_detail(&self, task_uuid: &str) -> ApiResult<TaskDetail> {
        let path = format!("/email-sender/tasks/{}", urlencoding::encode(task_uuid));
        self.get_json(&path, &[]).await
    }

    async fn task_logs(&self, task_uuid: &str, skip: u64, limit: u64) -> ApiResult<TaskLogsPage> {
        let path = format!("/email-sender/tasks/{}/logs", urlencoding::encode(task_uuid));
        self.get_json(&path, &page_query(skip, limit)).await
    }

    async fn pay_periods(&self) -> ApiResult<Vec<String>> {
        self.get_list("/email-sender/pay-periods", &[]).await
    }

    async fn email_server_configs(&self) -> ApiResult<Vec<EmailServerConfigOption>> {
        self.get_list("/email-config/servers", &[]).await
    }

    async fn units(&self) -> ApiResult<Vec<UnitOption>> {
        self.get_list("/units", &[]).await
    }

    async fn departments(&self, unit_id: Option<i64>) -> ApiResult<Vec<DepartmentOption>> {
        let query: Vec<(&str, String)> = unit_id
            .map(|id| vec![("unit_id", id.to_string())])
            .unwrap_or_default();
        self.get_list("/departments", &query).await
    }

    async fn employees(&self, department_id: Option<i64>) -> ApiResult<Vec<EmployeeOption>> {
        let query: Vec<(&str, String)> = department_id
            .map(|id| vec![("department_id", id.to_string())])
            .unwrap_or_default();
        self.get_list("/employees", &query).await
    }
}
