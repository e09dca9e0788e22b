//! tests/monitoring_tests.rs
//! Historial, visor de detalle y banner de envío.

use std::sync::Arc;

use crate::error::ApiError;
use crate::models::email_task_model::{SendFilters, SendRequest};
use crate::models::pagination_model::Pagination;
use crate::models::view_model::{
    display_timestamp, DetailPhase, FeedbackView, StatusTag, TagColor,
};
use crate::services::feedback_service::FeedbackService;
use crate::services::task_detail_service::TaskDetailService;
use crate::services::task_history_service::TaskHistoryService;
use crate::store::async_slot::SlotStatus;
use crate::tests::mock_api::{store_with, MockPayrollApi};

#[test]
fn task_status_colors() {
    assert_eq!(TagColor::for_task_status("completed"), TagColor::Success);
    assert_eq!(TagColor::for_task_status("failed"), TagColor::Error);
    assert_eq!(TagColor::for_task_status("processing"), TagColor::Active);
    assert_eq!(TagColor::for_task_status("queued"), TagColor::Warning);
    assert_eq!(
        TagColor::for_task_status("partially_completed"),
        TagColor::Warning
    );
    assert_eq!(TagColor::for_task_status("cancelled"), TagColor::Default);
}

#[test]
fn skipped_logs_are_warnings_with_sub_label() {
    let no_email = StatusTag::for_log_status("skipped_no_email");
    assert_eq!(no_email.color, TagColor::Warning);
    assert_eq!(no_email.label, "跳过(无邮箱)");

    let no_data = StatusTag::for_log_status("skipped_no_salary_data");
    assert_eq!(no_data.color, TagColor::Warning);
    assert_eq!(no_data.label, "跳过(无数据)");

    assert_eq!(StatusTag::for_log_status("sent").color, TagColor::Success);
    assert_eq!(StatusTag::for_log_status("success").color, TagColor::Success);
    assert_eq!(StatusTag::for_log_status("failed").color, TagColor::Error);

    let other = StatusTag::for_log_status("bounced");
    assert_eq!(other.color, TagColor::Default);
    assert_eq!(other.label, "bounced");
}

#[test]
fn timestamps_are_rendered_for_display() {
    assert_eq!(
        display_timestamp(Some("2024-06-01T08:00:00Z")),
        "2024-06-01 08:00:00"
    );
    assert_eq!(
        display_timestamp(Some("2024-06-01T08:00:05.123456")),
        "2024-06-01 08:00:05"
    );
    assert_eq!(display_timestamp(None), "-");
    assert_eq!(display_timestamp(Some("ayer")), "ayer");
}

#[actix_rt::test]
async fn history_first_page_reports_total() {
    let mock = Arc::new(MockPayrollApi::new().with_history_total(57));
    let history = TaskHistoryService::new(store_with(mock, 10));

    let view = history.load(Pagination::new(1, 10)).await;

    assert_eq!(view.status, SlotStatus::Succeeded);
    assert_eq!(view.rows.len(), 10);
    assert_eq!(view.total, 57);
    assert_eq!(view.page, 1);
    assert_eq!(view.rows[0].status_color, TagColor::Success);
}

#[actix_rt::test]
async fn history_error_is_shown_inline() {
    let mock = Arc::new(MockPayrollApi::new());
    mock.set_history_error(Some(ApiError::Server {
        status: 500,
        detail: Some("数据库不可用".to_string()),
    }));
    let history = TaskHistoryService::new(store_with(mock, 10));

    let view = history.refresh().await;

    assert_eq!(view.status, SlotStatus::Failed);
    assert_eq!(view.error.as_deref(), Some("数据库不可用"));
    assert!(view.rows.is_empty());
    assert_eq!(view.total, 0);
}

#[actix_rt::test]
async fn detail_viewer_phases_follow_selection() {
    let mock = Arc::new(MockPayrollApi::new());
    mock.fail_detail("broken");
    let detail = TaskDetailService::new(store_with(mock, 10));

    assert_eq!(detail.view().await.phase, DetailPhase::NoSelection);

    let view = detail.select(Some("abc".to_string())).await;
    assert_eq!(view.phase, DetailPhase::DetailReady);
    assert_eq!(view.detail.as_ref().unwrap().requested_by, "hr@example.com");

    let view = detail.select(Some("broken".to_string())).await;
    assert_eq!(view.phase, DetailPhase::DetailFailed);
    assert!(view.detail_error.is_some());

    let view = detail.select(None).await;
    assert_eq!(view.phase, DetailPhase::NoSelection);
    assert_eq!(view.logs_total, 0);
}

#[actix_rt::test]
async fn detail_logs_carry_tags() {
    let mock = Arc::new(MockPayrollApi::new().with_logs_total(4));
    let detail = TaskDetailService::new(store_with(mock, 10));

    let view = detail.select(Some("abc".to_string())).await;

    let skipped = view
        .logs
        .iter()
        .find(|l| l.status == "skipped_no_email")
        .unwrap();
    assert_eq!(skipped.tag.color, TagColor::Warning);
    assert_eq!(skipped.tag.label, "跳过(无邮箱)");
    assert_eq!(view.logs_total, 4);
}

#[actix_rt::test]
async fn blank_uuid_counts_as_no_selection() {
    let mock = Arc::new(MockPayrollApi::new());
    let detail = TaskDetailService::new(store_with(mock.clone(), 10));

    let view = detail.select(Some("  ".to_string())).await;

    assert_eq!(view.phase, DetailPhase::NoSelection);
    assert!(mock.calls().is_empty());
}

fn request() -> SendRequest {
    SendRequest {
        pay_period: "2024-05".to_string(),
        email_config_id: 3,
        subject_template: "您的 {pay_period} 工资单".to_string(),
        filters: SendFilters::default(),
    }
}

#[actix_rt::test]
async fn feedback_banner_tracks_submission() {
    let mock = Arc::new(MockPayrollApi::new());
    let store = store_with(mock.clone(), 10);
    let feedback = FeedbackService::new(store.clone());

    assert_eq!(feedback.view().await, FeedbackView::Nothing);

    store.submit(request()).await;
    match feedback.view().await {
        FeedbackView::Success {
            task_uuid,
            total_employees_matched,
            ..
        } => {
            assert_eq!(task_uuid.as_deref(), Some("task-new"));
            assert_eq!(total_employees_matched, 12);
        }
        other => panic!("se esperaba banner de éxito, llegó {:?}", other),
    }

    mock.set_send_result(Err(ApiError::Transport("reset".to_string())));
    store.submit(request()).await;
    assert!(matches!(feedback.view().await, FeedbackView::Error { .. }));
}

#[actix_rt::test]
async fn dismissing_banner_does_not_touch_store() {
    let mock = Arc::new(MockPayrollApi::new());
    let store = store_with(mock, 10);
    let feedback = FeedbackService::new(store.clone());

    store.submit(request()).await;
    assert_eq!(feedback.dismiss().await, FeedbackView::Nothing);
    store
        .read(|s| assert_eq!(s.submission.status(), SlotStatus::Succeeded))
        .await;

    // un envío nuevo vuelve a mostrar el banner
    store.submit(request()).await;
    assert!(matches!(
        feedback.view().await,
        FeedbackView::Success { .. }
    ));
}
