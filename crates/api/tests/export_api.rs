//! Integration tests for the CSV download endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, create_sample_session, get, post_json};
use serde_json::json;

#[tokio::test]
async fn annotations_export_has_header_and_rows() {
    let app = common::build_test_app();
    let id = create_sample_session(&app).await;

    post_json(
        app.clone(),
        &format!("/api/v1/sessions/{id}/annotations"),
        json!({ "signal": "Power", "t_sec": 26.0, "value": 4.0, "note": "defect" }),
    )
    .await;

    let response = get(app, &format!("/api/v1/sessions/{id}/export/annotations")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("Content-Type").unwrap(),
        "text/csv"
    );
    assert_eq!(
        response.headers().get("Content-Disposition").unwrap(),
        "attachment; filename=\"annotations.csv\""
    );

    let text = String::from_utf8(body_bytes(response).await).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "BriquetteID,briq_idx,Signal,t_sec,Value,Note");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with(",1,Power,26,4,defect"));
}

#[tokio::test]
async fn annotations_export_is_deterministic() {
    let app = common::build_test_app();
    let id = create_sample_session(&app).await;

    post_json(
        app.clone(),
        &format!("/api/v1/sessions/{id}/annotations"),
        json!({ "signal": "Power", "t_sec": 12.0, "value": 2.0, "note": "n" }),
    )
    .await;

    let uri = format!("/api/v1/sessions/{id}/export/annotations");
    let first = body_bytes(get(app.clone(), &uri).await).await;
    let second = body_bytes(get(app, &uri).await).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn data_export_includes_derived_and_stamped_columns() {
    let app = common::build_test_app();
    let id = create_sample_session(&app).await;

    post_json(
        app.clone(),
        &format!("/api/v1/sessions/{id}/annotations"),
        json!({ "signal": "Power", "t_sec": 26.0, "value": 4.0, "note": "defect" }),
    )
    .await;

    let response = get(app, &format!("/api/v1/sessions/{id}/export/data")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("Content-Disposition").unwrap(),
        "attachment; filename=\"data_with_briq_ids.csv\""
    );

    let text = String::from_utf8(body_bytes(response).await).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines[0],
        "timestamp,Power,Temp,Operator,t_sec,briq_idx,BriquetteID,Note"
    );
    // One line per input row, in time order.
    assert_eq!(lines.len(), 5);

    // Briquette 1 rows (t=20, t=30) are stamped; briquette 0 rows are not.
    assert!(lines[1].contains(",0,,"));
    assert!(lines[3].contains("defect"));
    assert!(lines[4].contains("defect"));
}

#[tokio::test]
async fn export_on_unknown_session_returns_404() {
    let app = common::build_test_app();
    let response = get(
        app,
        "/api/v1/sessions/00000000-0000-7000-8000-000000000000/export/data",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
