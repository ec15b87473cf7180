mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    TestCourse, TestUser, create_test_course, create_test_user, send, setup_test_app,
    test_jwt_config,
};
use rollcall::modules::attendance::AttendanceService;
use rollcall_auth::Role;
use serde_json::{Value, json};
use sqlx::PgPool;

async fn seed(pool: &PgPool) -> (TestUser, TestUser, TestCourse) {
    let mut tx = pool.begin().await.unwrap();
    let teacher = create_test_user(&mut tx, Role::Teacher).await;
    let student = create_test_user(&mut tx, Role::Student).await;
    let course = create_test_course(&mut tx, teacher.id).await;
    tx.commit().await.unwrap();
    (teacher, student, course)
}

async fn open_window(app: axum::Router, teacher: &TestUser, course_id: i64) -> String {
    let (status, body) = send(
        app,
        "POST",
        &format!("/api/courses/{}/attendance-code", course_id),
        Some(&teacher.bearer()),
        Some(json!({ "time_in_minutes": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["attendance_token"].as_str().unwrap().to_string()
}

async fn attend(app: axum::Router, user: &TestUser, body: Value) -> (StatusCode, Value) {
    send(app, "POST", "/api/attendance", Some(&user.bearer()), Some(body)).await
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_redeems_code(pool: PgPool) {
    let (teacher, student, course) = seed(&pool).await;
    let app = setup_test_app(pool.clone());
    let token = open_window(app.clone(), &teacher, course.id).await;

    let (status, body) = attend(app, &student, json!({ "attendance_token": token })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["record"]["student_id"], student.id);
    assert_eq!(body["record"]["course_id"], course.id);

    let stored: (i64, String) = sqlx::query_as(
        "SELECT course_id, attendance_token FROM attendance_records WHERE student_id = $1",
    )
    .bind(student.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(stored, (course.id, token));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_second_redemption_conflicts(pool: PgPool) {
    let (teacher, student, course) = seed(&pool).await;
    let app = setup_test_app(pool);
    let token = open_window(app.clone(), &teacher, course.id).await;

    let (status, _) = attend(app.clone(), &student, json!({ "attendance_token": token })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = attend(app, &student, json!({ "attendance_token": token })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already"));
}

// One record per (student, course): a later window for the same course
// does not admit the student again.
#[sqlx::test(migrations = "./migrations")]
async fn test_new_window_same_course_conflicts_once_per_course(pool: PgPool) {
    let (teacher, student, course) = seed(&pool).await;
    let app = setup_test_app(pool);

    let first = open_window(app.clone(), &teacher, course.id).await;
    let (status, _) = attend(app.clone(), &student, json!({ "attendance_token": first })).await;
    assert_eq!(status, StatusCode::CREATED);

    let second = open_window(app.clone(), &teacher, course.id).await;
    let (status, _) = attend(app, &student, json!({ "attendance_token": second })).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_redemptions_record_once(pool: PgPool) {
    let (teacher, student, course) = seed(&pool).await;
    let app = setup_test_app(pool.clone());
    let token = open_window(app.clone(), &teacher, course.id).await;

    let (a, b) = tokio::join!(
        attend(app.clone(), &student, json!({ "attendance_token": token })),
        attend(app, &student, json!({ "attendance_token": token })),
    );

    let mut statuses = [a.0, b.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance_records")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expired_code_is_unauthorized(pool: PgPool) {
    let (_, student, course) = seed(&pool).await;
    let app = setup_test_app(pool);
    let token = AttendanceService::open_window_at(
        course.id,
        5,
        test_jwt_config().attendance_key(),
        Utc::now() - Duration::minutes(6),
    )
    .unwrap();

    let (status, body) = attend(app, &student, json!({ "attendance_token": token })).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Attendance code has expired");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_session_token_is_not_an_attendance_code(pool: PgPool) {
    let (_, student, _) = seed(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = attend(
        app,
        &student,
        json!({ "attendance_token": student.token.clone() }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Attendance code is invalid");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_id_must_match_code(pool: PgPool) {
    let (teacher, student, course) = seed(&pool).await;
    let mut tx = pool.begin().await.unwrap();
    let other_course = create_test_course(&mut tx, teacher.id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool);
    let token = open_window(app.clone(), &teacher, course.id).await;

    let (status, _) = attend(
        app.clone(),
        &student,
        json!({ "attendance_token": token, "course_id": other_course.id }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = attend(
        app,
        &student,
        json!({ "attendance_token": token, "course_id": course.id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submitted_at_is_kept(pool: PgPool) {
    let (teacher, student, course) = seed(&pool).await;
    let app = setup_test_app(pool);
    let token = open_window(app.clone(), &teacher, course.id).await;

    let (status, body) = attend(
        app,
        &student,
        json!({ "attendance_token": token, "submitted_at": "2026-03-02T09:15:00Z" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["record"]["submitted_at"], "2026-03-02T09:15:00Z");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_cannot_redeem(pool: PgPool) {
    let (teacher, _, course) = seed(&pool).await;
    let app = setup_test_app(pool);
    let token = open_window(app.clone(), &teacher, course.id).await;

    let (status, _) = attend(app, &teacher, json!({ "attendance_token": token })).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_redeem_requires_session(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, _) = send(
        app,
        "POST",
        "/api/attendance",
        None,
        Some(json!({ "attendance_token": "anything" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
