//! End-to-end workspace and editor flows against a real PostgreSQL
//! database, with fake external services.
//!
//! Each test gets a fresh migrated database from `#[sqlx::test]`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, editor_token, get_auth, post_json_auth, put_json_auth, researcher_at_location,
    TestApp,
};
use serde_json::json;
use sqlx::PgPool;

async fn seed(pool: &PgPool) {
    sqlx::query(
        "INSERT INTO pinp_preq (archive_id, arc, is_art, is_plaster, notes)
         VALUES ('12345', 'ARC101', 'maybe', 'yes', 'cornice; ')",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO ppm_preq (id, other_arc, is_art, is_plaster, notes)
         VALUES ('PPM_1', 'ARC099, ARC101', 'yes', 'no', 'fregio')",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO pinp (archive_id, img_alt, img_url)
         VALUES ('12345', 'North wall', 'a.jpg'), ('12345', 'Detail', 'b.jpg')",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO ppm (id, translated_text, image_path, region, insula, doorway, room)
         VALUES ('PPM_1', 'Painted frieze', 'v1_p20_3', 'I', '8', '5', '12')",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO ppp (uuid, id, description, region, insula, doorway, room)
         VALUES ('7', 'PPP-7', 'affresco', '1', '8', '5', '12'),
                ('8', 'PPP-8', 'pavimento', '1', '8', '5', '13')",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO ppp_desc (uuid, arcs) VALUES ('7', 'ARC101')")
        .execute(pool)
        .await
        .unwrap();
}

async fn choose_arc(app: &TestApp, token: &str, arc: &str) {
    let response = put_json_auth(
        app.app(),
        "/api/v1/workspace/current-arc",
        json!({ "arc": arc }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn arcs_reconcile_image_flags(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app_with_pool(pool);
    let token = researcher_at_location(&app).await;

    let response = get_auth(app.app(), "/api/v1/workspace/arcs", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let arcs = json["data"]["arcs"].as_array().unwrap();
    assert_eq!(arcs[0]["arc"], "ARC100");
    assert_eq!(arcs[0]["is_art"], "no");

    assert_eq!(arcs[1]["arc"], "ARC101");
    assert_eq!(arcs[1]["is_art"], "yes");
    assert_eq!(arcs[1]["is_plaster"], "yes");
    assert_eq!(arcs[1]["notes"], "cornice; fregio");
    assert_eq!(arcs[1]["pinp_images"], json!(["12345"]));
    assert_eq!(arcs[1]["ppm_images"], json!(["PPM_1"]));
    assert_eq!(arcs[1]["ppps"], json!(["7"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ppp_page_translates_entries_and_carryover(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app_with_pool(pool);
    let token = researcher_at_location(&app).await;
    choose_arc(&app, &token, "ARC101").await;

    let response = get_auth(app.app(), "/api/v1/workspace/ppp", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["arc"], "ARC101");
    assert_eq!(data["carryover"], "EN: affresco; ");

    let entries = data["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["uuid"], "7");
    assert_eq!(entries[0]["translation"], "EN: affresco");
    assert_eq!(entries[0]["arcs"], "ARC101");
    assert_eq!(entries[1]["arcs"], "");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn carryover_links_selection_to_current_arc(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app_with_pool(pool);
    let token = researcher_at_location(&app).await;
    choose_arc(&app, &token, "ARC101").await;

    let response = post_json_auth(
        app.app(),
        "/api/v1/workspace/carryover",
        json!({ "selection": "[7,8]" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["arc"], "ARC101");
    assert_eq!(data["ppps"], json!(["7", "8"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn workspace_ppp_update_writes_fields_and_links(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app_with_pool(pool.clone());
    let token = researcher_at_location(&app).await;

    let response = post_json_auth(
        app.app(),
        "/api/v1/workspace/ppp",
        json!({ "8_d": "pavimento\na mosaico", "8_i": "ARC100" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["updated"], 1);

    let description: String = sqlx::query_scalar("SELECT description FROM ppp WHERE uuid = '8'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(description, "pavimento a mosaico");

    let arcs: String = sqlx::query_scalar("SELECT arcs FROM ppp_desc WHERE uuid = '8'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(arcs, "ARC100");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn associated_images_have_captions_and_links(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app_with_pool(pool);
    tokio::fs::create_dir_all(common::test_config().thumbnail_dir)
        .await
        .unwrap();
    let token = researcher_at_location(&app).await;
    choose_arc(&app, &token, "ARC101").await;

    let response = get_auth(app.app(), "/api/v1/workspace/associated", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    let pinp = &data["pinp"][0];
    assert_eq!(pinp["archive_id"], "12345");
    assert_eq!(pinp["caption"], "North wall");
    assert_eq!(pinp["catalog_id"], "luna-image12345.jpg");

    let ppm = &data["ppm"][0];
    assert_eq!(ppm["caption"], "Painted frieze");
    assert_eq!(ppm["file_url"], "https://files.test/9001");
    assert_eq!(ppm["thumbnail_url"], "/static/images/9001.jpg");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn descriptions_create_sheet_once(pool: PgPool) {
    seed(&pool).await;
    sqlx::query("INSERT INTO pinp_preq (archive_id, arc) VALUES ('555', 'ARC100')")
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app_with_pool(pool);
    let token = researcher_at_location(&app).await;
    choose_arc(&app, &token, "ARC100").await;

    let response = get_auth(app.app(), "/api/v1/workspace/descriptions", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["created"], true);
    assert_eq!(data["sheet_url"], "https://docs.google.com/spreadsheets/d/new-sheet");

    let writes = app.sheets.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].cell, "Workflow_Tracking!L3");
    assert_eq!(
        app.drive.calls.lock().unwrap().clone(),
        vec![
            "copy template as Workspace_5_ARC100".to_string(),
            "writer new-sheet a@example.org".to_string(),
            "owner new-sheet owner@example.org".to_string(),
        ]
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn descriptions_reuse_existing_sheet(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app_with_pool(pool);
    let token = researcher_at_location(&app).await;
    choose_arc(&app, &token, "ARC101").await;

    let response = get_auth(app.app(), "/api/v1/workspace/descriptions", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["created"], false);
    assert_eq!(data["sheet_url"], "https://docs.google.com/spreadsheets/d/abc");
    assert_eq!(data["carryover_pinp"], "North wall; Detail");
    assert_eq!(data["carryover_ppm"], "Painted frieze");
    assert_eq!(data["carryover_ppp"], "EN: affresco; ");
    assert!(app.sheets.writes().is_empty());
    assert!(app.drive.calls.lock().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn done_marks_hero_and_stamps_tracker(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app_with_pool(pool.clone());
    let token = researcher_at_location(&app).await;
    choose_arc(&app, &token, "ARC101").await;

    let response = post_json_auth(
        app.app(),
        "/api/v1/workspace/done",
        json!({ "source": "PinP_preq", "hero": "12345" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let hero: Option<String> =
        sqlx::query_scalar("SELECT hero_image FROM pinp_preq WHERE archive_id = '12345'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(hero.as_deref(), Some("1"));

    let writes = app.sheets.writes();
    assert_eq!(writes[0].cell, "Workflow_Tracking!S4");
    assert_eq!(writes[0].value.len(), "MM/DD/YYYY".len());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn editor_reports_missing_entries(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app_with_pool(pool);
    let token = editor_token(&app).await;

    let response = get_auth(app.app(), "/api/v1/editor/ppp?id=PPP-99", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "You searched for PPPID PPP-99. That doesn't exist - please add an entry or try again."
    );

    let response = get_auth(app.app(), "/api/v1/editor/ppp?uuid=7", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"][0]["ppp_id"], "PPP-7");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn editor_saves_and_points_to_next(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app_with_pool(pool);
    let token = editor_token(&app).await;

    let response = post_json_auth(
        app.app(),
        "/api/v1/editor/ppm",
        json!({ "uuid": "PPM_1", "caption": "Fig. 3" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["next"], "PPM_2");

    let response = get_auth(app.app(), "/api/v1/editor/ppm?uuid=PPM_1", &token).await;
    let data = &body_json(response).await["data"][0];
    assert_eq!(data["caption"], "Fig. 3");
    assert_eq!(data["image_url"], "https://luna.test/medium/PPM_1");

    let response = post_json_auth(
        app.app(),
        "/api/v1/editor/ppp",
        json!({ "uuid": "new-1", "description": "nuova" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["next"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ppm_search_uses_roman_regions(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app_with_pool(pool);
    let token = editor_token(&app).await;

    let response = get_auth(
        app.app(),
        "/api/v1/editor/ppm/search?region=1&insula=08",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["searched"], true);
    assert_eq!(data["results"][0]["id"], "PPM_1");
    assert_eq!(data["results"][0]["path_parts"], json!(["v1", "p20", "3"]));
}
