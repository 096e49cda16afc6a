//! HTTP integration tests
//!
//! Drive the actix application the way the browser front end does.

#[cfg(test)]
mod tests {
    use crate::common::app_state;
    use annotrack::Config;
    use annotrack::core::action::Envelope;
    use annotrack::server::HttpServer;
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use serde_json::{Value, json};

    fn get(action: &str, data: Option<Value>) -> test::TestRequest {
        let mut uri = format!("/exec?action={}", action);
        if let Some(data) = data {
            uri.push_str("&data=");
            uri.push_str(&urlencoding::encode(&data.to_string()));
        }
        test::TestRequest::get().uri(&uri)
    }

    fn post(body: Value) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/exec")
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload(body.to_string())
    }

    #[actix_web::test]
    async fn test_full_session_over_get_and_post() {
        let app = test::init_service(HttpServer::create_app(app_state(Config::default()).await)).await;

        let env: Envelope = test::call_and_read_body_json(
            &app,
            get(
                "addBatch",
                Some(json!({"batch": {"id": 4, "name": "6400_7000", "sensor": "camera1", "totalFrames": "600"}})),
            ).to_request(),
        )
        .await;
        assert!(env.success, "{:?}", env.error);

        let env: Envelope = test::call_and_read_body_json(
            &app,
            post(json!({"action": "addLog", "log": {"id": "l1", "batchId": 4, "annotator": "mia", "frames": 120}})).to_request(),
        )
        .await;
        assert!(env.success, "{:?}", env.error);

        let env: Envelope = test::call_and_read_body_json(
            &app,
            post(json!({
                "action": "updateBatch",
                "batch": {"id": "4", "name": "6400_7000", "sensor": "camera1", "totalFrames": 600,
                          "completed": 120, "status": "running", "delivered": "FALSE"}
            })).to_request(),
        )
        .await;
        assert!(env.success, "{:?}", env.error);

        let env: Envelope = test::call_and_read_body_json(&app, get("getAll", None).to_request()).await;
        let batches = env.batches.unwrap();
        let logs = env.logs.unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].completed, 120);
        assert_eq!(batches[0].status.as_str(), "running");
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].batch_id, "4");

        let env: Envelope =
            test::call_and_read_body_json(&app, get("deleteBatch", Some(json!({"id": "4"}))).to_request()).await;
        assert!(env.success);

        let env: Envelope = test::call_and_read_body_json(&app, get("getAll", None).to_request()).await;
        assert_eq!(env.batches.unwrap().len(), 0);
        assert_eq!(env.logs.unwrap().len(), 0);
    }

    #[actix_web::test]
    async fn test_response_shape_on_the_wire() {
        let app = test::init_service(HttpServer::create_app(app_state(Config::default()).await)).await;

        let body: Value = test::call_and_read_body_json(
            &app,
            post(json!({"action": "addBatch", "batch": {"id": "11", "name": "x", "sensor": "camera1"}})).to_request(),
        )
        .await;
        assert_eq!(body, json!({"success": true}));

        let body: Value = test::call_and_read_body_json(&app, get("getAll", None).to_request()).await;
        assert_eq!(
            body,
            json!({
                "success": true,
                "batches": [{
                    "id": "11", "name": "x", "sensor": "camera1",
                    "totalFrames": 0, "completed": 0,
                    "startFrame": 0, "endFrame": 0, "currentFrame": 0,
                    "status": "not-starting", "startDate": "",
                    "delivered": false, "deliveredDate": "",
                    "paid": false, "paidDate": ""
                }],
                "logs": []
            })
        );
    }

    #[actix_web::test]
    async fn test_update_log_not_found_is_reported() {
        let app = test::init_service(HttpServer::create_app(app_state(Config::default()).await)).await;

        let resp = test::call_service(
            &app,
            post(json!({"action": "updateLog", "log": {"id": "ghost", "batchId": "1"}})).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"success": false, "error": "Log not found"}));
    }

    #[actix_web::test]
    async fn test_duplicate_add_is_reported() {
        let app = test::init_service(HttpServer::create_app(app_state(Config::default()).await)).await;

        let add = || post(json!({"action": "addBatch", "batch": {"id": "1"}})).to_request();
        let env: Envelope = test::call_and_read_body_json(&app, add()).await;
        assert!(env.success);

        let env: Envelope = test::call_and_read_body_json(&app, add()).await;
        assert!(!env.success);
        assert!(env.error.unwrap().contains("already exists"));
    }

    #[actix_web::test]
    async fn test_save_all_bulk_replace() {
        let app = test::init_service(HttpServer::create_app(app_state(Config::default()).await)).await;

        let env: Envelope = test::call_and_read_body_json(
            &app,
            post(json!({
                "action": "saveAll",
                "batches": [{"id": "2"}, {"id": "1"}],
                "logs": [{"id": "x", "batchId": "1", "frames": ""}]
            })).to_request(),
        )
        .await;
        assert!(env.success, "{:?}", env.error);

        let env: Envelope = test::call_and_read_body_json(&app, get("getAll", None).to_request()).await;
        let ids: Vec<String> = env.batches.unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["2", "1"]);
        let logs = env.logs.unwrap();
        assert_eq!(logs[0].frames, 0);
        assert_eq!(logs[0].work_type, "production");
    }

    #[actix_web::test]
    async fn test_malformed_inputs_never_change_status() {
        let app = test::init_service(HttpServer::create_app(app_state(Config::default()).await)).await;

        let requests = vec![
            test::TestRequest::get()
                .uri("/exec?action=addBatch&data=%7B%22batch%22")
                .to_request(),
            get("addBatch", Some(json!({"batch": {"id": "1", "totalFrames": "lots"}}))).to_request(),
            get("addBatch", None).to_request(),
            post(json!(["getAll"])).to_request(),
            post(json!({"action": "deleteLog"})).to_request(),
            post(json!({"action": "nope"})).to_request(),
        ];

        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let env: Envelope = test::read_body_json(resp).await;
            assert!(!env.success);
            assert!(env.error.is_some());
            assert!(env.batches.is_none());
        }
    }

    #[actix_web::test]
    async fn test_fields_the_action_ignores_are_not_validated() {
        let app = test::init_service(HttpServer::create_app(app_state(Config::default()).await)).await;
        let stray = json!({"log": {"id": "l1", "frames": -1}});

        let env: Envelope =
            test::call_and_read_body_json(&app, get("getAll", Some(stray.clone())).to_request()).await;
        assert!(env.success, "{:?}", env.error);
        assert_eq!(env.batches.unwrap().len(), 0);

        let env: Envelope = test::call_and_read_body_json(
            &app,
            post(json!({"action": "deleteLog", "id": "l1", "log": {"id": "l1", "frames": -1}}))
                .to_request(),
        )
        .await;
        assert!(env.success, "{:?}", env.error);

        let env: Envelope =
            test::call_and_read_body_json(&app, get("addLog", Some(stray)).to_request()).await;
        assert!(!env.success);
        assert!(env.error.unwrap().contains("invalid `log` payload"));
    }

    #[actix_web::test]
    async fn test_cors_preflight() {
        let app = test::init_service(HttpServer::create_app(app_state(Config::default()).await)).await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/exec")
            .insert_header((header::ORIGIN, "https://tracker.example.com"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert!(
            resp.headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS)
        );
    }
}
