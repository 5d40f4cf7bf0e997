//! Request shaping of the budget, itinerary, text and speech endpoints

mod common;

use chrono::NaiveDate;
use serde_json::json;
use trip_planner_lib::api::{
    AudioFormat, ExpenseCategory, ItineraryGenerateRequest, ItineraryUpdateRequest, NewExpense,
    RecognizeOptions,
};
use trip_planner_lib::auth::SessionHandle;
use trip_planner_lib::sync::{ApiClient, ApiError};
use wiremock::matchers::{
    body_json, body_string_contains, header_regex, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), SessionHandle::new()).unwrap()
}

fn expense_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "trip_id": 5,
        "amount": 35.5,
        "category": "food",
        "description": "dinner",
        "expense_date": "2025-10-01T00:00:00",
        "created_at": "2025-10-01T20:00:00"
    })
}

#[tokio::test]
async fn add_expense_posts_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/budget/add"))
        .and(body_json(json!({
            "trip_id": 5,
            "amount": 35.5,
            "category": "food",
            "description": "dinner",
            "expense_date": "2025-10-01"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(expense_json(11)))
        .expect(1)
        .mount(&server)
        .await;

    let expense = NewExpense {
        trip_id: 5,
        amount: 35.5,
        category: ExpenseCategory::Food,
        description: Some("dinner".into()),
        expense_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
    };

    let created = client(&server).add_expense(&expense).await.unwrap();
    assert_eq!(created.id, 11);
    assert_eq!(created.category, ExpenseCategory::Food);
}

#[tokio::test]
async fn expense_list_and_summary_pass_trip_id_as_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/budget/list"))
        .and(query_param("trip_id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([expense_json(1), expense_json(2)])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/budget/summary"))
        .and(query_param("trip_id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trip_id": 5,
            "total_budget": null,
            "total_expenses": 71.0,
            "remaining_budget": null
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let expenses = api.list_expenses(5).await.unwrap();
    assert_eq!(expenses.len(), 2);

    let summary = api.budget_summary(5).await.unwrap();
    assert_eq!(summary.total_budget, None);
    assert_eq!(summary.remaining_budget, None);
    assert_eq!(summary.total_expenses, 71.0);
}

#[tokio::test]
async fn extract_expense_tolerates_null_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/budget/ai-extract"))
        .and(body_json(json!({"text": "taxi 40 yuan"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "amount": 40.0,
            "category": null,
            "description": "taxi",
            "expense_date": null
        })))
        .mount(&server)
        .await;

    let extracted = client(&server).extract_expense("taxi 40 yuan").await.unwrap();
    assert_eq!(extracted.amount, Some(40.0));
    assert_eq!(extracted.category, None);
}

#[tokio::test]
async fn generate_itinerary_omits_unset_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/itinerary/generate"))
        .and(body_json(json!({
            "destination": "Hangzhou",
            "start_date": "2025-10-01",
            "end_date": "2025-10-03",
            "travelers": 2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "ok",
            "data": {
                "id": 3,
                "user_id": 1,
                "title": "Hangzhou trip",
                "destination": "Hangzhou",
                "start_date": "2025-10-01T00:00:00",
                "end_date": "2025-10-03T00:00:00",
                "budget": null,
                "travelers": 2,
                "status": "planned",
                "itinerary": {
                    "day1": {
                        "date": "2025-10-01",
                        "activities": [{
                            "time": "09:00",
                            "activity": "West Lake",
                            "location": "West Lake",
                            "duration": "3h",
                            "cost": 0.0,
                            "type": "sightseeing"
                        }]
                    }
                },
                "created_at": "2025-09-01T00:00:00",
                "updated_at": "2025-09-01T00:00:00"
            }
        })))
        .mount(&server)
        .await;

    let request = ItineraryGenerateRequest {
        destination: "Hangzhou".into(),
        start_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 10, 3).unwrap(),
        budget: None,
        preferences: None,
        travelers: Some(2),
        travel_style: None,
        title: None,
    };

    let response = client(&server).generate_itinerary(&request).await.unwrap();
    let days = response.data.unwrap().itinerary.unwrap();
    let day = &days["day1"];
    assert_eq!(day.activities[0].kind.as_deref(), Some("sightseeing"));
}

#[tokio::test]
async fn itinerary_crud_paths() {
    let server = MockServer::start().await;
    let ack = json!({"success": true, "message": "done"});

    Mock::given(method("GET"))
        .and(path("/api/itinerary/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 3,
            "title": "t",
            "destination": "d",
            "start_date": "2025-10-01T00:00:00",
            "end_date": "2025-10-03T00:00:00",
            "status": "planned",
            "created_at": "2025-09-01T00:00:00"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/itinerary/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "title": "raw"})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/itinerary/3"))
        .and(body_json(json!({"title": "Renamed", "status": "done"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&ack))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/itinerary/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&ack))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);

    let trips = api.list_itineraries().await.unwrap();
    assert_eq!(trips[0].budget, None);

    let raw = api.get_trip_by_id("3").await.unwrap();
    assert_eq!(raw["title"], "raw");

    let update = ItineraryUpdateRequest {
        title: Some("Renamed".into()),
        status: Some("done".into()),
        ..Default::default()
    };
    assert!(api.update_trip("3", &update).await.unwrap().success);
    assert!(api.delete_itinerary(3).await.unwrap().success);
}

#[tokio::test]
async fn parse_trip_text_returns_draft() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/text/parse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "destination": "Chengdu",
            "title": null,
            "start_date": "2025-11-01",
            "end_date": null,
            "budget": 3000,
            "travelers": null,
            "preferences": "food"
        })))
        .mount(&server)
        .await;

    let draft = client(&server).parse_trip_text("Chengdu for food").await.unwrap();
    assert_eq!(draft.destination.as_deref(), Some("Chengdu"));
    assert_eq!(draft.budget, Some(3000.0));
}

#[tokio::test]
async fn errors_propagate_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/itinerary/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "not found"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/itinerary/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let api = client(&server);

    let err = api.get_itinerary(404).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.detail(), Some("not found"));

    let err = api.list_itineraries().await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));

    let offline = ApiClient::new(common::UNREACHABLE, SessionHandle::new()).unwrap();
    let err = offline.health().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_trimmed() {
    let api = ApiClient::new("http://localhost:8000/", SessionHandle::new()).unwrap();
    assert_eq!(api.base_url(), "http://localhost:8000");
}

#[tokio::test]
async fn recognize_speech_uploads_multipart_with_default_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/speech/recognize"))
        .and(query_param("format", "pcm"))
        .and(query_param("sample_rate", "16000"))
        .and(query_param("enable_punctuation_prediction", "true"))
        .and(query_param("enable_inverse_text_normalization", "true"))
        .and(query_param("enable_voice_detection", "false"))
        .and(header_regex("content-type", "^multipart/form-data; boundary=.+"))
        .and(body_string_contains("name=\"file\"; filename=\"audio.pcm\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "recognized_text": "去杭州玩三天",
            "raw": {"status": 20000000}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .recognize_speech(vec![0u8; 320], &RecognizeOptions::default())
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.recognized_text.as_deref(), Some("去杭州玩三天"));
    assert!(result.error.is_none());
}

#[tokio::test]
async fn recognize_speech_reports_provider_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/speech/recognize"))
        .and(query_param("format", "wav"))
        .and(query_param("sample_rate", "8000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": {"message": "audio too short"}
        })))
        .mount(&server)
        .await;

    let options = RecognizeOptions {
        format: AudioFormat::Wav,
        sample_rate: 8000,
        ..Default::default()
    };
    let result = client(&server)
        .recognize_speech(b"RIFF".to_vec(), &options)
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.recognized_text, None);
    assert_eq!(result.error.unwrap()["message"], "audio too short");
}

#[tokio::test]
async fn recognize_speech_rejection_is_a_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/speech/recognize"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "音频文件为空"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .recognize_speech(Vec::new(), &RecognizeOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.detail(), Some("音频文件为空"));
}
