mod common;

use jiff::civil::date;
use money_manager_client::session::{Identity, IdentityStore};
use money_manager_client::types::{NewAccount, RegisterRequest, TransactionRequest, TransactionType};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{FailFirst, REFRESH_PATH, client};

fn created_body() -> NewAccount {
    NewAccount {
        name: "Savings".into(),
        kind: "BANK".into(),
        balance: 0.0,
    }
}

#[tokio::test]
async fn accounts_round_trip_through_the_client() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/accounts"))
        .and(body_json(json!({ "name": "Savings", "type": "BANK", "balance": 0.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "id": 4, "name": "Savings", "type": "BANK", "balance": 0.0 }),
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/accounts/4"))
        .and(body_json(json!({ "name": "Rainy day", "type": "BANK", "balance": 0.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "id": 4, "name": "Rainy day", "type": "BANK", "balance": 0.0 }),
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/accounts/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let created = api
        .accounts()
        .create(&created_body())
        .await
        .unwrap();
    assert_eq!(created.id, 4);

    let updated = api
        .accounts()
        .update(
            4,
            &NewAccount {
                name: "Rainy day".into(),
                ..created_body()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Rainy day");
    assert_eq!(updated.kind, "BANK");
    assert_eq!(updated.balance, 0.0);

    api.accounts().delete(4).await.unwrap();
}

#[tokio::test]
async fn budgets_set_posts_category_and_amount() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/budgets"))
        .and(body_json(json!({ "categoryId": 2, "amount": 300.0 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Presupuesto guardado" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/budgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "categoryId": 2,
            "categoryName": "Food",
            "categoryColor": "#ff0000",
            "limitAmount": 300.0,
            "spentAmount": 150.0,
            "percentage": 50.0
        }])))
        .mount(&server)
        .await;

    let api = client(&server);
    let ack = api.budgets().set(2, 300.0).await.unwrap();
    assert_eq!(ack.message, "Presupuesto guardado");

    let budgets = api.budgets().list().await.unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].percentage, 50.0);
}

#[tokio::test]
async fn recurring_create_survives_expired_session() {
    let server = MockServer::start().await;
    let template = TransactionRequest {
        description: "Gym".into(),
        amount: 35.0,
        kind: TransactionType::Expense,
        account_id: 1,
        category_id: 5,
        date: Some(date(2024, 6, 1)),
    };
    Mock::given(method("POST"))
        .and(path("/api/transactions/recurring"))
        .and(body_json(serde_json::to_value(&template).unwrap()))
        .respond_with(FailFirst::forbidden(
            1,
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Transacción recurrente creada" })),
        ))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client(&server).recurring().create(&template).await.unwrap();
    assert_eq!(ack.message, "Transacción recurrente creada");
}

#[tokio::test]
async fn transaction_stats_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transactions/stats/monthly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "month": "2024-01", "income": 2000.0, "expense": 1500.0 },
            { "month": "2024-02", "income": null, "expense": 300.0 }
        ])))
        .mount(&server)
        .await;

    let stats = client(&server).transactions().monthly_stats().await.unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].income, Some(2000.0));
    assert_eq!(stats[1].income, None);
    assert_eq!(stats[1].expense, Some(300.0));
}

#[tokio::test]
async fn recovery_encodes_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/recover/verify"))
        .and(query_param("email", "ana+test@example.com"))
        .and(query_param("code", "12 34"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Código verificado"))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client(&server)
        .recovery()
        .verify_code("ana+test@example.com", "12 34")
        .await
        .unwrap();
    assert_eq!(ack.message, "Código verificado");
}

#[tokio::test]
async fn register_reports_validation_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "El email ya existe" })),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .user()
        .register(&RegisterRequest {
            full_name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "El email ya existe");
}

#[tokio::test]
async fn profile_fetch_caches_identity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/profile"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "name": "Ana", "email": "ana@example.com" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/user/profile/name"))
        .and(body_json(json!({ "newName": "Ana María" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "message": "Nombre actualizado correctamente", "name": "Ana María" }),
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/user/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Logout exitoso" })))
        .mount(&server)
        .await;

    let api = client(&server);
    let profile = api.user().profile().await.unwrap();
    assert_eq!(profile.email.as_deref(), Some("ana@example.com"));
    assert_eq!(
        api.identity().load().unwrap(),
        Identity {
            name: Some("Ana".into()),
            email: Some("ana@example.com".into()),
        }
    );

    api.user().update_name("Ana María").await.unwrap();
    assert_eq!(api.identity().load().unwrap().name.as_deref(), Some("Ana María"));

    api.user().logout().await.unwrap();
    assert!(api.identity().load().unwrap().is_empty());
}

#[tokio::test]
async fn goal_funding_returns_acknowledgement() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/goals/3/add"))
        .and(body_json(json!({ "amount": 50.0 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Fondos añadidos" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ack = client(&server).goals().add_funds(3, 50.0).await.unwrap();
    assert_eq!(ack.message, "Fondos añadidos");
}

#[tokio::test]
async fn login_caches_email_before_profile_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .and(body_json(json!({ "email": "ana@example.com", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Login exitoso" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    api.user().login("ana@example.com", "secret").await.unwrap();
    assert_eq!(
        api.identity().load().unwrap(),
        Identity {
            name: None,
            email: Some("ana@example.com".into()),
        }
    );
}

#[tokio::test]
async fn failed_login_leaves_identity_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Credenciales inválidas" })),
        )
        .mount(&server)
        .await;

    let api = client(&server);
    let err = api.user().login("ana@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Credenciales inválidas");
    assert!(api.identity().load().unwrap().is_empty());
}

const XLSX_MAGIC: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];

#[tokio::test]
async fn excel_export_refreshes_and_returns_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/export/excel"))
        .and(query_param("startDate", "2024-01-01"))
        .and(query_param("endDate", "2024-03-31"))
        .respond_with(FailFirst::forbidden(
            1,
            ResponseTemplate::new(200)
                .insert_header(
                    "content-type",
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                )
                .set_body_bytes(XLSX_MAGIC.to_vec()),
        ))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let bytes = api
        .export()
        .excel(Some(date(2024, 1, 1)), Some(date(2024, 3, 31)))
        .await
        .unwrap();
    assert_eq!(bytes, XLSX_MAGIC.to_vec());
    assert_eq!(api.refresh_lock().cycles(), 1);
}

#[tokio::test]
async fn excel_export_without_range_sends_no_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/export/excel"))
        .and(query_param_is_missing("startDate"))
        .and(query_param_is_missing("endDate"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(XLSX_MAGIC.to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = client(&server).export().excel(None, None).await.unwrap();
    assert_eq!(bytes, XLSX_MAGIC.to_vec());
}

#[tokio::test]
async fn excel_export_reports_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/export/excel"))
        .respond_with(ResponseTemplate::new(500).set_body_string("workbook failed"))
        .mount(&server)
        .await;

    let err = client(&server).export().excel(None, None).await.unwrap_err();
    assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(err.to_string(), "workbook failed");
}

#[tokio::test]
async fn excel_export_expires_session_when_refresh_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/export/excel"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).export().excel(None, None).await.unwrap_err();
    assert!(err.is_session_expired());
}
