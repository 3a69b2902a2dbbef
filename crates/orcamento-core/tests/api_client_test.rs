use orcamento_core::api::{ApiClient, ApiConfig, ApiError, AuthSession, Credentials, MemoryTokenStore};
use orcamento_core::domain::{Budget, Client, Material, MaterialPayload};
use orcamento_core::editor::{BudgetDraft, FieldPath, OperationField, PartField, ToolField};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, auth: AuthSession) -> ApiClient {
    ApiClient::new(ApiConfig::new(format!("{}/api", server.uri())), auth)
}

#[tokio::test]
async fn test_list_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clientes"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "cnpj": "12.345.678/0001-90", "razaoSocial": "Alfa Usinagem Ltda", "nomeFantasia": "Alfa"},
            {"id": "2", "razaoSocial": "Beta SA"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server, AuthSession::new(MemoryTokenStore::with_token("tok-123")));
    let clients: Vec<Client> = api.list().await.unwrap();
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].id.as_str(), "1");
    assert_eq!(clients[1].data.razao_social, "Beta SA");
}

#[tokio::test]
async fn test_status_error_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/materiais"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "banco indisponível"})))
        .mount(&server)
        .await;

    let api = client_for(&server, AuthSession::in_memory());
    let err = api.list::<Material>().await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "banco indisponível");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_and_malformed_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/materiais"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orcamentos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let api = client_for(&server, AuthSession::in_memory());
    assert!(matches!(api.list::<Material>().await, Err(ApiError::EmptyBody)));
    assert!(matches!(api.list::<Budget>().await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn test_transport_failure() {
    let api = ApiClient::new(ApiConfig::new("http://127.0.0.1:9/api"), AuthSession::in_memory());
    assert!(matches!(api.list::<Material>().await, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn test_update_echo_and_no_echo() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/materiais/4"))
        .and(body_json(json!({
            "nome": "Aço 1020",
            "preco": 12.5,
            "especificacaoTecnica": "SAE 1020",
            "origem": "Nacional",
            "descricao": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4, "nome": "Aço 1020", "preco": "12.5"})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/materiais/5"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let api = client_for(&server, AuthSession::in_memory());
    let payload = MaterialPayload {
        name: "Aço 1020".into(),
        price: 12.5,
        technical_spec: "SAE 1020".into(),
        origin: "Nacional".into(),
        description: String::new(),
    };
    let echoed = api.update::<Material>(&"4".into(), &payload).await.unwrap().unwrap();
    assert_eq!(echoed.data.price, 12.5);
    assert!(api.update::<Material>(&"5".into(), &payload).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_record() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/orcamentos/11"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server, AuthSession::in_memory());
    api.delete::<Budget>(&"11".into()).await.unwrap();
}

#[tokio::test]
async fn test_create_budget_posts_nested_and_flat_arrays() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orcamentos"))
        .and(body_json(json!({
            "nome": "Molde 7",
            "cliente_id": "3",
            "contato": "Ana",
            "ferramentas": [{
                "nome": "Furadeira",
                "quantidade": 1,
                "pecas": [{
                    "nome": "Eixo",
                    "quantidade": 2,
                    "nota": "",
                    "material_id": "8",
                    "peso": 1.5,
                    "operacoes": [{"operacao_id": "2", "horas": 5.0}]
                }]
            }],
            "pecas": [{
                "nome": "Eixo",
                "quantidade": 2,
                "nota": "",
                "material_id": "8",
                "peso": 1.5,
                "ferramenta_nome": "Furadeira"
            }],
            "operacoes": [{"operacao_id": "2", "horas": 5.0}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Orçamento criado"})))
        .expect(1)
        .mount(&server)
        .await;

    let draft = BudgetDraft::new()
        .set_field(FieldPath::Budget(orcamento_core::editor::BudgetField::Name), "Molde 7")
        .set_field(FieldPath::Budget(orcamento_core::editor::BudgetField::Client), "3")
        .set_field(FieldPath::Budget(orcamento_core::editor::BudgetField::Contact), "Ana")
        .add_tool()
        .set_field(FieldPath::tool(0, ToolField::Name), "Furadeira")
        .set_field(FieldPath::tool(0, ToolField::Quantity), "1")
        .add_part(0)
        .set_field(FieldPath::part(0, 0, PartField::Name), "Eixo")
        .set_field(FieldPath::part(0, 0, PartField::Quantity), "2")
        .set_field(FieldPath::part(0, 0, PartField::Material), "8")
        .set_field(FieldPath::part(0, 0, PartField::Weight), "1,5")
        .add_operation_usage(0, 0)
        .set_field(FieldPath::operation(0, 0, 0, OperationField::Operation), "2")
        .set_field(FieldPath::operation(0, 0, 0, OperationField::Hours), "5");
    assert!(draft.validate().is_empty());

    let api = client_for(&server, AuthSession::in_memory());
    let created = api.create::<Budget>(&draft.serialize().unwrap()).await.unwrap();
    assert!(created.is_none());
}

#[tokio::test]
async fn test_dashboard_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/counts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"clientes": 4, "orcamentos": 7})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/horas-operacoes"))
        .and(query_param("mes", "03"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"operacao": "Torno", "total_horas": 12.5},
            {"operacao": "Fresa", "total_horas": "4"}
        ])))
        .mount(&server)
        .await;

    let api = client_for(&server, AuthSession::in_memory());
    let counts = api.dashboard_counts().await.unwrap();
    assert_eq!(counts.get("orcamentos"), Some(&7));
    let hours = api.operation_hours(3).await.unwrap();
    assert_eq!(hours[1].total_horas, 4.0);
}

#[tokio::test]
async fn test_login_stores_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"email": "admin@alfa.com", "password": "segredo"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt-abc"})))
        .mount(&server)
        .await;

    let session = AuthSession::in_memory();
    let api = client_for(&server, session.clone());
    api.login(&Credentials {
        email: "admin@alfa.com".into(),
        password: "segredo".into(),
    })
    .await
    .unwrap();
    assert_eq!(session.token().as_deref(), Some("jwt-abc"));

    api.logout();
    assert!(!session.is_signed_in());
}

#[tokio::test]
async fn test_login_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Credenciais inválidas"})))
        .mount(&server)
        .await;

    let api = client_for(&server, AuthSession::in_memory());
    let err = api
        .login(&Credentials {
            email: "admin@alfa.com".into(),
            password: "errada".into(),
        })
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Erro 401: Credenciais inválidas");
    assert!(!api.auth().is_signed_in());
}
