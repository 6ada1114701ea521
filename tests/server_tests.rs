use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use calcunotas::config::Config;
use calcunotas::server::{configurar, EstadoApp};
use serde_json::{json, Value};

fn estado() -> web::Data<EstadoApp> {
    web::Data::new(EstadoApp::new(Config::default()))
}

fn materia_ejemplo() -> Value {
    json!({
        "id": "mat",
        "nombre": "Matemáticas",
        "creditos": 3,
        "cortes": [
            { "peso": 30, "nota": 3.2 },
            { "peso": "30", "nota": "3.8" },
            { "peso": 40, "nota": "" }
        ]
    })
}

#[actix_web::test]
async fn test_validar_pesos() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar)).await;
    let req = test::TestRequest::post()
        .uri("/pesos/validar")
        .set_json(json!({"pesos": [30, "30", 35]}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["valido"], false);
    assert_eq!(body["suma"], 95.0);
}

#[actix_web::test]
async fn test_promedio_y_necesaria() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar)).await;

    let req = test::TestRequest::post()
        .uri("/materia/promedio")
        .set_json(json!({"materia": materia_ejemplo()}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["estado"], "parcial_ok");
    assert_eq!(body["mensaje"], "Promedio parcial: 3.50");

    // sin nota_minima se usa la meta configurada (3.0)
    let req = test::TestRequest::post()
        .uri("/materia/necesaria")
        .set_json(json!({"materia": materia_ejemplo()}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["estado"], "alcanzable");
    assert_eq!(
        body["mensaje"],
        "Necesitas promedio de 2.25 en los cortes restantes para llegar a 3.0."
    );

    let req = test::TestRequest::post()
        .uri("/materia/necesaria")
        .set_json(json!({"materia": materia_ejemplo(), "nota_minima": "5"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["estado"], "imposible");
}

#[actix_web::test]
async fn test_semestre_desde_cuerpo() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar)).await;
    let req = test::TestRequest::post()
        .uri("/semestre")
        .set_json(json!({
            "ponderar_creditos": true,
            "materias": [
                { "id": "a", "nombre": "A", "creditos": 3,
                  "cortes": [ { "peso": 50, "nota": 4 }, { "peso": 50, "nota": 4 } ] },
                { "id": "b", "nombre": "B", "creditos": "1",
                  "cortes": [ { "peso": 100, "nota": "3" } ] },
                { "id": "c", "nombre": "C", "creditos": 2,
                  "cortes": [ { "peso": 100, "nota": null } ] }
            ]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["semestre"]["estado"], "ok");
    assert_eq!(body["semestre"]["promedio"], 3.75);
    assert_eq!(body["semestre"]["incluidas"], 2);
    assert_eq!(body["semestre"]["omitidas"], 1);
    assert_eq!(body["materias"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["materias"][2]["promedio"]["estado"], "advertencia");
}

#[actix_web::test]
async fn test_json_invalido_devuelve_400() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar)).await;
    let req = test::TestRequest::post()
        .uri("/materia/promedio")
        .set_json(json!({"materia": {"cortes": [ { "peso": true } ]}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap_or_default().starts_with("invalid JSON body"));
}

#[actix_web::test]
async fn test_flujo_registro() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar)).await;

    let req = test::TestRequest::post()
        .uri("/materias")
        .set_json(json!({"nombre": "Física", "creditos": "4", "cortes": "2"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let creada: Value = test::read_body_json(resp).await;
    let id = creada["id"].as_str().unwrap().to_string();
    assert_eq!(creada["cortes"].as_array().map(Vec::len), Some(2));

    for (indice, campo, valor) in [(0, "peso", json!("50")), (0, "nota", json!(4)), (1, "peso", json!(50))] {
        let req = test::TestRequest::put()
            .uri(&format!("/materias/{}/cortes/{}", id, indice))
            .set_json(json!({"campo": campo, "valor": valor}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri("/materias?nota_minima=3").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["materias"][0]["nombre"], "Física");
    assert_eq!(body["resultados"][0]["promedio"]["estado"], "parcial_ok");
    assert_eq!(body["resultados"][0]["promedio"]["valor"], 4.0);
    // (3 - 2.0) / 0.5 = 2.0
    assert_eq!(body["resultados"][0]["necesaria"]["estado"], "alcanzable");

    // todavía incompleta
    let req = test::TestRequest::get().uri("/materias/semestre").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["semestre"]["estado"], "sin_completas");

    let req = test::TestRequest::put()
        .uri(&format!("/materias/{}/cortes/1", id))
        .set_json(json!({"campo": "nota", "valor": "3,5"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/materias/semestre?ponderar_creditos=true").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["semestre"]["estado"], "ok");
    assert_eq!(body["semestre"]["ponderado_por_creditos"], true);
    assert_eq!(body["semestre"]["incluidas"], 1);

    let req = test::TestRequest::put()
        .uri(&format!("/materias/{}/cortes", id))
        .set_json(json!({"cortes": 4}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["cortes"].as_array().map(Vec::len), Some(4));

    let req = test::TestRequest::delete().uri(&format!("/materias/{}", id)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let req = test::TestRequest::delete().uri(&format!("/materias/{}", id)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_errores_de_registro() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar)).await;
    let req = test::TestRequest::post().uri("/materias").set_json(json!({})).to_request();
    let creada: Value = test::call_and_read_body_json(&app, req).await;
    let id = creada["id"].as_str().unwrap().to_string();
    assert_eq!(creada["nombre"], "Materia 1");

    let req = test::TestRequest::put()
        .uri(&format!("/materias/{}/cortes/0", id))
        .set_json(json!({"campo": "creditos", "valor": 3}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/materias/{}/cortes/9", id))
        .set_json(json!({"campo": "nota", "valor": 3}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/materias/otra/cortes")
        .set_json(json!({"cortes": 2}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri("/materias").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let req = test::TestRequest::get().uri("/materias/semestre").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["semestre"]["estado"], "sin_materias");
}

#[actix_web::test]
async fn test_help() {
    let app = test::init_service(App::new().app_data(estado()).configure(configurar)).await;
    let req = test::TestRequest::get().uri("/help").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["nota_minima_por_defecto"], 3.0);
    assert!(body["post_semestre"]["materias"].is_array());
}
