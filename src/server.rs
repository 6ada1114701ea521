use std::collections::HashMap;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer};
use log::{debug, info, warn};
use parking_lot::Mutex;
use serde_json::json;

use crate::api_json::{
    evaluar_materias, evaluar_semestre, meta, parse_json_value, SolicitudCampo, SolicitudCortes,
    SolicitudMateria, SolicitudPesos, SolicitudSemestre,
};
use crate::calculo::{nota_necesaria, peso_desde, promedio_materia, validar_pesos};
use crate::config::Config;
use crate::error::ErrorApi;
use crate::models::{CorteCrudo, MateriaCruda, ValorCrudo};
use crate::registro::{CampoCorte, FormularioMateria, RegistroMaterias};

/// Estado compartido entre workers: configuración y registro en memoria.
pub struct EstadoApp {
    pub config: Config,
    pub registro: Mutex<RegistroMaterias>,
}

impl EstadoApp {
    pub fn new(config: Config) -> Self {
        let registro = Mutex::new(RegistroMaterias::new(&config));
        EstadoApp { config, registro }
    }
}

type Resultado = Result<HttpResponse, ErrorApi>;

/// POST /pesos/validar
async fn validar_pesos_handler(body: web::Json<serde_json::Value>) -> Resultado {
    let sol: SolicitudPesos = parse_json_value(body.into_inner())?;
    let pesos: Vec<f64> = sol.pesos.iter().map(peso_desde).collect();
    let validacion = validar_pesos(&pesos);
    debug!("validar_pesos: suma={} valido={}", validacion.suma, validacion.valido);
    Ok(HttpResponse::Ok().json(validacion))
}

/// POST /materia/promedio
async fn promedio_handler(body: web::Json<serde_json::Value>) -> Resultado {
    let sol: SolicitudMateria = parse_json_value(body.into_inner())?;
    let res = promedio_materia(&sol.materia.coercionar());
    debug!("promedio: {:?} {:?}", res.estado, res.valor);
    Ok(HttpResponse::Ok().json(res))
}

/// POST /materia/necesaria
async fn necesaria_handler(estado: web::Data<EstadoApp>, body: web::Json<serde_json::Value>) -> Resultado {
    let sol: SolicitudMateria = parse_json_value(body.into_inner())?;
    let nota_minima = meta(&sol.nota_minima, estado.config.nota_minima);
    let res = nota_necesaria(&sol.materia.coercionar(), nota_minima);
    debug!("necesaria (meta {}): {:?} {:?}", nota_minima, res.estado, res.valor);
    Ok(HttpResponse::Ok().json(res))
}

/// POST /semestre
/// Calcula el semestre sobre las materias enviadas en el cuerpo (no usa el registro).
async fn semestre_handler(estado: web::Data<EstadoApp>, body: web::Json<serde_json::Value>) -> Resultado {
    let sol: SolicitudSemestre = parse_json_value(body.into_inner())?;
    let resp = evaluar_semestre(&sol, estado.config.nota_minima);
    debug!(
        "semestre: {:?} incluidas={} omitidas={}",
        resp.semestre.estado, resp.semestre.incluidas, resp.semestre.omitidas
    );
    Ok(HttpResponse::Ok().json(resp))
}

fn query_bool(qm: &HashMap<String, String>, clave: &str) -> bool {
    matches!(
        qm.get(clave).map(|s| s.trim().to_lowercase()).as_deref(),
        Some("true" | "1" | "si" | "sí" | "on")
    )
}

fn query_meta(qm: &HashMap<String, String>, por_defecto: f64) -> f64 {
    let raw = qm.get("nota_minima").map(|s| ValorCrudo::from(s.as_str())).unwrap_or_default();
    meta(&raw, por_defecto)
}

/// GET /materias?nota_minima=3.0
/// Devuelve las materias del registro (valores crudos) y el resultado de cada una.
async fn listar_materias_handler(
    estado: web::Data<EstadoApp>,
    query: web::Query<HashMap<String, String>>,
) -> Resultado {
    let qm = query.into_inner();
    let nota_minima = query_meta(&qm, estado.config.nota_minima);
    let (materias, snapshot): (Vec<MateriaCruda>, _) = {
        let registro = estado.registro.lock();
        (registro.materias().to_vec(), registro.snapshot())
    };
    let resp = evaluar_materias(&snapshot, nota_minima, query_bool(&qm, "ponderar_creditos"));
    Ok(HttpResponse::Ok().json(json!({"materias": materias, "resultados": resp.materias})))
}

/// POST /materias
async fn agregar_materia_handler(estado: web::Data<EstadoApp>, body: web::Json<serde_json::Value>) -> Resultado {
    let form: FormularioMateria = parse_json_value(body.into_inner())?;
    let mut registro = estado.registro.lock();
    let materia = registro.agregar_materia(&form).clone();
    info!("materia agregada: {} ({} cortes)", materia.nombre, materia.cortes.len());
    Ok(HttpResponse::Created().json(materia))
}

/// DELETE /materias
async fn limpiar_handler(estado: web::Data<EstadoApp>) -> Resultado {
    estado.registro.lock().limpiar();
    info!("registro de materias vaciado");
    Ok(HttpResponse::Ok().json(json!({"status": "ok", "count": 0})))
}

/// DELETE /materias/{id}
async fn eliminar_materia_handler(estado: web::Data<EstadoApp>, path: web::Path<String>) -> Resultado {
    let id = path.into_inner();
    let mut registro = estado.registro.lock();
    if let Err(e) = registro.eliminar_materia(&id) {
        warn!("eliminar: {}", e);
        return Err(e);
    }
    Ok(HttpResponse::Ok().json(json!({"status": "ok", "count": registro.len()})))
}

/// PUT /materias/{id}/cortes
async fn cortes_count_handler(
    estado: web::Data<EstadoApp>,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Resultado {
    let id = path.into_inner();
    let sol: SolicitudCortes = parse_json_value(body.into_inner())?;
    let mut registro = estado.registro.lock();
    let materia = registro.set_cortes_count(&id, &sol.cortes).inspect_err(|e| warn!("cortes: {}", e))?;
    Ok(HttpResponse::Ok().json(materia))
}

/// PUT /materias/{id}/cortes/{indice}
async fn actualizar_corte_handler(
    estado: web::Data<EstadoApp>,
    path: web::Path<(String, usize)>,
    body: web::Json<serde_json::Value>,
) -> Resultado {
    let (id, indice) = path.into_inner();
    let sol: SolicitudCampo = parse_json_value(body.into_inner())?;
    let campo: CampoCorte = sol.campo.parse()?;
    let mut registro = estado.registro.lock();
    let materia = registro
        .actualizar_corte(&id, indice, campo, sol.valor)
        .inspect_err(|e| warn!("actualizar corte: {}", e))?;
    Ok(HttpResponse::Ok().json(materia))
}

/// GET /materias/semestre?ponderar_creditos=true&nota_minima=3.0
async fn semestre_registro_handler(
    estado: web::Data<EstadoApp>,
    query: web::Query<HashMap<String, String>>,
) -> Resultado {
    let qm = query.into_inner();
    let nota_minima = query_meta(&qm, estado.config.nota_minima);
    let snapshot = estado.registro.lock().snapshot();
    let resp = evaluar_materias(&snapshot, nota_minima, query_bool(&qm, "ponderar_creditos"));
    Ok(HttpResponse::Ok().json(resp))
}

async fn help_handler(estado: web::Data<EstadoApp>) -> HttpResponse {
    // Materia de ejemplo 30/30/40 con dos notas ingresadas
    let ejemplo = MateriaCruda {
        id: "ejemplo".to_string(),
        nombre: "Matemáticas".to_string(),
        creditos: ValorCrudo::Numero(3.0),
        cortes: vec![
            CorteCrudo { peso: 30.0.into(), nota: 3.2.into() },
            CorteCrudo { peso: 30.0.into(), nota: 3.8.into() },
            CorteCrudo { peso: 40.0.into(), nota: ValorCrudo::Vacio },
        ],
    };

    HttpResponse::Ok().json(json!({
        "description": "API para calcular promedios por cortes, la nota necesaria para aprobar y el promedio del semestre. Escala 0-5; los porcentajes de cada materia deben sumar 100.",
        "nota_minima_por_defecto": estado.config.nota_minima,
        "post_pesos_validar": {"pesos": [30, "30", 40]},
        "post_materia_promedio": {"materia": ejemplo},
        "post_materia_necesaria": {"materia": ejemplo, "nota_minima": 3.0},
        "post_semestre": {"materias": [ejemplo], "nota_minima": 3.0, "ponderar_creditos": true},
        "post_materias": {"nombre": "Matemáticas", "creditos": "3", "cortes": "3"},
        "put_materias_cortes": {"cortes": 4},
        "put_materias_corte": {"campo": "nota", "valor": "3.5"},
        "note": "Una nota vacía (\"\" o null) significa corte sin nota; nunca cuenta como 0."
    }))
}

/// Rutas de la API. Separado de `run_server` para poder montarlo en tests.
pub fn configurar(cfg: &mut web::ServiceConfig) {
    cfg.route("/pesos/validar", web::post().to(validar_pesos_handler))
        .route("/materia/promedio", web::post().to(promedio_handler))
        .route("/materia/necesaria", web::post().to(necesaria_handler))
        .route("/semestre", web::post().to(semestre_handler))
        .route("/materias", web::get().to(listar_materias_handler))
        .route("/materias", web::post().to(agregar_materia_handler))
        .route("/materias", web::delete().to(limpiar_handler))
        .route("/materias/semestre", web::get().to(semestre_registro_handler))
        .route("/materias/{id}", web::delete().to(eliminar_materia_handler))
        .route("/materias/{id}/cortes", web::put().to(cortes_count_handler))
        .route("/materias/{id}/cortes/{indice}", web::put().to(actualizar_corte_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind = config.bind.clone();
    let estado = web::Data::new(EstadoApp::new(config));
    info!("Iniciando servidor en http://{}", bind);
    HttpServer::new(move || {
        App::new()
            .app_data(estado.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(configurar)
    })
    .bind(bind.as_str())?
    .run()
    .await
}
