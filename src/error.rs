//! Errores de la superficie HTTP y de la configuración.
//!
//! El núcleo (`calculo`) no tiene errores: todo resultado es un valor etiquetado.
//! Aquí solo viven los fallos de entrada JSON, del registro de materias y de
//! la configuración de arranque.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ErrorApi {
    #[error("invalid JSON body: {0}")]
    JsonInvalido(#[from] serde_json::Error),

    #[error("materia '{0}' no encontrada")]
    MateriaNoEncontrada(String),

    #[error("corte {indice} fuera de rango (la materia tiene {total} cortes)")]
    CorteFueraDeRango { indice: usize, total: usize },

    #[error("campo desconocido '{0}' (use 'peso' o 'nota')")]
    CampoDesconocido(String),
}

impl ResponseError for ErrorApi {
    fn status_code(&self) -> StatusCode {
        match self {
            ErrorApi::MateriaNoEncontrada(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({"error": self.to_string()}))
    }
}

#[derive(Debug, Error)]
pub enum ErrorConfig {
    #[error("dirección de escucha inválida '{valor}': {fuente}")]
    DireccionInvalida {
        valor: String,
        #[source]
        fuente: std::net::AddrParseError,
    },
}

impl From<ErrorConfig> for std::io::Error {
    fn from(e: ErrorConfig) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    }
}
