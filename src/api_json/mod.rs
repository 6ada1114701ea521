use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::calculo::{calcular_semestre, nota_necesaria, promedio_materia, to_num};
use crate::error::ErrorApi;
use crate::models::{
    Materia, MateriaCruda, ResultadoNecesaria, ResultadoPromedio, ResultadoSemestre, ValorCrudo,
};

/// Cuerpo de `POST /pesos/validar`
///
/// ```json
/// { "pesos": [30, "30", "40"] }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct SolicitudPesos {
    #[serde(default)]
    pub pesos: Vec<ValorCrudo>,
}

/// Cuerpo de `POST /materia/promedio` y `POST /materia/necesaria`
///
/// ```json
/// {
///   "materia": {
///     "nombre": "Matemáticas",
///     "creditos": 3,
///     "cortes": [
///       { "peso": 30, "nota": 3.2 },
///       { "peso": 30, "nota": "3.8" },
///       { "peso": 40, "nota": "" }
///     ]
///   },
///   "nota_minima": 3.0
/// }
/// ```
///
/// `nota_minima` es opcional; si falta o no es numérica se usa la meta configurada.
#[derive(Debug, Serialize, Deserialize)]
pub struct SolicitudMateria {
    pub materia: MateriaCruda,
    #[serde(default)]
    pub nota_minima: ValorCrudo,
}

/// Cuerpo de `POST /semestre`
#[derive(Debug, Serialize, Deserialize)]
pub struct SolicitudSemestre {
    #[serde(default)]
    pub materias: Vec<MateriaCruda>,
    #[serde(default)]
    pub nota_minima: ValorCrudo,
    #[serde(default)]
    pub ponderar_creditos: bool,
}

/// Cuerpo de `PUT /materias/{id}/cortes`
#[derive(Debug, Serialize, Deserialize)]
pub struct SolicitudCortes {
    #[serde(default)]
    pub cortes: ValorCrudo,
}

/// Cuerpo de `PUT /materias/{id}/cortes/{indice}`: `campo` es "peso" o "nota"
#[derive(Debug, Serialize, Deserialize)]
pub struct SolicitudCampo {
    pub campo: String,
    #[serde(default)]
    pub valor: ValorCrudo,
}

/// Lo que la vista muestra bajo cada materia
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumenMateria {
    pub id: String,
    pub nombre: String,
    pub creditos: u32,
    pub promedio: ResultadoPromedio,
    pub necesaria: ResultadoNecesaria,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RespuestaSemestre {
    pub semestre: ResultadoSemestre,
    pub materias: Vec<ResumenMateria>,
}

pub fn parse_json_input<T: DeserializeOwned>(json_str: &str) -> Result<T, ErrorApi> {
    Ok(serde_json::from_str::<T>(json_str)?)
}

pub fn parse_json_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ErrorApi> {
    Ok(serde_json::from_value::<T>(value)?)
}

/// Meta de la solicitud. No se acota a [0,5]: una meta fuera de escala se
/// respeta y termina clasificada como imposible o ya asegurada.
pub fn meta(nota_minima: &ValorCrudo, por_defecto: f64) -> f64 {
    to_num(nota_minima, por_defecto)
}

pub fn resumir(materia: &Materia, nota_minima: f64) -> ResumenMateria {
    ResumenMateria {
        id: materia.id.clone(),
        nombre: materia.nombre.clone(),
        creditos: materia.creditos,
        promedio: promedio_materia(materia),
        necesaria: nota_necesaria(materia, nota_minima),
    }
}

/// Calcula el semestre y el resumen de cada materia sobre copias ya coercionadas.
pub fn evaluar_materias(materias: &[Materia], nota_minima: f64, ponderar_creditos: bool) -> RespuestaSemestre {
    RespuestaSemestre {
        semestre: calcular_semestre(materias, ponderar_creditos),
        materias: materias.iter().map(|m| resumir(m, nota_minima)).collect(),
    }
}

pub fn evaluar_semestre(solicitud: &SolicitudSemestre, nota_minima_por_defecto: f64) -> RespuestaSemestre {
    let materias: Vec<Materia> = solicitud.materias.iter().map(MateriaCruda::coercionar).collect();
    let nota_minima = meta(&solicitud.nota_minima, nota_minima_por_defecto);
    evaluar_materias(&materias, nota_minima, solicitud.ponderar_creditos)
}
