// Estructuras de datos principales: cortes, materias y resultados de cálculo

use serde::{Deserialize, Serialize};
use crate::calculo::coercion::{clamp, nota_desde, peso_desde, to_num};

/// Valor escalar tal como llega desde un formulario: número, texto o vacío.
/// `null` (o un campo ausente) se deserializa como `Vacio`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValorCrudo {
    Numero(f64),
    Texto(String),
    #[default]
    Vacio,
}

impl ValorCrudo {
    /// Vacío o texto en blanco. Sirve para distinguir "sin nota" de una nota 0.
    pub fn esta_vacio(&self) -> bool {
        match self {
            ValorCrudo::Vacio => true,
            ValorCrudo::Texto(s) => s.trim().is_empty(),
            ValorCrudo::Numero(_) => false,
        }
    }
}

impl From<f64> for ValorCrudo {
    fn from(v: f64) -> Self {
        ValorCrudo::Numero(v)
    }
}

impl From<&str> for ValorCrudo {
    fn from(s: &str) -> Self {
        ValorCrudo::Texto(s.to_string())
    }
}

/// Nota de un corte. `SinNota` nunca se trata como cero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nota {
    Numerica(f64),
    SinNota,
}

impl Nota {
    pub fn valor(&self) -> Option<f64> {
        match self {
            Nota::Numerica(v) => Some(*v),
            Nota::SinNota => None,
        }
    }

    pub fn ingresada(&self) -> bool {
        matches!(self, Nota::Numerica(_))
    }
}

/// Corte (periodo de evaluación) ya coercionado: peso en [0,100], nota en [0,5] o sin nota.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corte {
    pub peso: f64,
    pub nota: Nota,
}

impl Corte {
    pub fn new(peso: f64, nota: Nota) -> Self {
        Corte { peso, nota }
    }

    pub fn con_nota(peso: f64, nota: f64) -> Self {
        Corte { peso, nota: Nota::Numerica(nota) }
    }

    pub fn sin_nota(peso: f64) -> Self {
        Corte { peso, nota: Nota::SinNota }
    }
}

/// Materia lista para el núcleo de cálculo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Materia {
    pub id: String,
    pub nombre: String,
    pub creditos: u32,
    pub cortes: Vec<Corte>,
}

impl Materia {
    pub fn new(id: &str, nombre: &str, creditos: u32, cortes: Vec<Corte>) -> Self {
        Materia {
            id: id.to_string(),
            nombre: nombre.to_string(),
            creditos,
            cortes,
        }
    }

    pub fn pesos(&self) -> Vec<f64> {
        self.cortes.iter().map(|c| c.peso).collect()
    }
}

/// Corte tal como lo edita el usuario (texto libre o número).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorteCrudo {
    #[serde(default)]
    pub peso: ValorCrudo,
    #[serde(default)]
    pub nota: ValorCrudo,
}

impl CorteCrudo {
    pub fn vacio() -> Self {
        CorteCrudo::default()
    }

    pub fn coercionar(&self) -> Corte {
        Corte {
            peso: peso_desde(&self.peso),
            nota: nota_desde(&self.nota),
        }
    }
}

/// Materia en su forma editable. Es la que guarda el registro y la que llega por JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MateriaCruda {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub creditos: ValorCrudo,
    #[serde(default)]
    pub cortes: Vec<CorteCrudo>,
}

impl MateriaCruda {
    /// Aplica la coerción numérica a todos los campos y devuelve una copia
    /// independiente que el núcleo puede leer.
    pub fn coercionar(&self) -> Materia {
        let creditos = clamp(to_num(&self.creditos, 1.0), 0.0, 99.0).trunc() as u32;
        Materia {
            id: self.id.clone(),
            nombre: self.nombre.clone(),
            creditos,
            cortes: self.cortes.iter().map(CorteCrudo::coercionar).collect(),
        }
    }
}

// --- Resultados (valores calculados, nunca almacenados) ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidacionPesos {
    pub valido: bool,
    /// Suma redondeada a 2 decimales.
    pub suma: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoPromedio {
    Error,
    Advertencia,
    ParcialOk,
    FinalOk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultadoPromedio {
    pub estado: EstadoPromedio,
    pub valor: Option<f64>,
    pub mensaje: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoNecesaria {
    Error,
    YaAsegurada,
    Imposible,
    Alcanzable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultadoNecesaria {
    pub estado: EstadoNecesaria,
    pub valor: Option<f64>,
    pub mensaje: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoSemestre {
    SinMaterias,
    SinCompletas,
    Ok,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultadoSemestre {
    pub estado: EstadoSemestre,
    pub promedio: Option<f64>,
    pub incluidas: usize,
    pub omitidas: usize,
    pub ponderado_por_creditos: bool,
    pub mensaje: String,
}
