//! Registro de materias del semestre.
//!
//! Colección ordenada y con identificadores opacos que pertenece a la capa de
//! presentación. Guarda los valores tal como se escriben (texto libre) y solo
//! entrega copias coercionadas al núcleo de cálculo; nunca calcula por sí mismo.

use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::calculo::{clamp, to_num, MAX_CORTES, MAX_CREDITOS, MIN_CORTES};
use crate::config::Config;
use crate::error::ErrorApi;
use crate::models::{CorteCrudo, Materia, MateriaCruda, ValorCrudo};

/// Datos del formulario de alta de materia.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormularioMateria {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub creditos: ValorCrudo,
    #[serde(default)]
    pub cortes: ValorCrudo,
}

/// Campo editable de un corte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampoCorte {
    Peso,
    Nota,
}

impl FromStr for CampoCorte {
    type Err = ErrorApi;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "peso" => Ok(CampoCorte::Peso),
            "nota" => Ok(CampoCorte::Nota),
            otro => Err(ErrorApi::CampoDesconocido(otro.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegistroMaterias {
    materias: Vec<MateriaCruda>,
    contador: u64,
    cortes_por_defecto: usize,
    creditos_por_defecto: u32,
}

impl Default for RegistroMaterias {
    fn default() -> Self {
        RegistroMaterias::new(&Config::default())
    }
}

fn cortes_vacios(n: usize) -> Vec<CorteCrudo> {
    (0..n).map(|_| CorteCrudo::vacio()).collect()
}

fn cantidad_cortes(raw: &ValorCrudo, def: usize) -> usize {
    clamp(to_num(raw, def as f64), MIN_CORTES as f64, MAX_CORTES as f64).trunc() as usize
}

impl RegistroMaterias {
    pub fn new(config: &Config) -> Self {
        RegistroMaterias {
            materias: Vec::new(),
            contador: 0,
            cortes_por_defecto: config.cortes_por_defecto,
            creditos_por_defecto: config.creditos_por_defecto,
        }
    }

    fn nuevo_id(&mut self) -> String {
        self.contador += 1;
        format!("m{:x}-{}", Utc::now().timestamp_millis(), self.contador)
    }

    /// Agrega una materia al inicio de la lista con todos sus cortes vacíos.
    /// Nombre en blanco => "Materia N".
    pub fn agregar_materia(&mut self, form: &FormularioMateria) -> &MateriaCruda {
        let nombre = match form.nombre.trim() {
            "" => format!("Materia {}", self.materias.len() + 1),
            n => n.to_string(),
        };
        let creditos = clamp(
            to_num(&form.creditos, f64::from(self.creditos_por_defecto)),
            0.0,
            f64::from(MAX_CREDITOS),
        )
        .trunc();
        let n = cantidad_cortes(&form.cortes, self.cortes_por_defecto);

        let materia = MateriaCruda {
            id: self.nuevo_id(),
            nombre,
            creditos: ValorCrudo::Numero(creditos),
            cortes: cortes_vacios(n),
        };
        self.materias.insert(0, materia);
        &self.materias[0]
    }

    pub fn eliminar_materia(&mut self, id: &str) -> Result<(), ErrorApi> {
        let antes = self.materias.len();
        self.materias.retain(|m| m.id != id);
        if self.materias.len() == antes {
            return Err(ErrorApi::MateriaNoEncontrada(id.to_string()));
        }
        Ok(())
    }

    fn buscar_mut(&mut self, id: &str) -> Result<&mut MateriaCruda, ErrorApi> {
        self.materias
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ErrorApi::MateriaNoEncontrada(id.to_string()))
    }

    pub fn materia(&self, id: &str) -> Option<&MateriaCruda> {
        self.materias.iter().find(|m| m.id == id)
    }

    /// Cambia la cantidad de cortes (1..=10). Agrega cortes vacíos al final o
    /// recorta desde el final; nunca reordena. Un valor no numérico deja la
    /// cantidad actual.
    pub fn set_cortes_count(&mut self, id: &str, raw: &ValorCrudo) -> Result<&MateriaCruda, ErrorApi> {
        let materia = self.buscar_mut(id)?;
        let n = cantidad_cortes(raw, materia.cortes.len());
        materia.cortes.resize_with(n, CorteCrudo::vacio);
        Ok(materia)
    }

    /// Guarda el valor crudo de un campo; la coerción ocurre al calcular.
    pub fn actualizar_corte(
        &mut self,
        id: &str,
        indice: usize,
        campo: CampoCorte,
        valor: ValorCrudo,
    ) -> Result<&MateriaCruda, ErrorApi> {
        let materia = self.buscar_mut(id)?;
        let total = materia.cortes.len();
        let corte = materia
            .cortes
            .get_mut(indice)
            .ok_or(ErrorApi::CorteFueraDeRango { indice, total })?;
        match campo {
            CampoCorte::Peso => corte.peso = valor,
            CampoCorte::Nota => corte.nota = valor,
        }
        Ok(materia)
    }

    pub fn limpiar(&mut self) {
        self.materias.clear();
    }

    pub fn materias(&self) -> &[MateriaCruda] {
        &self.materias
    }

    pub fn len(&self) -> usize {
        self.materias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materias.is_empty()
    }

    /// Copias coercionadas, en el mismo orden, para pasarlas al núcleo.
    pub fn snapshot(&self) -> Vec<Materia> {
        self.materias.iter().map(MateriaCruda::coercionar).collect()
    }
}
