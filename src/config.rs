use std::env;
use std::net::SocketAddr;

use crate::calculo::{clamp, to_num_texto, MAX_CORTES, MAX_CREDITOS, MIN_CORTES};
use crate::error::ErrorConfig;

pub const BIND_POR_DEFECTO: &str = "127.0.0.1:8080";

/// Configuración del servicio. Se lee de variables de entorno (y de `.env` si existe).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind: String,
    /// Meta usada cuando una solicitud no trae `nota_minima`
    pub nota_minima: f64,
    /// Cortes para materias nuevas sin cantidad válida
    pub cortes_por_defecto: usize,
    /// Créditos para materias nuevas sin cantidad válida
    pub creditos_por_defecto: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: BIND_POR_DEFECTO.to_string(),
            nota_minima: 3.0,
            cortes_por_defecto: 3,
            creditos_por_defecto: 1,
        }
    }
}

// load .env if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl Config {
    pub fn from_env() -> Result<Self, ErrorConfig> {
        load_dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Versión parametrizable para pruebas: recibe la función que resuelve
    /// cada variable, así no hace falta tocar el entorno del proceso.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ErrorConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let def = Config::default();

        let bind = lookup("CALCUNOTAS_BIND")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(def.bind);
        if let Err(fuente) = bind.parse::<SocketAddr>() {
            return Err(ErrorConfig::DireccionInvalida { valor: bind, fuente });
        }

        let num = |clave: &str, d: f64| lookup(clave).map(|s| to_num_texto(&s, d)).unwrap_or(d);

        let nota_minima = num("CALCUNOTAS_NOTA_MINIMA", def.nota_minima);
        let cortes = clamp(
            num("CALCUNOTAS_CORTES", def.cortes_por_defecto as f64),
            MIN_CORTES as f64,
            MAX_CORTES as f64,
        );
        let creditos = clamp(
            num("CALCUNOTAS_CREDITOS", f64::from(def.creditos_por_defecto)),
            0.0,
            f64::from(MAX_CREDITOS),
        );

        Ok(Config {
            bind,
            nota_minima,
            cortes_por_defecto: cortes.trunc() as usize,
            creditos_por_defecto: creditos.trunc() as u32,
        })
    }
}
