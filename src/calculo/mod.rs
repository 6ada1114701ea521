// Núcleo de cálculo de notas.
// Declarar submódulos (archivos en la carpeta `src/calculo`)
pub mod coercion;
pub mod pesos;
pub mod promedio;
pub mod necesaria;
pub mod semestre;

/// Nota máxima de la escala 0–5
pub const NOTA_MAXIMA: f64 = 5.0;
/// Suma que deben alcanzar los porcentajes de una materia
pub const PESO_TOTAL: f64 = 100.0;
/// Límites de cortes por materia
pub const MIN_CORTES: usize = 1;
pub const MAX_CORTES: usize = 10;
/// Créditos admitidos por materia
pub const MAX_CREDITOS: u32 = 99;

// Reexportar solo la API pública del núcleo
pub use coercion::{clamp, to_num, to_num_texto, nota_desde, peso_desde};
pub use pesos::validar_pesos;
pub use promedio::promedio_materia;
pub use necesaria::nota_necesaria;
pub use semestre::{calcular_semestre, materia_completa};
