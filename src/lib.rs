// Biblioteca raíz del crate `calcunotas`.
// El núcleo de cálculo vive en `calculo`; el resto (registro, JSON, servidor)
// es la capa que recibe datos crudos y presenta los resultados.
pub mod models;
pub mod calculo;
pub mod registro;
pub mod api_json;
pub mod config;
pub mod error;
pub mod server;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
pub use config::Config;
