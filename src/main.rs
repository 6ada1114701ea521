// --- Calculadora de notas por cortes - Archivo principal ---

use calcunotas::{run_server, Config};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Config primero: carga `.env`, que también puede traer RUST_LOG
    let config = Config::from_env()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("=== Calculadora de notas (API) ===");
    run_server(config).await
}
