// --- Generador de Horarios - Archivo principal ---

use schedwise::{run_server, AppConfig};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = AppConfig::from_env();
    log::info!("=== Generador de Horarios (API) ===");
    run_server(config).await
}
