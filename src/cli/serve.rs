use crate::{api::AppState, config::Config, error, server, warning};

/// Runs the web app. `addr` overrides `SERVER_ADDRESS`; `open` launches the browser
/// on the welcome page once the server is about to start.
pub async fn serve(addr: Option<String>, open: bool) {
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    };
    if let Some(addr) = addr {
        config.server_address = addr;
    }

    let addr = config.server_address.clone();
    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => error!("Cannot create HTTP client: {}", e),
    };

    if open && webbrowser::open(&format!("http://{}/", addr)).is_err() {
        warning!(
            "Failed to open browser. Please navigate to http://{}/ manually.",
            addr
        );
    }

    if let Err(e) = server::start_api_server(state, &addr).await {
        error!("Server stopped: {}", e);
    }
}
