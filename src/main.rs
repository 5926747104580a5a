// Demo server for the hosted Gitkit sign-in widget.
//
// # Run
// ## Widget settings in the developer console
// Register the widget URL (http://localhost:4567/gitkit) and download the
// server-config document.
//
// ## Place the server config
// The config is read from the fixed path below:
// ```gitkit-server-config.json
// {
//   "clientId": "your_client_id",
//   "serverApiKey": "your_server_api_key",
//   "widgetUrl": "http://localhost:4567/gitkit",
//   "cookieName": "gtoken"
// }
// ```
//
// ## Run application
// ```cargo run```
// ## Access
// You can access http://localhost:4567/
use std::net::{Ipv4Addr, SocketAddrV4};

use tiny_gitkit::{
    config::Config,
    server::{AppState, router},
};
use tracing::info;

static CONFIG_PATH: &str = "/apps/apps-config/gitkit-server-config.json";
static PORT: u16 = 4567;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // init log
    tracing_subscriber::fmt::init();

    let config = Config::from_json_file(CONFIG_PATH)?;
    info!("sign-in widget is served from {}", config.widget_url());

    let addr = SocketAddrV4::new(Ipv4Addr::new(0, 0, 0, 0), PORT);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind tcp listener");

    info!("Listening on {:?}", addr);

    let app = router(AppState::new(config));
    axum::serve(listener, app).await?;
    anyhow::Ok(())
}
