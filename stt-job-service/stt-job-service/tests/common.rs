use reqwest::Client;
use stt_configuration::AppConfig;
use stt_setup::Application;
use tokio::{net::TcpListener, task::JoinHandle};

pub const USER_HEADER: &str = "x-user-id";

pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn setup_test_server() -> Result<TestServer, Box<dyn std::error::Error>> {
    let mut config = AppConfig::default();
    config.database.url = "sqlite::memory:".to_string();
    config.service.auth.user_header = USER_HEADER.to_string();

    let app = Application::new(config).await?;
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    let handle = tokio::spawn(async move {
        if let Err(err) = app.serve(listener).await {
            eprintln!("test server stopped: {err}");
        }
    });

    Ok(TestServer {
        base_url,
        client: Client::new(),
        handle,
    })
}
