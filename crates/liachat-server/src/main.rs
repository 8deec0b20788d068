use anyhow::Result;
use colored::Colorize;

use liachat_server::{serve, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;

    println!(
        "{} LiaAI chat backend starting on http://{}",
        "🌐".cyan(),
        config.bind_addr
    );
    println!("   Chat endpoint: POST http://{}/api/chat", config.bind_addr);
    println!(
        "   Session log:   GET  http://{}/api/messages",
        config.bind_addr
    );

    serve(config).await
}
