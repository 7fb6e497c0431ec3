//! Command-line client for the PasteLite API.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use pastelite_core::DEFAULT_CLI_SERVER_URL;
use serde_json::Value;
use std::io::{self, Read};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "plite", about = "PasteLite CLI", version)]
struct Cli {
    /// Server URL (can also be set via PLITE_SERVER env var)
    #[arg(short, long, env = "PLITE_SERVER")]
    server: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Create a paste from a file or stdin
    New {
        #[arg(short, long)]
        file: Option<String>,
        /// Seconds until the paste expires
        #[arg(long)]
        ttl: Option<i64>,
        /// Number of reads allowed before the paste disappears
        #[arg(short, long)]
        max_views: Option<u32>,
    },
    /// Read a paste (consumes one view)
    Get { id: String },
    /// Check that the server is reachable
    Health,
}

fn error_message_for_response(status: reqwest::StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return value
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or(body)
            .to_string();
    }

    body.to_string()
}

async fn ensure_success_or_exit(res: reqwest::Response, action: &str) -> reqwest::Response {
    let status = res.status();
    if status.is_success() {
        return res;
    }

    let body = match res.text().await {
        Ok(body) => body,
        Err(err) => format!("failed to read error response body: {}", err),
    };
    let message = error_message_for_response(status, &body);
    eprintln!("{} failed ({}): {}", action, status, message);
    std::process::exit(1);
}

fn create_body(content: String, ttl: Option<i64>, max_views: Option<u32>) -> Value {
    let mut body = serde_json::json!({ "content": content });
    if let Some(ttl) = ttl {
        body["ttl_seconds"] = ttl.into();
    }
    if let Some(max_views) = max_views {
        body["max_views"] = max_views.into();
    }
    body
}

fn format_new_output(response: &Value, json: bool) -> Result<String, String> {
    if json {
        return serde_json::to_string_pretty(response)
            .map_err(|err| format!("response encoding error: {}", err));
    }

    response
        .get("url")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| "response missing 'url' field".to_string())
}

fn format_get_output(paste: &Value, json: bool) -> Result<String, String> {
    if json {
        return serde_json::to_string_pretty(paste)
            .map_err(|err| format!("response encoding error: {}", err));
    }

    paste
        .get("content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| "response missing 'content' field".to_string())
}

fn api_url(server: &str, segments: &[&str]) -> Result<reqwest::Url, String> {
    let mut url = reqwest::Url::parse(server)
        .map_err(|err| format!("Invalid server URL '{}': {}", server, err))?;
    let mut path = url
        .path_segments_mut()
        .map_err(|_| "Server URL cannot be used as an API base".to_string())?;
    path.pop_if_empty();
    for segment in segments {
        path.push(segment);
    }
    drop(path);
    Ok(url)
}

fn api_url_or_exit(server: &str, action: &str, segments: &[&str]) -> reqwest::Url {
    match api_url(server, segments) {
        Ok(url) => url,
        Err(message) => {
            eprintln!("{} failed: {}", action, message);
            std::process::exit(1);
        }
    }
}

fn resolve_server(server: Option<String>) -> String {
    let server = server
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_CLI_SERVER_URL.to_string());
    server.trim_end_matches('/').to_string()
}

fn print_or_exit(output: Result<String, String>, action: &str) {
    match output {
        Ok(output) => println!("{}", output),
        Err(message) => {
            eprintln!("{} failed: {}", action, message);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        server,
        json,
        timeout,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout))
        .build()?;
    let server = resolve_server(server);

    match command {
        Commands::Completions { .. } => unreachable!("completions handled before client setup"),
        Commands::New {
            file,
            ttl,
            max_views,
        } => {
            let endpoint = api_url_or_exit(&server, "New", &["api", "pastes"]);
            let content = if let Some(path) = file {
                std::fs::read_to_string(path)?
            } else {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                buffer
            };

            let body = create_body(content, ttl, max_views);
            let res = client.post(endpoint).json(&body).send().await?;
            let res = ensure_success_or_exit(res, "New").await;
            let response: Value = res.json().await?;
            print_or_exit(format_new_output(&response, json), "New");
        }
        Commands::Get { id } => {
            let endpoint = api_url_or_exit(&server, "Get", &["api", "pastes", id.as_str()]);
            let res = client.get(endpoint).send().await?;
            let res = ensure_success_or_exit(res, "Get").await;
            let paste: Value = res.json().await?;
            print_or_exit(format_get_output(&paste, json), "Get");
        }
        Commands::Health => {
            let endpoint = api_url_or_exit(&server, "Health", &["api", "healthz"]);
            let res = client.get(endpoint).send().await?;
            let res = ensure_success_or_exit(res, "Health").await;
            let response: Value = res.json().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("ok");
            }
        }
    }

    Ok(())
}
