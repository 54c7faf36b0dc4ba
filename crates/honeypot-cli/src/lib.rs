use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use honeypot_protocol::{
    ConversationTranscript, EngagementRequest, EngagementResponse, EngagementStatus,
    ExtractedIntelligence, ServiceStatus,
};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "honeypot-cli",
    version,
    about = "Honeypot command line client",
    long_about = "Honeypot command line client for feeding scammer messages to the gateway and inspecting conversations"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "HONEYPOT_SERVER",
        default_value = "http://127.0.0.1:8080",
        help = "Gateway base HTTP URL"
    )]
    pub server: String,
    #[arg(
        long,
        global = true,
        env = "API_KEY",
        hide_env_values = true,
        help = "Shared secret sent in the x-api-key header"
    )]
    pub api_key: Option<String>,
    #[arg(long, global = true, help = "Print raw JSON instead of a summary")]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Send a scammer message to a conversation")]
    Send {
        #[arg(help = "Conversation ID")]
        conversation_id: String,
        #[arg(help = "Message body")]
        message: String,
    },
    #[command(about = "Show the recorded history of a conversation")]
    History {
        #[arg(help = "Conversation ID")]
        conversation_id: String,
    },
    #[command(about = "Check that the gateway is live")]
    Status,
    #[command(about = "Classify and extract from text locally, without a gateway")]
    Analyze {
        #[arg(required = true, help = "Text to analyze; multiple arguments are joined by spaces")]
        text: Vec<String>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("http transport error: {0}")]
    HttpTransport(String),
    #[error("http status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("json decode error: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct CliClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

/// Local analysis of a single piece of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub scam_type: honeypot_protocol::ScamCategory,
    pub persona: honeypot_protocol::Persona,
    pub matched_keywords: Vec<String>,
    pub extracted_intelligence: ExtractedIntelligence,
    pub reply_to_scammer: String,
}

impl CliClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, CliError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|err| CliError::HttpTransport(err.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            api_key,
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// URL of a conversation's history, with the id escaped as one path segment.
    fn conversation_url(&self, conversation_id: &str) -> Result<Url, CliError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| CliError::InvalidArgument(format!("invalid server url: {err}")))?;
        url.path_segments_mut()
            .map_err(|()| {
                CliError::InvalidArgument(format!("server url cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["honeypot", "conversations"])
            .push(conversation_id);
        Ok(url)
    }

    fn api_key(&self) -> Result<&str, CliError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                CliError::InvalidArgument("api key is required (--api-key or API_KEY)".to_string())
            })
    }

    pub async fn send_message(
        &self,
        conversation_id: String,
        message: String,
    ) -> Result<EngagementResponse, CliError> {
        let payload = EngagementRequest::new(conversation_id, message);
        payload
            .validate()
            .map_err(|err| CliError::InvalidArgument(err.to_string()))?;

        let request = self
            .http
            .post(self.endpoint("/honeypot"))
            .header(API_KEY_HEADER, self.api_key()?)
            .json(&payload);
        Self::send_json(request).await
    }

    pub async fn history(&self, conversation_id: &str) -> Result<ConversationTranscript, CliError> {
        if conversation_id.is_empty() {
            return Err(CliError::InvalidArgument(
                "conversation id cannot be empty".to_string(),
            ));
        }

        let request = self
            .http
            .get(self.conversation_url(conversation_id)?)
            .header(API_KEY_HEADER, self.api_key()?);
        Self::send_json(request).await
    }

    pub async fn status(&self) -> Result<ServiceStatus, CliError> {
        Self::send_json(self.http.get(self.endpoint("/honeypot"))).await
    }

    async fn send_json<TRes>(request: reqwest::RequestBuilder) -> Result<TRes, CliError>
    where
        TRes: for<'de> Deserialize<'de>,
    {
        let response = request
            .send()
            .await
            .map_err(|err| CliError::HttpTransport(err.to_string()))?;

        if response.status() != StatusCode::OK {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read body>".to_string());
            return Err(CliError::HttpStatus { status, body });
        }

        response
            .json::<TRes>()
            .await
            .map_err(|err| CliError::Decode(err.to_string()))
    }
}

/// Classify and extract from `text` with no conversation state.
pub fn analyze(text: &str) -> Analysis {
    let classifier = honeypot_core::ScamClassifier::default();
    let scam_type = classifier.classify(text);
    let persona = honeypot_core::reply_for(scam_type);
    Analysis {
        scam_type,
        persona: persona.persona,
        matched_keywords: classifier
            .matched_keywords(text)
            .into_iter()
            .map(str::to_string)
            .collect(),
        extracted_intelligence: honeypot_core::extract(text),
        reply_to_scammer: persona.reply.to_string(),
    }
}

fn format_intelligence(intel: &ExtractedIntelligence) -> String {
    let mut output = String::new();
    let sections = [
        ("bank accounts", &intel.bank_accounts),
        ("upi ids", &intel.upi_ids),
        ("phishing links", &intel.phishing_links),
    ];
    for (label, values) in sections {
        if values.is_empty() {
            continue;
        }
        output.push_str(&format!("  {label}:\n"));
        for value in values {
            output.push_str(&format!("    - {value}\n"));
        }
    }
    if output.is_empty() {
        output.push_str("  (no artifacts)\n");
    }
    output
}

fn format_response(response: &EngagementResponse) -> String {
    let status = match response.engagement.status {
        EngagementStatus::Active => response.engagement.status.as_str().red().bold(),
        EngagementStatus::Monitoring => response.engagement.status.as_str().green(),
    };
    let mut output = format!(
        "conversation {} | turn {} | {} | {}\n",
        response.conversation_id,
        response.engagement.turns,
        response.scam_type.as_str().yellow(),
        status,
    );
    output.push_str(&format!("persona: {}\n", response.persona));
    output.push_str(&format!("reply: {}\n", response.reply_to_scammer));
    output.push_str("intelligence:\n");
    output.push_str(&format_intelligence(&response.extracted_intelligence));
    output
}

fn format_analysis(analysis: &Analysis) -> String {
    let mut output = format!(
        "scam type: {}\n",
        analysis.scam_type.as_str().yellow()
    );
    if !analysis.matched_keywords.is_empty() {
        output.push_str(&format!(
            "matched keywords: {}\n",
            analysis.matched_keywords.join(", ")
        ));
    }
    output.push_str(&format!("persona: {}\n", analysis.persona));
    output.push_str(&format!("reply: {}\n", analysis.reply_to_scammer));
    output.push_str("intelligence:\n");
    output.push_str(&format_intelligence(&analysis.extracted_intelligence));
    output
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|err| CliError::Decode(err.to_string()))
}

pub async fn run(cli: Cli) -> Result<String, CliError> {
    match cli.command {
        Commands::Send {
            conversation_id,
            message,
        } => {
            let client = CliClient::new(cli.server, cli.api_key)?;
            let response = client.send_message(conversation_id, message).await?;
            if cli.json {
                to_json(&response)
            } else {
                Ok(format_response(&response))
            }
        }
        Commands::History { conversation_id } => {
            let client = CliClient::new(cli.server, cli.api_key)?;
            let transcript = client.history(&conversation_id).await?;
            if cli.json {
                return to_json(&transcript);
            }
            let mut output = format!(
                "conversation {} ({} turns)\n",
                transcript.conversation_id, transcript.turns
            );
            for (i, message) in transcript.messages.iter().enumerate() {
                output.push_str(&format!("{:>4}. {}\n", i + 1, message));
            }
            Ok(output)
        }
        Commands::Status => {
            let client = CliClient::new(cli.server, cli.api_key)?;
            let status = client.status().await?;
            if cli.json {
                to_json(&status)
            } else {
                Ok(status.status)
            }
        }
        Commands::Analyze { text } => {
            let analysis = analyze(&text.join(" "));
            if cli.json {
                to_json(&analysis)
            } else {
                Ok(format_analysis(&analysis))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{analyze, run, Cli, CliClient, CliError, Commands};
    use clap::Parser;
    use honeypot_protocol::ScamCategory;
    use httpmock::{
        Method::{GET, POST},
        MockServer,
    };
    use serde_json::json;

    fn network_tests_enabled() -> bool {
        matches!(std::env::var("HONEYPOT_RUN_NETWORK_TESTS"), Ok(value) if value == "1")
    }

    #[test]
    fn cli_parses_send_command() {
        let cli = Cli::parse_from([
            "honeypot-cli",
            "--api-key",
            "k1",
            "send",
            "conv-1",
            "share your otp",
        ]);
        assert_eq!(cli.api_key.as_deref(), Some("k1"));
        match cli.command {
            Commands::Send {
                conversation_id,
                message,
            } => {
                assert_eq!(conversation_id, "conv-1");
                assert_eq!(message, "share your otp");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parses_analyze_with_multiple_words() {
        let cli = Cli::parse_from(["honeypot-cli", "analyze", "bitcoin", "investment", "--json"]);
        assert!(cli.json);
        match cli.command {
            Commands::Analyze { text } => assert_eq!(text, vec!["bitcoin", "investment"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn analyze_runs_without_a_gateway() {
        let analysis = analyze("check https://phish.example/login for crypto, pay 123456789012");
        assert_eq!(analysis.scam_type, ScamCategory::CryptoScam);
        assert_eq!(analysis.matched_keywords, vec!["crypto"]);
        assert!(analysis
            .extracted_intelligence
            .phishing_links
            .contains("https://phish.example/login"));
        assert!(analysis
            .extracted_intelligence
            .bank_accounts
            .contains("123456789012"));
    }

    #[tokio::test]
    async fn analyze_command_prints_summary() {
        let cli = Cli::parse_from(["honeypot-cli", "analyze", "send", "your", "bank", "otp"]);
        let output = run(cli).await.unwrap();
        assert!(output.contains("BANK_FRAUD"));
        assert!(output.contains("confused_salaried_user"));
        assert!(output.contains("matched keywords: bank, otp"));
    }

    #[tokio::test]
    async fn send_requires_api_key() {
        let client = CliClient::new("http://127.0.0.1:8080", None).unwrap();
        let error = client
            .send_message("c1".to_string(), "hi".to_string())
            .await
            .unwrap_err();
        assert!(matches!(error, CliError::InvalidArgument(message) if message.contains("api key")));
    }

    #[tokio::test]
    async fn send_rejects_empty_message() {
        let client = CliClient::new("http://127.0.0.1:8080", Some("k1".to_string())).unwrap();
        let error = client
            .send_message("c1".to_string(), String::new())
            .await
            .unwrap_err();
        match error {
            CliError::InvalidArgument(message) => {
                assert!(message.contains("message cannot be empty"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn history_rejects_empty_id() {
        let client = CliClient::new("http://127.0.0.1:8080", Some("k1".to_string())).unwrap();
        let error = client.history("").await.unwrap_err();
        assert!(matches!(error, CliError::InvalidArgument(_)));
    }

    #[test]
    fn history_url_escapes_reserved_characters_in_id() {
        let client = CliClient::new("http://127.0.0.1:8080", None).unwrap();
        let url = client.conversation_url("team/alpha?x#1%").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/honeypot/conversations/team%2Falpha%3Fx%231%25"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn history_url_keeps_server_path_prefix() {
        let client = CliClient::new("http://gw.test/api/", None).unwrap();
        let url = client.conversation_url("c1").unwrap();
        assert_eq!(url.as_str(), "http://gw.test/api/honeypot/conversations/c1");
    }

    #[tokio::test]
    async fn history_rejects_unparseable_server() {
        let client = CliClient::new("not a url", Some("k1".to_string())).unwrap();
        let error = client.history("c1").await.unwrap_err();
        assert!(matches!(error, CliError::InvalidArgument(message) if message.contains("server url")));
    }

    #[tokio::test]
    async fn send_posts_with_api_key_header() {
        if !network_tests_enabled() {
            eprintln!("skipping network test: set HONEYPOT_RUN_NETWORK_TESTS=1 to enable");
            return;
        }

        let server = MockServer::start_async().await;
        let engage_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/honeypot")
                    .header("x-api-key", "k1")
                    .json_body(json!({"conversation_id": "c1", "message": "share otp"}));
                then.status(200).json_body(json!({
                    "conversation_id": "c1",
                    "scam_detected": true,
                    "scam_type": "BANK_FRAUD",
                    "persona": "confused_salaried_user",
                    "engagement": {"turns": 1, "status": "active"},
                    "extracted_intelligence": {
                        "bank_accounts": [],
                        "upi_ids": [],
                        "phishing_links": []
                    },
                    "reply_to_scammer": "Okay"
                }));
            })
            .await;

        let client = CliClient::new(server.base_url(), Some("k1".to_string())).unwrap();
        let response = client
            .send_message("c1".to_string(), "share otp".to_string())
            .await
            .unwrap();

        engage_mock.assert_async().await;
        assert_eq!(response.scam_type, ScamCategory::BankFraud);
        assert_eq!(response.engagement.turns, 1);
    }

    #[tokio::test]
    async fn unauthorized_surfaces_http_status_error() {
        if !network_tests_enabled() {
            eprintln!("skipping network test: set HONEYPOT_RUN_NETWORK_TESTS=1 to enable");
            return;
        }

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/honeypot/conversations/c1");
                then.status(401).json_body(json!({"detail": "Invalid API Key"}));
            })
            .await;

        let client = CliClient::new(server.base_url(), Some("bad".to_string())).unwrap();
        let error = client.history("c1").await.unwrap_err();

        match error {
            CliError::HttpStatus { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid API Key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
