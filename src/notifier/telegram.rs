use super::{DeliveryFailure, MessageId, Notifier};

use crate::{config::TelegramConfig, Result};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const PARSE_MODE_HTML: &str = "HTML";

/// Sends messages to a single chat through the Telegram Bot API.
pub struct TelegramNotifier {
    cfg: TelegramConfig,
    client: reqwest::Client,
}

#[derive(Serialize, Debug)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
}

#[derive(Deserialize, Debug)]
struct ApiResponse {
    ok: bool,
    result: Option<SentMessage>,
    description: Option<String>,
}

#[derive(Deserialize, Debug)]
struct SentMessage {
    message_id: MessageId,
}

impl TelegramNotifier {
    pub fn new(cfg: TelegramConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(cfg.timeout).build()?;

        return Ok(Self { cfg, client });
    }

    fn send_message_url(&self, bot_token: &str) -> String {
        return format!("{}/bot{bot_token}/sendMessage", self.cfg.api_base);
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn try_notify(&self, text: &str) -> Result<Option<MessageId>, DeliveryFailure> {
        let (Some(bot_token), Some(chat_id)) = (self.cfg.bot_token.as_deref(), self.cfg.chat_id)
        else {
            return Err(DeliveryFailure::NotConfigured);
        };

        let payload = SendMessage {
            chat_id,
            text,
            parse_mode: PARSE_MODE_HTML,
        };

        // The token is part of the URL, so errors are stripped of it before logging.
        let response = self
            .client
            .post(self.send_message_url(bot_token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| DeliveryFailure::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| DeliveryFailure::Transport(e.without_url().to_string()))?;

        let parsed = serde_json::from_slice::<ApiResponse>(&body);

        if !status.is_success() {
            return Err(DeliveryFailure::Status {
                status: status.as_u16(),
                description: parsed.ok().and_then(|r| r.description),
            });
        }

        let parsed = parsed.map_err(|e| {
            DeliveryFailure::Transport(format!("unreadable Bot API response: {e}"))
        })?;

        if !parsed.ok {
            return Err(DeliveryFailure::Rejected {
                description: parsed.description,
            });
        }

        let message_id = parsed.result.map(|m| m.message_id);
        tracing::info!(chat_id, message_id, "Telegram message sent");

        return Ok(message_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{
        net::TcpListener,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    const TOKEN: &str = "TEST_TOKEN";
    const CHAT_ID: i64 = -100123;

    type Received = Arc<Mutex<Vec<Value>>>;

    /// Bot API stand-in answering every `sendMessage` with `status` and `body`.
    fn spawn_bot_api(status: StatusCode, body: &'static str, delay: Duration) -> (String, Received) {
        let received: Received = Arc::new(Mutex::new(Vec::new()));

        let recorder = received.clone();
        let router = Router::new().route(
            &format!("/bot{TOKEN}/sendMessage"),
            post(move |Json(payload): Json<Value>| {
                let recorder = recorder.clone();
                async move {
                    recorder.lock().unwrap().push(payload);
                    tokio::time::sleep(delay).await;
                    (status, body)
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = axum::Server::from_tcp(listener)
            .unwrap()
            .serve(router.into_make_service());
        tokio::spawn(server);

        return (format!("http://{addr}"), received);
    }

    fn notifier(api_base: String) -> TelegramNotifier {
        return TelegramNotifier::new(TelegramConfig {
            bot_token: Some(TOKEN.to_string()),
            chat_id: Some(CHAT_ID),
            api_base,
            timeout: Duration::from_millis(500),
        })
        .unwrap();
    }

    const OK_BODY: &str = r#"{"ok":true,"result":{"message_id":17,"chat":{"id":-100123}}}"#;

    #[tokio::test]
    async fn delivers_html_message_to_configured_chat() {
        let (api_base, received) = spawn_bot_api(StatusCode::OK, OK_BODY, Duration::ZERO);

        let message_id = notifier(api_base)
            .try_notify("🤝 <b>Ничья</b>")
            .await
            .unwrap();
        assert_eq!(message_id, Some(17));

        let received = received.lock().unwrap();
        assert_eq!(
            *received,
            vec![json!({
                "chat_id": CHAT_ID,
                "text": "🤝 <b>Ничья</b>",
                "parse_mode": "HTML",
            })]
        );
    }

    #[tokio::test]
    async fn acknowledgement_without_message_is_still_delivered() {
        let (api_base, _) = spawn_bot_api(StatusCode::OK, r#"{"ok":true}"#, Duration::ZERO);

        let notifier = notifier(api_base);
        assert_eq!(notifier.try_notify("hi").await.unwrap(), None);
        assert!(notifier.notify("hi").await);
    }

    #[tokio::test]
    async fn negative_acknowledgement_is_a_failure() {
        let (api_base, _) = spawn_bot_api(
            StatusCode::OK,
            r#"{"ok":false,"description":"Forbidden: bot was blocked by the user"}"#,
            Duration::ZERO,
        );

        let err = notifier(api_base).try_notify("hi").await.unwrap_err();

        assert!(matches!(
            err,
            DeliveryFailure::Rejected { description: Some(ref d) } if d.starts_with("Forbidden")
        ));
    }

    #[tokio::test]
    async fn non_success_status_is_a_failure() {
        let (api_base, _) = spawn_bot_api(
            StatusCode::BAD_REQUEST,
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
            Duration::ZERO,
        );

        let notifier = notifier(api_base);
        let err = notifier.try_notify("hi").await.unwrap_err();

        assert!(matches!(
            err,
            DeliveryFailure::Status { status: 400, description: Some(ref d) } if d == "Bad Request: chat not found"
        ));
        assert!(!notifier.notify("hi").await);
    }

    #[tokio::test]
    async fn unreadable_body_is_a_failure() {
        let (api_base, _) = spawn_bot_api(StatusCode::OK, "<html>gateway</html>", Duration::ZERO);

        let err = notifier(api_base).try_notify("hi").await.unwrap_err();

        assert!(matches!(err, DeliveryFailure::Transport(_)));
    }

    #[tokio::test]
    async fn slow_api_times_out() {
        let (api_base, _) = spawn_bot_api(StatusCode::OK, OK_BODY, Duration::from_secs(5));

        let err = notifier(api_base).try_notify("hi").await.unwrap_err();

        assert!(matches!(err, DeliveryFailure::Transport(_)));
    }

    #[tokio::test]
    async fn unreachable_api_is_a_failure() {
        // Bind then drop to get a port nothing listens on.
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();

        assert!(!notifier(format!("http://{addr}")).notify("hi").await);
    }

    #[tokio::test]
    async fn missing_configuration_skips_the_request() {
        let (api_base, received) = spawn_bot_api(StatusCode::OK, OK_BODY, Duration::ZERO);

        let without_token = TelegramNotifier::new(TelegramConfig {
            bot_token: None,
            chat_id: Some(CHAT_ID),
            api_base: api_base.clone(),
            timeout: Duration::from_millis(500),
        })
        .unwrap();
        let without_chat = TelegramNotifier::new(TelegramConfig {
            bot_token: Some(TOKEN.to_string()),
            chat_id: None,
            api_base,
            timeout: Duration::from_millis(500),
        })
        .unwrap();

        assert!(matches!(
            without_token.try_notify("hi").await,
            Err(DeliveryFailure::NotConfigured)
        ));
        assert!(!without_chat.notify("hi").await);
        assert!(received.lock().unwrap().is_empty());
    }
}
