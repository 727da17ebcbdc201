//! End-to-end website generation: prompt, model call, parse, then the
//! validate/sanitize/optimize delivery pass.

use std::time::Instant;

use chrono::Utc;
use db::models::{business::BusinessData, generated_code::GeneratedCode};
use thiserror::Error;
use tracing::{info, warn};

use super::{
    claude_api::{ClaudeApiClient, ClaudeApiError, FailureKind, Message},
    code_validator::{ValidationResult, validate_generated_code},
    optimizer::optimize_code,
    prompt_builder::{GenerationOptions, build_prompt},
    response_parser::{ResponseParseError, parse_generated_code},
    sanitizer::sanitize_html,
};

pub const MAX_TOKENS: u32 = 4000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Claude(#[from] ClaudeApiError),
    #[error(transparent)]
    Parse(#[from] ResponseParseError),
}

impl GenerationError {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Claude(e) => e.kind(),
            Self::Parse(_) => FailureKind::Other,
        }
    }
}

#[derive(Clone)]
pub struct WebsiteGenerator {
    claude: ClaudeApiClient,
}

impl WebsiteGenerator {
    pub fn new(claude: ClaudeApiClient) -> Self {
        Self { claude }
    }

    /// Ask Claude for a site and parse the reply. Timing covers the model
    /// call only; token usage is the prompt's input token count.
    pub async fn generate(
        &self,
        business: &BusinessData,
        options: &GenerationOptions,
    ) -> Result<GeneratedCode, GenerationError> {
        let prompt = build_prompt(business, options);
        let temperature = options.temperature.unwrap_or(DEFAULT_TEMPERATURE);

        let started = Instant::now();
        let response = self
            .claude
            .complete(vec![Message::user(prompt)], None, MAX_TOKENS, Some(temperature))
            .await?;
        let elapsed = started.elapsed();

        let text = response.text().ok_or(ClaudeApiError::NoTextContent)?;
        let mut code = parse_generated_code(text)?;

        let metadata = &mut code.metadata;
        metadata.generated_at = Utc::now();
        metadata.generation_time = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        metadata.tokens_used = response.usage.input_tokens;
        if metadata.category.is_empty() {
            metadata.category = business.category.clone();
        }
        if metadata.sections.is_empty() {
            metadata.sections = business.sections.clone();
        }

        info!(
            model = %self.claude.model(),
            category = %metadata.category,
            generation_time_ms = metadata.generation_time,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Generated website"
        );

        Ok(code)
    }
}

/// Validate, then sanitize the HTML and minify all three parts.
///
/// Code with validation errors is rejected and returned untouched inside the
/// `Err`; warnings travel with the delivered code.
pub fn prepare_for_delivery(
    code: GeneratedCode,
) -> Result<(GeneratedCode, ValidationResult), ValidationResult> {
    let validation = validate_generated_code(&code.html, &code.css, &code.javascript);
    if !validation.valid {
        warn!(
            errors = ?validation.errors,
            warnings = validation.warnings.len(),
            "Generated code failed validation"
        );
        return Err(validation);
    }

    let sanitized = sanitize_html(&code.html);
    let optimized = optimize_code(&sanitized, &code.css, &code.javascript);

    Ok((
        GeneratedCode {
            html: optimized.html,
            css: optimized.css,
            javascript: optimized.javascript,
            metadata: code.metadata,
        },
        validation,
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use axum::{Json, Router, http::StatusCode, routing::post};
    use db::models::business::{BusinessHours, DayHours};
    use secrecy::SecretString;
    use serde_json::{Value, json};

    use super::*;

    const PAGE: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n  <head><title>Shear Joy</title></head>\n  <body class=\"bg-pink-50 md:p-8\">\n    <h1 class=\"text-3xl\">Shear Joy</h1>\n    <script>alert(1)</script>\n  </body>\n</html>";

    fn salon() -> BusinessData {
        BusinessData {
            name: "Shear Joy".into(),
            category: "salon".into(),
            description: "Cuts, colour and blow-dries".into(),
            phone: "+15550001111".into(),
            email: "hello@shearjoy.test".into(),
            address: "4 Elm Road, Riverton".into(),
            website: None,
            hours: BusinessHours::uniform(DayHours::open("09:00", "17:00")),
            images: vec![],
            sections: vec!["hero".into(), "services".into()],
        }
    }

    /// Mock Messages API that records every request body it receives.
    async fn spawn_api(status: StatusCode, reply: Value) -> (String, Arc<std::sync::Mutex<Vec<Value>>>) {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let app = Router::new().route(
            "/v1/messages",
            post(move |Json(body): Json<Value>| {
                let reply = reply.clone();
                let recorder = recorder.clone();
                async move {
                    recorder.lock().unwrap().push(body);
                    (status, Json(reply))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), seen)
    }

    fn generator(base_url: &str) -> WebsiteGenerator {
        let client = ClaudeApiClient::new(SecretString::from("test-key".to_string()), None)
            .unwrap()
            .with_base_url(base_url);
        WebsiteGenerator::new(client)
    }

    fn message(text: &str) -> Value {
        json!({
            "id": "msg_1",
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "content": [{ "type": "text", "text": text }],
            "usage": { "input_tokens": 321, "output_tokens": 654 }
        })
    }

    #[tokio::test]
    async fn generate_fills_metadata_and_sends_one_request() {
        let payload = json!({ "html": PAGE, "css": "", "javascript": "" }).to_string();
        let (base, seen) = spawn_api(StatusCode::OK, message(&format!("Here you go:\n{payload}"))).await;

        let code = generator(&base)
            .generate(&salon(), &GenerationOptions::default())
            .await
            .unwrap();

        assert_eq!(code.html, PAGE);
        assert_eq!(code.metadata.tokens_used, 321);
        assert_eq!(code.metadata.category, "salon");
        assert_eq!(code.metadata.sections, ["hero", "services"]);

        let requests = seen.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["max_tokens"], MAX_TOKENS);
        let temperature = requests[0]["temperature"].as_f64().unwrap();
        assert!((temperature - f64::from(DEFAULT_TEMPERATURE)).abs() < 1e-6);
        assert!(
            requests[0]["messages"][0]["content"]
                .as_str()
                .unwrap()
                .contains("Shear Joy")
        );
    }

    #[tokio::test]
    async fn model_metadata_wins_over_request() {
        let payload = json!({
            "html": PAGE,
            "metadata": { "category": "beauty", "sections": ["hero"] }
        })
        .to_string();
        let (base, _) = spawn_api(StatusCode::OK, message(&payload)).await;

        let code = generator(&base)
            .generate(&salon(), &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(code.metadata.category, "beauty");
        assert_eq!(code.metadata.sections, ["hero"]);
    }

    #[tokio::test]
    async fn failures_are_not_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let app = Router::new().route(
            "/v1/messages",
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::TOO_MANY_REQUESTS, Json(json!({ "error": "rate_limit_error" })))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let err = generator(&format!("http://{addr}"))
            .generate(&salon(), &GenerationOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.failure_kind(), FailureKind::RateLimited);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn prose_reply_is_a_parse_failure() {
        let (base, _) = spawn_api(StatusCode::OK, message("I cannot build that site.")).await;
        let err = generator(&base)
            .generate(&salon(), &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Parse(ResponseParseError::NoJson)));
        assert_eq!(err.failure_kind(), FailureKind::Other);
    }

    #[test]
    fn delivery_strips_scripts_and_minifies() {
        let code = GeneratedCode {
            html: PAGE.to_string(),
            css: ".hero {  color: red; }\n".to_string(),
            javascript: "console.log( 'hi' );\n".to_string(),
            ..Default::default()
        };

        let (delivered, validation) = prepare_for_delivery(code).unwrap();
        assert!(validation.valid);
        assert!(!delivered.html.contains("<script>"));
        assert!(!delivered.html.contains("alert(1)"));
        assert!(!delivered.html.contains('\n'));
        assert!(delivered.html.starts_with("<!DOCTYPE html><html lang=\"en\">"));
        assert_eq!(delivered.css, ".hero { color: red;}");
        assert_eq!(delivered.javascript, "console.log( 'hi' );");
    }

    #[test]
    fn delivery_rejects_invalid_code_untouched() {
        let code = GeneratedCode {
            html: "<div>not a page</div>".to_string(),
            ..Default::default()
        };
        let validation = prepare_for_delivery(code).unwrap_err();
        assert!(!validation.valid);
        assert!(validation.errors.contains(&"HTML must include DOCTYPE declaration".to_string()));
    }
}
