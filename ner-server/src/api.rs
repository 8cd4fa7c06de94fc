//! Rota `/api/ner`: validação da requisição, despacho para o classificador e
//! mapeamento de erros para status HTTP.

use std::fmt;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use ner_classifier::{format, OutputFormat, SequenceClassifier, DEFAULT_FORMAT};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

pub const NER_ROUTE: &str = "/api/ner";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Estado compartilhado: o classificador carregado na inicialização
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn SequenceClassifier>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn SequenceClassifier>) -> Self {
        Self { classifier }
    }
}

/// Falhas de uma requisição. O `Display` é o corpo enviado ao cliente.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method Not Allowed. Use POST.")]
    MethodNotAllowed,

    #[error("Invalid JSON format")]
    InvalidJson,

    #[error("Missing 'message' field in request")]
    MissingMessage,

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidJson | ApiError::MissingMessage => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Internal(cause) => error!(%cause, "falha ao processar requisição NER"),
            other => debug!(status = status.as_u16(), "requisição rejeitada: {other}"),
        }
        json_response(status, self.to_string())
    }
}

/// Requisição validada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NerRequest {
    pub message: String,
    pub format: String,
}

impl NerRequest {
    /// Decodifica e valida o corpo.
    ///
    /// O corpo precisa ser um objeto JSON, sem chaves duplicadas, com
    /// `message` string. `format` é opcional e não é validado aqui; valores
    /// ausentes ou não-string viram `inlineXML`.
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        let text = String::from_utf8_lossy(body);
        let StrictValue(value) = serde_json::from_str(&text).map_err(|_| ApiError::InvalidJson)?;
        let Value::Object(object) = value else {
            return Err(ApiError::InvalidJson);
        };

        let message = object
            .get("message")
            .and_then(Value::as_str)
            .ok_or(ApiError::MissingMessage)?
            .to_owned();
        let format = object
            .get("format")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_FORMAT)
            .to_owned();

        Ok(Self { message, format })
    }
}

/// `serde_json::Value` que rejeita chaves duplicadas em qualquer nível do objeto
struct StrictValue(Value);

impl<'de> Deserialize<'de> for StrictValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StrictValueVisitor)
    }
}

struct StrictValueVisitor;

impl<'de> Visitor<'de> for StrictValueVisitor {
    type Value = StrictValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<StrictValue, E> {
        Ok(StrictValue(Value::Null))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<StrictValue, E> {
        Ok(StrictValue(Value::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<StrictValue, E> {
        Ok(StrictValue(Value::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<StrictValue, E> {
        Ok(StrictValue(Value::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<StrictValue, E> {
        Ok(StrictValue(Value::from(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<StrictValue, E> {
        Ok(StrictValue(Value::String(v.to_owned())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<StrictValue, E> {
        Ok(StrictValue(Value::String(v)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<StrictValue, A::Error> {
        let mut items = Vec::new();
        while let Some(StrictValue(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(StrictValue(Value::Array(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<StrictValue, A::Error> {
        let mut object = Map::new();
        while let Some(key) = map.next_key::<String>()? {
            if object.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate key {key:?}")));
            }
            let StrictValue(value) = map.next_value()?;
            object.insert(key, value);
        }
        Ok(StrictValue(Value::Object(object)))
    }
}

#[derive(Debug, Serialize)]
struct NerResponse {
    result: String,
}

/// Router com a rota NER. Todas as respostas levam
/// `Access-Control-Allow-Origin: *`. O corpo é lido inteiro, sem limite de
/// tamanho.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(NER_ROUTE, any(ner_handler))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .with_state(state)
}

/// Aceita qualquer método para que o 405 saia deste handler, com os mesmos
/// cabeçalhos das outras respostas.
async fn ner_handler(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match handle(&state, &method, body).await {
        Ok(json) => json_response(StatusCode::OK, json),
        Err(err) => err.into_response(),
    }
}

async fn handle(
    state: &AppState,
    method: &Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<String, ApiError> {
    if method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    let body = body.map_err(|rejection| ApiError::Internal(rejection.body_text()))?;
    let NerRequest {
        message,
        format: format_name,
    } = NerRequest::parse(&body)?;
    debug!(
        chars = message.chars().count(),
        requested = %format_name,
        format = %OutputFormat::from_name(&format_name),
        "classificando texto"
    );

    // O classificador é síncrono e pode ser lento: roda no pool de bloqueio
    let classifier = Arc::clone(&state.classifier);
    let result = tokio::task::spawn_blocking(move || {
        format::classify(classifier.as_ref(), &message, &format_name)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(serde_json::to_string(&NerResponse { result })?)
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

fn json_response(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        body,
    )
        .into_response()
}
