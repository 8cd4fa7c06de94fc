//! Servidor HTTP do NER: carrega o classificador e expõe `POST /api/ner`.
//!
//! ```text
//! ner-server -port 8000 -classifier classifiers/ner-model.json
//! curl -X POST localhost:8000/api/ner -d '{"message": "Barack Obama visited Paris."}'
//! ```

mod api;
mod config;

use std::sync::Arc;

use anyhow::Context;
use ner_classifier::GazetteerModel;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{AppState, NER_ROUTE};
use crate::config::ServerConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ner_server=info,ner_classifier=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ServerConfig::from_args(std::env::args().skip(1))?;

    // O modelo precisa estar carregado antes do bind
    info!("Carregando classificador: {}", config.classifier_path.display());
    let model = GazetteerModel::load(&config.classifier_path)
        .with_context(|| format!("could not load classifier {}", config.classifier_path.display()))?;
    info!(
        name = model.name(),
        labels = ?model.labels(),
        phrases = model.phrase_count(),
        "Classificador carregado"
    );

    let state = AppState::new(Arc::new(model));
    let app = api::router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;
    info!("🚀 Servidor NER iniciado na porta {}", config.port);
    info!(
        "Envie POST para http://localhost:{}{} com corpo JSON: {{\"message\": \"seu texto\"}}",
        config.port, NER_ROUTE
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Servidor encerrado");
    Ok(())
}

/// Resolve no Ctrl-C ou, em Unix, no SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("falha ao instalar handler de Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("falha ao instalar handler de SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Sinal de encerramento recebido");
}
