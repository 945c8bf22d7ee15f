mod config;
mod errors;
mod handlers;
mod models;
mod padron;
mod padron_client;
mod validation;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::padron_client::PadronClient;

/// Serves the embedded consulta page.
///
/// The page is a single self-contained HTML document: a CUIT form that
/// calls `/api/v1/padron/:cuit` and renders the returned panels. No
/// assets are read from disk.
///
/// # Returns
///
/// * `impl IntoResponse` - The HTTP response containing the consulta page HTML.
async fn serve_consulta_page() -> impl IntoResponse {
    let html = r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Consulta de Padrón AFIP</title>
    <style>
        body { margin: 0; font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; background: #f5f6fa; color: #2c3e50; }
        .container { max-width: 960px; margin: 0 auto; padding: 2rem 1rem; }
        h1 { font-size: 1.6rem; margin-bottom: 0.25rem; }
        .subtitle { color: #7f8c8d; margin-top: 0; }
        form { display: flex; gap: 0.5rem; margin: 1.5rem 0; }
        input { flex: 1; padding: 0.6rem 0.8rem; font-size: 1rem; border: 1px solid #ccd1d9; border-radius: 6px; }
        button { padding: 0.6rem 1.4rem; font-size: 1rem; border: none; border-radius: 6px; background: #2980b9; color: white; cursor: pointer; }
        button:hover { background: #1f6694; }
        .banner { padding: 0.8rem 1rem; border-radius: 6px; margin-bottom: 1.5rem; }
        .banner.ok { background: #e8f8f0; color: #1e8449; }
        .banner.warn { background: #fef9e7; color: #9a7d0a; }
        .banner.error { background: #fdedec; color: #c0392b; }
        .banner.info { background: #eaf2f8; color: #21618c; }
        .panels { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
        .panel { background: white; border-radius: 8px; padding: 1rem 1.25rem; box-shadow: 0 1px 3px rgba(0,0,0,0.08); }
        .panel.wide { grid-column: 1 / -1; }
        .panel h2 { font-size: 1.05rem; margin: 0 0 0.75rem; }
        .field { padding: 0.35rem 0; border-bottom: 1px solid #f0f2f5; font-size: 0.95rem; }
        .field-label { font-weight: 600; }
        .field.empty { color: #95a5a6; border-bottom: none; }
        .info-box { background: #eaf2f8; border-left: 4px solid #2980b9; padding: 0.7rem 0.9rem; border-radius: 4px; margin: 0.5rem 0; }
        @media (max-width: 700px) { .panels { grid-template-columns: 1fr; } }
    </style>
</head>
<body>
    <div class="container">
        <h1>🔍 Consulta de Padrón AFIP</h1>
        <p class="subtitle">Ingresá un CUIT para consultar los datos registrados en AFIP.</p>
        <form id="consulta-form">
            <input type="text" id="cuit" placeholder="Ej: 20-12345678-9 o 20123456789" autocomplete="off">
            <button type="submit">Consultar</button>
        </form>
        <div id="banner"></div>
        <div id="results" class="panels" hidden>
            <section class="panel" id="panel-general">
                <h2>📋 Información General</h2>
                <div class="fields"></div>
            </section>
            <section class="panel" id="panel-activity">
                <h2>🏢 Información de Actividad</h2>
                <div class="fields"></div>
            </section>
            <section class="panel wide" id="panel-address">
                <h2>📍 Información de Domicilio</h2>
                <div class="fields"></div>
            </section>
        </div>
    </div>
    <script>
        const form = document.getElementById('consulta-form');
        const banner = document.getElementById('banner');
        const results = document.getElementById('results');

        function showBanner(kind, text) {
            banner.innerHTML = '<div class="banner ' + kind + '">' + text + '</div>';
        }

        function esc(value) {
            const div = document.createElement('div');
            div.textContent = String(value);
            return div.innerHTML;
        }

        function displayValue(value) {
            return typeof value === 'object' ? JSON.stringify(value) : value;
        }

        function renderPanel(id, fields, highlightLabel) {
            const target = document.getElementById(id).querySelector('.fields');
            let html = '';
            for (const field of fields) {
                const value = esc(displayValue(field.value));
                if (highlightLabel && field.label === highlightLabel) {
                    html += '<div class="info-box"><strong>' + esc(field.label) + ':</strong> ' + value + '</div>';
                } else {
                    html += '<div class="field"><span class="field-label">' + esc(field.label) + ':</span> ' + value + '</div>';
                }
            }
            target.innerHTML = html || '<div class="field empty">Sin datos</div>';
        }

        form.addEventListener('submit', async (event) => {
            event.preventDefault();
            const cuit = document.getElementById('cuit').value.trim();
            results.hidden = true;
            if (!cuit) {
                showBanner('warn', '⚠️ Por favor ingresá un CUIT.');
                return;
            }
            showBanner('info', '⏳ Consultando AFIP...');
            try {
                const response = await fetch('/api/v1/padron/' + encodeURIComponent(cuit));
                const payload = await response.json();
                if (!response.ok) {
                    showBanner('error', '❌ ' + esc(payload.error || 'Error inesperado.'));
                    return;
                }
                if (payload.unmapped) {
                    showBanner('warn', '⚠️ Formato de datos no reconocido; se muestran los campos originales.');
                } else {
                    showBanner('ok', '✅ Datos encontrados para el CUIT: ' + esc(payload.cuit));
                }
                renderPanel('panel-general', payload.panels.general, null);
                renderPanel('panel-activity', payload.panels.activity, 'Actividad Principal');
                renderPanel('panel-address', payload.panels.address, null);
                document.getElementById('panel-address').hidden = payload.panels.address.length === 0;
                results.hidden = false;
            } catch (err) {
                showBanner('error', '❌ Error técnico: ' + esc(err.message));
            }
        });
    </script>
</body>
</html>
"#;
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
}

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - The AFIP padrón client (fatal if it cannot be built).
/// - HTTP routes and middleware (CORS, Rate Limiting).
///
/// It then starts the Axum server.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the server runs successfully, or an error if initialization fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "padron_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the padrón client once; every lookup reuses it. Without a
    // working client the service cannot answer anything, so failure here
    // ends the process.
    let padron_client = match PadronClient::new(&config) {
        Ok(client) => {
            tracing::info!(
                "✓ AFIP padrón client initialized: {} ({})",
                config.sdk_base_url,
                config.environment()
            );
            client
        }
        Err(e) => {
            tracing::error!("Failed to initialize AFIP padrón client: {}", e);
            anyhow::bail!("AFIP padrón client initialization failed: {}", e);
        }
    };

    // Build application state
    let app_state = Arc::new(handlers::AppState {
        config: config.clone(),
        padron_client,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Build protected routes with security layers
    let protected_routes = Router::new()
        // Consulta page
        .route("/", get(serve_consulta_page))
        // API endpoints
        .route("/api/v1/padron/:cuit", get(handlers::consultar_padron))
        .layer(
            ServiceBuilder::new()
                // Request size limit: 64KB max payload
                .layer(RequestBodyLimitLayer::new(64 * 1024))
                // Rate limiting: 10 req/sec per IP, burst of 20
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Build final app with health check (bypasses rate limiting for platform monitors)
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
