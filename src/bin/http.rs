#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use crew_schedule::http_api::{self, AppState};
    use crew_schedule::{CsvTotalsSource, TotalsLayout};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr: SocketAddr = std::env::var("CREW_SCHEDULE_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let state = match std::env::var("CREW_SCHEDULE_TOTALS_CSV") {
        Ok(path) => {
            tracing::info!(%path, "using stay totals source");
            AppState::with_totals_source(Arc::new(CsvTotalsSource::new(
                path,
                TotalsLayout::default(),
            )))
        }
        Err(_) => AppState::new(),
    };

    tracing::info!("crew-schedule HTTP API listening on http://{addr}");
    http_api::serve(addr, state).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
