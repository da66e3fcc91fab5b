use mock_server::{AppState, Parcel};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    // A couple of seeded parcels so GetParcels has something to answer with.
    let state = AppState::with_parcels(vec![
        Parcel {
            parcel_barcode: "21750100012392".to_string(),
            partner_point_code: "soPS2".to_string(),
            planned_date: "2024-01-02".to_string(),
        },
        Parcel {
            parcel_barcode: "21750100012393".to_string(),
            partner_point_code: "soPS3".to_string(),
            planned_date: "2024-01-03".to_string(),
        },
    ]);
    mock_server::run(listener, state).await
}
