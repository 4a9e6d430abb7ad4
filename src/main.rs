use manga_catalog::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("manga-catalog".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    manga_catalog::run().await
}
