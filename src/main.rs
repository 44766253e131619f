use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use student_management::infrastructure::AppServices;
use student_management::{config, console, db, seed};

#[tokio::main]
async fn main() {
    // Initialize tracing (stderr keeps the menu on stdout readable)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "student_management=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize database
    let db = match db::connect(&config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    // Check for seed flag
    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        match seed::seed_demo_data(&db).await {
            Ok(count) => tracing::info!("Demo data seeded ({} new courses).", count),
            Err(e) => tracing::error!("Failed to seed data: {}", e),
        }
    }

    // Wire repositories into services
    let services = AppServices::new(db);

    let stdin = BufReader::new(tokio::io::stdin());
    if let Err(e) = console::run(&services, stdin, tokio::io::stdout()).await {
        tracing::error!("Console I/O failed: {}", e);
        std::process::exit(1);
    }
}
