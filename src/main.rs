use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use transcription_service::application::ports::{JobRepository, UploadStore};
use transcription_service::application::services::TranscriptionWorker;
use transcription_service::infrastructure::audio::TranscriptionEngineFactory;
use transcription_service::infrastructure::dispatch::ChannelTaskDispatcher;
use transcription_service::infrastructure::observability::{TracingConfig, init_tracing};
use transcription_service::infrastructure::persistence::{
    InMemoryJobRepository, PgJobRepository, create_pool, run_migrations,
};
use transcription_service::infrastructure::storage::LocalUploadStore;
use transcription_service::presentation::config::DatabaseProvider;
use transcription_service::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::new(environment, &settings.logging),
        settings.server.port,
    );

    let job_repository: Arc<dyn JobRepository> = match settings.database.provider {
        DatabaseProvider::Postgres => {
            let pool = create_pool(
                &settings.database.url,
                &settings.database.name,
                settings.database.max_connections,
            )
            .await
            .context("Failed to connect to the job store")?;
            if settings.database.run_migrations {
                run_migrations(&pool).await?;
            }
            Arc::new(PgJobRepository::new(pool))
        }
        DatabaseProvider::Memory => {
            tracing::warn!("Using in-memory job store, jobs are lost on restart");
            Arc::new(InMemoryJobRepository::new())
        }
    };

    let upload_store: Arc<dyn UploadStore> = Arc::new(
        LocalUploadStore::new(PathBuf::from(&settings.storage.upload_dir))
            .context("Failed to prepare upload directory")?,
    );

    let transcription_engine = TranscriptionEngineFactory::create(&settings.transcription)
        .context("Failed to configure transcription engine")?;

    let (dispatcher, receiver) = ChannelTaskDispatcher::channel(settings.worker.queue_capacity);

    let worker = TranscriptionWorker::new(
        receiver,
        Arc::clone(&job_repository),
        Arc::clone(&upload_store),
        transcription_engine,
        settings.transcription.timeout(),
    );
    tokio::spawn(worker.run());

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState::new(job_repository, upload_store, Arc::new(dispatcher), settings);
    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
