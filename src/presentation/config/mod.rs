mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseProvider, DatabaseSettings, LoggingSettings, ServerSettings, Settings,
    StorageSettings, TranscriptionProviderSetting, TranscriptionSettings, WorkerSettings,
};
