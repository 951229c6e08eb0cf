use crate::config::AppConfig;
use crate::directory::DriverDirectory;
use crate::services::ai::GenerationProvider;

pub struct AppState {
    pub config: AppConfig,
    pub directory: DriverDirectory,
    pub generation: Box<dyn GenerationProvider>,
}
