/// Use cases module containing application business logic orchestration
mod export_environment;

pub use export_environment::ExportEnvironmentUseCase;
