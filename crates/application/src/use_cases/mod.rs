pub mod process_query;
pub mod register_services;

pub use process_query::ProcessQueryUseCase;
pub use register_services::RegisterServicesUseCase;
