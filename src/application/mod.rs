/// Application layer - Use cases and DTOs
///
/// This layer contains the application logic that orchestrates
/// the reduction services and coordinates with infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod use_cases;
