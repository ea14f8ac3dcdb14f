// Application services
// Coordinate the validation gate and repository ports for each use case

pub mod team_service;

pub use team_service::TeamService;
