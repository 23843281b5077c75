//! Business logic services for the application layer.

pub mod application_service;
pub mod auth_service;
pub mod company_service;
pub mod faculty_service;
pub mod institution_service;
pub mod job_service;
pub mod stats_service;

pub use application_service::ApplicationService;
pub use auth_service::{AuthService, NewAdmin, SetupOutcome};
pub use company_service::CompanyService;
pub use faculty_service::FacultyService;
pub use institution_service::InstitutionService;
pub use job_service::JobService;
pub use stats_service::{ApplicationReport, StatsService, SystemStats};
