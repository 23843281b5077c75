//! Application layer services.
//!
//! Services orchestrate document store calls, validation and business rules
//! and expose a typed API to the HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::InstitutionService`] - Institutions and admission publishing
//! - [`services::FacultyService`] - Faculties and courses
//! - [`services::CompanyService`] - Company moderation
//! - [`services::JobService`] - Job postings and job applications
//! - [`services::ApplicationService`] - Admission application review
//! - [`services::StatsService`] - Dashboard statistics and reports
//! - [`services::AuthService`] - Admin login, tokens and accounts

pub mod services;
