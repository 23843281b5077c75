//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    ApplicationService, AuthService, CompanyService, FacultyService, InstitutionService,
    JobService, StatsService,
};
use crate::domain::repositories::DocumentRepository;
use crate::utils::session_token::TokenSigner;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn DocumentRepository>,
    pub institution_service: Arc<InstitutionService>,
    pub faculty_service: Arc<FacultyService>,
    pub company_service: Arc<CompanyService>,
    pub job_service: Arc<JobService>,
    pub application_service: Arc<ApplicationService>,
    pub stats_service: Arc<StatsService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wires every service onto one document store.
    pub fn new(repository: Arc<dyn DocumentRepository>, signer: TokenSigner) -> Self {
        Self {
            institution_service: Arc::new(InstitutionService::new(repository.clone())),
            faculty_service: Arc::new(FacultyService::new(repository.clone())),
            company_service: Arc::new(CompanyService::new(repository.clone())),
            job_service: Arc::new(JobService::new(repository.clone())),
            application_service: Arc::new(ApplicationService::new(repository.clone())),
            stats_service: Arc::new(StatsService::new(repository.clone())),
            auth_service: Arc::new(AuthService::new(repository.clone(), signer)),
            repository,
        }
    }
}
