//! HTTP request handlers, one module per resource group.

pub mod admin;
pub mod applications;
pub mod auth;
pub mod companies;
pub mod faculties;
pub mod health;
pub mod institutions;
pub mod jobs;

pub use admin::{institutions_list_handler, reports_handler, system_stats_handler};
pub use applications::{
    get_application_handler, institution_applications_handler, list_applications_handler,
    update_application_status_handler,
};
pub use auth::{create_account_handler, login_handler, profile_handler, setup_handler};
pub use companies::{
    company_applications_handler, company_jobs_handler, create_company_handler,
    delete_company_handler, list_companies_handler, update_company_status_handler,
};
pub use faculties::{
    create_course_handler, create_faculty_handler, list_courses_handler, list_faculties_handler,
};
pub use health::health_handler;
pub use institutions::{
    create_institution_handler, delete_institution_handler, get_institution_handler,
    list_institutions_handler, publish_admissions_handler, update_institution_handler,
};
pub use jobs::{
    apply_for_job_handler, create_job_handler, delete_job_handler, get_job_handler,
    list_jobs_handler, update_job_application_status_handler, update_job_handler,
    update_job_status_handler,
};
