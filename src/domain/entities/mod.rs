//! Core domain entities stored as documents.
//!
//! # Entity Types
//!
//! - [`Institution`], [`Admission`] - Institutions and their admission rounds
//! - [`Faculty`], [`Course`] - Academic structure under an institution
//! - [`Company`] - Employers, moderated by status
//! - [`Job`], [`JobApplication`] - Postings and student applications
//! - [`Application`] - Admission applications (read and reviewed only)
//! - [`Admin`] - Administrator accounts
//!
//! Entities carry their document id in `id`; it is stripped before storage
//! via [`crate::domain::document::to_fields`]. Patch structs serialize only
//! the fields that are set.

pub mod admin;
pub mod application;
pub mod company;
pub mod faculty;
pub mod institution;
pub mod job;

pub use admin::{Admin, AdminRole};
pub use application::{Application, ApplicationStatus};
pub use company::{Company, CompanyStatus};
pub use faculty::{Course, DEFAULT_COURSE_CAPACITY, DEFAULT_COURSE_DURATION, Faculty};
pub use institution::{AcademicYear, Admission, Institution, InstitutionPatch};
pub use job::{
    DEFAULT_DEADLINE_DAYS, Job, JobApplication, JobApplicationStatus, JobPatch, JobStatus,
    NewJobApplication,
};
