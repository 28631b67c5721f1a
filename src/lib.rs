//! `tenderdesk`: form controller for tender invitations.
//!
//! This crate models the interactive parts of the tender email form:
//! confirmation-gated email sends, background document uploads and
//! removals, and the filterable subcontractor list with its checkbox
//! synchronisation. The page is reached through [`page::Page`] and the
//! backend through [`backend::DocumentBackend`].

pub mod attachments;
pub mod backend;
pub mod config;
pub mod csrf;
pub mod error;
pub mod filter;
pub mod i18n;
pub mod model;
pub mod page;
pub mod project;
pub mod submit;
pub mod terminal;
