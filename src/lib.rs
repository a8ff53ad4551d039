//! Case-study document parsing and storage.
//!
//! Uploaded PDF / DOCX / text documents are turned into plain text
//! ([`source`]), parsed into structured sections ([`parser`]), merged into a
//! [`case_study::CaseStudy`] and persisted in SQLite ([`db`]).

pub mod case_study;
pub mod db;
pub mod parser;
pub mod settings;
pub mod source;
