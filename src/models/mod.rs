// src/models/mod.rs

pub mod analytics;
pub mod question;
pub mod submission;
