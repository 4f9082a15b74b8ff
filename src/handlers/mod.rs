// src/handlers/mod.rs

pub mod debug;
pub mod exam;
pub mod health;
pub mod teacher;
