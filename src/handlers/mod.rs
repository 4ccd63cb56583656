// src/handlers/mod.rs

pub mod answers;
pub mod participant;
