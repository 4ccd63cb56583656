// src/models/mod.rs

pub mod answer;
pub mod participant;
