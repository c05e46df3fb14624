//! MedMatch - Conversational Symptom Triage Core
//!
//! This crate implements the triage and care-provider matching engine behind
//! a conversational health assistant: symptom extraction, emergency
//! detection, urgency classification, follow-up question generation, doctor
//! ranking, and resilient AI orchestration with retry and failover.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
