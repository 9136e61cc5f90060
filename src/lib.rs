//! Lendist Backend Library
//!
//! This library exports the core modules for the Lendist lending backend:
//! borrowers, loans, installment schedule generation and the loan
//! lifecycle engine.

pub mod borrower;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod loan;
pub mod middleware;
pub mod models;
pub mod payment;
pub mod reminder;
pub mod routes;
pub mod schedule;
pub mod state;
