//! roomlock-cli – Bibliotheks-Root
//!
//! Konfiguration und Befehle der `roomlock`-Binary, getrennt vom
//! Einstiegspunkt damit Integrationstests sie direkt nutzen koennen.

pub mod befehle;
pub mod config;
