//! Subway line server.
//!
//! Keeps each line a single chain of sections between stations while
//! sections are added (extending or splitting the line) and stations are
//! removed (shortening the line or merging two sections).

pub mod config;
pub mod domain;
pub mod service;
pub mod web;
