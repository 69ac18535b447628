//! Utility modules for common functionality
//!
//! This module contains utility functions and helpers used throughout the application:
//! - `logging`: Logging configuration and setup
//! - `youtube`: Video reference parsing and URL templates

pub mod logging;
pub mod youtube;
