//! Unit tests for individual components
