//! Common test utilities shared by all test modules
