//! Test-run profiles read from the environment.

pub mod property_test_profile;
