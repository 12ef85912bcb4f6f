//! Use cases (application services)

pub mod check_environment;
pub mod execute_turn;
pub mod offline_demo;
pub mod run_conversation;
pub mod run_test_suite;
