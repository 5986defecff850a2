//! REST API endpoint tests

mod auth_tests;
mod conversation_tests;
mod health_tests;
mod user_tests;
