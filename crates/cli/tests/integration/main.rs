mod common;
mod convert_tests;
mod list_tests;
mod validate_tests;
