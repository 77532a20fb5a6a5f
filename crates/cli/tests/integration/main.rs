mod common;
mod update_tests;
