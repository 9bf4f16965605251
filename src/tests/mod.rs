pub mod content_tests;
pub mod submission_tests;
