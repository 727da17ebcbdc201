pub mod business;
pub mod generated_code;
pub mod project;
