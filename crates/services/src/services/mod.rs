pub mod business_validation;
pub mod catalog;
pub mod claude_api;
pub mod code_validator;
pub mod generation_progress;
pub mod js_syntax;
pub mod optimizer;
pub mod projects;
pub mod prompt_builder;
pub mod response_parser;
pub mod sanitizer;
pub mod website_generator;
