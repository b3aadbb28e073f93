pub mod applicant;
pub mod assets;
pub mod config;
pub mod features;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod stderr_buffer;
pub mod tui;
