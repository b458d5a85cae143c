//! Prompt domain
//!
//! The default master prompt and the persona directive used by proxied resolution.

mod template;

pub use template::PromptTemplate;
