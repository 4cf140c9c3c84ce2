//! External service wrappers: YouTube, Anthropic, Shopify.
//!
//! Each function makes one call and maps the response into castdir
//! types. Anything clever (retries, queues, rate limiting) is absent.

pub mod claude;
pub mod shopify;
pub mod youtube;
