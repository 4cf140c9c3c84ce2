//! Configuration for the castdir ecosystem.
//!
//! Two layers: a global config pointing at the studio directory, and a
//! studio-local config carrying the channel, creator profile and
//! planning defaults.

mod global_config;
mod studio_config;

pub use global_config::GlobalConfig;
pub use studio_config::{
    ChannelConfig, CreatorProfile, PlanningConfig, ShopifyConfig, StudioConfig,
};
