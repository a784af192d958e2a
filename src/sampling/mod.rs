// User sampling: reading-frequency tiers and the stratified sampler.

pub mod stratified;
pub mod tiers;

pub use stratified::{read_counts, SampledUser, SamplerConfig, StratifiedSampler};
pub use tiers::{divide_into_three, Thresholds, Tier};
