//! Robots.txt handling module
//!
//! This module renders the robots.txt file that accompanies a generated
//! sitemap. The crawler itself never reads robots.txt.

mod generator;

pub use generator::{default_rules, generate_robots_txt, RobotsRule, RuleKind};
