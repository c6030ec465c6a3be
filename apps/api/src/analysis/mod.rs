//! Skill-gap analysis: builds the comparison prompt, sends it through the
//! gateway, then best-effort parses the missing-skills section out of the
//! reply to drive course recommendations.

pub mod handlers;
pub mod prompts;
pub mod skill_gap;
