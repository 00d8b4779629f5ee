//! Status mapper: final marks -> tier (label, color, advisory text).
//!
//! A pure ordered-threshold lookup keyed only by the blended marks; same
//! input always yields the same output. The dynamic recommendation extension
//! lives in `recommend`.

pub mod recommend;

pub use recommend::recommend;

use crate::blend::BlendPreset;
use crate::domain::Tier;

/// Marks at or above this are Excellent.
pub const EXCELLENT_MIN: f64 = 85.0;
/// Marks at or above this (but below Excellent) are Good.
pub const GOOD_MIN: f64 = 65.0;

/// Tier plus its fixed display attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierInfo {
    pub tier: Tier,
    pub color: &'static str,
    pub advice: &'static str,
}

/// Map final marks to a tier.
///
/// The pass threshold separating NeedsImprovement from AtRisk comes from the
/// active preset, so the tier boundary always agrees with the verdict
/// boundary.
pub fn map_tier(preset: &BlendPreset, marks: f64) -> TierInfo {
    let tier = if marks >= EXCELLENT_MIN {
        Tier::Excellent
    } else if marks >= GOOD_MIN {
        Tier::Good
    } else if marks >= preset.pass_threshold {
        Tier::NeedsImprovement
    } else {
        Tier::AtRisk
    };

    TierInfo {
        tier,
        color: tier.color(),
        advice: advice_for(tier),
    }
}

fn advice_for(tier: Tier) -> &'static str {
    match tier {
        Tier::Excellent => "Fantastic! Your preparation is solid.",
        Tier::Good => "You're on the right track. Keep it up!",
        Tier::NeedsImprovement => "Passing, but the margin is thin. Add focused revision time.",
        Tier::AtRisk => "Immediate attention required.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::BALANCED;

    #[test]
    fn tier_thresholds_are_inclusive_lower_bounds() {
        let p = &BALANCED;
        assert_eq!(map_tier(p, 85.0).tier, Tier::Excellent);
        assert_eq!(map_tier(p, 84.999).tier, Tier::Good);
        assert_eq!(map_tier(p, 65.0).tier, Tier::Good);
        assert_eq!(map_tier(p, 64.999).tier, Tier::NeedsImprovement);
        assert_eq!(map_tier(p, p.pass_threshold).tier, Tier::NeedsImprovement);
        assert_eq!(map_tier(p, p.pass_threshold - 0.001).tier, Tier::AtRisk);
        assert_eq!(map_tier(p, 35.0).tier, Tier::AtRisk);
    }

    #[test]
    fn tier_carries_fixed_display_attributes() {
        let info = map_tier(&BALANCED, 90.0);
        assert_eq!(info.color, "#22C55E");
        assert!(!info.advice.is_empty());

        // Idempotent: same marks, same output.
        assert_eq!(map_tier(&BALANCED, 90.0), info);
    }
}
