//! Text for the result panel
//!
//! The DOM side (showing the panel, restart button) lives in the wasm host;
//! this module only decides what the panel says.

use rand::Rng;

/// Tips shown on every device
pub const TIPS: [&str; 7] = [
    "Left arrow 👈 to go left, right arrow 👉 to go right, Space 🚀 to shoot.",
    "Your score depends on how accurate you can hit your enemy.",
    "Per hit: Max score = 50, Min score = 20.",
    "Do not shrink your browser after you started playing.",
    "Once you started playing, you can't pause.",
    "You will get a power pack in every level.",
    "You hit, enemy looses 80 lives, enemy hit you, you loose 15 lives.",
];

/// Extra tip for touch devices
pub const MOBILE_TIP: &str = "To keep firing, you have to drag your player.";

/// Replaces the panel's intro paragraph after the first restart
pub const RESTART_MESSAGE: &str = "You did great.";

/// Tip shown before the first round
pub fn initial_tip(mobile: bool) -> &'static str {
    if mobile { MOBILE_TIP } else { TIPS[0] }
}

/// Uniformly random tip; the mobile tip joins the pool on touch devices
pub fn random_tip<R: Rng + ?Sized>(rng: &mut R, mobile: bool) -> &'static str {
    let count = if mobile { TIPS.len() + 1 } else { TIPS.len() };
    let index = rng.random_range(0..count);
    TIPS.get(index).copied().unwrap_or(MOBILE_TIP)
}

/// What the result panel shows after a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverReport {
    pub score: u64,
    pub tip: &'static str,
    pub new_high_score: bool,
}

impl GameOverReport {
    pub fn new<R: Rng + ?Sized>(
        score: u64,
        new_high_score: bool,
        rng: &mut R,
        mobile: bool,
    ) -> Self {
        Self {
            score,
            tip: random_tip(rng, mobile),
            new_high_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_initial_tip() {
        assert_eq!(initial_tip(false), TIPS[0]);
        assert_eq!(initial_tip(true), MOBILE_TIP);
    }

    #[test]
    fn test_random_tip_covers_pool() {
        let mut rng = Pcg32::seed_from_u64(5);
        let desktop: std::collections::HashSet<_> =
            (0..500).map(|_| random_tip(&mut rng, false)).collect();
        assert_eq!(desktop.len(), TIPS.len());
        assert!(!desktop.contains(MOBILE_TIP));

        let mobile: std::collections::HashSet<_> =
            (0..500).map(|_| random_tip(&mut rng, true)).collect();
        assert_eq!(mobile.len(), TIPS.len() + 1);
        assert!(mobile.contains(MOBILE_TIP));
    }

    #[test]
    fn test_report() {
        let mut rng = Pcg32::seed_from_u64(8);
        let report = GameOverReport::new(420, true, &mut rng, false);
        assert_eq!(report.score, 420);
        assert!(report.new_high_score);
        assert!(TIPS.contains(&report.tip));
    }
}
