//! Promo banners shown over the playfield at score milestones. Display only;
//! nothing here feeds back into the round.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Promo {
    pub text: &'static str,
    /// Shown once the score reaches `from`, hidden again at `until`.
    pub from: u32,
    pub until: u32,
}

pub const PROMOS: [Promo; 2] = [
    Promo { text: "FLAP FOR WL", from: 1, until: 3 },
    Promo { text: "FLAP YOUR WAY UP", from: 7, until: 11 },
];

const FADE_STEP: f32 = 0.2;

#[derive(Debug, Clone, Default)]
pub struct PromoOverlay {
    current: Option<Promo>,
    opacity: f32,
}

impl PromoOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once per frame while a round runs.
    pub fn update(&mut self, score: u32) {
        let wanted = PROMOS
            .iter()
            .copied()
            .find(|p| (p.from..p.until).contains(&score));
        if wanted != self.current {
            if let Some(p) = wanted {
                log::debug!("showing promo {:?}", p.text);
            }
            self.current = wanted;
            self.opacity = 0.0;
        }
        if self.current.is_some() {
            self.opacity = (self.opacity + FADE_STEP).min(1.0);
        }
    }

    /// Every round gets the full schedule again.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn visible(&self) -> Option<(Promo, f32)> {
        self.current.map(|p| (p, self.opacity))
    }
}
