//! Miss counting, post-miss immunity and the paddle flash cue

/// Result of the ball leaving the bottom of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissOutcome {
    /// Immunity window active; nothing counted
    Ignored,
    /// Miss counted, round continues
    Counted { misses: u8 },
    /// Miss counted and no health remains
    Fatal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Health {
    pub misses: u8,
    pub immunity_ticks: u32,
    pub flash_ticks: u32,
}

impl Health {
    pub fn is_immune(&self) -> bool {
        self.immunity_ticks > 0
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_ticks > 0
    }

    /// Record a miss unless immune. Starts the flash and immunity countdowns.
    pub fn record_miss(
        &mut self,
        max_misses: u8,
        immunity_ticks: u32,
        flash_ticks: u32,
    ) -> MissOutcome {
        if self.is_immune() {
            return MissOutcome::Ignored;
        }
        self.misses = self.misses.saturating_add(1).min(max_misses);
        self.flash_ticks = flash_ticks;
        self.immunity_ticks = immunity_ticks;
        if self.misses >= max_misses {
            MissOutcome::Fatal
        } else {
            MissOutcome::Counted {
                misses: self.misses,
            }
        }
    }

    /// Extra life: undo one miss
    pub fn heal(&mut self) {
        self.misses = self.misses.saturating_sub(1);
    }

    pub fn tick_immunity(&mut self) {
        self.immunity_ticks = self.immunity_ticks.saturating_sub(1);
    }

    pub fn tick_flash(&mut self) {
        self.flash_ticks = self.flash_ticks.saturating_sub(1);
    }

    /// Remaining health as a fraction of full, in 0..=1
    pub fn fraction(&self, max_misses: u8) -> f32 {
        if max_misses == 0 {
            return 0.0;
        }
        let remaining = max_misses.saturating_sub(self.misses);
        (f32::from(remaining) / f32::from(max_misses)).clamp(0.0, 1.0)
    }
}
