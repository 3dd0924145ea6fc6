//! Phases domain: the closed phase type.

/// Every state the encounter can be in. A closed enum so the scheduler's
/// matches are exhaustive and a new phase cannot be added half-wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Opening beat before the boss starts hunting.
    #[default]
    Intro,
    /// Default state: the boss chases the player and can be hurt.
    Hunting,
    Summoning,
    Minefield,
    Bullets,
    PathTrace,
    Duel,
}

impl Phase {
    /// Phases other than Hunting force boss immunity while active.
    pub fn forces_immunity(self) -> bool {
        self != Phase::Hunting
    }

    pub fn scripted_kind(self) -> Option<ScriptedKind> {
        match self {
            Phase::Summoning => Some(ScriptedKind::Summoning),
            Phase::Minefield => Some(ScriptedKind::Minefield),
            Phase::Bullets => Some(ScriptedKind::Bullets),
            Phase::PathTrace => Some(ScriptedKind::PathTrace),
            Phase::Intro | Phase::Hunting | Phase::Duel => None,
        }
    }
}

/// The four phases that run exactly once in the canonical sequence and feed
/// the duel-loss filler pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedKind {
    Summoning,
    Minefield,
    Bullets,
    PathTrace,
}

impl ScriptedKind {
    pub const ALL: [ScriptedKind; 4] = [
        ScriptedKind::Summoning,
        ScriptedKind::Minefield,
        ScriptedKind::Bullets,
        ScriptedKind::PathTrace,
    ];

    pub fn index(self) -> usize {
        match self {
            ScriptedKind::Summoning => 0,
            ScriptedKind::Minefield => 1,
            ScriptedKind::Bullets => 2,
            ScriptedKind::PathTrace => 3,
        }
    }

    pub fn phase(self) -> Phase {
        match self {
            ScriptedKind::Summoning => Phase::Summoning,
            ScriptedKind::Minefield => Phase::Minefield,
            ScriptedKind::Bullets => Phase::Bullets,
            ScriptedKind::PathTrace => Phase::PathTrace,
        }
    }
}
