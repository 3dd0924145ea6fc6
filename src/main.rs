mod boss;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod duel;
mod encounter;
mod hazards;
mod phases;
mod player;
mod presentation;
mod score;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Voidlord".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .add_plugins((
        core::CorePlugin,
        encounter::EncounterPlugin,
        player::PlayerPlugin,
        boss::BossPlugin,
        phases::PhasesPlugin,
        hazards::summoning::SummoningPlugin,
        hazards::minefield::MinefieldPlugin,
        hazards::bullets::BulletsPlugin,
        hazards::pathtrace::PathTracePlugin,
        duel::DuelPlugin,
        score::ScorePlugin,
        presentation::PresentationPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
