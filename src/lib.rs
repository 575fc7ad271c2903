//=========================================================================
// Rhythm Platformer Library Root
//
// A beat-synchronized 3D platformer: the gameplay core plus a small winit
// host that runs it on a logic thread.
//
// Responsibilities:
// - Expose the gameplay core (`game`) independent of any window
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Keep the winit layer (`platform`) private
//
// Typical usage:
// ```no_run
// use rhythm_platformer::prelude::*;
//
// let level = LevelDescription::from_path("levels/default.json")?;
// let mode = PlayMode::new(&level, collaborators)?;
// EngineBuilder::new().build(mode).run()?;
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the logic-thread loop, the `Mode` trait and input types.
// `game` is the simulation itself. `host` has the stand-in audio and
// rendering collaborators.
//
pub mod core;
pub mod game;
pub mod host;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the OS window and event loop; `engine` wires it to the
// core thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
