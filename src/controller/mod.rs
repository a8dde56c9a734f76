// CONTROLLER: Input, game logic, and update loop
pub mod frame_loop;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod timers;

pub use frame_loop::FrameLoopContext;
pub use game::{Game, JumpTicket, SpaceOutcome};
pub use game_loop::{GameAction, GameLoop};
pub use input::{InputEvent, InputProcessor, KeyBindings};
pub use timers::{TickScheduler, TimerId};
