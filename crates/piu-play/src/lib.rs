// Lane judging, multi-lane sessions, multi-player stage, tick clock, input and autoplay

mod arrow;
pub mod autoplay;
mod clock;
mod event;
pub mod input;
mod lane;
pub mod render;
mod session;
mod stage;

pub use arrow::{ArrowColor, ArrowKind};
pub use autoplay::create_autoplay_log;
pub use clock::{Pacer, TickClock};
pub use event::{JudgeEvent, JudgeListener};
pub use input::{InputQueue, InputScript, InputSender, KeyEvent, TimedKeyEvent};
pub use lane::{Lane, LaneTick};
pub use render::{DrawRequest, NullRenderer, RecordingRenderer, RenderSample, Renderer};
pub use session::Session;
pub use stage::Stage;
