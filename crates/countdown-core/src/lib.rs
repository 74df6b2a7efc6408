pub mod clock;
pub mod config;
pub mod constants;
pub mod embers;
pub mod emitter;
pub mod error;
pub mod pool;
pub mod sequencer;
pub mod shake;
pub mod window;

pub use clock::*;
pub use config::*;
pub use embers::*;
pub use emitter::*;
pub use error::*;
pub use pool::*;
pub use sequencer::*;
pub use shake::*;
pub use window::*;
