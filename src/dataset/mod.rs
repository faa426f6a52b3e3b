pub mod file;
pub mod synth;

pub use file::{load_listings, save_listings};
pub use synth::{synthesize, SynthConfig};
