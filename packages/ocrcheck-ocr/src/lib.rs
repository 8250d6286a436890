pub mod command;
pub mod engine;
pub mod region;

pub use command::{CommandOcrEngine, DEFAULT_LANGUAGES};
pub use engine::{OcrEngine, OcrError, OcrInput, OcrOutput};
pub use region::{Corner, TextRegion};
