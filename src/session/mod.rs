mod preview;
mod state;

pub use preview::{Preview, PreviewTone};
pub use state::SessionState;
