mod types;
mod error;
mod diagram;
mod cache;
mod worklist;
mod reconnect;
mod traverse;
mod darc;
mod strand;
mod split;
mod simplify;
mod pd_code;
mod gauss_code;
mod braid;

pub mod moves;

pub use types::*;
pub use error::*;
pub use diagram::*;
pub use cache::Cache;
pub use worklist::Worklist;
pub use traverse::ArcStep;
pub use darc::Darc;
pub use strand::{StrandSimplifier, simplify_strands};
pub use simplify::{simplify, simplify_diagram, SimplifyArgs, Simplified};
pub use pd_code::{PdLabel, infer_handedness};
pub use braid::from_braid;
