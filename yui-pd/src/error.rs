use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiagramError { 
    #[error("crossing {0} is inactive")]
    InactiveCrossing(usize),

    #[error("arc {0} is inactive")]
    InactiveArc(usize),

    #[error("cannot reconnect arc {0} onto itself")]
    SameArc(usize),

    #[error("crossing {c} does not list arc {a} in the expected slot")]
    SlotMismatch { c: usize, a: usize },

    #[error("{kind} index {index} out of range (len = {len})")]
    IndexOutOfRange { kind: &'static str, index: usize, len: usize },

    #[error("value {value} does not fit into {type_name}")]
    WidthOverflow { value: usize, type_name: &'static str },

    #[error("invalid PD code: {0}")]
    InvalidPdCode(String),

    #[error("invalid Gauss code: {0}")]
    InvalidGaussCode(String),

    #[error("invalid braid: {0}")]
    InvalidBraid(String),

    #[error("invalid diagram: {0}")]
    Invalid(String),
}
