mod helper;
mod itype;

pub use helper::*;
pub use itype::*;
pub(crate) use itype::dispatch_int;

macro_rules! err {
    ($($arg:tt)*) => {
        Err(format!($($arg)*).into())
    };
}

pub(crate) use err;
