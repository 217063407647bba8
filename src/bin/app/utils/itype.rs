use clap::ValueEnum;
use derive_more::Display;
use serde::Deserialize;

/// Integer width of exported codes.
#[derive(Clone, Copy, ValueEnum, Display, Debug, Deserialize, Default)]
#[clap(rename_all="lower")]
pub enum IType { 
    #[display(fmt = "i16")]
    I16, 
    #[default]
    #[display(fmt = "i32")]
    I32, 
    #[display(fmt = "i64")]
    I64,
    #[cfg(feature = "i128")]
    #[display(fmt = "i128")]
    I128,
}

macro_rules! dispatch_int {
    ($itype:expr, $f:ident, $args:expr) => {
        match $itype { 
            IType::I16  => $f::<i16>($args),
            IType::I32  => $f::<i32>($args),
            IType::I64  => $f::<i64>($args),
            #[cfg(feature = "i128")]
            IType::I128 => $f::<i128>($args),
        }
    };
}

pub(crate) use dispatch_int;
