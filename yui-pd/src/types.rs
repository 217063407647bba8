use derive_more::Display;

/// Sign of a crossing. `Inactive` marks a deactivated slot.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug, Display)]
pub enum Handedness { 
    #[default]
    #[display(fmt = "0")]
    Inactive,
    #[display(fmt = "+")]
    RightHanded,
    #[display(fmt = "-")]
    LeftHanded,
}

impl Handedness { 
    pub fn is_active(&self) -> bool { 
        *self != Handedness::Inactive
    }

    pub fn is_right_handed(&self) -> bool { 
        *self == Handedness::RightHanded
    }

    pub fn is_left_handed(&self) -> bool { 
        *self == Handedness::LeftHanded
    }

    pub fn from_right_handed(rh: bool) -> Self { 
        if rh { Handedness::RightHanded } else { Handedness::LeftHanded }
    }

    pub fn sign(&self) -> i32 { 
        match self { 
            Handedness::RightHanded =>  1,
            Handedness::LeftHanded  => -1,
            Handedness::Inactive    =>  0,
        }
    }

    pub fn mirror(&self) -> Self { 
        match self { 
            Handedness::RightHanded => Handedness::LeftHanded,
            Handedness::LeftHanded  => Handedness::RightHanded,
            Handedness::Inactive    => Handedness::Inactive,
        }
    }

    /// Two active crossings of opposite sign.
    pub fn opposite(&self, other: &Handedness) -> bool { 
        self.is_active() && other.is_active() && self != other
    }
}

/// First index of a crossing slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum Io { 
    Out = 0,
    In  = 1,
}

/// Second index of a crossing slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum Side { 
    Left  = 0,
    Right = 1,
}

impl Side { 
    pub fn flip(self) -> Self { 
        match self { 
            Side::Left  => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn is_right(self) -> bool { 
        self == Side::Right
    }

    pub fn from_right(right: bool) -> Self { 
        if right { Side::Right } else { Side::Left }
    }

    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];
}

/// Endpoint of an arc.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum End { 
    Tail = 0,
    Head = 1,
}

impl End { 
    pub fn flip(self) -> Self { 
        match self { 
            End::Tail => End::Head,
            End::Head => End::Tail,
        }
    }

    /// The slot row an arc occupies at this end: `Out` at its tail, `In` at its head.
    pub fn io(self) -> Io { 
        match self { 
            End::Tail => Io::Out,
            End::Head => Io::In,
        }
    }
}
