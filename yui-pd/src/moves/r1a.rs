use log::debug;

use crate::diagram::Diagram;
use crate::error::DiagramError;
use crate::types::{End, Io, Side};
use crate::worklist::Worklist;

/// Removes a curl whose loop is clasped by another strand.
///
/// `c0` and a neighbour `c1` of the same sign are joined by two arcs, and
/// one of the two strands through them returns to itself across a third
/// crossing `c2`. The clasp is turned over so that the loop closes
/// without `c2`: the arc between `c0` and `c1` on the looping strand is
/// reversed and both crossings are rotated in place.
pub fn reidemeister_ia(d: &mut Diagram, touched: &mut Worklist, c0: usize) -> Result<bool, DiagramError> { 
    if !d.crossing_active(c0) { 
        return Ok(false)
    }

    for io in [Io::Out, Io::In] { 
        let end = if io == Io::Out { End::Head } else { End::Tail };
        let l = d.slot(c0, io, Side::Left);
        let r = d.slot(c0, io, Side::Right);
        let c1 = d.cross(l, end);

        if c1 == c0 || d.cross(r, end) != c1 || d.state(c0) != d.state(c1) { 
            continue
        }

        let (bottom, top) = if io == Io::Out { (c0, c1) } else { (c1, c0) };

        if d.slot(bottom, Io::Out, Side::Left) != d.slot(top, Io::In, Side::Left)
        || d.slot(bottom, Io::Out, Side::Right) != d.slot(top, Io::In, Side::Right) { 
            continue
        }

        for side in Side::BOTH { 
            if vertical(d, touched, bottom, top, side)? { 
                return Ok(true)
            }
        }
    }

    for side in Side::BOTH { 
        let x = d.slot(c0, Io::Out, side);
        let y = d.slot(c0, Io::In, side);
        let c1 = d.head(x);

        if c1 == c0 || d.tail(y) != c1 || d.state(c0) != d.state(c1) { 
            continue
        }
        if d.slot(c1, Io::In, side) != x || d.slot(c1, Io::Out, side) != y { 
            continue
        }

        for io in [Io::Out, Io::In] { 
            if horizontal(d, touched, c0, c1, io, side)? { 
                return Ok(true)
            }
        }
    }

    Ok(false)
}

// c0 below c1. The strand entering c0 on `side` leaves c1 on `side` and
// closes through c2, whose sign is opposite to the clasp.
fn vertical(d: &mut Diagram, touched: &mut Worklist, c0: usize, c1: usize, side: Side) -> Result<bool, DiagramError> { 
    let s = side.flip();
    let e0 = d.slot(c0, Io::In, side);
    let e1 = d.slot(c1, Io::Out, side);
    let c2 = d.head(e1);

    if c2 == c0 || c2 == c1 || d.tail(e0) != c2 { 
        return Ok(false)
    }
    if d.slot(c2, Io::In, side) != e1 || d.slot(c2, Io::Out, side) != e0 { 
        return Ok(false)
    }
    if !d.state(c2).opposite(&d.state(c0)) { 
        return Ok(false)
    }

    let a  = d.slot(c0, Io::Out, s);
    let f0 = d.slot(c2, Io::Out, s);
    let f1 = d.slot(c2, Io::In,  s);

    debug!("R_Ia at ({c0}, {c1}): vertical, remove {c2}.");

    d.set_arc(a, c1, c0);

    d.set_cross(f0, End::Tail, c0);
    d.deactivate_arc(e0)?;
    d.set_cross(f1, End::Head, c1);
    d.deactivate_arc(e1)?;

    d.set_slot(c0, Io::In, side, f0);
    d.rotate_crossing(c0, side);
    d.set_slot(c1, Io::Out, side, f1);
    d.rotate_crossing(c1, s);

    d.deactivate_crossing(c2)?;
    d.counters_mut().r_ia += 1;

    for c in [c0, c1, d.head(f0), d.tail(f1)] { 
        touched.push(c);
    }

    Ok(true)
}

// c1 beside c0, joined through the slots on `side`. The strand leaving
// (`io = Out`) or entering (`io = In`) c0 on the other side comes back
// to c1 through c2, whose sign agrees with the clasp.
fn horizontal(d: &mut Diagram, touched: &mut Worklist, c0: usize, c1: usize, io: Io, side: Side) -> Result<bool, DiagramError> { 
    let s = side.flip();
    let jo = if io == Io::Out { Io::In } else { Io::Out };
    let end = if io == Io::Out { End::Head } else { End::Tail };

    let e0 = d.slot(c0, io, s);
    let e1 = d.slot(c1, jo, s);
    let c2 = d.cross(e0, end);

    if c2 == c0 || c2 == c1 || d.cross(e1, end.flip()) != c2 { 
        return Ok(false)
    }
    if d.slot(c2, jo, side) != e0 || d.slot(c2, io, side) != e1 { 
        return Ok(false)
    }
    if d.state(c2) != d.state(c0) { 
        return Ok(false)
    }

    let a  = d.slot(c0, jo, side);
    let f0 = d.slot(c2, jo, s);
    let f1 = d.slot(c2, io, s);

    if f0 == e1 || f1 == e0 { 
        return Ok(false)
    }

    debug!("R_Ia at ({c0}, {c1}): horizontal, remove {c2}.");

    let (t, h) = (d.tail(a), d.head(a));
    d.set_arc(a, h, t);

    d.set_cross(f0, end, c0);
    d.deactivate_arc(e0)?;
    d.set_cross(f1, end.flip(), c1);
    d.deactivate_arc(e1)?;

    d.set_slot(c0, io, s, f0);
    d.rotate_crossing(c0, if io == Io::Out { side } else { s });
    d.set_slot(c1, jo, s, f1);
    d.rotate_crossing(c1, if io == Io::Out { s } else { side });

    d.deactivate_crossing(c2)?;
    d.counters_mut().r_ia += 1;

    for c in [c0, c1, d.cross(f0, end.flip()), d.cross(f1, end)] { 
        touched.push(c);
    }

    Ok(true)
}
