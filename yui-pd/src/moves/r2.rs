use log::debug;

use crate::diagram::Diagram;
use crate::error::DiagramError;
use crate::types::{End, Io, Side};
use crate::worklist::Worklist;

/// Removes a pair of crossings of opposite sign joined by two parallel arcs.
/// 
/// Either both arcs run from one crossing to the other (vertical), or they
/// run in opposite directions through slots on the same side (horizontal).
/// When an outer strand closes up on itself it is split off as an unknot;
/// such degenerate applications are counted as `R_IIa`.
pub fn reidemeister_ii(d: &mut Diagram, touched: &mut Worklist, c0: usize) -> Result<bool, DiagramError> { 
    if !d.crossing_active(c0) { 
        return Ok(false)
    }

    for io in [Io::Out, Io::In] { 
        let end = if io == Io::Out { End::Head } else { End::Tail };
        let l = d.slot(c0, io, Side::Left);
        let r = d.slot(c0, io, Side::Right);
        let c1 = d.cross(l, end);

        if c1 == c0 || d.cross(r, end) != c1 || !d.state(c0).opposite(&d.state(c1)) { 
            continue
        }

        let (bottom, top) = if io == Io::Out { (c0, c1) } else { (c1, c0) };

        if d.slot(bottom, Io::Out, Side::Left) != d.slot(top, Io::In, Side::Left) 
        || d.slot(bottom, Io::Out, Side::Right) != d.slot(top, Io::In, Side::Right) { 
            continue
        }

        if vertical(d, touched, bottom, top)? { 
            return Ok(true)
        }
    }

    for side in Side::BOTH { 
        let x = d.slot(c0, Io::Out, side);
        let y = d.slot(c0, Io::In, side);
        let c1 = d.head(x);

        if c1 == c0 || d.tail(y) != c1 || !d.state(c0).opposite(&d.state(c1)) { 
            continue
        }
        if d.slot(c1, Io::In, side) != x || d.slot(c1, Io::Out, side) != y { 
            continue
        }

        if horizontal(d, touched, c0, c1, side)? { 
            return Ok(true)
        }
    }

    Ok(false)
}

// c0 below c1, both arcs of c0's out-row enter c1 on the same sides.
fn vertical(d: &mut Diagram, touched: &mut Worklist, c0: usize, c1: usize) -> Result<bool, DiagramError> { 
    let a  = d.slot(c0, Io::Out, Side::Left);
    let b  = d.slot(c0, Io::Out, Side::Right);
    let e0 = d.slot(c0, Io::In,  Side::Left);
    let e1 = d.slot(c0, Io::In,  Side::Right);
    let e2 = d.slot(c1, Io::Out, Side::Right);
    let e3 = d.slot(c1, Io::Out, Side::Left);

    // strands: e0 -> b -> e3 and e1 -> a -> e2
    if e0 == e2 || e1 == e3 { 
        return Ok(false)
    }

    match (e1 == e2, e0 == e3) { 
        (false, false) => { 
            debug!("R_II at ({c0}, {c1}): vertical.");
            d.reconnect(a, End::Tail, e0, touched)?;
            d.reconnect(a, End::Head, e3, touched)?;
            d.reconnect(b, End::Tail, e1, touched)?;
            d.reconnect(b, End::Head, e2, touched)?;
            for e in [e0, e1, e2, e3] { 
                d.deactivate_arc(e)?;
            }
            d.counters_mut().r_ii += 1;
        },
        (true, false) => { 
            debug!("R_IIa at ({c0}, {c1}): vertical, split off {e1}.");
            d.reconnect(b, End::Tail, e0, touched)?;
            d.reconnect(b, End::Head, e3, touched)?;
            for e in [a, e1, e0, e3] { 
                d.deactivate_arc(e)?;
            }
            d.add_unlinks(1);
            d.counters_mut().r_iia += 1;
        },
        (false, true) => { 
            debug!("R_IIa at ({c0}, {c1}): vertical, split off {e0}.");
            d.reconnect(a, End::Tail, e1, touched)?;
            d.reconnect(a, End::Head, e2, touched)?;
            for e in [b, e0, e1, e2] { 
                d.deactivate_arc(e)?;
            }
            d.add_unlinks(1);
            d.counters_mut().r_iia += 1;
        },
        (true, true) => { 
            debug!("R_IIa at ({c0}, {c1}): vertical, two unknots.");
            for e in [a, b, e0, e1] { 
                d.deactivate_arc(e)?;
            }
            d.add_unlinks(2);
            d.counters_mut().r_iia += 1;
        }
    }

    d.deactivate_crossing(c0)?;
    d.deactivate_crossing(c1)?;

    Ok(true)
}

// x runs from c0 to c1 and y back, both through slots on `side`.
fn horizontal(d: &mut Diagram, touched: &mut Worklist, c0: usize, c1: usize, side: Side) -> Result<bool, DiagramError> { 
    let s = side.flip();
    let a  = d.slot(c0, Io::In,  side);
    let b  = d.slot(c0, Io::Out, side);
    let e0 = d.slot(c0, Io::In,  s);
    let e1 = d.slot(c1, Io::Out, s);
    let e2 = d.slot(c1, Io::In,  s);
    let e3 = d.slot(c0, Io::Out, s);

    // strands: e0 -> b -> e1 and e2 -> a -> e3
    if e0 == e3 || e1 == e2 { 
        return Ok(false)
    }

    match (e0 == e1, e2 == e3) { 
        (false, false) => { 
            debug!("R_II at ({c0}, {c1}): horizontal.");
            d.reconnect(a, End::Tail, e2, touched)?;
            d.reconnect(a, End::Head, e3, touched)?;
            d.reconnect(b, End::Tail, e0, touched)?;
            d.reconnect(b, End::Head, e1, touched)?;
            for e in [e0, e1, e2, e3] { 
                d.deactivate_arc(e)?;
            }
            d.counters_mut().r_ii += 1;
        },
        (true, false) => { 
            debug!("R_IIa at ({c0}, {c1}): horizontal, split off {e0}.");
            d.reconnect(a, End::Tail, e2, touched)?;
            d.reconnect(a, End::Head, e3, touched)?;
            for e in [b, e0, e2, e3] { 
                d.deactivate_arc(e)?;
            }
            d.add_unlinks(1);
            d.counters_mut().r_iia += 1;
        },
        (false, true) => { 
            debug!("R_IIa at ({c0}, {c1}): horizontal, split off {e2}.");
            d.reconnect(b, End::Tail, e0, touched)?;
            d.reconnect(b, End::Head, e1, touched)?;
            for e in [a, e2, e0, e1] { 
                d.deactivate_arc(e)?;
            }
            d.add_unlinks(1);
            d.counters_mut().r_iia += 1;
        },
        (true, true) => { 
            debug!("R_IIa at ({c0}, {c1}): horizontal, two unknots.");
            for e in [a, b, e0, e2] { 
                d.deactivate_arc(e)?;
            }
            d.add_unlinks(2);
            d.counters_mut().r_iia += 1;
        }
    }

    d.deactivate_crossing(c0)?;
    d.deactivate_crossing(c1)?;

    Ok(true)
}
