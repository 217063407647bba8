use log::debug;

use crate::diagram::Diagram;
use crate::error::DiagramError;
use crate::types::{End, Io, Side};
use crate::worklist::Worklist;

/// Removes a cancelling pair `c0`, `c2` whose bigon is pierced by a third 
/// strand passing both sides at crossings `c1`, `c3` of equal sign.
/// The bigon is slid off the third strand and cancelled, leaving `c1` and
/// `c3` in place with the two bigon strands exchanged.
pub fn reidemeister_iia(d: &mut Diagram, touched: &mut Worklist, c0: usize) -> Result<bool, DiagramError> { 
    if !d.crossing_active(c0) { 
        return Ok(false)
    }

    let b1 = d.slot(c0, Io::Out, Side::Left);
    let a1 = d.slot(c0, Io::Out, Side::Right);
    let a0 = d.slot(c0, Io::In,  Side::Left);
    let b0 = d.slot(c0, Io::In,  Side::Right);

    let c1 = d.head(a1);
    let c3 = d.head(b1);
    if c1 == c0 || c3 == c0 || c1 == c3 { 
        return Ok(false)
    }

    let a2 = d.next_arc(a1)?;
    let b2 = d.next_arc(b1)?;
    let c2 = d.head(a2);
    if d.head(b2) != c2 || c2 == c0 || c2 == c1 || c2 == c3 { 
        return Ok(false)
    }
    if d.slot(c2, Io::In, Side::Left) != b2 || d.slot(c2, Io::In, Side::Right) != a2 { 
        return Ok(false)
    }
    if !d.state(c0).opposite(&d.state(c2)) || d.state(c1) != d.state(c3) { 
        return Ok(false)
    }

    let a3 = d.slot(c2, Io::Out, Side::Left);
    let b3 = d.slot(c2, Io::Out, Side::Right);
    if a0 == a3 || b0 == b3 { 
        return Ok(false)
    }

    debug!("R_IIa at ({c0}, {c2}) across ({c1}, {c3}).");

    d.reconnect(a0, End::Head, b1, touched)?;
    d.reconnect(b0, End::Head, a1, touched)?;
    d.reconnect(a3, End::Tail, b2, touched)?;
    d.reconnect(b3, End::Tail, a2, touched)?;

    for e in [b1, a1, b2, a2] { 
        d.deactivate_arc(e)?;
    }
    d.deactivate_crossing(c0)?;
    d.deactivate_crossing(c2)?;

    d.counters_mut().r_iia += 1;

    Ok(true)
}

/// Removes a cancelling pair `c0`, `c2` whose two strands run in opposite 
/// directions, with a third strand crossing the arc from `c0` to `c2` at 
/// `c1` and the arc back at `c3`, of opposite signs. 
/// The outer arcs are joined across `c1` and `c3`, which change sign.
pub fn reidemeister_iia_horizontal(d: &mut Diagram, touched: &mut Worklist, c0: usize) -> Result<bool, DiagramError> { 
    if !d.crossing_active(c0) { 
        return Ok(false)
    }
    for side in Side::BOTH { 
        if iia_horizontal(d, touched, c0, side)? { 
            return Ok(true)
        }
    }
    Ok(false)
}

// the bigon lies on `side` of both c0 and c2.
fn iia_horizontal(d: &mut Diagram, touched: &mut Worklist, c0: usize, side: Side) -> Result<bool, DiagramError> { 
    let s = side.flip();
    let e1 = d.slot(c0, Io::Out, side);
    let f3 = d.slot(c0, Io::Out, s);
    let f2 = d.slot(c0, Io::In,  side);
    let e0 = d.slot(c0, Io::In,  s);

    let c1 = d.head(e1);
    if c1 == c0 { 
        return Ok(false)
    }
    let e2 = d.next_arc(e1)?;
    let c2 = d.head(e2);
    if c2 == c0 || c2 == c1 || !d.state(c0).opposite(&d.state(c2)) { 
        return Ok(false)
    }
    if d.slot(c2, Io::In, side) != e2 { 
        return Ok(false)
    }

    let f1 = d.slot(c2, Io::Out, side);
    let e3 = d.slot(c2, Io::Out, s);
    let f0 = d.slot(c2, Io::In,  s);
    let c3 = d.head(f1);

    if c3 == c0 || c3 == c1 || c3 == c2 || !d.state(c1).opposite(&d.state(c3)) { 
        return Ok(false)
    }
    if d.tail(f2) != c3 || d.next_arc(f1)? != f2 { 
        return Ok(false)
    }
    if e3 == f0 || f3 == e0 { 
        return Ok(false)
    }

    debug!("R_IIa at ({c0}, {c2}) across ({c1}, {c3}): anti-parallel.");

    // the third strand keeps its arcs, the outer ones take the freed slots.
    for (c, a, out, inn) in [(c1, e1, f3, f0), (c3, f1, e3, e0)] { 
        let t = d.arc_side(a, End::Head)?;
        let u = t.flip();

        let mut arcs = [[0; 2]; 2];
        arcs[Io::Out as usize][u as usize] = d.slot(c, Io::Out, t);
        arcs[Io::In  as usize][t as usize] = d.slot(c, Io::In,  u);
        arcs[Io::Out as usize][t as usize] = out;
        arcs[Io::In  as usize][u as usize] = inn;

        let state = d.state(c).mirror();
        d.set_crossing(c, arcs, state);
    }

    d.set_cross(e0, End::Head, c3);
    d.set_cross(e3, End::Tail, c3);
    d.set_cross(f0, End::Head, c1);
    d.set_cross(f3, End::Tail, c1);

    for e in [e1, e2, f1, f2] { 
        d.deactivate_arc(e)?;
    }
    d.deactivate_crossing(c0)?;
    d.deactivate_crossing(c2)?;

    d.counters_mut().r_iia += 1;

    for c in [c1, c3, d.tail(e0), d.head(e3), d.tail(f0), d.head(f3)] { 
        touched.push(c);
    }

    Ok(true)
}
