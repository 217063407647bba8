use log::debug;

use crate::diagram::Diagram;
use crate::error::DiagramError;
use crate::types::{End, Io, Side};
use crate::worklist::Worklist;

/// Removes a crossing `c` that carries a loop, i.e. an arc leaving and 
/// entering `c` on the same side.
pub fn reidemeister_i(d: &mut Diagram, touched: &mut Worklist, c: usize) -> Result<bool, DiagramError> { 
    if !d.crossing_active(c) { 
        return Ok(false)
    }

    let side = if d.slot(c, Io::Out, Side::Left) == d.slot(c, Io::In, Side::Left) { 
        Side::Left
    } else if d.slot(c, Io::Out, Side::Right) == d.slot(c, Io::In, Side::Right) { 
        Side::Right
    } else { 
        return Ok(false)
    };

    let e = d.slot(c, Io::Out, side);
    let a = d.slot(c, Io::In, side.flip());
    let b = d.slot(c, Io::Out, side.flip());

    if a != b { 
        debug!("R_I at {c}: remove loop {e}, join {a} -> {b}.");
        d.reconnect(a, End::Head, b, touched)?;
        d.deactivate_arc(e)?;
        d.deactivate_arc(b)?;
    } else { 
        debug!("R_I at {c}: split off unknot {a}, {e}.");
        d.deactivate_arc(a)?;
        d.deactivate_arc(e)?;
        d.add_unlinks(1);
    }

    d.deactivate_crossing(c)?;
    d.counters_mut().r_i += 1;

    Ok(true)
}

#[cfg(test)]
mod tests { 
    use super::*;
    use crate::braid::from_braid;
    use crate::diagram::tests::{curl, trefoil};
    use crate::types::Handedness;

    #[test]
    fn curl_to_unknot() { 
        let mut d = curl(Handedness::LeftHanded);
        let mut w = Worklist::new();

        assert!(reidemeister_i(&mut d, &mut w, 0).unwrap());
        assert_eq!(d.crossing_count(), 0);
        assert_eq!(d.arc_count(), 0);
        assert_eq!(d.unlink_count(), 1);
        assert_eq!(d.counters().r_i, 1);
        assert!(d.check().is_ok());

        assert!(!reidemeister_i(&mut d, &mut w, 0).unwrap());
        assert_eq!(d.counters().r_i, 1);
    }

    #[test]
    fn curl_on_strand() { 
        // closure of s1 s2 on 3 strands is an unknot with two curls
        let mut d = from_braid(3, &[1, 2]).unwrap();
        let mut w = Worklist::new();

        assert!(reidemeister_i(&mut d, &mut w, 0).unwrap());
        assert_eq!(d.crossing_count(), 1);
        assert_eq!(d.unlink_count(), 0);
        assert!(d.check().is_ok());
        assert_eq!(w.pop(), Some(1));

        assert!(reidemeister_i(&mut d, &mut w, 1).unwrap());
        assert_eq!(d.crossing_count(), 0);
        assert_eq!(d.unlink_count(), 1);
        assert_eq!(d.counters().r_i, 2);
    }

    #[test]
    fn trefoil_has_no_loop() { 
        let mut d = trefoil();
        let mut w = Worklist::new();
        for c in 0..3 { 
            assert!(!reidemeister_i(&mut d, &mut w, c).unwrap());
        }
        assert_eq!(d.counters().r_i, 0);
        assert!(w.is_empty());
    }
}
