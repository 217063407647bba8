use crate::diagram::Diagram;
use crate::error::DiagramError;
use crate::types::End;
use crate::worklist::Worklist;

impl Diagram { 
    /// Redirects the given end of arc `a` to the crossing where `b` ends,
    /// taking over the slot of `b` there. `b` is left in place and is 
    /// expected to be deactivated by the caller. The crossing is pushed 
    /// onto `touched`.
    pub fn reconnect(&mut self, a: usize, end: End, b: usize, touched: &mut Worklist) -> Result<(), DiagramError> { 
        if a == b { 
            return Err(DiagramError::SameArc(a))
        }
        self.check_arc(a)?;
        self.check_arc(b)?;

        let c = self.cross(b, end);
        self.check_crossing(c)?;

        let side = self.arc_side(b, end)?;

        self.set_cross(a, end, c);
        self.set_slot(c, end.io(), side, a);
        touched.push(c);

        Ok(())
    }

    /// Exchanges the heads of `a` and `b`, each taking over the slot of the other.
    pub fn exchange_heads(&mut self, a: usize, b: usize, touched: &mut Worklist) -> Result<(), DiagramError> { 
        if a == b { 
            return Err(DiagramError::SameArc(a))
        }
        self.check_arc(a)?;
        self.check_arc(b)?;

        let (ca, cb) = (self.head(a), self.head(b));
        self.check_crossing(ca)?;
        self.check_crossing(cb)?;

        let sa = self.arc_side(a, End::Head)?;
        let sb = self.arc_side(b, End::Head)?;

        self.set_cross(a, End::Head, cb);
        self.set_cross(b, End::Head, ca);
        self.set_slot(cb, End::Head.io(), sb, a);
        self.set_slot(ca, End::Head.io(), sa, b);

        touched.push(ca);
        touched.push(cb);

        Ok(())
    }
}

#[cfg(test)]
mod tests { 
    use super::*;
    use crate::diagram::tests::{curl, trefoil};
    use crate::types::{Handedness, Io, Side};

    #[test]
    fn reconnect_head() { 
        let mut d = trefoil();
        let mut w = Worklist::new();

        // 0 -> 3 -> 4: send 0 straight to the head of 3
        assert_eq!(d.next_arc(0).unwrap(), 3);
        d.reconnect(0, End::Head, 3, &mut w).unwrap();

        assert_eq!(d.head(0), 1);
        assert_eq!(d.slot(1, Io::In, Side::Right), 0);
        assert_eq!(d.next_arc(0).unwrap(), 4);
        assert_eq!(w.pop(), Some(1));
    }

    #[test]
    fn reconnect_preconditions() { 
        let mut d = trefoil();
        let mut w = Worklist::new();

        assert_eq!(d.reconnect(2, End::Tail, 2, &mut w), Err(DiagramError::SameArc(2)));

        d.deactivate_arc(5).unwrap();
        assert_eq!(d.reconnect(2, End::Tail, 5, &mut w), Err(DiagramError::InactiveArc(5)));
        assert_eq!(d.reconnect(5, End::Tail, 2, &mut w), Err(DiagramError::InactiveArc(5)));
        assert!(d.reconnect(2, End::Tail, 17, &mut w).is_err());
        assert!(w.is_empty());
    }

    #[test]
    fn reconnect_inactive_crossing() { 
        let mut d = curl(Handedness::RightHanded);
        let mut w = Worklist::new();
        d.deactivate_arc(0).unwrap();
        d.deactivate_arc(1).unwrap();
        d.deactivate_crossing(0).unwrap();

        // revive arc 1 by hand so only the crossing is inactive
        d.set_arc(1, 0, 0);
        d.set_arc(0, 0, 0);
        assert_eq!(d.reconnect(0, End::Head, 1, &mut w), Err(DiagramError::InactiveCrossing(0)));
    }

    #[test]
    fn exchange() { 
        let mut d = trefoil();
        let mut w = Worklist::new();

        // arcs 2 and 4 enter crossings 1 and 2 from the left
        d.exchange_heads(2, 4, &mut w).unwrap();
        assert_eq!(d.head(2), 2);
        assert_eq!(d.head(4), 1);
        assert_eq!(d.slot(2, Io::In, Side::Left), 2);
        assert_eq!(d.slot(1, Io::In, Side::Left), 4);
        assert!(d.check().is_ok());
    }
}
