use log::trace;

use crate::diagram::Diagram;
use crate::error::DiagramError;
use crate::types::{End, Io};

const UNSEEN: usize = usize::MAX;

/// One arc as reported by [`Diagram::traverse`]: old and new indices of the 
/// arc and of both its end crossings, and whether each crossing had already 
/// been numbered before this step.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ArcStep { 
    pub component: usize,
    pub arc: usize,
    pub arc_pos: usize,
    pub tail: usize,
    pub tail_pos: usize,
    pub tail_seen: bool,
    pub head: usize,
    pub head_pos: usize,
    pub head_seen: bool,
}

impl Diagram { 
    /// Walks every link component containing one of `starts`, in the order 
    /// given, numbering arcs and first-seen crossings consecutively. 
    /// `begin(component, first_pos)` and `end(component, first_pos, end_pos)` 
    /// bracket each component.
    pub fn traverse<I, B, F, E>(&self, starts: I, mut begin: B, mut arc_fn: F, mut end: E) -> Result<(), DiagramError>
    where 
        I: IntoIterator<Item = usize>,
        B: FnMut(usize, usize) -> Result<(), DiagramError>,
        F: FnMut(&ArcStep) -> Result<(), DiagramError>,
        E: FnMut(usize, usize, usize) -> Result<(), DiagramError>,
    { 
        let mut a_pos = vec![UNSEEN; self.max_arc_count()];
        let mut c_pos = vec![UNSEEN; self.max_crossing_count()];

        let mut a_counter = 0;
        let mut c_counter = 0;
        let mut lc = 0;

        for a0 in starts { 
            if !self.arc_active(a0) || a_pos[a0] != UNSEEN { 
                continue
            }

            let lc_begin = a_counter;
            begin(lc, lc_begin)?;

            let mut a = a0;
            let mut c1 = self.tail(a);
            self.check_crossing(c1)?;

            let mut c1_seen = c_pos[c1] != UNSEEN;
            if !c1_seen { 
                c_pos[c1] = c_counter;
                c_counter += 1;
            }

            loop { 
                a_pos[a] = a_counter;

                let (c0, c0_seen) = (c1, c1_seen);
                c1 = self.head(a);
                self.check_crossing(c1)?;

                c1_seen = c_pos[c1] != UNSEEN;
                if !c1_seen { 
                    c_pos[c1] = c_counter;
                    c_counter += 1;
                }

                arc_fn(&ArcStep { 
                    component: lc,
                    arc: a, 
                    arc_pos: a_counter, 
                    tail: c0, 
                    tail_pos: c_pos[c0], 
                    tail_seen: c0_seen, 
                    head: c1, 
                    head_pos: c_pos[c1], 
                    head_seen: c1_seen 
                })?;

                a_counter += 1;
                a = self.next_arc(a)?;

                if a == a0 { 
                    break
                }

                self.check_arc(a)?;
                if a_pos[a] != UNSEEN { 
                    return Err(DiagramError::Invalid(format!("traversal entered arc {a} twice")))
                }
            }

            end(lc, lc_begin, a_counter)?;
            lc += 1;
        }

        trace!("traversed {lc} components, {a_counter} arcs, {c_counter} crossings.");

        Ok(())
    }

    /// Arcs of each link component in traversal order.
    pub fn link_components(&self) -> Result<Vec<Vec<usize>>, DiagramError> { 
        self.cached(|c| &mut c.link_components, |d| { 
            let mut comps: Vec<Vec<usize>> = vec![];
            d.traverse(
                0..d.max_arc_count(), 
                |_, _| Ok(()), 
                |s| { 
                    if comps.len() <= s.component { 
                        comps.push(vec![])
                    }
                    comps[s.component].push(s.arc);
                    Ok(())
                },
                |_, _, _| Ok(())
            )?;
            Ok(comps)
        })
    }

    pub fn link_component_count(&self) -> Result<usize, DiagramError> { 
        Ok(self.link_components()?.len())
    }

    /// A copy with no inactive entries, renumbered in traversal order.
    pub fn create_compressed(&self) -> Result<Diagram, DiagramError> { 
        self.compress_from(0..self.max_arc_count(), self.crossing_count())
    }

    /// Compressed copy of the link components through `starts`, which must 
    /// have exactly `crossing_count` crossings.
    pub(crate) fn compress_from<I>(&self, starts: I, crossing_count: usize) -> Result<Diagram, DiagramError>
    where I: IntoIterator<Item = usize> { 
        let mut d = Diagram::with_capacity(crossing_count);

        if crossing_count > 0 { 
            self.traverse(starts, |_, _| Ok(()), |s| { 
                if s.tail_pos >= crossing_count || s.head_pos >= crossing_count || s.arc_pos >= 2 * crossing_count { 
                    return Err(DiagramError::Invalid(format!(
                        "more than {crossing_count} crossings reached while compressing"
                    )))
                }
                let side_t = self.arc_side(s.arc, End::Tail)?;
                let side_h = self.arc_side(s.arc, End::Head)?;

                d.set_arc(s.arc_pos, s.tail_pos, s.head_pos);
                d.activate_crossing(s.tail_pos, self.state(s.tail));
                d.set_slot(s.tail_pos, Io::Out, side_t, s.arc_pos);
                d.set_slot(s.head_pos, Io::In,  side_h, s.arc_pos);
                Ok(())
            }, |_, _, _| Ok(()))?;
        }

        d.take_stats_from(self);
        d.set_proven_minimal(self.proven_minimal());
        d.check()?;

        Ok(d)
    }

    /// Whether the diagram has no holes and every arc and tail crossing 
    /// already sits at its traversal position.
    pub fn is_compressed(&self) -> Result<bool, DiagramError> { 
        if self.max_arc_count() != self.arc_count() || self.max_crossing_count() != self.crossing_count() { 
            return Ok(false)
        }

        let mut ok = true;
        self.traverse(0..self.max_arc_count(), |_, _| Ok(()), |s| { 
            ok &= s.arc == s.arc_pos && s.tail == s.tail_pos;
            Ok(())
        }, |_, _, _| Ok(()))?;

        Ok(ok)
    }

    /// Replaces the diagram by its compressed copy unless it already is one.
    pub fn compress(&mut self) -> Result<(), DiagramError> { 
        if !self.is_compressed()? { 
            *self = self.create_compressed()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests { 
    use super::*;
    use crate::braid::from_braid;
    use crate::diagram::tests::trefoil;
    use crate::moves::simplify_local;
    use crate::worklist::Worklist;

    #[test]
    fn traverse_trefoil() { 
        let d = trefoil();
        let mut steps = vec![];
        let mut comps = vec![];
        d.traverse(0..6, |_, _| Ok(()), |s| { steps.push(*s); Ok(()) }, |lc, b, e| { comps.push((lc, b, e)); Ok(()) }).unwrap();

        assert_eq!(comps, vec![(0, 0, 6)]);
        assert_eq!(steps.iter().map(|s| s.arc).collect::<Vec<_>>(), vec![0, 3, 4, 1, 2, 5]);
        assert_eq!(steps[0].tail, 2);
        assert_eq!(steps[0].tail_pos, 0);
        assert!(!steps[0].tail_seen);
        assert!(steps[5].head_seen);
    }

    #[test]
    fn components() { 
        let d = from_braid(3, &[1, 1, 2, 2]).unwrap();
        let comps = d.link_components().unwrap();
        assert_eq!(comps.len(), 3);
        assert_eq!(comps.iter().map(|c| c.len()).sum::<usize>(), 8);
        assert_eq!(comps[0][0], 0);
    }

    #[test]
    fn components_follow_arcs() { 
        let d = from_braid(4, &[1, -1, 3, 3, 2, 2]).unwrap();
        let comps = d.link_components().unwrap();
        assert_eq!(comps.len(), d.link_component_count().unwrap());
        assert!(comps.iter().all(|c| !c.is_empty()));

        let mut all = comps.concat();
        all.sort();
        assert_eq!(all, d.arcs().collect::<Vec<_>>());

        for c in comps.iter() { 
            for (a, b) in c.iter().zip(c.iter().cycle().skip(1)) { 
                assert_eq!(d.next_arc(*a).unwrap(), *b);
            }
        }
    }

    #[test]
    fn compress_trefoil() { 
        let d = trefoil();
        let c = d.create_compressed().unwrap();
        assert!(c.is_compressed().unwrap());
        assert_eq!(c.crossing_count(), 3);
        assert_eq!(c.writhe(), 3);

        let cc = c.create_compressed().unwrap();
        for x in 0..3 { 
            assert_eq!(c.crossing_arcs(x), cc.crossing_arcs(x));
            assert_eq!(c.state(x), cc.state(x));
        }
    }

    #[test]
    fn compress_after_moves() { 
        let mut d = from_braid(3, &[1, 2, -2, 1, 2]).unwrap();
        let mut w = Worklist::new();
        simplify_local(&mut d, &mut w, usize::MAX).unwrap();
        assert!(!d.is_compressed().unwrap());

        let c = d.create_compressed().unwrap();
        assert_eq!(c.max_crossing_count(), d.crossing_count());
        assert_eq!(c.max_arc_count(), d.arc_count());
        assert_eq!(c.unlink_count(), d.unlink_count());
        assert_eq!(c.counters(), d.counters());
        assert!(c.is_compressed().unwrap());
    }

    #[test]
    fn compress_to_unknot() { 
        let mut d = from_braid(2, &[1, -1]).unwrap();
        let mut w = Worklist::new();
        simplify_local(&mut d, &mut w, usize::MAX).unwrap();

        d.compress().unwrap();
        assert!(d.is_unknot());
        assert_eq!(d.max_arc_count(), 0);
        assert_eq!(d.unlink_count(), 2);
    }
}
