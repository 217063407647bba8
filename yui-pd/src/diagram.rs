use std::cell::RefCell;
use std::fmt::Display;

use itertools::Itertools;
use log::warn;

use crate::cache::Cache;
use crate::error::DiagramError;
use crate::types::{End, Handedness, Io, Side};

pub type CrossingArcs = [[usize; 2]; 2];

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct MoveCounters { 
    pub r_i: usize,
    pub r_ia: usize,
    pub r_ii: usize,
    pub r_iia: usize,
    pub strand: usize,
    pub split: usize,
}

impl MoveCounters { 
    pub fn total(&self) -> usize { 
        self.r_i + self.r_ia + self.r_ii + self.r_iia + self.strand + self.split
    }

    pub fn add(&mut self, other: &MoveCounters) { 
        self.r_i    += other.r_i;
        self.r_ia   += other.r_ia;
        self.r_ii   += other.r_ii;
        self.r_iia  += other.r_iia;
        self.strand += other.strand;
        self.split  += other.split;
    }
}

impl Display for MoveCounters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R_I: {}, R_Ia: {}, R_II: {}, R_IIa: {}, strand: {}, split: {}", 
            self.r_i, self.r_ia, self.r_ii, self.r_iia, self.strand, self.split
        )
    }
}

/// A planar diagram stored as index tables.
/// 
/// `c_arcs[c][io][side]` lists the arcs at crossing `c`, where `Out` slots 
/// hold arcs leaving `c` and `In` slots hold arcs entering it. 
/// `a_cross[a][end]` lists the crossings at the tail and head of arc `a`.
/// Strands pass straight through a crossing: `In/Left -> Out/Right` and 
/// `In/Right -> Out/Left`. At a right-handed crossing the over-strand 
/// enters through `In/Left`.
#[derive(Clone, Debug, Default)]
pub struct Diagram { 
    c_arcs: Vec<CrossingArcs>,
    c_state: Vec<Handedness>,
    a_cross: Vec<[usize; 2]>,
    a_active: Vec<bool>,
    crossing_count: usize,
    arc_count: usize,
    unlink_count: usize,
    counters: MoveCounters,
    generation: u64,
    proven_minimal: bool,
    pub(crate) cache: RefCell<Cache>,
}

impl Diagram { 
    /// Builds a diagram from raw slot tables. Every crossing must be active.
    pub fn from_tables(c_arcs: Vec<CrossingArcs>, c_state: Vec<Handedness>, a_cross: Vec<[usize; 2]>) -> Result<Self, DiagramError> { 
        if c_arcs.len() != c_state.len() { 
            return Err(DiagramError::Invalid(format!(
                "{} slot rows for {} crossing states", c_arcs.len(), c_state.len()
            )))
        }

        let crossing_count = c_state.iter().filter(|s| s.is_active()).count();
        let a_active = vec![true; a_cross.len()];
        let arc_count = a_cross.len();

        let d = Diagram { 
            c_arcs, 
            c_state, 
            a_cross, 
            a_active, 
            crossing_count, 
            arc_count, 
            ..Default::default() 
        };

        d.check()?;
        Ok(d)
    }

    /// A diagram with `n` crossings and `2n` arcs, all inactive.
    pub(crate) fn with_capacity(n: usize) -> Self { 
        Diagram { 
            c_arcs: vec![[[0; 2]; 2]; n],
            c_state: vec![Handedness::Inactive; n],
            a_cross: vec![[0; 2]; 2 * n],
            a_active: vec![false; 2 * n],
            ..Default::default()
        }
    }

    /// The canonical zero-crossing placeholder of the unknot.
    pub fn unknot() -> Self { 
        Diagram::default()
    }

    pub fn is_unknot(&self) -> bool { 
        self.crossing_count == 0
    }

    pub fn crossing_count(&self) -> usize { 
        self.crossing_count
    }

    pub fn arc_count(&self) -> usize { 
        self.arc_count
    }

    pub fn max_crossing_count(&self) -> usize { 
        self.c_state.len()
    }

    pub fn max_arc_count(&self) -> usize { 
        self.a_cross.len()
    }

    pub fn unlink_count(&self) -> usize { 
        self.unlink_count
    }

    pub fn counters(&self) -> &MoveCounters { 
        &self.counters
    }

    pub fn generation(&self) -> u64 { 
        self.generation
    }

    pub fn proven_minimal(&self) -> bool { 
        self.proven_minimal
    }

    pub(crate) fn set_proven_minimal(&mut self, flag: bool) { 
        self.proven_minimal = flag
    }

    pub(crate) fn counters_mut(&mut self) -> &mut MoveCounters { 
        &mut self.counters
    }

    pub(crate) fn add_unlinks(&mut self, n: usize) { 
        self.unlink_count += n;
        self.touch();
    }

    /// Removes one counted unlink, if any.
    pub(crate) fn take_unlink(&mut self) -> bool { 
        if self.unlink_count == 0 { 
            return false
        }
        self.unlink_count -= 1;
        true
    }

    pub(crate) fn take_stats_from(&mut self, other: &Diagram) { 
        self.unlink_count = other.unlink_count;
        self.counters = other.counters;
    }

    pub(crate) fn reset_stats(&mut self) { 
        self.unlink_count = 0;
        self.counters = MoveCounters::default();
    }

    /// Advances the mutation generation, invalidating cached data.
    pub(crate) fn touch(&mut self) { 
        self.generation += 1;
    }

    pub fn clear_cache(&mut self) { 
        self.cache.get_mut().clear();
    }

    pub fn crossing_active(&self, c: usize) -> bool { 
        c < self.c_state.len() && self.c_state[c].is_active()
    }

    pub fn arc_active(&self, a: usize) -> bool { 
        a < self.a_active.len() && self.a_active[a]
    }

    pub fn crossings(&self) -> impl Iterator<Item = usize> + '_ { 
        (0..self.c_state.len()).filter(|&c| self.c_state[c].is_active())
    }

    pub fn arcs(&self) -> impl Iterator<Item = usize> + '_ { 
        (0..self.a_active.len()).filter(|&a| self.a_active[a])
    }

    pub fn state(&self, c: usize) -> Handedness { 
        self.c_state.get(c).copied().unwrap_or_default()
    }

    pub fn crossing_arcs(&self, c: usize) -> &CrossingArcs { 
        &self.c_arcs[c]
    }

    /// The arc in slot `[io][side]` of crossing `c`.
    pub fn slot(&self, c: usize, io: Io, side: Side) -> usize { 
        self.c_arcs[c][io as usize][side as usize]
    }

    pub(crate) fn set_slot(&mut self, c: usize, io: Io, side: Side, a: usize) { 
        self.c_arcs[c][io as usize][side as usize] = a;
        self.touch();
    }

    /// Overwrites all slots of `c` and activates it with the given sign.
    pub(crate) fn set_crossing(&mut self, c: usize, arcs: CrossingArcs, state: Handedness) { 
        self.c_arcs[c] = arcs;
        self.activate_crossing(c, state);
    }

    /// Turns the slots of `c` one step, keeping their cyclic order. 
    /// `Right` moves `In/Left -> In/Right -> Out/Right -> Out/Left -> In/Left`, 
    /// `Left` the other way round. The sign is left unchanged.
    pub(crate) fn rotate_crossing(&mut self, c: usize, dir: Side) { 
        let [[ol, or], [il, ir]] = self.c_arcs[c];
        self.c_arcs[c] = match dir { 
            Side::Right => [[or, ir], [ol, il]],
            Side::Left  => [[il, ol], [ir, or]],
        };
        self.touch();
    }

    pub(crate) fn activate_crossing(&mut self, c: usize, state: Handedness) { 
        if !self.c_state[c].is_active() && state.is_active() { 
            self.crossing_count += 1;
        }
        self.c_state[c] = state;
        self.touch();
    }

    /// The crossing at the given end of arc `a`.
    pub fn cross(&self, a: usize, end: End) -> usize { 
        self.a_cross[a][end as usize]
    }

    pub fn tail(&self, a: usize) -> usize { 
        self.cross(a, End::Tail)
    }

    pub fn head(&self, a: usize) -> usize { 
        self.cross(a, End::Head)
    }

    pub(crate) fn set_cross(&mut self, a: usize, end: End, c: usize) { 
        self.a_cross[a][end as usize] = c;
        self.touch();
    }

    pub(crate) fn set_arc(&mut self, a: usize, tail: usize, head: usize) { 
        if !self.a_active[a] { 
            self.arc_count += 1;
            self.a_active[a] = true;
        }
        self.a_cross[a] = [tail, head];
        self.touch();
    }

    /// Appends a fresh inactive crossing and returns its index.
    pub(crate) fn push_crossing(&mut self) -> usize { 
        self.c_arcs.push([[0; 2]; 2]);
        self.c_state.push(Handedness::Inactive);
        self.c_state.len() - 1
    }

    /// Appends a fresh inactive arc and returns its index.
    pub(crate) fn push_arc(&mut self) -> usize { 
        self.a_cross.push([0; 2]);
        self.a_active.push(false);
        self.a_active.len() - 1
    }

    pub fn check_crossing(&self, c: usize) -> Result<(), DiagramError> { 
        if c >= self.c_state.len() { 
            Err(DiagramError::IndexOutOfRange { kind: "crossing", index: c, len: self.c_state.len() })
        } else if !self.c_state[c].is_active() { 
            Err(DiagramError::InactiveCrossing(c))
        } else { 
            Ok(())
        }
    }

    pub fn check_arc(&self, a: usize) -> Result<(), DiagramError> { 
        if a >= self.a_active.len() { 
            Err(DiagramError::IndexOutOfRange { kind: "arc", index: a, len: self.a_active.len() })
        } else if !self.a_active[a] { 
            Err(DiagramError::InactiveArc(a))
        } else { 
            Ok(())
        }
    }

    /// Deactivates crossing `c`. Every active arc listed in its slots 
    /// must already have been rerouted away from it.
    pub fn deactivate_crossing(&mut self, c: usize) -> Result<(), DiagramError> { 
        if c >= self.c_state.len() { 
            return Err(DiagramError::IndexOutOfRange { kind: "crossing", index: c, len: self.c_state.len() })
        }
        if !self.c_state[c].is_active() { 
            warn!("crossing {c} is already inactive.");
            return Ok(())
        }

        for io in [Io::Out, Io::In] { 
            let end = if io == Io::Out { End::Tail } else { End::Head };
            for side in Side::BOTH { 
                let a = self.slot(c, io, side);
                if self.arc_active(a) && self.cross(a, end) == c { 
                    return Err(DiagramError::Invalid(format!(
                        "deactivating crossing {c} while arc {a} still ends at it"
                    )))
                }
            }
        }

        self.c_state[c] = Handedness::Inactive;
        self.crossing_count -= 1;
        self.touch();
        Ok(())
    }

    pub fn deactivate_arc(&mut self, a: usize) -> Result<(), DiagramError> { 
        if a >= self.a_active.len() { 
            return Err(DiagramError::IndexOutOfRange { kind: "arc", index: a, len: self.a_active.len() })
        }
        if !self.a_active[a] { 
            warn!("arc {a} is already inactive.");
            return Ok(())
        }

        self.a_active[a] = false;
        self.arc_count -= 1;
        self.touch();
        Ok(())
    }

    /// The side of the slot that arc `a` occupies at the given end.
    pub fn arc_side(&self, a: usize, end: End) -> Result<Side, DiagramError> { 
        let c = self.cross(a, end);
        let io = end.io();
        if self.slot(c, io, Side::Left) == a { 
            Ok(Side::Left)
        } else if self.slot(c, io, Side::Right) == a { 
            Ok(Side::Right)
        } else { 
            Err(DiagramError::SlotMismatch { c, a })
        }
    }

    /// The arc that continues `a` through its head.
    pub fn next_arc(&self, a: usize) -> Result<usize, DiagramError> { 
        let c = self.head(a);
        let side = self.arc_side(a, End::Head)?;
        Ok(self.slot(c, Io::Out, side.flip()))
    }

    /// The arc that continues into `a` through its tail.
    pub fn prev_arc(&self, a: usize) -> Result<usize, DiagramError> { 
        let c = self.tail(a);
        let side = self.arc_side(a, End::Tail)?;
        Ok(self.slot(c, Io::In, side.flip()))
    }

    /// Whether `a` is part of the over-strand at the given end.
    pub fn arc_over(&self, a: usize, end: End) -> Result<bool, DiagramError> { 
        let c = self.cross(a, end);
        let side = self.arc_side(a, end)?;
        let rh = self.state(c).is_right_handed();
        Ok(match end { 
            End::Head => (side == Side::Left) == rh,
            End::Tail => (side == Side::Right) == rh,
        })
    }

    pub fn writhe(&self) -> i32 { 
        self.crossings().map(|c| self.state(c).sign()).sum()
    }

    /// Every arc goes over at one end and under at the other.
    pub fn is_alternating(&self) -> Result<bool, DiagramError> { 
        for a in self.arcs() { 
            if self.arc_over(a, End::Tail)? == self.arc_over(a, End::Head)? { 
                return Ok(false)
            }
        }
        Ok(true)
    }

    /// The mirror image: every crossing changes sign.
    pub fn mirror(&self) -> Self { 
        let mut d = self.clone();
        d.c_state = self.c_state.iter().map(|s| s.mirror()).collect();
        d.touch();
        d
    }

    /// Reverses the orientation of `arcs`, which must consist of whole 
    /// link components. Slots are relabeled so that the geometry is kept, 
    /// and a crossing changes sign when exactly one of its strands turns.
    pub fn reverse_arcs(&mut self, arcs: &[usize]) -> Result<(), DiagramError> { 
        let mut rev = vec![false; self.max_arc_count()];
        for &a in arcs { 
            self.check_arc(a)?;
            rev[a] = true;
        }

        let cs = arcs.iter().flat_map(|&a| self.a_cross[a]).unique().collect_vec();

        if let Some(&c) = cs.iter().find(|&&c| { 
            let [[ol, or], [il, ir]] = self.c_arcs[c];
            rev[il] != rev[or] || rev[ir] != rev[ol]
        }) { 
            return Err(DiagramError::Invalid(format!(
                "arcs to reverse split a strand at crossing {c}"
            )))
        }

        for &c in cs.iter() { 
            let [[ol, or], [il, ir]] = self.c_arcs[c];
            let (s1, s2) = (rev[il], rev[ir]);

            let state = self.c_state[c];
            let (arcs, state) = match (s1, s2) { 
                (true,  false) => ([[il, ol], [ir, or]], state.mirror()),
                (false, true ) => ([[or, ir], [ol, il]], state.mirror()),
                (true,  true ) => ([[ir, il], [or, ol]], state),
                (false, false) => continue
            };

            self.c_arcs[c] = arcs;
            self.c_state[c] = state;
        }

        for a in arcs.iter().copied().unique() { 
            self.a_cross[a].swap(0, 1);
        }

        self.touch();
        Ok(())
    }

    /// Verifies the cross-reference invariants between the slot tables.
    pub fn check(&self) -> Result<(), DiagramError> { 
        let n = self.c_state.len();
        let m = self.a_active.len();

        for c in self.crossings() { 
            for io in [Io::Out, Io::In] { 
                let end = if io == Io::Out { End::Tail } else { End::Head };
                for side in Side::BOTH { 
                    let a = self.slot(c, io, side);
                    if a >= m { 
                        return Err(DiagramError::IndexOutOfRange { kind: "arc", index: a, len: m })
                    }
                    if !self.a_active[a] { 
                        return Err(DiagramError::Invalid(format!("crossing {c} lists inactive arc {a}")))
                    }
                    if self.cross(a, end) != c { 
                        return Err(DiagramError::SlotMismatch { c, a })
                    }
                }
            }
            if self.slot(c, Io::Out, Side::Left) == self.slot(c, Io::Out, Side::Right) 
            || self.slot(c, Io::In, Side::Left) == self.slot(c, Io::In, Side::Right) { 
                return Err(DiagramError::Invalid(format!("crossing {c} lists an arc twice on one row")))
            }
        }

        for a in self.arcs() { 
            for end in [End::Tail, End::Head] { 
                let c = self.cross(a, end);
                if c >= n { 
                    return Err(DiagramError::IndexOutOfRange { kind: "crossing", index: c, len: n })
                }
                if !self.c_state[c].is_active() { 
                    return Err(DiagramError::Invalid(format!("arc {a} ends at inactive crossing {c}")))
                }
                self.arc_side(a, end)?;
            }
        }

        let crossing_count = self.crossings().count();
        let arc_count = self.arcs().count();

        if crossing_count != self.crossing_count || arc_count != self.arc_count { 
            return Err(DiagramError::Invalid(format!(
                "live counts ({}, {}) differ from recorded ({}, {})", 
                crossing_count, arc_count, self.crossing_count, self.arc_count
            )))
        }
        if arc_count != 2 * crossing_count { 
            return Err(DiagramError::Invalid(format!(
                "{arc_count} arcs for {crossing_count} crossings"
            )))
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool { 
        self.check().is_ok()
    }
}

impl Display for Diagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unknot() { 
            return write!(f, "Unknot")
        }
        let cs = self.crossings().map(|c| { 
            let [[ol, or], [il, ir]] = self.c_arcs[c];
            format!("{c}{}: ({il}, {ir}) -> ({ol}, {or})", self.c_state[c])
        }).join(", ");
        write!(f, "[{cs}]")
    }
}

#[cfg(test)]
pub(crate) mod tests { 
    use super::*;
    use Handedness::*;

    // closure of the braid s1^3
    pub(crate) fn trefoil() -> Diagram { 
        Diagram::from_tables(
            vec![
                [[2, 3], [0, 1]],
                [[4, 5], [2, 3]],
                [[0, 1], [4, 5]],
            ],
            vec![RightHanded; 3], 
            vec![[2, 0], [2, 0], [0, 1], [0, 1], [1, 2], [1, 2]]
        ).unwrap()
    }

    // one crossing with two loops, an unknot
    pub(crate) fn curl(state: Handedness) -> Diagram { 
        Diagram::from_tables(
            vec![[[0, 1], [0, 1]]],
            vec![state], 
            vec![[0, 0], [0, 0]]
        ).unwrap()
    }

    #[test]
    fn from_tables() { 
        let d = trefoil();
        assert_eq!(d.crossing_count(), 3);
        assert_eq!(d.arc_count(), 6);
        assert_eq!(d.writhe(), 3);
        assert!(d.is_valid());
    }

    #[test]
    fn from_tables_invalid() { 
        let res = Diagram::from_tables(
            vec![[[0, 1], [1, 0]]],
            vec![RightHanded], 
            vec![[0, 0], [0, 1]]
        );
        assert!(res.is_err());
    }

    #[test]
    fn next_prev() { 
        let d = trefoil();
        for a in d.arcs() { 
            let b = d.next_arc(a).unwrap();
            assert_eq!(d.prev_arc(b).unwrap(), a);
            assert_eq!(d.head(a), d.tail(b));
        }
    }

    #[test]
    fn trefoil_alternating() { 
        let d = trefoil();
        assert!(d.is_alternating().unwrap());
    }

    #[test]
    fn deactivate_idempotent() { 
        let mut d = curl(RightHanded);
        d.deactivate_arc(0).unwrap();
        d.deactivate_arc(1).unwrap();
        d.deactivate_arc(1).unwrap();
        assert_eq!(d.arc_count(), 0);

        d.deactivate_crossing(0).unwrap();
        d.deactivate_crossing(0).unwrap();
        assert_eq!(d.crossing_count(), 0);
        assert!(d.deactivate_crossing(5).is_err());
    }

    #[test]
    fn deactivate_referenced_crossing() { 
        let mut d = curl(RightHanded);
        assert!(d.deactivate_crossing(0).is_err());
        assert_eq!(d.crossing_count(), 1);
    }

    #[test]
    fn mirror() { 
        let d = trefoil().mirror();
        assert_eq!(d.writhe(), -3);
        assert!(d.is_valid());
    }

    #[test]
    fn reverse_knot() { 
        let mut d = trefoil();
        let arcs = d.arcs().collect_vec();
        d.reverse_arcs(&arcs).unwrap();
        assert!(d.is_valid());
        assert_eq!(d.writhe(), 3);
        assert!(d.is_alternating().unwrap());
        assert_eq!(d.tail(0), 0);
        assert_eq!(d.head(0), 2);
    }

    #[test]
    fn reverse_component() { 
        let mut d = crate::braid::from_braid(2, &[1, 1]).unwrap();
        let comps = d.link_components().unwrap();
        assert_eq!(comps.len(), 2);

        d.reverse_arcs(&comps[1]).unwrap();
        assert!(d.is_valid());
        assert_eq!(d.writhe(), -2);
        assert_eq!(d.link_component_count().unwrap(), 2);
    }

    #[test]
    fn reverse_partial_strand() { 
        let mut d = trefoil();
        assert!(d.reverse_arcs(&[0]).is_err());
    }
}
