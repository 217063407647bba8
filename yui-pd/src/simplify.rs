use std::collections::VecDeque;

use delegate::delegate;
use itertools::Itertools;
use log::{info, warn};

use crate::diagram::{Diagram, MoveCounters};
use crate::error::DiagramError;
use crate::moves::{drain, simplify_local};
use crate::strand::StrandSimplifier;
use crate::worklist::Worklist;

#[derive(Clone, Debug)]
pub struct SimplifyArgs { 
    pub local_moves: bool,
    pub strand_moves: bool,
    pub start_max_dist: usize,
    pub final_max_dist: usize,
    pub split: bool,
    pub compress: bool,
    pub max_rounds: usize,
}

impl Default for SimplifyArgs { 
    fn default() -> Self { 
        SimplifyArgs { 
            local_moves: true,
            strand_moves: true,
            start_max_dist: 2,
            final_max_dist: usize::MAX,
            split: true,
            compress: true,
            max_rounds: usize::MAX,
        }
    }
}

/// The outcome of [`simplify`]: the remaining diagrams, largest first, and 
/// the number of unknotted unlinked components split off on the way. A 
/// zero-crossing diagram stands for a single unknot.
#[derive(Clone, Debug, Default)]
pub struct Simplified { 
    diagrams: Vec<Diagram>,
    unlink_count: usize,
    counters: MoveCounters,
}

impl Simplified { 
    fn new(mut diagrams: Vec<Diagram>) -> Self { 
        diagrams.sort_by_key(|d| std::cmp::Reverse(d.crossing_count()));

        let unlink_count = diagrams.iter().map(|d| d.unlink_count()).sum();
        let mut counters = MoveCounters::default();
        for d in diagrams.iter() { 
            counters.add(d.counters());
        }

        Simplified { diagrams, unlink_count, counters }
    }

    pub fn diagrams(&self) -> &[Diagram] { 
        &self.diagrams
    }

    pub fn into_diagrams(self) -> Vec<Diagram> { 
        self.diagrams
    }

    pub fn unlink_count(&self) -> usize { 
        self.unlink_count
    }

    pub fn counters(&self) -> &MoveCounters { 
        &self.counters
    }

    pub fn crossing_count(&self) -> usize { 
        self.diagrams.iter().map(|d| d.crossing_count()).sum()
    }

    /// Number of link components represented, unlinks included. The two 
    /// summands of a split share the component running through both.
    pub fn component_count(&self) -> Result<usize, DiagramError> { 
        let mut n = self.unlink_count;
        for d in self.diagrams.iter() { 
            n += if d.is_unknot() { 1 } else { d.link_component_count()? };
        }
        Ok(n - self.counters.split)
    }

    delegate! { 
        to self.diagrams { 
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn iter(&self) -> std::slice::Iter<'_, Diagram>;
        }
    }
}

impl IntoIterator for Simplified { 
    type Item = Diagram;
    type IntoIter = std::vec::IntoIter<Diagram>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagrams.into_iter()
    }
}

/// Simplifies `d` until no move applies, splitting off diagram components 
/// and connected summands into separate diagrams.
pub fn simplify(d: Diagram, args: &SimplifyArgs) -> Result<Simplified, DiagramError> { 
    let mut queue = VecDeque::from([d]);
    let mut done = vec![];

    while let Some(mut d) = queue.pop_front() { 
        info!("take diagram with {} crossings, {} queued, {} done.", d.crossing_count(), queue.len(), done.len());

        if d.is_unknot() { 
            done.push(into_placeholder(d));
            continue
        }
        if d.proven_minimal() { 
            done.push(d);
            continue
        }

        simplify_diagram(&mut d, args)?;

        if d.is_unknot() { 
            done.push(into_placeholder(d));
            continue
        }

        if d.diagram_component_count()? > 1 { 
            let pieces = d.split_components()?;
            info!("split into {} components.", pieces.len());
            queue.extend(pieces);
            continue
        }

        if args.split { 
            if let Some(pieces) = d.split_summand()? { 
                info!("split summands: {}.", pieces.iter().map(|p| p.crossing_count()).join(" + "));
                queue.extend(pieces);
                continue
            }
        }

        if d.is_reduced()? && d.is_alternating()? { 
            d.set_proven_minimal(true);
        }
        if args.compress { 
            d.compress()?;
        }

        done.push(d);
    }

    let res = Simplified::new(done);
    info!("simplified to {} diagrams, {} crossings, {} unlinks ({}).", 
        res.len(), res.crossing_count(), res.unlink_count(), res.counters()
    );

    Ok(res)
}

/// Rounds of local moves and strand passes until a round changes nothing 
/// at the largest search radius.
pub fn simplify_diagram(d: &mut Diagram, args: &SimplifyArgs) -> Result<(), DiagramError> { 
    d.clear_cache();

    let mut touched = Worklist::new();
    let mut max_dist = usize::min(args.start_max_dist, args.final_max_dist);
    let mut over  = StrandSimplifier::new(true,  max_dist);
    let mut under = StrandSimplifier::new(false, max_dist);

    for round in 0..args.max_rounds { 
        let mut changes = 0;

        if args.local_moves { 
            changes += simplify_local(d, &mut touched, usize::MAX)?;
        }

        if args.strand_moves { 
            for s in [&mut over, &mut under] { 
                s.set_max_dist(max_dist);
                changes += s.run(d, &mut touched)?;
                if args.local_moves { 
                    changes += drain(d, &mut touched)?;
                }
            }
        }

        touched.clear();

        info!("round {round}: {changes} changes, {} crossings, max_dist = {max_dist}.", d.crossing_count());

        if d.is_unknot() { 
            break
        }

        let cap = usize::min(args.final_max_dist, d.arc_count());
        if changes == 0 { 
            if !args.strand_moves || max_dist >= cap { 
                break
            }
            max_dist = max_dist.saturating_mul(2).max(1).min(cap);
        }
    }

    Ok(())
}

// a zero-crossing diagram stands for one of the unlinks it counted.
fn into_placeholder(d: Diagram) -> Diagram { 
    let mut u = Diagram::unknot();
    u.take_stats_from(&d);
    if d.max_arc_count() > 0 && !u.take_unlink() { 
        warn!("diagram vanished without counting an unlink.");
    }
    u
}

impl Diagram { 
    pub fn simplify(self, args: &SimplifyArgs) -> Result<Simplified, DiagramError> { 
        simplify(self, args)
    }
}

#[cfg(test)]
mod tests { 
    use super::*;
    use crate::braid::from_braid;
    use crate::diagram::tests::trefoil;

    #[test]
    fn trefoil_minimal() { 
        let res = trefoil().simplify(&SimplifyArgs::default()).unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res.crossing_count(), 3);
        assert_eq!(res.unlink_count(), 0);
        assert!(res.diagrams()[0].proven_minimal());
        assert!(res.diagrams()[0].is_compressed().unwrap());
    }

    #[test]
    fn unknot() { 
        let d = from_braid(4, &[1, -2, 3, 1, -1]).unwrap();
        let res = d.simplify(&SimplifyArgs::default()).unwrap();
        assert_eq!(res.len(), 1);
        assert!(res.diagrams()[0].is_unknot());
        assert_eq!(res.unlink_count(), 0);
        assert_eq!(res.component_count().unwrap(), 1);
        assert!(res.counters().total() > 0);
    }

    #[test]
    fn unlink() { 
        let d = from_braid(2, &[1, -1]).unwrap();
        let res = d.simplify(&SimplifyArgs::default()).unwrap();
        assert_eq!(res.crossing_count(), 0);
        assert_eq!(res.unlink_count(), 1);
        assert_eq!(res.component_count().unwrap(), 2);
    }

    #[test]
    fn granny() { 
        let d = from_braid(3, &[1, 1, 1, 2, 2, 2]).unwrap();
        let res = d.simplify(&SimplifyArgs::default()).unwrap();
        assert_eq!(res.len(), 2);
        assert!(res.iter().all(|p| p.crossing_count() == 3 && p.proven_minimal()));
        assert_eq!(res.counters().split, 1);
    }

    #[test]
    fn no_split() { 
        let args = SimplifyArgs { split: false, ..Default::default() };
        let res = from_braid(3, &[1, 1, 1, 2, 2, 2]).unwrap().simplify(&args).unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res.crossing_count(), 6);
        assert!(!res.diagrams()[0].proven_minimal());
    }

    #[test]
    fn sorted() { 
        let d = from_braid(3, &[1, 1, 1, 1, 1, -2, -2, -2]).unwrap();
        let res = d.simplify(&SimplifyArgs::default()).unwrap();
        let counts = res.iter().map(|d| d.crossing_count()).collect_vec();
        assert_eq!(counts, vec![5, 3]);
    }

    #[test]
    fn nothing_enabled() { 
        let args = SimplifyArgs { 
            local_moves: false, 
            strand_moves: false, 
            split: false, 
            compress: false, 
            ..Default::default() 
        };
        let d = from_braid(3, &[1, 2, -2, 1]).unwrap();
        let res = d.simplify(&args).unwrap();
        assert_eq!(res.crossing_count(), 4);
        assert_eq!(res.counters().total(), 0);
    }
}
