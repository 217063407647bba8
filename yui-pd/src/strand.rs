use std::collections::HashMap;

use itertools::Itertools;
use log::{debug, trace};

use crate::darc::Darc;
use crate::diagram::Diagram;
use crate::error::DiagramError;
use crate::types::{End, Handedness, Io, Side};
use crate::worklist::Worklist;

/// Reroutes maximal over- (or under-) strands along shortest paths in the 
/// dual graph. A strand of `k` arcs passes `k - 1` crossings on the same 
/// level; it is replaced when a path crossing fewer arcs exists.
#[derive(Clone, Debug)]
pub struct StrandSimplifier { 
    over: bool,
    max_dist: usize,
    a_mark: Vec<u64>,
    tag: u64,
    visited: Vec<bool>,
}

impl StrandSimplifier { 
    pub fn new(over: bool, max_dist: usize) -> Self { 
        StrandSimplifier { over, max_dist, a_mark: vec![], tag: 0, visited: vec![] }
    }

    pub fn set_max_dist(&mut self, max_dist: usize) { 
        self.max_dist = max_dist
    }

    /// One pass over all strands. Returns the number of changes made.
    pub fn run(&mut self, d: &mut Diagram, touched: &mut Worklist) -> Result<usize, DiagramError> { 
        let mut changes = self.lift_components(d, touched)?;

        self.visited = vec![false; d.max_arc_count()];

        let mut a0 = 0;
        while a0 < d.max_arc_count() { 
            if d.arc_active(a0) && !self.is_visited(a0) && !self.passes(d, d.prev_arc(a0)?)? { 
                let s = self.collect(d, a0)?;
                if self.reroute(d, touched, &s)? { 
                    changes += 1;
                }
            }
            a0 += 1;
        }

        debug!("{} strands within {}: {changes} changes, {} crossings left.", 
            if self.over { "over" } else { "under" }, 
            self.max_dist,
            d.crossing_count()
        );

        Ok(changes)
    }

    fn mark(&mut self, arcs: &[usize], m: usize) { 
        self.tag += 1;
        if self.a_mark.len() < m { 
            self.a_mark.resize(m, 0);
        }
        for &a in arcs { 
            self.a_mark[a] = self.tag;
        }
    }

    fn marked(&self, a: usize) -> bool { 
        self.a_mark.get(a) == Some(&self.tag)
    }

    // arcs created during this pass count as visited.
    fn is_visited(&self, a: usize) -> bool { 
        self.visited.get(a).copied().unwrap_or(true)
    }

    // whether `a` stays on the strand's level at its head.
    fn passes(&self, d: &Diagram, a: usize) -> Result<bool, DiagramError> { 
        Ok(d.arc_over(a, End::Head)? == self.over)
    }

    fn collect(&mut self, d: &Diagram, a0: usize) -> Result<Vec<usize>, DiagramError> { 
        let mut s = vec![a0];
        let mut a = a0;

        while self.passes(d, a)? { 
            a = d.next_arc(a)?;
            if a == a0 || s.len() > d.arc_count() { 
                return Err(DiagramError::Invalid(format!("strand from {a0} does not end")))
            }
            s.push(a);
        }

        for &a in s.iter() { 
            if a < self.visited.len() { 
                self.visited[a] = true;
            }
        }

        Ok(s)
    }

    /// Lifts off every link component that stays on the strand's level at 
    /// all of its crossings. Such a component is split from the rest and 
    /// counted as an unlink, as is any loop left without crossings.
    fn lift_components(&mut self, d: &mut Diagram, touched: &mut Worklist) -> Result<usize, DiagramError> { 
        let mut count = 0;

        loop { 
            let comps = d.link_components()?;
            let mut found = None;
            for comp in comps { 
                if comp.iter().map(|&a| self.passes(d, a)).process_results(|mut it| it.all(|p| p))? { 
                    found = Some(comp);
                    break
                }
            }

            let Some(comp) = found else { 
                break
            };

            self.lift(d, touched, &comp)?;
            count += 1;
        }

        Ok(count)
    }

    fn lift(&mut self, d: &mut Diagram, touched: &mut Worklist, comp: &[usize]) -> Result<(), DiagramError> { 
        self.mark(comp, d.max_arc_count());

        let xs = comp.iter().map(|&a| d.head(a)).collect_vec();
        let mut free = 0;

        for &x in xs.iter() { 
            let u = self.other_slot(d, x, Io::In);
            let v = self.other_slot(d, x, Io::Out);

            if u == v { 
                d.deactivate_arc(u)?;
                free += 1;
                continue
            }

            let h = d.head(v);
            let side = d.arc_side(v, End::Head)?;
            d.set_cross(u, End::Head, h);
            d.set_slot(h, Io::In, side, u);
            d.deactivate_arc(v)?;
            touched.push(h);
        }

        for &a in comp { 
            d.deactivate_arc(a)?;
        }
        for &x in xs.iter() { 
            d.deactivate_crossing(x)?;
        }

        debug!("lifted component {comp:?} off {} crossings, {free} free loops.", xs.len());

        d.add_unlinks(1 + free);
        d.counters_mut().strand += 1;

        Ok(())
    }

    // the slot of `x` on the given row not held by a marked arc.
    fn other_slot(&self, d: &Diagram, x: usize, io: Io) -> usize { 
        let l = d.slot(x, io, Side::Left);
        if self.marked(l) { d.slot(x, io, Side::Right) } else { l }
    }

    fn reroute(&mut self, d: &mut Diagram, touched: &mut Worklist, s: &[usize]) -> Result<bool, DiagramError> { 
        let k = s.len();
        if k < 2 { 
            return Ok(false)
        }

        let xs = std::iter::once(d.tail(s[0])).chain(s.iter().map(|&a| d.head(a))).collect_vec();
        let (x0, xk) = (xs[0], xs[k]);
        let inner = &xs[1..k];

        if x0 == xk || !inner.iter().all_unique() || inner.iter().any(|&x| x == x0 || x == xk) { 
            trace!("skip strand {s:?}: it meets itself.");
            return Ok(false)
        }

        self.mark(s, d.max_arc_count());

        let uv = inner.iter().map(|&x| 
            (self.other_slot(d, x, Io::In), self.other_slot(d, x, Io::Out))
        ).collect_vec();

        if has_cycle(&uv) { 
            trace!("skip strand {s:?}: a crossing strand closes up under it.");
            return Ok(false)
        }

        let limit = usize::min(k - 2, self.max_dist);
        let Some(path) = self.shortest_path(d, s, limit)? else { 
            return Ok(false)
        };

        debug!("reroute strand {s:?} across {} arcs instead of {}.", path.len(), k - 1);

        self.splice(d, touched, s, &xs, &path)?;
        Ok(true)
    }

    /// Arcs to cross, in order, on a shortest path from the region around 
    /// the first arc of `s` to the region around its last arc, with the 
    /// faces on both sides of every strand arc merged. Distant pieces of 
    /// the diagram are placed side by side, each in one face of the others.
    fn shortest_path(&self, d: &Diagram, s: &[usize], limit: usize) -> Result<Option<Vec<Darc>>, DiagramError> { 
        let faces = d.faces()?;
        let n = faces.len();

        let mut face_of = vec![[0; 2]; d.max_arc_count()];
        for (f, face) in faces.iter().enumerate() { 
            for e in face { 
                face_of[e.arc][e.forward as usize] = f;
            }
        }

        let mut uf = (0..n).collect_vec();
        for &a in s { 
            let (f, g) = (find(&mut uf, face_of[a][0]), find(&mut uf, face_of[a][1]));
            uf[f] = g;
        }

        // the left face of the first arc of each piece bounds the common region.
        let outer = d.diagram_components()?.iter().filter_map(|arcs| 
            arcs.first().map(|&a| face_of[a][1])
        ).collect_vec();
        for w in outer.windows(2) { 
            let (f, g) = (find(&mut uf, w[0]), find(&mut uf, w[1]));
            uf[f] = g;
        }

        let region = (0..n).map(|f| find(&mut uf, f)).collect_vec();
        let start  = region[face_of[s[0]][1]];
        let target = region[face_of[s[s.len() - 1]][1]];

        if start == target { 
            return Ok(Some(vec![]))
        }

        let mut members = vec![vec![]; n];
        for f in 0..n { 
            members[region[f]].push(f);
        }

        let mut from: Vec<Option<(usize, Darc)>> = vec![None; n];
        let mut seen = vec![false; n];
        seen[start] = true;

        let mut front = vec![start];
        let mut layer = 0;

        while !front.is_empty() && layer < limit { 
            let mut next = vec![];

            for &r in front.iter() { 
                for &f in members[r].iter() { 
                    for &e in faces[f].iter() { 
                        if self.marked(e.arc) { 
                            continue
                        }

                        let r2 = region[face_of[e.arc][!e.forward as usize]];
                        if seen[r2] { 
                            continue
                        }

                        seen[r2] = true;
                        from[r2] = Some((r, e));

                        if r2 == target { 
                            let mut path = vec![];
                            let mut r = r2;
                            while let Some((p, e)) = from[r] { 
                                path.push(e);
                                r = p;
                            }
                            path.reverse();
                            return Ok(Some(path))
                        }

                        next.push(r2);
                    }
                }
            }

            front = next;
            layer += 1;
        }

        Ok(None)
    }

    // replaces the strand `s` through `xs` by a new one crossing `path`.
    fn splice(&mut self, d: &mut Diagram, touched: &mut Worklist, s: &[usize], xs: &[usize], path: &[Darc]) -> Result<(), DiagramError> { 
        let k = s.len();
        let (x0, xk) = (xs[0], xs[k]);
        let side0 = d.arc_side(s[0], End::Tail)?;
        let sidek = d.arc_side(s[k - 1], End::Head)?;

        let t = (0..=path.len()).map(|_| d.push_arc()).collect_vec();
        let y = (0..path.len()).map(|_| d.push_crossing()).collect_vec();

        for (j, e) in path.iter().enumerate() { 
            let b = e.arc;
            let b2 = d.push_arc();

            let h = d.head(b);
            let side = d.arc_side(b, End::Head)?;
            d.set_arc(b2, y[j], h);
            d.set_slot(h, Io::In, side, b2);
            d.set_cross(b, End::Head, y[j]);

            // the new strand crosses b from its left when e runs forward.
            let (arcs, rh) = if e.forward { 
                ([[b2, t[j + 1]], [t[j], b]], self.over)
            } else { 
                ([[t[j + 1], b2], [b, t[j]]], !self.over)
            };
            d.set_crossing(y[j], arcs, Handedness::from_right_handed(rh));
            touched.push(h);
        }

        for i in 0..t.len() { 
            let tail = if i == 0 { x0 } else { y[i - 1] };
            let head = if i == path.len() { xk } else { y[i] };
            d.set_arc(t[i], tail, head);
        }
        d.set_slot(x0, Io::Out, side0, t[0]);
        d.set_slot(xk, Io::In,  sidek, t[path.len()]);

        for &x in xs[1..k].iter() { 
            let u = self.other_slot(d, x, Io::In);
            let v = self.other_slot(d, x, Io::Out);

            let h = d.head(v);
            let side = d.arc_side(v, End::Head)?;
            d.set_cross(u, End::Head, h);
            d.set_slot(h, Io::In, side, u);
            d.deactivate_arc(v)?;
            touched.push(h);
        }

        for &a in s { 
            d.deactivate_arc(a)?;
        }
        for &x in xs[1..k].iter() { 
            d.deactivate_crossing(x)?;
        }

        touched.push(x0);
        touched.push(xk);
        touched.extend(y.iter().copied());

        d.counters_mut().strand += 1;

        Ok(())
    }
}

fn find(uf: &mut [usize], mut x: usize) -> usize { 
    while uf[x] != x { 
        uf[x] = uf[uf[x]];
        x = uf[x];
    }
    x
}

// whether the crossing strands (in, out) chain up into a closed loop.
fn has_cycle(uv: &[(usize, usize)]) -> bool { 
    let by_in: HashMap<usize, usize> = uv.iter().enumerate().map(|(i, &(u, _))| (u, i)).collect();

    for i in 0..uv.len() { 
        let mut j = i;
        for _ in 0..uv.len() { 
            match by_in.get(&uv[j].1) { 
                Some(&next) if next == i => return true,
                Some(&next) => j = next,
                None => break
            }
        }
    }
    false
}

/// Runs one pass of strand rerouting. Returns the number of changes.
pub fn simplify_strands(d: &mut Diagram, touched: &mut Worklist, over: bool, max_dist: usize) -> Result<usize, DiagramError> { 
    StrandSimplifier::new(over, max_dist).run(d, touched)
}
