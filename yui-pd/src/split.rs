use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, trace};

use crate::diagram::Diagram;
use crate::error::DiagramError;
use crate::types::{End, Io, Side};
use crate::worklist::Worklist;

impl Diagram { 
    /// Arcs of each connected component of the underlying 4-valent graph, 
    /// ordered by their smallest arc.
    pub fn diagram_components(&self) -> Result<Vec<Vec<usize>>, DiagramError> { 
        self.cached(|c| &mut c.diagram_components, |d| { 
            let n = d.max_crossing_count();
            let mut comp_of = vec![usize::MAX; n];
            let mut count = 0;

            for c0 in d.crossings() { 
                if comp_of[c0] != usize::MAX { 
                    continue
                }
                comp_of[c0] = count;
                let mut stack = vec![c0];

                while let Some(c) = stack.pop() { 
                    for io in [Io::Out, Io::In] { 
                        for side in Side::BOTH { 
                            let a = d.slot(c, io, side);
                            for end in [End::Tail, End::Head] { 
                                let c1 = d.cross(a, end);
                                if comp_of[c1] == usize::MAX { 
                                    comp_of[c1] = count;
                                    stack.push(c1);
                                }
                            }
                        }
                    }
                }
                count += 1;
            }

            let mut comps = vec![vec![]; count];
            for a in d.arcs() { 
                comps[comp_of[d.tail(a)]].push(a);
            }
            comps.sort_by_key(|arcs| arcs.first().copied());

            Ok(comps)
        })
    }

    pub fn diagram_component_count(&self) -> Result<usize, DiagramError> { 
        Ok(self.diagram_components()?.len())
    }

    /// Compressed copies of the diagram components. The first piece keeps 
    /// the unlink count and the move counters.
    pub fn split_components(&self) -> Result<Vec<Diagram>, DiagramError> { 
        if self.crossing_count() == 0 { 
            return Ok(vec![self.create_compressed()?])
        }

        let mut pieces = vec![];
        for (i, arcs) in self.diagram_components()?.iter().enumerate() { 
            let mut p = self.compress_from(arcs.iter().copied(), arcs.len() / 2)?;
            if i > 0 { 
                p.reset_stats();
                p.set_proven_minimal(false);
            }
            pieces.push(p);
        }

        Ok(pieces)
    }

    /// Two distinct arcs `(a, b)` bounding the same two faces, such that 
    /// cutting both separates the diagram with `head(a)` and `tail(b)` on 
    /// one side.
    pub fn separating_pair(&self) -> Result<Option<(usize, usize)>, DiagramError> { 
        let faces = self.faces()?;

        let mut face_of = vec![[0; 2]; self.max_arc_count()];
        for (f, face) in faces.iter().enumerate() { 
            for e in face { 
                face_of[e.arc][e.forward as usize] = f;
            }
        }

        let mut shared: IndexMap<(usize, usize), Vec<usize>> = IndexMap::new();
        for a in self.arcs() { 
            let [f, g] = face_of[a];
            if f != g { 
                shared.entry((f.min(g), f.max(g))).or_default().push(a);
            }
        }

        for ((f, g), arcs) in shared.iter() { 
            if arcs.len() < 2 { 
                continue
            }
            let (a, b) = (arcs[0], arcs[1]);
            if self.separates(a, b) { 
                trace!("faces {f}, {g} share arcs {arcs:?}.");
                return Ok(Some((a, b)))
            }
        }

        Ok(None)
    }

    // whether removing a and b leaves head(a), tail(b) apart from tail(a), head(b).
    fn separates(&self, a: usize, b: usize) -> bool { 
        let mut seen = vec![false; self.max_crossing_count()];
        let c0 = self.head(a);
        seen[c0] = true;
        let mut stack = vec![c0];

        while let Some(c) = stack.pop() { 
            for x in self.crossing_arcs(c).iter().flatten() { 
                if *x == a || *x == b { 
                    continue
                }
                for c1 in [self.tail(*x), self.head(*x)] { 
                    if !seen[c1] { 
                        seen[c1] = true;
                        stack.push(c1);
                    }
                }
            }
        }

        seen[self.tail(b)] && !seen[self.tail(a)] && !seen[self.head(b)]
    }

    /// Splits off a connected summand if a separating pair exists. 
    /// Returns the compressed pieces.
    pub fn split_summand(&mut self) -> Result<Option<Vec<Diagram>>, DiagramError> { 
        let Some((a, b)) = self.separating_pair()? else { 
            return Ok(None)
        };

        debug!("split at arcs {a}, {b}.");

        let mut touched = Worklist::new();
        self.exchange_heads(a, b, &mut touched)?;
        self.counters_mut().split += 1;

        let pieces = self.split_components()?;
        debug!("pieces: {}.", pieces.iter().map(|p| p.crossing_count()).join(", "));

        Ok(Some(pieces))
    }
}
