use std::fmt::Display;

use crate::diagram::Diagram;
use crate::error::DiagramError;
use crate::types::{End, Io, Side};

/// An arc together with a direction of travel. `forward` follows the 
/// orientation of the arc, from its tail to its head.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Darc { 
    pub arc: usize,
    pub forward: bool,
}

impl Darc { 
    pub fn new(arc: usize, forward: bool) -> Self { 
        Darc { arc, forward }
    }

    pub fn flip(&self) -> Self { 
        Darc::new(self.arc, !self.forward)
    }

    /// The end of the arc this darc travels toward.
    pub fn target(&self) -> End { 
        if self.forward { End::Head } else { End::Tail }
    }
}

impl Display for Darc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.forward { '+' } else { '-' };
        write!(f, "{sign}{}", self.arc)
    }
}

// ports in counterclockwise order: OutR, OutL, InL, InR.
fn cw_next(io: Io, side: Side) -> (Io, Side) { 
    match (io, side) { 
        (Io::Out, Side::Right) => (Io::In,  Side::Right),
        (Io::In,  Side::Right) => (Io::In,  Side::Left),
        (Io::In,  Side::Left)  => (Io::Out, Side::Left),
        (Io::Out, Side::Left)  => (Io::Out, Side::Right),
    }
}

fn ccw_next(io: Io, side: Side) -> (Io, Side) { 
    match (io, side) { 
        (Io::In,  Side::Right) => (Io::Out, Side::Right),
        (Io::In,  Side::Left)  => (Io::In,  Side::Right),
        (Io::Out, Side::Left)  => (Io::In,  Side::Left),
        (Io::Out, Side::Right) => (Io::Out, Side::Left),
    }
}

impl Diagram { 
    /// The crossing `d` arrives at, and the port it arrives through.
    pub fn darc_port(&self, d: Darc) -> Result<(usize, Io, Side), DiagramError> { 
        self.check_arc(d.arc)?;
        let end = d.target();
        let c = self.cross(d.arc, end);
        let side = self.arc_side(d.arc, end)?;
        Ok((c, end.io(), side))
    }

    fn turn(&self, d: Darc, next: fn(Io, Side) -> (Io, Side)) -> Result<Darc, DiagramError> { 
        let (c, io, side) = self.darc_port(d)?;
        let (io, side) = next(io, side);
        let a = self.slot(c, io, side);
        Ok(Darc::new(a, io == Io::Out))
    }

    /// Leaves the crossing `d` arrives at through the next port clockwise. 
    /// Iterating traces the boundary of a face.
    pub fn left_darc(&self, d: Darc) -> Result<Darc, DiagramError> { 
        self.turn(d, cw_next)
    }

    /// Leaves the crossing `d` arrives at through the next port 
    /// counterclockwise.
    pub fn right_darc(&self, d: Darc) -> Result<Darc, DiagramError> { 
        self.turn(d, ccw_next)
    }

    /// The faces of the diagram as cycles of darcs under [`Self::left_darc`]. 
    /// Every darc of an active arc lies in exactly one face.
    pub fn faces(&self) -> Result<Vec<Vec<Darc>>, DiagramError> { 
        self.cached(|c| &mut c.faces, |d| { 
            let m = d.max_arc_count();
            let mut seen = vec![[false; 2]; m];
            let mut faces = vec![];

            for a in d.arcs() { 
                for forward in [true, false] { 
                    if seen[a][forward as usize] { 
                        continue
                    }

                    let d0 = Darc::new(a, forward);
                    let mut face = vec![];
                    let mut e = d0;

                    loop { 
                        if seen[e.arc][e.forward as usize] { 
                            return Err(DiagramError::Invalid(format!("face through {d0} does not close")))
                        }
                        seen[e.arc][e.forward as usize] = true;
                        face.push(e);

                        e = d.left_darc(e)?;
                        if e == d0 { 
                            break
                        }
                    }

                    faces.push(face);
                }
            }

            Ok(faces)
        })
    }

    pub fn face_count(&self) -> Result<usize, DiagramError> { 
        Ok(self.faces()?.len())
    }

    /// No crossing is nugatory, i.e. meets the same face at two opposite 
    /// corners.
    pub fn is_reduced(&self) -> Result<bool, DiagramError> { 
        let faces = self.faces()?;
        let mut face_of = vec![[0; 2]; self.max_arc_count()];
        for (f, face) in faces.iter().enumerate() { 
            for e in face { 
                face_of[e.arc][e.forward as usize] = f;
            }
        }

        // the corner after an arriving darc belongs to that darc's face.
        let corner = |c: usize, io: Io, side: Side| { 
            let a = self.slot(c, io, side);
            face_of[a][(io == Io::In) as usize]
        };

        for c in self.crossings() { 
            if corner(c, Io::Out, Side::Right) == corner(c, Io::In, Side::Left) 
            || corner(c, Io::In, Side::Right) == corner(c, Io::Out, Side::Left) { 
                return Ok(false)
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests { 
    use itertools::Itertools;

    use super::*;
    use crate::braid::from_braid;
    use crate::diagram::tests::{curl, trefoil};
    use crate::types::Handedness;

    fn all_darcs(d: &Diagram) -> Vec<Darc> { 
        d.arcs().flat_map(|a| [Darc::new(a, true), Darc::new(a, false)]).collect()
    }

    #[test]
    fn flip() { 
        let d = Darc::new(3, true);
        assert_eq!(d.flip(), Darc::new(3, false));
        assert_eq!(d.flip().flip(), d);
        assert_eq!(d.to_string(), "+3");
        assert_eq!(d.flip().to_string(), "-3");
    }

    #[test]
    fn turns_invert() { 
        let d = trefoil();
        for e in all_darcs(&d) { 
            let f = d.left_darc(e).unwrap();
            assert_eq!(d.right_darc(f.flip()).unwrap(), e.flip());
        }
    }

    #[test]
    fn trefoil_faces() { 
        let d = trefoil();
        let faces = d.faces().unwrap();
        assert_eq!(faces.len(), 5);
        assert_eq!(faces.iter().map(|f| f.len()).sum::<usize>(), 12);

        let mut sizes = faces.iter().map(|f| f.len()).collect_vec();
        sizes.sort();
        assert_eq!(sizes, vec![2, 2, 2, 3, 3]);
    }

    #[test]
    fn curl_faces() { 
        let d = curl(Handedness::LeftHanded);
        assert_eq!(d.face_count().unwrap(), 3);
    }

    #[test]
    fn reduced() { 
        assert!(trefoil().is_reduced().unwrap());
        assert!(from_braid(3, &[1, -2, 1, -2]).unwrap().is_reduced().unwrap());
        assert!(!curl(Handedness::RightHanded).is_reduced().unwrap());
        assert!(!from_braid(3, &[1, 1, 1, 2]).unwrap().is_reduced().unwrap());
    }

    #[test]
    fn euler() { 
        for (s, w) in [(3, vec![1, -2, 1, -2]), (4, vec![1, 2, 3, -1, 2, -3, 2]), (2, vec![1, 1, 1, 1, 1])] { 
            let d = from_braid(s, &w).unwrap();
            assert_eq!(d.face_count().unwrap(), d.crossing_count() + 2);
        }
    }

    #[test]
    fn every_darc_once() { 
        let d = from_braid(3, &[1, -2, 1, -2]).unwrap();
        let faces = d.faces().unwrap();
        let darcs = faces.iter().flatten().copied().sorted_by_key(|e| (e.arc, e.forward)).collect_vec();
        let all = all_darcs(&d).into_iter().sorted_by_key(|e| (e.arc, e.forward)).collect_vec();
        assert_eq!(darcs, all);
    }
}
