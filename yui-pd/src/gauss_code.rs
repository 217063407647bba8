use log::error;
use num_traits::{NumCast, PrimInt, Signed};

use crate::diagram::{CrossingArcs, Diagram};
use crate::error::DiagramError;
use crate::types::{End, Handedness, Io, Side};

fn cast<T: PrimInt>(value: usize) -> Result<T, DiagramError> { 
    <T as NumCast>::from(value).ok_or(DiagramError::WidthOverflow { 
        value, 
        type_name: std::any::type_name::<T>() 
    })
}

impl Diagram { 
    /// The crossings met along each component, one entry per arc in 
    /// traversal order: `label + 1` for the tail crossing of the arc, 
    /// negated when the arc leaves it under.
    pub fn gauss_code<T>(&self) -> Result<Vec<T>, DiagramError>
    where T: PrimInt + Signed { 
        let mut code = vec![];
        self.traverse(0..self.max_arc_count(), |_, _| Ok(()), |s| { 
            let x = cast::<T>(s.tail_pos + 1)?;
            let over = self.arc_over(s.arc, End::Tail)?;
            code.push(if over { x } else { -x });
            Ok(())
        }, |_, _, _| Ok(())).map_err(|e| { 
            error!("cannot export Gauss code: {e}");
            e
        })?;
        Ok(code)
    }

    /// Like [`Self::gauss_code`], but each entry packs the tail crossing 
    /// label with the side of the arc's outgoing slot and whether it 
    /// leaves over: `(label << 2) | (right << 1) | over`. Together with 
    /// the component lengths this determines the diagram.
    pub fn oriented_gauss_code<T>(&self) -> Result<(Vec<T>, Vec<usize>), DiagramError>
    where T: PrimInt { 
        let mut code = vec![];
        let mut lengths = vec![];

        self.traverse(0..self.max_arc_count(), |_, _| Ok(()), |s| { 
            let right = self.arc_side(s.arc, End::Tail)?.is_right();
            let over = self.arc_over(s.arc, End::Tail)?;
            let x = (s.tail_pos << 2) | ((right as usize) << 1) | (over as usize);
            code.push(cast::<T>(x)?);
            Ok(())
        }, |_, begin, end| { 
            lengths.push(end - begin);
            Ok(())
        }).map_err(|e| { 
            error!("cannot export oriented Gauss code: {e}");
            e
        })?;

        Ok((code, lengths))
    }

    /// Rebuilds a diagram from an oriented Gauss code. Arc `i` is the 
    /// `i`-th entry, and crossing labels become crossing indices.
    pub fn from_oriented_gauss_code<T>(code: &[T], component_lengths: &[usize]) -> Result<Self, DiagramError>
    where T: PrimInt { 
        let m = code.len();
        if component_lengths.iter().sum::<usize>() != m || component_lengths.contains(&0) { 
            return Err(DiagramError::InvalidGaussCode(format!(
                "component lengths {component_lengths:?} do not add up to {m}"
            )))
        }
        if m == 0 { 
            return Ok(Diagram::unknot())
        }
        if m % 2 != 0 { 
            return Err(DiagramError::InvalidGaussCode(format!("odd length {m}")))
        }

        let n = m / 2;
        let mut entries = vec![];
        for x in code { 
            let x = x.to_usize().ok_or_else(|| 
                DiagramError::InvalidGaussCode("negative entry".into())
            )?;
            let (label, right, over) = (x >> 2, x & 2 != 0, x & 1 != 0);
            if label >= n { 
                return Err(DiagramError::InvalidGaussCode(format!("label {label} out of range")))
            }
            entries.push((label, Side::from_right(right), over));
        }

        let mut c_arcs: Vec<CrossingArcs> = vec![[[0; 2]; 2]; n];
        let mut c_state = vec![Handedness::Inactive; n];
        let mut a_cross = vec![[0; 2]; m];

        let mut begin = 0;
        for &len in component_lengths { 
            for i in begin .. begin + len { 
                let next = if i + 1 == begin + len { begin } else { i + 1 };
                let (c0, side, over) = entries[i];
                let (c1, next_side, _) = entries[next];

                // leaving over through the right slot means right-handed.
                let state = Handedness::from_right_handed(side.is_right() == over);
                if c_state[c0].is_active() && c_state[c0] != state { 
                    return Err(DiagramError::InvalidGaussCode(format!("crossing {c0} has two signs")))
                }
                c_state[c0] = state;

                a_cross[i] = [c0, c1];
                c_arcs[c0][Io::Out as usize][side as usize] = i;
                c_arcs[c1][Io::In as usize][next_side.flip() as usize] = i;
            }
            begin += len;
        }

        Diagram::from_tables(c_arcs, c_state, a_cross)
    }
}
