use grouping_by::GroupingBy;
use indexmap::IndexMap;
use itertools::Itertools;
use log::error;

use crate::diagram::{CrossingArcs, Diagram};
use crate::error::DiagramError;
use crate::types::{End, Handedness, Io, Side};

pub type PdLabel = i64;

/// Slots of a crossing in PD order: counterclockwise, starting from the 
/// incoming under-strand.
fn pd_slots(state: Handedness) -> [(Io, Side); 4] { 
    use Io::*;
    use Side::*;
    if state.is_right_handed() { 
        [(In, Right), (Out, Right), (Out, Left), (In, Left)]
    } else { 
        [(In, Left), (In, Right), (Out, Right), (Out, Left)]
    }
}

/// Guesses the sign of `X[i, j, k, l]` from its labels, assuming labels 
/// increase along each component and wrap around at its end.
pub fn infer_handedness(x: &[PdLabel; 4]) -> Result<Handedness, DiagramError> { 
    let [i, j, k, l] = *x;
    if i == j || k == l || j == l + 1 || l > j + 1 { 
        Ok(Handedness::RightHanded)
    } else if i == l || j == k || l == j + 1 || j > l + 1 { 
        Ok(Handedness::LeftHanded)
    } else { 
        Err(DiagramError::InvalidPdCode(format!("cannot decide the sign of X{x:?}")))
    }
}

impl Diagram { 
    /// Builds a diagram from unsigned PD tuples, inferring signs from the 
    /// label order. Use [`Self::from_signed_pd_code`] when the labels do 
    /// not follow the components.
    pub fn from_pd_code(code: &[[PdLabel; 4]]) -> Result<Self, DiagramError> { 
        let states = code.iter().map(infer_handedness).try_collect()?;
        Self::from_pd_with_states(code, states)
    }

    /// Builds a diagram from PD tuples carrying the sign (`1` or `-1`) 
    /// as a fifth entry.
    pub fn from_signed_pd_code(code: &[[PdLabel; 5]]) -> Result<Self, DiagramError> { 
        let mut xs = vec![];
        let mut states = vec![];

        for x in code { 
            let state = match x[4] { 
                 1 => Handedness::RightHanded,
                -1 => Handedness::LeftHanded,
                 s => return Err(DiagramError::InvalidPdCode(format!("bad sign {s} in {x:?}")))
            };
            xs.push([x[0], x[1], x[2], x[3]]);
            states.push(state);
        }

        Self::from_pd_with_states(&xs, states)
    }

    fn from_pd_with_states(code: &[[PdLabel; 4]], states: Vec<Handedness>) -> Result<Self, DiagramError> { 
        if code.is_empty() { 
            return Ok(Diagram::unknot())
        }

        let counts = code.iter().flatten().counter(|x| **x);
        if let Some((l, n)) = counts.iter().find(|(_, &n)| n != 2) { 
            return Err(DiagramError::InvalidPdCode(format!("label {l} appears {n} times")))
        }

        // relabel in increasing order.
        let labels: IndexMap<PdLabel, usize> = code.iter().flatten().copied().sorted().dedup().enumerate().map(|(a, l)| (l, a)).collect();

        let n = code.len();
        let m = labels.len();

        let mut c_arcs: Vec<CrossingArcs> = vec![[[0; 2]; 2]; n];
        let mut a_cross = vec![[usize::MAX; 2]; m];

        for (c, (x, &state)) in code.iter().zip(states.iter()).enumerate() { 
            for (&l, (io, side)) in x.iter().zip(pd_slots(state)) { 
                let a = labels[&l];
                let end = if io == Io::Out { End::Tail } else { End::Head };
                if a_cross[a][end as usize] != usize::MAX { 
                    return Err(DiagramError::InvalidPdCode(format!(
                        "label {l} is the {} of two strands", if io == Io::Out { "start" } else { "end" }
                    )))
                }
                a_cross[a][end as usize] = c;
                c_arcs[c][io as usize][side as usize] = a;
            }
        }

        Diagram::from_tables(c_arcs, states, a_cross)
    }

    /// Unsigned PD code, labelled `1..=2n` in traversal order.
    pub fn pd_code(&self) -> Result<Vec<[PdLabel; 4]>, DiagramError> { 
        Ok(self.signed_pd_code()?.into_iter().map(|x| [x[0], x[1], x[2], x[3]]).collect())
    }

    /// PD code with the sign of each crossing as a fifth entry.
    pub fn signed_pd_code(&self) -> Result<Vec<[PdLabel; 5]>, DiagramError> { 
        let d = self.create_compressed().map_err(|e| { 
            error!("cannot export PD code: {e}");
            e
        })?;

        let code = d.crossings().map(|c| { 
            let state = d.state(c);
            let slots = pd_slots(state);
            let mut x = [0; 5];
            for (i, (io, side)) in slots.into_iter().enumerate() { 
                x[i] = d.slot(c, io, side) as PdLabel + 1;
            }
            x[4] = state.sign() as PdLabel;
            x
        }).collect();

        Ok(code)
    }
}
