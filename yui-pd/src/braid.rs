use itertools::Itertools;

use crate::diagram::{CrossingArcs, Diagram};
use crate::error::DiagramError;
use crate::types::{End, Handedness, Io, Side};

/// The closure of a braid on `strands` strands. Letter `i` stands for 
/// the right-handed generator between strands `|i|` and `|i| + 1` 
/// (1-based), a negative letter for its inverse. Crossing `k` is letter 
/// `k`, and its outgoing arcs are `2k` (left) and `2k + 1` (right).
pub fn from_braid(strands: usize, word: &[i32]) -> Result<Diagram, DiagramError> { 
    if word.is_empty() { 
        return Err(DiagramError::InvalidBraid("empty braid word".into()))
    }

    let n = word.len();
    let m = strands + 2 * n;

    let mut c_arcs: Vec<CrossingArcs> = vec![[[0; 2]; 2]; n];
    let mut c_state = vec![Handedness::Inactive; n];
    let mut a_cross = vec![[0; 2]; m];

    // arcs 0..strands stand for the bottom ends until the braid is closed.
    let mut cur = (0..strands).collect_vec();
    let mut first: Vec<Option<(usize, Side)>> = vec![None; strands];

    for (k, &l) in word.iter().enumerate() { 
        let i = l.unsigned_abs() as usize;
        if i == 0 || i >= strands { 
            return Err(DiagramError::InvalidBraid(format!(
                "letter {l} out of range for {strands} strands"
            )))
        }

        let p = i - 1;
        for (side, q) in [(Side::Left, p), (Side::Right, p + 1)] { 
            let a = cur[q];
            if a < strands { 
                first[q] = Some((k, side));
            } else { 
                a_cross[a][End::Head as usize] = k;
            }
            c_arcs[k][Io::In as usize][side as usize] = a;
        }

        let (ol, or) = (strands + 2 * k, strands + 2 * k + 1);
        c_arcs[k][Io::Out as usize] = [ol, or];
        a_cross[ol][End::Tail as usize] = k;
        a_cross[or][End::Tail as usize] = k;

        cur[p] = ol;
        cur[p + 1] = or;
        c_state[k] = Handedness::from_right_handed(l > 0);
    }

    for (q, &a) in cur.iter().enumerate() { 
        let Some((k, side)) = first[q] else { 
            return Err(DiagramError::InvalidBraid(format!("strand {} never crosses", q + 1)))
        };
        c_arcs[k][Io::In as usize][side as usize] = a;
        a_cross[a][End::Head as usize] = k;
    }

    for row in c_arcs.iter_mut() { 
        for slots in row.iter_mut() { 
            for a in slots.iter_mut() { 
                *a -= strands;
            }
        }
    }
    let a_cross = a_cross.split_off(strands);

    Diagram::from_tables(c_arcs, c_state, a_cross)
}

impl Diagram { 
    pub fn from_braid(strands: usize, word: &[i32]) -> Result<Self, DiagramError> { 
        from_braid(strands, word)
    }
}
