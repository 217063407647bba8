mod r1;
mod r1a;
mod r2;
mod r2a;

use log::debug;

pub use r1::reidemeister_i;
pub use r1a::reidemeister_ia;
pub use r2::reidemeister_ii;
pub use r2a::{reidemeister_iia, reidemeister_iia_horizontal};

use crate::diagram::Diagram;
use crate::error::DiagramError;
use crate::worklist::Worklist;

/// A local rewrite tried at one crossing. Returns whether it applied.
pub type MoveRule = fn(&mut Diagram, &mut Worklist, usize) -> Result<bool, DiagramError>;

/// The local moves in the order they are tried.
pub const CATALOG: [(&str, MoveRule); 5] = [
    ("R_I",     reidemeister_i),
    ("R_II",    reidemeister_ii),
    ("R_Ia",    reidemeister_ia),
    ("R_IIa",   reidemeister_iia),
    ("R_IIa_h", reidemeister_iia_horizontal),
];

/// Tries each rule of the catalog at `c` until one applies.
pub fn apply_moves_at(d: &mut Diagram, touched: &mut Worklist, c: usize) -> Result<bool, DiagramError> { 
    for (name, rule) in CATALOG.iter() { 
        if !d.crossing_active(c) { 
            break
        }
        if rule(d, touched, c)? { 
            debug!("applied {name} at {c}, {} crossings left.", d.crossing_count());
            return Ok(true)
        }
    }
    Ok(false)
}

/// Applies the catalog over all crossings, and to crossings touched along 
/// the way, until a full pass changes nothing or `max_iter` passes are done.
/// Returns the number of applied moves.
pub fn simplify_local(d: &mut Diagram, touched: &mut Worklist, max_iter: usize) -> Result<usize, DiagramError> { 
    let mut total = 0;

    for i in 0..max_iter { 
        let mut count = 0;

        for c in 0..d.max_crossing_count() { 
            if d.crossing_active(c) && apply_moves_at(d, touched, c)? { 
                count += 1;
            }
            count += drain(d, touched)?;
        }

        debug!("local pass {i}: {count} moves, {} crossings.", d.crossing_count());

        total += count;
        if count == 0 { 
            break
        }
    }

    Ok(total)
}

/// Re-examines queued crossings until the queue is empty.
pub fn drain(d: &mut Diagram, touched: &mut Worklist) -> Result<usize, DiagramError> { 
    let mut count = 0;
    while let Some(c) = touched.pop() { 
        if d.crossing_active(c) && apply_moves_at(d, touched, c)? { 
            count += 1;
        }
    }
    Ok(count)
}
