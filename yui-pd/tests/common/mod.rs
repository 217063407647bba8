#![allow(unused)]

use std::collections::BTreeMap;

use itertools::Itertools;
use proptest::prelude::*;
use yui_pd::{Diagram, Io, Side};

pub fn init_logger() { 
    use simplelog::*;
    let _ = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Always
    );
}

/// Laurent polynomial in `A`, exponent to coefficient.
pub type Laurent = BTreeMap<i32, i64>;

pub fn one() -> Laurent { 
    Laurent::from([(0, 1)])
}

pub fn mul(f: &Laurent, g: &Laurent) -> Laurent { 
    let mut h = Laurent::new();
    for (i, a) in f { 
        for (j, b) in g { 
            *h.entry(i + j).or_default() += a * b;
        }
    }
    h.retain(|_, c| *c != 0);
    h
}

pub fn pow(f: &Laurent, n: usize) -> Laurent { 
    (0..n).fold(one(), |g, _| mul(&g, f))
}

/// The value `-A^2 - A^{-2}` of a distant unknot.
pub fn delta() -> Laurent { 
    Laurent::from([(2, -1), (-2, -1)])
}

fn find(uf: &mut [usize], mut x: usize) -> usize { 
    while uf[x] != x { 
        uf[x] = uf[uf[x]];
        x = uf[x];
    }
    x
}

/// Kauffman bracket by the state sum, normalized to 1 on a single circle.
pub fn kauffman_bracket(d: &Diagram) -> Laurent { 
    let cs = d.crossings().collect_vec();
    let n = cs.len();
    let m = d.max_arc_count();
    let active = d.arcs().collect_vec();
    let delta = delta();

    let mut res = Laurent::new();

    for s in 0..(1usize << n) { 
        let mut uf = (0..m).collect_vec();
        let mut a_count = 0;

        for (i, &c) in cs.iter().enumerate() { 
            let a_smooth = (s >> i) & 1 == 0;
            if a_smooth { 
                a_count += 1;
            }

            let rh = d.state(c).is_right_handed();
            let pairs = if a_smooth == rh { 
                [((Io::Out, Side::Left), (Io::In, Side::Left)), ((Io::Out, Side::Right), (Io::In, Side::Right))]
            } else { 
                [((Io::Out, Side::Left), (Io::Out, Side::Right)), ((Io::In, Side::Left), (Io::In, Side::Right))]
            };

            for ((io0, s0), (io1, s1)) in pairs { 
                let x = find(&mut uf, d.slot(c, io0, s0));
                let y = find(&mut uf, d.slot(c, io1, s1));
                uf[x] = y;
            }
        }

        let loops = active.iter().filter(|&&a| find(&mut uf, a) == a).count();
        let b_count = n - a_count;
        let term = mul(
            &Laurent::from([(a_count as i32 - b_count as i32, 1)]), 
            &pow(&delta, loops - 1)
        );
        for (e, c) in term { 
            *res.entry(e).or_default() += c;
        }
    }

    res.retain(|_, c| *c != 0);
    res
}

/// `(-A^3)^{-w} <D>`, the Jones polynomial in the variable `A`. 
/// The zero-crossing placeholder gives 1.
pub fn jones(d: &Diagram) -> Laurent { 
    if d.is_unknot() { 
        return one()
    }
    let w = d.writhe();
    let sign = if w % 2 == 0 { 1 } else { -1 };
    mul(&Laurent::from([(-3 * w, sign)]), &kauffman_bracket(d))
}

/// Strands and a word whose closure uses every strand.
pub fn braid(max_strands: usize, max_len: usize) -> impl Strategy<Value = (usize, Vec<i32>)> { 
    (2..=max_strands).prop_flat_map(move |s| { 
        let letter = (1..s as i32, any::<bool>()).prop_map(|(i, pos)| if pos { i } else { -i });
        (Just(s), prop::collection::vec(letter, s..=max_len))
    }).prop_filter("every strand crosses", |(s, w)| 
        Diagram::from_braid(*s, w).is_ok()
    )
}

pub fn diagram(max_strands: usize, max_len: usize) -> impl Strategy<Value = Diagram> { 
    braid(max_strands, max_len).prop_filter_map("every strand crosses", |(s, w)| 
        Diagram::from_braid(s, &w).ok()
    )
}

/// A braid closure with a random subset of its components turned around.
pub fn reversed_diagram(max_strands: usize, max_len: usize) -> impl Strategy<Value = Diagram> { 
    (diagram(max_strands, max_len), prop::collection::vec(any::<bool>(), max_strands)).prop_map(|(mut d, flips)| { 
        let comps = d.link_components().unwrap();
        for (comp, _) in comps.iter().zip(flips).filter(|(_, f)| *f) { 
            d.reverse_arcs(comp).unwrap();
        }
        d
    })
}

pub fn knot(max_strands: usize, max_len: usize) -> impl Strategy<Value = Diagram> { 
    diagram(max_strands, max_len).prop_filter("a knot", |d| 
        d.link_component_count().map(|n| n == 1).unwrap_or(false)
    )
}
